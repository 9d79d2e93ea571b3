use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use ctxfind::cli::args::{Args, SearchArgs};
use ctxfind::config::{CtxfindConfig, OutputFormat};
use ctxfind::runner::SearchRunner;
use ctxfind::{Language, SearchType};

fn fixture(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("example")
        .join(relative)
}

fn search_args(search_type: SearchType, look_for: Option<&str>) -> SearchArgs {
    SearchArgs {
        search_type,
        look_for: look_for.map(str::to_string),
        ..SearchArgs::default()
    }
}

/// Run a search and return stdout.
fn run(config: &CtxfindConfig, args: &SearchArgs, paths: &[PathBuf]) -> String {
    let runner = SearchRunner::new(config, args, false).unwrap();
    let mut out = Vec::new();
    let summary = runner.run(paths, &mut out).unwrap();
    assert!(summary.skipped.is_empty(), "unexpected skips: {:?}", summary.skipped);
    String::from_utf8(out).unwrap()
}

/// Line numbers of a plain text run.
fn numbers(output: &str) -> Vec<usize> {
    output
        .lines()
        .map(|line| line.split(':').next().unwrap().trim().parse().unwrap())
        .collect()
}

#[test]
fn test_literal_match_outside_any_definition() {
    let output = run(
        &CtxfindConfig::default(),
        &search_args(SearchType::Literal, Some("main")),
        &[fixture("python/inventory.py")],
    );

    insta::assert_snapshot!(output, @r#"
20:  def main():
26:  if __name__ == "__main__":
27:      main()
"#);
}

#[test]
fn test_literal_collects_every_enclosing_branch() {
    let output = run(
        &CtxfindConfig::default(),
        &search_args(SearchType::Literal, Some("count")),
        &[fixture("python/inventory.py")],
    );
    assert_eq!(numbers(&output), vec![4, 8, 9, 11, 12, 13, 14]);
    assert!(output.starts_with(" 4:  class Inventory:\n 8:      def restock(self, name, count):\n"));
}

#[test]
fn test_line_number_with_and_without_branch_context() {
    let args = search_args(SearchType::LineNumber, Some("14"));
    let path = [fixture("python/inventory.py")];

    let plain = run(&CtxfindConfig::default(), &args, &path);
    assert_eq!(numbers(&plain), vec![4, 8, 9, 13, 14]);

    let mut config = CtxfindConfig::default();
    config.search.branch_context = true;
    let with_branches = run(&config, &args, &path);
    assert_eq!(numbers(&with_branches), vec![4, 8, 9, 11, 13, 14]);
}

#[test]
fn test_regex_matches_token_prefixes() {
    let output = run(
        &CtxfindConfig::default(),
        &search_args(SearchType::Regex, Some("^re")),
        &[fixture("python/inventory.py")],
    );
    assert_eq!(numbers(&output), vec![4, 8, 16, 17, 20, 22]);
}

#[test]
fn test_definitions_by_depth() {
    let path = [fixture("python/inventory.py")];
    let args = search_args(SearchType::Definitions, None);

    let top = run(&CtxfindConfig::default(), &args, &path);
    assert_eq!(top, " 4:  class Inventory:\n20:  def main():\n");

    let mut config = CtxfindConfig::default();
    config.search.definition_depth = 2;
    assert_eq!(numbers(&run(&config, &args, &path)), vec![4, 5, 8, 16, 20]);
}

#[test]
fn test_go_source() {
    let path = [fixture("go/counter.go")];

    let output = run(
        &CtxfindConfig::default(),
        &search_args(SearchType::Literal, Some("total")),
        &path,
    );
    assert_eq!(numbers(&output), vec![5, 6, 9, 10, 11, 17, 20]);

    let defs = run(
        &CtxfindConfig::default(),
        &search_args(SearchType::Definitions, None),
        &path,
    );
    assert_eq!(numbers(&defs), vec![5, 9, 17]);
}

#[test]
fn test_several_files_get_headers() {
    let python = fixture("python/inventory.py");
    let go = fixture("go/counter.go");

    let output = run(
        &CtxfindConfig::default(),
        &search_args(SearchType::Literal, Some("main")),
        &[python.clone(), go.clone()],
    );

    let expected = format!(
        "{}\n20:  def main():\n26:  if __name__ == \"__main__\":\n27:      main()\n\n{}\n 1:  package main\n17:  func main() {{\n",
        python.display(),
        go.display()
    );
    assert_eq!(output, expected);
}

#[test]
fn test_recursive_search_over_fixtures() {
    let mut config = CtxfindConfig::default();
    config.paths.recursive = true;

    let runner = SearchRunner::new(&config, &search_args(SearchType::Definitions, None), false).unwrap();
    let mut out = Vec::new();
    let summary = runner.run(&[fixture("")], &mut out).unwrap();

    assert_eq!(summary.searched, 2);
    assert_eq!(summary.matched, 2);
    let output = String::from_utf8(out).unwrap();
    let go_at = output.find("counter.go").unwrap();
    let python_at = output.find("inventory.py").unwrap();
    assert!(go_at < python_at);
}

#[test]
fn test_forced_language_and_colors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snippet.txt");
    fs::write(&path, "def f(x):\n    return x\n").unwrap();

    let args = SearchArgs {
        language: Some(Language::Python),
        ..search_args(SearchType::Literal, Some("return"))
    };
    let runner = SearchRunner::new(&CtxfindConfig::default(), &args, true).unwrap();
    let mut out = Vec::new();
    runner.run(&[path], &mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "\x1b[34m1:\x1b[0m  def f(x):\n\x1b[34m2:\x1b[0m      \x1b[32mreturn\x1b[0m x\n"
    );
}

#[test]
fn test_json_and_no_line_numbers() {
    let path = [fixture("go/counter.go")];

    let mut config = CtxfindConfig::default();
    config.output.line_numbers = false;
    let output = run(&config, &search_args(SearchType::LineNumber, Some("13")), &path);
    assert_eq!(
        output,
        "func (c *Counter) Add(n int) {\n\tif n > 0 {\n\t\tfmt.Println(\"ignored\", n)\n"
    );

    let mut config = CtxfindConfig::default();
    config.output.format = OutputFormat::Json;
    let output = run(&config, &search_args(SearchType::LineNumber, Some("13")), &path);
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value[0]["lines"][1]["number"], 10);
    assert_eq!(value[0]["lines"][1]["text"], "\tif n > 0 {");
}

#[test]
fn test_command_line_to_output() {
    let python = fixture("python/inventory.py");
    let argv = [
        "ctxfind".to_string(),
        "-n".to_string(),
        "6".to_string(),
        python.display().to_string(),
    ];
    let args = SearchArgs::from(&Args::try_parse_from(argv).unwrap());
    ctxfind::cli::validate_search_args(&args).unwrap();

    let mut config = CtxfindConfig::default();
    config.apply_search_args(&args);
    let output = run(&config, &args, &args.paths);
    assert_eq!(
        output,
        "4:  class Inventory:\n5:      def __init__(self, items):\n6:          self.items = items\n"
    );
}

#[test]
fn test_unreadable_inputs_are_skipped_not_fatal() {
    let dir = TempDir::new().unwrap();
    let binary = dir.path().join("blob.py");
    fs::write(&binary, [0xff, 0xfe, 0x00]).unwrap();

    let runner = SearchRunner::new(
        &CtxfindConfig::default(),
        &search_args(SearchType::Literal, Some("main")),
        false,
    )
    .unwrap();
    let mut out = Vec::new();
    let summary = runner
        .run(&[binary.clone(), fixture("python/inventory.py")], &mut out)
        .unwrap();

    assert_eq!(summary.matched, 1);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].path, binary);
}
