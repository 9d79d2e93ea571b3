//! Per-file search driver: read, parse, walk, render.

use anyhow::{Context, Result};
use ctxfind_core::{find_context, ContextWalker, Language, ResultSet, SearchTarget};
use ctxfind_parser::SourceParser;
use ctxfind_render::{reports_to_json, FileReport, Highlight, LineRenderer, RenderOptions, SourceText};
use ctxfind_utils::{FileDiscovery, SkippedPath};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::cli::args::{SearchArgs, STDIN_PATH};
use crate::config::{CtxfindConfig, OutputFormat};

/// One thing to search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    pub fn name(&self) -> String {
        match self {
            Input::Stdin => "<stdin>".to_string(),
            Input::File(path) => path.display().to_string(),
        }
    }

    fn path(&self) -> &Path {
        match self {
            Input::Stdin => Path::new(STDIN_PATH),
            Input::File(path) => path,
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            Input::Stdin => {
                let mut content = String::new();
                std::io::stdin()
                    .read_to_string(&mut content)
                    .context("failed to read standard input")?;
                Ok(content)
            }
            Input::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
        }
    }
}

/// The lines found in one input.
#[derive(Debug, Clone)]
pub struct FileMatch {
    pub name: String,
    pub source: SourceText,
    pub results: ResultSet,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub searched: usize,
    pub matched: usize,
    pub skipped: Vec<SkippedPath>,
}

pub struct SearchRunner {
    target: SearchTarget,
    walker: ContextWalker,
    renderer: LineRenderer,
    discovery: FileDiscovery,
    language: Option<Language>,
    format: OutputFormat,
    recursive: bool,
}

impl SearchRunner {
    /// Build a runner from the merged configuration. Fails on a malformed term before any
    /// file is read.
    pub fn new(config: &CtxfindConfig, args: &SearchArgs, use_color: bool) -> Result<Self> {
        let target = SearchTarget::parse(
            args.search_type,
            args.look_for.as_deref(),
            config.search.definition_depth,
        )?;

        let walker = ContextWalker::new()
            .with_branch_context(config.search.branch_context)
            .with_max_depth(config.search.max_tree_depth);

        let use_color = use_color && config.output.format == OutputFormat::Text;
        let highlight = match &target {
            SearchTarget::Literal(term) => Some(Highlight::Term(term.clone())),
            SearchTarget::Regex(regex) => Some(Highlight::Pattern(regex.clone())),
            SearchTarget::LineNumber(line) => Some(Highlight::Line(*line)),
            SearchTarget::Definitions { .. } => None,
        };
        let renderer = LineRenderer::new(RenderOptions {
            number_color: use_color.then_some(config.output.number_color),
            line_color: use_color.then_some(config.output.match_color),
            highlight,
            line_numbers: config.output.line_numbers,
        });

        let discovery = FileDiscovery::new()
            .recursive(config.paths.recursive)
            .with_ignore(config.paths.ignore.clone())
            .any_extension(args.language.is_some());

        Ok(Self {
            target,
            walker,
            renderer,
            discovery,
            language: args.language,
            format: config.output.format,
            recursive: config.paths.recursive,
        })
    }

    /// Expand command-line paths into inputs. No paths at all means standard input.
    pub fn collect_inputs(&self, paths: &[PathBuf]) -> (Vec<Input>, Vec<SkippedPath>) {
        if paths.is_empty() {
            return (vec![Input::Stdin], Vec::new());
        }

        let mut inputs = Vec::new();
        let mut skipped = Vec::new();
        for path in paths {
            if path == Path::new(STDIN_PATH) {
                inputs.push(Input::Stdin);
                continue;
            }
            let found = self.discovery.discover(std::slice::from_ref(path));
            inputs.extend(found.files.into_iter().map(Input::File));
            skipped.extend(found.skipped);
        }
        (inputs, skipped)
    }

    /// Parse `content` and run the search over its tree.
    pub fn search_text(
        &self,
        parser: &mut SourceParser,
        name: &str,
        path: &Path,
        content: String,
    ) -> Result<FileMatch> {
        let parsed = parser.parse_path(path, content, self.language)?;
        let results = find_context(parsed.root(), &self.target, &self.walker);
        log::debug!("{name}: {} line(s) in context", results.len());

        Ok(FileMatch {
            name: name.to_string(),
            source: SourceText::new(parsed.source()),
            results,
        })
    }

    fn search_input(&self, parser: &mut SourceParser, input: &Input) -> Result<FileMatch> {
        let content = input.read()?;
        self.search_text(parser, &input.name(), input.path(), content)
    }

    /// Search every input and write the results to `out`. Inputs that cannot be searched are
    /// returned in the summary instead of stopping the run.
    pub fn run<W: Write>(&self, paths: &[PathBuf], out: &mut W) -> Result<RunSummary> {
        let (inputs, skipped) = self.collect_inputs(paths);
        let mut summary = RunSummary {
            skipped,
            ..RunSummary::default()
        };
        let show_headers = self.recursive || inputs.len() > 1;

        let mut parser = SourceParser::new();
        let mut reports = Vec::new();

        for input in &inputs {
            log::debug!("Searching {}", input.name());

            let found = match self.search_input(&mut parser, input) {
                Ok(found) => found,
                Err(e) => {
                    summary.skipped.push(SkippedPath {
                        path: input.path().to_path_buf(),
                        reason: format!("{e:#}"),
                    });
                    continue;
                }
            };
            summary.searched += 1;

            if found.results.is_empty() {
                continue;
            }

            match self.format {
                OutputFormat::Json => {
                    match FileReport::new(found.name.clone(), &found.source, &found.results) {
                        Ok(report) => reports.push(report),
                        Err(e) => {
                            summary.skipped.push(SkippedPath {
                                path: input.path().to_path_buf(),
                                reason: e.to_string(),
                            });
                            continue;
                        }
                    }
                }
                OutputFormat::Text => {
                    let lines = match self.renderer.render(&found.source, &found.results) {
                        Ok(lines) => lines,
                        Err(e) => {
                            summary.skipped.push(SkippedPath {
                                path: input.path().to_path_buf(),
                                reason: e.to_string(),
                            });
                            continue;
                        }
                    };
                    if show_headers {
                        if summary.matched > 0 {
                            writeln!(out)?;
                        }
                        writeln!(out, "{}", found.name)?;
                    }
                    for line in lines {
                        writeln!(out, "{line}")?;
                    }
                }
            }
            summary.matched += 1;
        }

        if self.format == OutputFormat::Json {
            writeln!(out, "{}", reports_to_json(&reports)?)?;
        }

        log::info!(
            "Searched {} file(s), {} with matches, {} skipped",
            summary.searched,
            summary.matched,
            summary.skipped.len()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColorChoice;
    use ctxfind_core::SearchType;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = "def outer():\n    def inner():\n        return 42\n    return inner\n";

    fn runner(search_type: SearchType, look_for: Option<&str>, config: &CtxfindConfig) -> SearchRunner {
        let args = SearchArgs {
            search_type,
            look_for: look_for.map(str::to_string),
            color: Some(ColorChoice::Never),
            ..SearchArgs::default()
        };
        SearchRunner::new(config, &args, false).unwrap()
    }

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_bad_term_fails_before_reading() {
        let config = CtxfindConfig::default();
        let args = SearchArgs {
            search_type: SearchType::Regex,
            look_for: Some("(".to_string()),
            ..SearchArgs::default()
        };
        assert!(SearchRunner::new(&config, &args, false).is_err());

        let args = SearchArgs {
            search_type: SearchType::LineNumber,
            look_for: Some("zero".to_string()),
            ..SearchArgs::default()
        };
        assert!(SearchRunner::new(&config, &args, false).is_err());
    }

    #[test]
    fn test_single_file_has_no_header() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "sample.py", SAMPLE);

        let runner = runner(SearchType::Literal, Some("42"), &CtxfindConfig::default());
        let mut out = Vec::new();
        let summary = runner.run(&[path], &mut out).unwrap();

        assert_eq!(summary.searched, 1);
        assert_eq!(summary.matched, 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1:  def outer():\n2:      def inner():\n3:          return 42\n"
        );
    }

    #[test]
    fn test_headers_and_skips_with_several_files() {
        let dir = TempDir::new().unwrap();
        let first = write(&dir, "a.py", SAMPLE);
        let second = write(&dir, "b.py", "x = 1\n");
        let unknown = write(&dir, "notes.txt", "inner\n");
        let missing = dir.path().join("gone.py");

        let runner = runner(SearchType::Literal, Some("inner"), &CtxfindConfig::default());
        let mut out = Vec::new();
        let summary = runner
            .run(&[first.clone(), second, unknown.clone(), missing.clone()], &mut out)
            .unwrap();

        let expected = format!("{}\n1:  def outer():\n2:      def inner():\n4:      return inner\n", first.display());
        assert_eq!(String::from_utf8(out).unwrap(), expected);
        assert_eq!(summary.searched, 2);
        assert_eq!(summary.matched, 1);

        let skipped: Vec<_> = summary.skipped.iter().map(|s| s.path.clone()).collect();
        assert_eq!(skipped, vec![missing, unknown]);
    }

    #[test]
    fn test_json_output() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "sample.py", SAMPLE);

        let mut config = CtxfindConfig::default();
        config.output.format = OutputFormat::Json;
        let runner = runner(SearchType::LineNumber, Some("3"), &config);

        let mut out = Vec::new();
        runner.run(&[path.clone()], &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["path"], path.display().to_string());
        let numbers: Vec<u64> = value[0]["lines"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["number"].as_u64().unwrap())
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_definitions_search() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "sample.py", SAMPLE);

        let runner = runner(SearchType::Definitions, None, &CtxfindConfig::default());
        let mut out = Vec::new();
        runner.run(&[path], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1:  def outer():\n");
    }

    #[test]
    fn test_recursive_run_prints_headers() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("pkg")).unwrap();
        let nested = write(&dir, "pkg/mod.py", SAMPLE);

        let mut config = CtxfindConfig::default();
        config.paths.recursive = true;
        let runner = runner(SearchType::Literal, Some("outer"), &config);

        let mut out = Vec::new();
        let summary = runner.run(&[dir.path().to_path_buf()], &mut out).unwrap();
        assert_eq!(summary.matched, 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("{}\n1:  def outer():\n", nested.display())
        );
    }

    #[test]
    fn test_collect_inputs_defaults_to_stdin() {
        let runner = runner(SearchType::Literal, Some("x"), &CtxfindConfig::default());
        let (inputs, skipped) = runner.collect_inputs(&[]);
        assert_eq!(inputs, vec![Input::Stdin]);
        assert!(skipped.is_empty());

        let (inputs, _) = runner.collect_inputs(&[PathBuf::from("-")]);
        assert_eq!(inputs, vec![Input::Stdin]);
    }
}
