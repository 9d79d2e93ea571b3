use anyhow::{bail, Result};
use clap::{ArgGroup, Parser};
use ctxfind_core::{Language, SearchType};
use std::path::{Path, PathBuf};

use crate::config::{ColorChoice, OutputFormat};

/// Path that stands for standard input.
pub const STDIN_PATH: &str = "-";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Find lines in source files and the context they're in",
    long_about = None
)]
#[command(group(ArgGroup::new("mode").multiple(false)))]
pub struct Args {
    /// What to look for: a token, a line number (-n) or a regex (-e). With -d this is a path.
    pub look_for: Option<String>,

    /// Files to search; `-` reads standard input
    pub paths: Vec<PathBuf>,

    /// Search by line number
    #[arg(short = 'n', long, group = "mode")]
    pub search_line: bool,

    /// Search with a regular expression
    #[arg(short = 'e', long, group = "mode")]
    pub search_regex: bool,

    /// List top-level definitions
    #[arg(short = 'd', long, group = "mode")]
    pub search_defs: bool,

    /// Deepest nesting level listed by -d
    #[arg(long, value_name = "N")]
    pub depth: Option<usize>,

    /// Search directories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Comma-separated file and directory names to ignore
    #[arg(short, long, value_delimiter = ',', value_name = "NAMES")]
    pub ignore: Vec<String>,

    /// Parse every input as this language instead of detecting it from the extension
    #[arg(short, long)]
    pub language: Option<Language>,

    /// Always color the output
    #[arg(short, long, conflicts_with = "no_color")]
    pub color: bool,

    /// Never color the output
    #[arg(long)]
    pub no_color: bool,

    /// Include earlier branches of a conditional in the context
    #[arg(short, long)]
    pub branches: bool,

    /// Print matched lines without their numbers
    #[arg(long)]
    pub no_line_numbers: bool,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbosity: u8,

    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the default configuration file and exit
    #[arg(long)]
    pub generate_config: bool,
}

impl Args {
    pub fn search_type(&self) -> SearchType {
        if self.search_line {
            SearchType::LineNumber
        } else if self.search_regex {
            SearchType::Regex
        } else if self.search_defs {
            SearchType::Definitions
        } else {
            SearchType::Literal
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchArgs {
    pub look_for: Option<String>,
    pub paths: Vec<PathBuf>,
    pub search_type: SearchType,
    pub depth: Option<usize>,
    pub recursive: bool,
    pub ignore: Vec<String>,
    pub language: Option<Language>,
    pub color: Option<ColorChoice>,
    pub branches: bool,
    pub no_line_numbers: bool,
    pub format: Option<OutputFormat>,
    pub config: Option<PathBuf>,
    pub generate_config: bool,
}

impl From<&Args> for SearchArgs {
    fn from(args: &Args) -> Self {
        let search_type = args.search_type();

        // A definitions search takes no term, so the first positional is a path.
        let (look_for, paths) = match (search_type, &args.look_for) {
            (SearchType::Definitions, Some(first)) => {
                let mut paths = vec![PathBuf::from(first)];
                paths.extend(args.paths.iter().cloned());
                (None, paths)
            }
            _ => (args.look_for.clone(), args.paths.clone()),
        };

        let color = if args.color {
            Some(ColorChoice::Always)
        } else if args.no_color {
            Some(ColorChoice::Never)
        } else {
            None
        };

        SearchArgs {
            look_for,
            paths,
            search_type,
            depth: args.depth,
            recursive: args.recursive,
            ignore: args.ignore.clone(),
            language: args.language,
            color,
            branches: args.branches,
            no_line_numbers: args.no_line_numbers,
            format: args.format,
            config: args.config.clone(),
            generate_config: args.generate_config,
        }
    }
}

impl SearchArgs {
    /// True when input comes from standard input rather than files.
    pub fn reads_stdin(&self) -> bool {
        self.paths.is_empty() || self.paths.iter().any(|p| p == Path::new(STDIN_PATH))
    }
}

pub fn validate_search_args(args: &SearchArgs) -> Result<()> {
    if args.search_type != SearchType::Definitions
        && args.look_for.as_deref().is_none_or(str::is_empty)
    {
        bail!("Missing search term for a {} search", args.search_type);
    }

    if args.reads_stdin() && args.language.is_none() {
        if args.paths.is_empty() {
            bail!("No input files given (pass paths, or --language to read standard input)");
        }
        bail!("Reading standard input requires --language");
    }

    Ok(())
}
