use anyhow::{anyhow, Result};
use ctxfind_core::{DEFAULT_DEFINITION_DEPTH, DEFAULT_MAX_TREE_DEPTH};
use ctxfind_render::Color;
use ctxfind_utils::DEFAULT_IGNORE;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::cli::args::SearchArgs;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct CtxfindConfig {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Deepest nesting level reported by a definitions search
    #[serde(default = "default_definition_depth")]
    pub definition_depth: usize,

    /// Add earlier branches of a conditional to the context of a match in a later one
    #[serde(default)]
    pub branch_context: bool,

    #[serde(default = "default_max_tree_depth")]
    pub max_tree_depth: usize,
}

fn default_definition_depth() -> usize {
    DEFAULT_DEFINITION_DEPTH
}

fn default_max_tree_depth() -> usize {
    DEFAULT_MAX_TREE_DEPTH
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            definition_depth: default_definition_depth(),
            branch_context: false,
            max_tree_depth: default_max_tree_depth(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" | "true" | "on" => Ok(ColorChoice::Always),
            "never" | "false" | "off" => Ok(ColorChoice::Never),
            _ => Err(format!("Unknown color choice: '{s}' (expected auto, always or never)")),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: '{s}' (expected text or json)")),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorChoice,

    #[serde(default = "default_number_color")]
    pub number_color: Color,

    #[serde(default = "default_match_color")]
    pub match_color: Color,

    #[serde(default = "default_line_numbers")]
    pub line_numbers: bool,

    #[serde(default)]
    pub format: OutputFormat,
}

fn default_number_color() -> Color {
    Color::Blue
}

fn default_match_color() -> Color {
    Color::Green
}

fn default_line_numbers() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorChoice::Auto,
            number_color: default_number_color(),
            match_color: default_match_color(),
            line_numbers: default_line_numbers(),
            format: OutputFormat::Text,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PathsConfig {
    #[serde(default)]
    pub recursive: bool,

    /// File and directory names never searched
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
}

fn default_ignore() -> Vec<String> {
    DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            recursive: false,
            ignore: default_ignore(),
        }
    }
}

/// Overlay `other` onto `base`. Keys present in `other` win; nested tables merge key by key,
/// so a file only overrides the settings it actually names.
fn merge_tables(base: &mut toml::Table, other: toml::Table) {
    for (key, value) in other {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(overlay)) => {
                merge_tables(existing, overlay);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Invalid range in {field}: {value} (valid range: {valid_range})")]
    InvalidRange {
        field: String,
        value: usize,
        valid_range: String,
    },

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CtxfindConfig {
    pub fn generate_default_config() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_else(|_| {
            r#"[search]
definition_depth = 1
branch_context = false
max_tree_depth = 2048

[output]
color = "auto"
number_color = "blue"
match_color = "green"
line_numbers = true
format = "text"

[paths]
recursive = false
ignore = [".git", "__pycache__"]
"#
            .to_string()
        })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_table(Self::load_table(path)?)
    }

    /// Read a config file as a raw table. The file must also be a valid config on its own.
    fn load_table<P: AsRef<Path>>(path: P) -> Result<toml::Table, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let table: toml::Table = content.parse()?;
        Self::from_table(table.clone())?;
        Ok(table)
    }

    fn from_table(table: toml::Table) -> Result<Self, ConfigError> {
        Ok(toml::Value::Table(table).try_into()?)
    }

    /// Overlay a config table onto this config; only the keys in `overlay` change.
    pub fn merge(&mut self, overlay: &toml::Table) -> Result<(), ConfigError> {
        let mut table = toml::Table::try_from(&*self)?;
        merge_tables(&mut table, overlay.clone());
        *self = Self::from_table(table)?;
        Ok(())
    }

    /// Get the user config file path (~/.config/ctxfind/config.toml)
    pub fn get_user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config/ctxfind/config.toml"))
    }

    /// Get the current directory config file path (./ctxfind.toml)
    pub fn get_current_config_path() -> PathBuf {
        PathBuf::from("./ctxfind.toml")
    }

    /// Load and merge configs from all sources with priority:
    /// 1. User config (~/.config/ctxfind/config.toml) - lowest priority (base)
    /// 2. Current directory (./ctxfind.toml)
    ///
    /// A file that fails to load is reported and left out.
    pub fn load_with_merged_configs() -> Self {
        let mut config = Self::default();

        let candidates = Self::get_user_config_path()
            .into_iter()
            .chain(std::iter::once(Self::get_current_config_path()));

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::load_table(&path).and_then(|table| config.merge(&table)) {
                Ok(()) => log::debug!("Loaded config from: {}", path.display()),
                Err(e) => log::warn!("Ignoring config file {}: {}", path.display(), e),
            }
        }

        config
    }

    pub fn apply_env_vars(&mut self, env_vars: &HashMap<String, String>) -> Result<()> {
        for (key, value) in env_vars {
            if let Some(config_key) = key.strip_prefix("CTXFIND_") {
                match config_key {
                    "SEARCH_DEFINITION_DEPTH" => {
                        self.search.definition_depth = value
                            .parse()
                            .map_err(|_| anyhow!("Invalid definition_depth value: {}", value))?;
                    }
                    "SEARCH_BRANCH_CONTEXT" => {
                        self.search.branch_context = value
                            .parse()
                            .map_err(|_| anyhow!("Invalid branch_context value: {}", value))?;
                    }
                    "SEARCH_MAX_TREE_DEPTH" => {
                        self.search.max_tree_depth = value
                            .parse()
                            .map_err(|_| anyhow!("Invalid max_tree_depth value: {}", value))?;
                    }
                    "OUTPUT_COLOR" => {
                        self.output.color = value.parse().map_err(|e: String| anyhow!(e))?;
                    }
                    "OUTPUT_NUMBER_COLOR" => {
                        self.output.number_color = value.parse().map_err(|e: String| anyhow!(e))?;
                    }
                    "OUTPUT_MATCH_COLOR" => {
                        self.output.match_color = value.parse().map_err(|e: String| anyhow!(e))?;
                    }
                    "OUTPUT_LINE_NUMBERS" => {
                        self.output.line_numbers = value
                            .parse()
                            .map_err(|_| anyhow!("Invalid line_numbers value: {}", value))?;
                    }
                    "OUTPUT_FORMAT" => {
                        self.output.format = value.parse().map_err(|e: String| anyhow!(e))?;
                    }
                    "PATHS_RECURSIVE" => {
                        self.paths.recursive = value
                            .parse()
                            .map_err(|_| anyhow!("Invalid recursive value: {}", value))?;
                    }
                    "PATHS_IGNORE" => {
                        self.paths.ignore = value
                            .split(',')
                            .map(|s| s.trim().to_string())
                            .filter(|s| !s.is_empty())
                            .collect();
                    }
                    _ => {} // Ignore unknown environment variables
                }
            }
        }
        Ok(())
    }

    pub fn apply_search_args(&mut self, args: &SearchArgs) {
        if let Some(depth) = args.depth {
            self.search.definition_depth = depth;
        }
        if args.branches {
            self.search.branch_context = true;
        }

        if let Some(color) = args.color {
            self.output.color = color;
        }
        if args.no_line_numbers {
            self.output.line_numbers = false;
        }
        if let Some(format) = args.format {
            self.output.format = format;
        }

        if args.recursive {
            self.paths.recursive = true;
        }
        for entry in &args.ignore {
            if !self.paths.ignore.contains(entry) {
                self.paths.ignore.push(entry.clone());
            }
        }
    }

    /// Load configuration with full precedence chain:
    /// 1. Default values (lowest)
    /// 2. User config (~/.config/ctxfind/config.toml)
    /// 3. Current directory (./ctxfind.toml)
    /// 4. Explicit `--config` file
    /// 5. Environment variables (CTXFIND_*)
    /// 6. CLI arguments (highest)
    pub fn load_with_precedence(
        config_path: Option<&Path>,
        cli_args: &SearchArgs,
        env_vars: &HashMap<String, String>,
    ) -> Result<Self> {
        let mut config = Self::load_with_merged_configs();

        if let Some(path) = config_path {
            Self::load_table(path)
                .and_then(|table| config.merge(&table))
                .map_err(|e| anyhow!("Failed to load config file {}: {}", path.display(), e))?;
        }

        config.apply_env_vars(env_vars)?;
        config.apply_search_args(cli_args);
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.max_tree_depth == 0 {
            return Err(ConfigError::InvalidRange {
                field: "search.max_tree_depth".to_string(),
                value: self.search.max_tree_depth,
                valid_range: "1 or more".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = CtxfindConfig::default();
        assert_eq!(config.search.definition_depth, 1);
        assert!(!config.search.branch_context);
        assert_eq!(config.search.max_tree_depth, 2048);
        assert_eq!(config.output.color, ColorChoice::Auto);
        assert_eq!(config.output.number_color, Color::Blue);
        assert_eq!(config.output.match_color, Color::Green);
        assert!(config.output.line_numbers);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(!config.paths.recursive);
        assert_eq!(config.paths.ignore, vec![".git", "__pycache__"]);
    }

    #[test]
    fn test_toml_parsing() {
        let toml_content = r#"
[search]
definition_depth = 3
branch_context = true

[output]
color = "never"
number_color = "bright-yellow"
format = "json"

[paths]
ignore = ["target"]
"#;

        let config: CtxfindConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.search.definition_depth, 3);
        assert!(config.search.branch_context);
        assert_eq!(config.search.max_tree_depth, 2048);
        assert_eq!(config.output.color, ColorChoice::Never);
        assert_eq!(config.output.number_color, Color::BrightYellow);
        assert_eq!(config.output.match_color, Color::Green);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.paths.ignore, vec!["target"]);
    }

    #[test]
    fn test_env_var_application() {
        let mut config = CtxfindConfig::default();
        let mut env_vars = HashMap::new();
        env_vars.insert("CTXFIND_SEARCH_DEFINITION_DEPTH".to_string(), "2".to_string());
        env_vars.insert("CTXFIND_OUTPUT_COLOR".to_string(), "always".to_string());
        env_vars.insert("CTXFIND_PATHS_IGNORE".to_string(), "vendor, build".to_string());
        env_vars.insert("UNRELATED".to_string(), "x".to_string());

        config.apply_env_vars(&env_vars).unwrap();

        assert_eq!(config.search.definition_depth, 2);
        assert_eq!(config.output.color, ColorChoice::Always);
        assert_eq!(config.paths.ignore, vec!["vendor", "build"]);
    }

    #[test]
    fn test_env_var_rejects_bad_values() {
        let mut config = CtxfindConfig::default();
        let env_vars = HashMap::from([(
            "CTXFIND_SEARCH_MAX_TREE_DEPTH".to_string(),
            "deep".to_string(),
        )]);
        assert!(config.apply_env_vars(&env_vars).is_err());
    }

    #[test]
    fn test_config_file_loading() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[output]
line_numbers = false

[paths]
recursive = true
"#
        )
        .unwrap();

        let config = CtxfindConfig::load_from_file(temp_file.path()).unwrap();
        assert!(!config.output.line_numbers);
        assert!(config.paths.recursive);
        assert_eq!(config.search, SearchConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[search\ndefinition_depth = ").unwrap();
        assert!(matches!(
            CtxfindConfig::load_from_file(temp_file.path()),
            Err(ConfigError::TomlError(_))
        ));
    }

    #[test]
    fn test_generate_default_config() {
        let config_string = CtxfindConfig::generate_default_config();
        assert!(config_string.contains("[search]"));
        assert!(config_string.contains("definition_depth = 1"));
        assert!(config_string.contains("color = \"auto\""));
        assert!(config_string.contains("number_color = \"blue\""));

        let parsed: CtxfindConfig = toml::from_str(&config_string).unwrap();
        assert_eq!(parsed, CtxfindConfig::default());
    }

    #[test]
    fn test_validation() {
        let mut config = CtxfindConfig::default();
        assert!(config.validate().is_ok());

        config.search.max_tree_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_merge() {
        let mut base = CtxfindConfig::default();
        base.search.definition_depth = 4;
        base.output.match_color = Color::Red;

        let overlay: toml::Table = toml::from_str(
            r#"
[output]
format = "json"

[paths]
ignore = ["dist"]
"#,
        )
        .unwrap();
        base.merge(&overlay).unwrap();

        assert_eq!(base.search.definition_depth, 4);
        assert_eq!(base.output.match_color, Color::Red);
        assert_eq!(base.output.format, OutputFormat::Json);
        assert_eq!(base.paths.ignore, vec!["dist"]);
    }

    #[test]
    fn test_config_merge_can_restore_defaults() {
        let mut config: CtxfindConfig = toml::from_str(
            r#"
[search]
definition_depth = 3
branch_context = true

[output]
line_numbers = false
"#,
        )
        .unwrap();

        let overlay: toml::Table = toml::from_str(
            r#"
[search]
definition_depth = 1
branch_context = false

[output]
line_numbers = true
"#,
        )
        .unwrap();
        config.merge(&overlay).unwrap();

        assert_eq!(config.search.definition_depth, 1);
        assert!(!config.search.branch_context);
        assert!(config.output.line_numbers);
    }

    #[test]
    fn test_explicit_config_file_overrides_earlier_layers() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[search]
definition_depth = 0

[output]
line_numbers = true
"#
        )
        .unwrap();

        let mut config = CtxfindConfig::default();
        config.search.branch_context = true;
        config.output.line_numbers = false;
        config
            .merge(&CtxfindConfig::load_table(temp_file.path()).unwrap())
            .unwrap();

        assert_eq!(config.search.definition_depth, 0);
        assert!(config.search.branch_context);
        assert!(config.output.line_numbers);
    }

    #[test]
    fn test_merge_rejects_bad_values() {
        let mut config = CtxfindConfig::default();
        let overlay: toml::Table = toml::from_str("[search]\ndefinition_depth = \"deep\"\n").unwrap();
        assert!(config.merge(&overlay).is_err());
        assert_eq!(config, CtxfindConfig::default());
    }

    #[test]
    fn test_search_args_take_precedence() {
        let mut config = CtxfindConfig::default();
        config.output.color = ColorChoice::Always;

        let args = SearchArgs {
            depth: Some(2),
            color: Some(ColorChoice::Never),
            no_line_numbers: true,
            ignore: vec!["build".to_string(), ".git".to_string()],
            ..SearchArgs::default()
        };
        config.apply_search_args(&args);

        assert_eq!(config.search.definition_depth, 2);
        assert_eq!(config.output.color, ColorChoice::Never);
        assert!(!config.output.line_numbers);
        assert_eq!(config.paths.ignore, vec![".git", "__pycache__", "build"]);
    }

    #[test]
    fn test_get_user_config_path() {
        if let Some(path) = CtxfindConfig::get_user_config_path() {
            assert!(path.ends_with(".config/ctxfind/config.toml"));
        }
    }

    #[test]
    fn test_get_current_config_path() {
        assert_eq!(
            CtxfindConfig::get_current_config_path(),
            PathBuf::from("./ctxfind.toml")
        );
    }
}
