//! Programming language definitions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Languages ctxfind can parse into a syntax tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Tsx,
    Java,
    Go,
    Rust,
    Ruby,
    C,
    Cpp,
    Php,
    Yaml,
}

impl Language {
    /// Every supported language, in the order they are listed in help output.
    pub const ALL: &'static [Language] = &[
        Language::Python,
        Language::JavaScript,
        Language::TypeScript,
        Language::Tsx,
        Language::Java,
        Language::Go,
        Language::Rust,
        Language::Ruby,
        Language::C,
        Language::Cpp,
        Language::Php,
        Language::Yaml,
    ];

    /// Create a Language from a file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let lang = match ext.to_lowercase().as_str() {
            "py" | "pyw" => Language::Python,
            "js" | "jsx" | "mjs" | "cjs" => Language::JavaScript,
            "ts" | "mts" | "cts" => Language::TypeScript,
            "tsx" => Language::Tsx,
            "java" => Language::Java,
            "go" => Language::Go,
            "rs" => Language::Rust,
            "rb" => Language::Ruby,
            "c" | "h" => Language::C,
            "cpp" | "cxx" | "cc" | "hpp" | "hxx" => Language::Cpp,
            "php" | "php3" | "php4" | "php5" | "phtml" => Language::Php,
            "yml" | "yaml" => Language::Yaml,
            _ => return None,
        };
        Some(lang)
    }

    /// File extensions recognised for this language.
    #[must_use]
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Python => &["py", "pyw"],
            Language::JavaScript => &["js", "jsx", "mjs", "cjs"],
            Language::TypeScript => &["ts", "mts", "cts"],
            Language::Tsx => &["tsx"],
            Language::Java => &["java"],
            Language::Go => &["go"],
            Language::Rust => &["rs"],
            Language::Ruby => &["rb"],
            Language::C => &["c", "h"],
            Language::Cpp => &["cpp", "cxx", "cc", "hpp", "hxx"],
            Language::Php => &["php", "php3", "php4", "php5", "phtml"],
            Language::Yaml => &["yml", "yaml"],
        }
    }

    /// Get the display name for this language.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Tsx => "TSX",
            Language::Java => "Java",
            Language::Go => "Go",
            Language::Rust => "Rust",
            Language::Ruby => "Ruby",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::Php => "PHP",
            Language::Yaml => "YAML",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s_lower = s.to_lowercase();
        match s_lower.as_str() {
            "python" | "py" => Ok(Language::Python),
            "javascript" | "js" => Ok(Language::JavaScript),
            "typescript" | "ts" => Ok(Language::TypeScript),
            "tsx" => Ok(Language::Tsx),
            "java" => Ok(Language::Java),
            "go" | "golang" => Ok(Language::Go),
            "rust" | "rs" => Ok(Language::Rust),
            "ruby" | "rb" => Ok(Language::Ruby),
            "c" => Ok(Language::C),
            "cpp" | "c++" | "cxx" => Ok(Language::Cpp),
            "php" => Ok(Language::Php),
            "yaml" | "yml" => Ok(Language::Yaml),
            _ => Err(format!(
                "Unknown language: '{}'. Supported languages: python, javascript, typescript, tsx, java, go, rust, ruby, c, cpp, php, yaml",
                s
            )),
        }
    }
}
