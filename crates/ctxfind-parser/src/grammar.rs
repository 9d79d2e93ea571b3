//! Per-language node kind tables.

use ctxfind_core::Language;

/// What the search engine needs to know about one tree-sitter grammar.
#[derive(Debug)]
pub struct Grammar {
    pub language: Language,
    /// Bodies and blocks: these carry no line of their own, so a block that starts on the
    /// line of its first statement does not leak that line into every context.
    structural: &'static [&'static str],
    /// Class, module, function and method definitions.
    definitions: &'static [&'static str],
    /// Alternative arms of a conditional (`elif`, `else`, `case`, ...).
    branches: &'static [&'static str],
}

static PYTHON: Grammar = Grammar {
    language: Language::Python,
    structural: &["block", "decorated_definition"],
    definitions: &["class_definition", "function_definition"],
    branches: &[
        "elif_clause",
        "else_clause",
        "except_clause",
        "finally_clause",
        "case_clause",
    ],
};

const JAVASCRIPT_BRANCHES: &[&str] = &[
    "else_clause",
    "switch_case",
    "switch_default",
    "catch_clause",
    "finally_clause",
];

static JAVASCRIPT: Grammar = Grammar {
    language: Language::JavaScript,
    structural: &["statement_block", "class_body", "export_statement"],
    definitions: &[
        "class_declaration",
        "function_declaration",
        "generator_function_declaration",
        "method_definition",
    ],
    branches: JAVASCRIPT_BRANCHES,
};

const TYPESCRIPT_STRUCTURAL: &[&str] = &[
    "statement_block",
    "class_body",
    "interface_body",
    "export_statement",
];

const TYPESCRIPT_DEFINITIONS: &[&str] = &[
    "class_declaration",
    "abstract_class_declaration",
    "interface_declaration",
    "function_declaration",
    "generator_function_declaration",
    "method_definition",
    "internal_module",
    "module",
];

static TYPESCRIPT: Grammar = Grammar {
    language: Language::TypeScript,
    structural: TYPESCRIPT_STRUCTURAL,
    definitions: TYPESCRIPT_DEFINITIONS,
    branches: JAVASCRIPT_BRANCHES,
};

static TSX: Grammar = Grammar {
    language: Language::Tsx,
    structural: TYPESCRIPT_STRUCTURAL,
    definitions: TYPESCRIPT_DEFINITIONS,
    branches: JAVASCRIPT_BRANCHES,
};

static JAVA: Grammar = Grammar {
    language: Language::Java,
    structural: &[
        "block",
        "class_body",
        "interface_body",
        "enum_body",
        "constructor_body",
    ],
    definitions: &[
        "class_declaration",
        "interface_declaration",
        "enum_declaration",
        "record_declaration",
        "method_declaration",
        "constructor_declaration",
    ],
    branches: &["catch_clause", "finally_clause", "switch_block_statement_group"],
};

static GO: Grammar = Grammar {
    language: Language::Go,
    structural: &["block", "statement_list"],
    definitions: &[
        "function_declaration",
        "method_declaration",
        "type_declaration",
    ],
    branches: &[
        "expression_case",
        "type_case",
        "default_case",
        "communication_case",
    ],
};

static RUST: Grammar = Grammar {
    language: Language::Rust,
    structural: &["block", "declaration_list", "field_declaration_list"],
    definitions: &[
        "function_item",
        "struct_item",
        "enum_item",
        "union_item",
        "trait_item",
        "impl_item",
        "mod_item",
    ],
    branches: &["else_clause", "match_arm"],
};

static RUBY: Grammar = Grammar {
    language: Language::Ruby,
    structural: &["body_statement", "then"],
    definitions: &[
        "class",
        "module",
        "method",
        "singleton_method",
        "singleton_class",
    ],
    branches: &["elsif", "else", "when", "rescue", "ensure"],
};

static C: Grammar = Grammar {
    language: Language::C,
    structural: &["compound_statement"],
    definitions: &["function_definition"],
    branches: &["else_clause", "case_statement"],
};

static CPP: Grammar = Grammar {
    language: Language::Cpp,
    structural: &[
        "compound_statement",
        "field_declaration_list",
        "declaration_list",
    ],
    definitions: &[
        "function_definition",
        "class_specifier",
        "namespace_definition",
    ],
    branches: &["else_clause", "case_statement", "catch_clause"],
};

static PHP: Grammar = Grammar {
    language: Language::Php,
    structural: &["compound_statement", "declaration_list"],
    definitions: &[
        "class_declaration",
        "interface_declaration",
        "trait_declaration",
        "function_definition",
        "method_declaration",
        "namespace_definition",
    ],
    branches: &[
        "else_if_clause",
        "else_clause",
        "case_statement",
        "default_statement",
        "catch_clause",
        "finally_clause",
    ],
};

static YAML: Grammar = Grammar {
    language: Language::Yaml,
    structural: &[],
    definitions: &[],
    branches: &[],
};

impl Grammar {
    #[must_use]
    pub fn for_language(language: Language) -> &'static Grammar {
        match language {
            Language::Python => &PYTHON,
            Language::JavaScript => &JAVASCRIPT,
            Language::TypeScript => &TYPESCRIPT,
            Language::Tsx => &TSX,
            Language::Java => &JAVA,
            Language::Go => &GO,
            Language::Rust => &RUST,
            Language::Ruby => &RUBY,
            Language::C => &C,
            Language::Cpp => &CPP,
            Language::Php => &PHP,
            Language::Yaml => &YAML,
        }
    }

    /// The tree-sitter language for this grammar.
    #[must_use]
    pub fn ts_language(&self) -> tree_sitter::Language {
        match self.language {
            Language::Python => tree_sitter_python::LANGUAGE.into(),
            Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Language::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Language::Java => tree_sitter_java::LANGUAGE.into(),
            Language::Go => tree_sitter_go::LANGUAGE.into(),
            Language::Rust => tree_sitter_rust::LANGUAGE.into(),
            Language::Ruby => tree_sitter_ruby::LANGUAGE.into(),
            Language::C => tree_sitter_c::LANGUAGE.into(),
            Language::Cpp => tree_sitter_cpp::LANGUAGE.into(),
            Language::Php => tree_sitter_php::LANGUAGE_PHP.into(),
            Language::Yaml => tree_sitter_yaml::LANGUAGE.into(),
        }
    }

    pub fn is_structural(&self, kind: &str) -> bool {
        self.structural.contains(&kind)
    }

    pub fn is_definition(&self, kind: &str) -> bool {
        self.definitions.contains(&kind)
    }

    pub fn is_branch(&self, kind: &str) -> bool {
        self.branches.contains(&kind)
    }
}
