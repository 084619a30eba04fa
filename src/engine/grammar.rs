//! Static grammar table for the line tokenizer.
//!
//! Each [`Grammar`] is a fixed set of keyword and builtin lists plus the
//! comment and quote delimiters of a language. The alias table is built once
//! on first use; lookups are case-insensitive. Unknown identifiers resolve to
//! nothing here and callers fall back to [`PLAIN`].

use std::collections::HashMap;
use std::sync::OnceLock;

/// Lexical rules for one language.
#[derive(Debug)]
pub struct Grammar {
    /// Display name (e.g. "Rust", "TypeScript").
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub builtins: &'static [&'static str],
    /// Prefixes that start a comment running to end of line.
    pub line_comments: &'static [&'static str],
    /// Opening and closing block comment delimiters.
    pub block_comment: Option<(&'static str, &'static str)>,
    /// Characters that open (and close) a string literal.
    pub quotes: &'static [char],
    /// Match keywords ignoring ASCII case (SQL).
    pub case_insensitive: bool,
    /// Emit the whole line as one plain token.
    pub plain: bool,
}

impl Grammar {
    pub fn is_keyword(&self, word: &str) -> bool {
        if self.case_insensitive {
            self.keywords.iter().any(|k| k.eq_ignore_ascii_case(word))
        } else {
            self.keywords.contains(&word)
        }
    }

    pub fn is_builtin(&self, word: &str) -> bool {
        self.builtins.contains(&word)
    }
}

/// Fallback grammar: no lexical rules at all.
pub static PLAIN: Grammar = Grammar {
    name: "Plain Text",
    keywords: &[],
    builtins: &[],
    line_comments: &[],
    block_comment: None,
    quotes: &[],
    case_insensitive: false,
    plain: true,
};

static RUST: Grammar = Grammar {
    name: "Rust",
    keywords: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
        "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true",
        "type", "unsafe", "use", "where", "while",
    ],
    builtins: &[
        "Self", "Option", "Result", "Vec", "String", "Box", "Rc", "Arc", "Some", "None", "Ok",
        "Err", "println", "format", "vec",
    ],
    line_comments: &["//"],
    block_comment: Some(("/*", "*/")),
    quotes: &['"'],
    case_insensitive: false,
    plain: false,
};

static TYPESCRIPT: Grammar = Grammar {
    name: "TypeScript",
    keywords: &[
        "abstract", "as", "async", "await", "break", "case", "catch", "class", "const",
        "continue", "declare", "default", "delete", "do", "else", "enum", "export", "extends",
        "false", "finally", "for", "from", "function", "if", "implements", "import", "in",
        "instanceof", "interface", "keyof", "let", "namespace", "new", "null", "of", "private",
        "protected", "public", "readonly", "return", "static", "super", "switch", "this",
        "throw", "true", "try", "type", "typeof", "undefined", "var", "void", "while", "yield",
    ],
    builtins: &[
        "console", "Promise", "Array", "Object", "Map", "Set", "JSON", "Math", "String",
        "Number", "Boolean", "Error", "Date", "RegExp", "any", "unknown", "never", "string",
        "number", "boolean", "require", "module", "process",
    ],
    line_comments: &["//"],
    block_comment: Some(("/*", "*/")),
    quotes: &['"', '\'', '`'],
    case_insensitive: false,
    plain: false,
};

static JSON: Grammar = Grammar {
    name: "JSON",
    keywords: &["true", "false", "null"],
    builtins: &[],
    line_comments: &[],
    block_comment: None,
    quotes: &['"'],
    case_insensitive: false,
    plain: false,
};

static YAML: Grammar = Grammar {
    name: "YAML",
    keywords: &["true", "false", "null", "yes", "no", "on", "off"],
    builtins: &[],
    line_comments: &["#"],
    block_comment: None,
    quotes: &['"', '\''],
    case_insensitive: false,
    plain: false,
};

static TOML: Grammar = Grammar {
    name: "TOML",
    keywords: &["true", "false"],
    builtins: &[],
    line_comments: &["#"],
    block_comment: None,
    quotes: &['"', '\''],
    case_insensitive: false,
    plain: false,
};

static PYTHON: Grammar = Grammar {
    name: "Python",
    keywords: &[
        "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
        "elif", "else", "except", "False", "finally", "for", "from", "global", "if", "import",
        "in", "is", "lambda", "None", "nonlocal", "not", "or", "pass", "raise", "return", "True",
        "try", "while", "with", "yield",
    ],
    builtins: &[
        "print", "len", "range", "int", "str", "float", "list", "dict", "set", "tuple", "bool",
        "type", "isinstance", "self", "open", "super",
    ],
    line_comments: &["#"],
    block_comment: None,
    quotes: &['"', '\''],
    case_insensitive: false,
    plain: false,
};

static SHELL: Grammar = Grammar {
    name: "Shell",
    keywords: &[
        "if", "then", "else", "elif", "fi", "for", "while", "do", "done", "case", "esac",
        "function", "return", "exit", "export", "local", "readonly", "in", "select", "until",
        "true", "false",
    ],
    builtins: &[
        "echo", "cd", "ls", "cat", "grep", "sed", "awk", "find", "sort", "uniq", "wc", "head",
        "tail", "mkdir", "rm", "cp", "mv", "chmod", "chown", "curl", "wget", "source", "set",
    ],
    line_comments: &["#"],
    block_comment: None,
    quotes: &['"', '\''],
    case_insensitive: false,
    plain: false,
};

static GO: Grammar = Grammar {
    name: "Go",
    keywords: &[
        "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
        "false", "for", "func", "go", "goto", "if", "import", "interface", "map", "nil",
        "package", "range", "return", "select", "struct", "switch", "true", "type", "var",
    ],
    builtins: &[
        "append", "cap", "close", "copy", "delete", "error", "len", "make", "new", "panic",
        "print", "println", "recover", "string", "int", "bool", "byte", "rune", "fmt",
    ],
    line_comments: &["//"],
    block_comment: Some(("/*", "*/")),
    quotes: &['"', '\'', '`'],
    case_insensitive: false,
    plain: false,
};

static C_FAMILY: Grammar = Grammar {
    name: "C/C++",
    keywords: &[
        "auto", "break", "case", "class", "const", "constexpr", "continue", "default", "delete",
        "do", "else", "enum", "extern", "false", "for", "goto", "if", "inline", "namespace",
        "new", "nullptr", "private", "protected", "public", "return", "sizeof", "static",
        "struct", "switch", "template", "this", "true", "typedef", "typename", "union",
        "using", "virtual", "void", "volatile", "while",
    ],
    builtins: &[
        "int", "char", "float", "double", "long", "short", "unsigned", "signed", "bool",
        "size_t", "printf", "malloc", "free", "std", "NULL",
    ],
    line_comments: &["//"],
    block_comment: Some(("/*", "*/")),
    quotes: &['"', '\''],
    case_insensitive: false,
    plain: false,
};

static CSS: Grammar = Grammar {
    name: "CSS",
    keywords: &["important", "inherit", "initial", "none", "auto", "media", "import"],
    builtins: &["rgb", "rgba", "hsl", "url", "var", "calc"],
    line_comments: &[],
    block_comment: Some(("/*", "*/")),
    quotes: &['"', '\''],
    case_insensitive: false,
    plain: false,
};

static MARKUP: Grammar = Grammar {
    name: "HTML/XML",
    keywords: &[],
    builtins: &[],
    line_comments: &[],
    block_comment: Some(("<!--", "-->")),
    quotes: &['"', '\''],
    case_insensitive: false,
    plain: false,
};

static SQL: Grammar = Grammar {
    name: "SQL",
    keywords: &[
        "select", "from", "where", "insert", "into", "values", "update", "set", "delete",
        "create", "table", "drop", "alter", "join", "left", "right", "inner", "outer", "on",
        "group", "by", "order", "having", "limit", "and", "or", "not", "null", "as", "distinct",
        "primary", "key", "index", "begin", "commit",
    ],
    builtins: &["count", "sum", "avg", "min", "max", "coalesce", "now"],
    line_comments: &["--"],
    block_comment: Some(("/*", "*/")),
    quotes: &['\'', '"'],
    case_insensitive: true,
    plain: false,
};

/// Alias → grammar, built once.
fn grammar_table() -> &'static HashMap<&'static str, &'static Grammar> {
    static TABLE: OnceLock<HashMap<&'static str, &'static Grammar>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = HashMap::new();
        let mut register = |aliases: &[&'static str], grammar: &'static Grammar| {
            for alias in aliases {
                table.insert(*alias, grammar);
            }
        };
        register(&["rust", "rs"], &RUST);
        register(
            &["typescript", "ts", "tsx", "javascript", "js", "jsx", "mjs", "cjs"],
            &TYPESCRIPT,
        );
        register(&["json", "jsonc"], &JSON);
        register(&["yaml", "yml"], &YAML);
        register(&["toml"], &TOML);
        register(&["python", "py"], &PYTHON);
        register(&["shell", "sh", "bash", "zsh"], &SHELL);
        register(&["go", "golang"], &GO);
        register(&["c", "h", "cpp", "cc", "cxx", "hpp", "c++"], &C_FAMILY);
        register(&["css", "scss"], &CSS);
        register(&["html", "htm", "xml", "svg"], &MARKUP);
        register(&["sql"], &SQL);
        register(&["text", "txt", "plain", "plaintext", "markdown", "md"], &PLAIN);
        log::debug!("Grammar table initialised with {} aliases", table.len());
        table
    })
}

/// Return the grammar registered for `language`, or `None` when the
/// identifier is not recognised.
pub fn lookup(language: &str) -> Option<&'static Grammar> {
    let key = language.trim().to_ascii_lowercase();
    grammar_table().get(key.as_str()).copied()
}

/// All recognised identifiers, sorted.
pub fn known_languages() -> Vec<&'static str> {
    let mut names: Vec<_> = grammar_table().keys().copied().collect();
    names.sort_unstable();
    names
}
