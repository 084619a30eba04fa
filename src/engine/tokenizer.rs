//! Line tokenizer driven by the static grammar table.
//!
//! Provides [`tokenize`], [`tokenize_or_plain`] and the per-render
//! [`Highlighter`]. The scanner does not build a parse tree: it walks the line
//! once, recognising comments, string literals, numbers, words (checked
//! against the grammar's keyword and builtin lists), operators and
//! punctuation. Every line is scanned on its own, so a string or block comment
//! left open at end of line simply runs to the end of that line.

use super::grammar::{self, Grammar, PLAIN};
use super::types::{Token, TokenClass};
use regex::Regex;
use std::sync::OnceLock;

/// Errors raised by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenizeError {
    /// No grammar is registered for the identifier.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
}

fn re_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?:0[xX][0-9a-fA-F_]+|0[bB][01_]+|0[oO][0-7_]+|[0-9][0-9_]*(?:\.[0-9][0-9_]*)?(?:[eE][+-]?[0-9]+)?)[A-Za-z0-9_]*",
        )
        .expect("re_number: pattern is valid and should always compile")
    })
}

const OPERATOR_CHARS: &str = "+-*/%=<>!&|^~?:";

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Tokenize one line with the grammar registered for `language`.
///
/// Fails with [`TokenizeError::UnsupportedLanguage`] when the identifier is
/// unknown; see [`tokenize_or_plain`] for the recovering variant.
pub fn tokenize(line: &str, language: &str) -> Result<Vec<Token>, TokenizeError> {
    let grammar = grammar::lookup(language)
        .ok_or_else(|| TokenizeError::UnsupportedLanguage(language.to_string()))?;
    Ok(tokenize_with(line, grammar))
}

/// Tokenize one line, degrading to a single plain token for unknown languages.
pub fn tokenize_or_plain(line: &str, language: &str) -> Vec<Token> {
    match tokenize(line, language) {
        Ok(tokens) => tokens,
        Err(e) => {
            log::debug!("{e}; using plain text");
            tokenize_with(line, &PLAIN)
        }
    }
}

/// Tokenize one line with an explicit grammar.
///
/// The returned tokens are non-empty and concatenate to `line`. An empty line
/// yields no tokens.
pub fn tokenize_with(line: &str, grammar: &Grammar) -> Vec<Token> {
    if line.is_empty() {
        return Vec::new();
    }
    if grammar.plain {
        return vec![Token::new(line, TokenClass::Plain)];
    }
    Scanner::new(line, grammar).run()
}

/// A grammar resolved once per render and reused for every line.
#[derive(Debug, Clone, Copy)]
pub struct Highlighter {
    grammar: &'static Grammar,
    fallback: bool,
}

impl Highlighter {
    /// Resolve `language`, falling back to plain text when it is unknown.
    pub fn for_language(language: &str) -> Self {
        match grammar::lookup(language) {
            Some(grammar) => Self {
                grammar,
                fallback: false,
            },
            None => {
                log::debug!("No grammar for language {language:?}; highlighting as plain text");
                crate::debug_log!("GRAMMAR", "fallback to plain for {:?}", language);
                Self {
                    grammar: &PLAIN,
                    fallback: true,
                }
            }
        }
    }

    /// Whether the requested language was unknown.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub fn grammar_name(&self) -> &'static str {
        self.grammar.name
    }

    pub fn highlight(&self, line: &str) -> Vec<Token> {
        tokenize_with(line, self.grammar)
    }
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

struct Scanner<'a> {
    line: &'a str,
    grammar: &'a Grammar,
    pos: usize,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(line: &'a str, grammar: &'a Grammar) -> Self {
        Self {
            line,
            grammar,
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        while self.pos < self.line.len() {
            let rest = &self.line[self.pos..];
            let Some(ch) = rest.chars().next() else {
                break;
            };

            let (len, class) = if ch.is_whitespace() {
                (prefix_len(rest, char::is_whitespace), TokenClass::Whitespace)
            } else if self
                .grammar
                .line_comments
                .iter()
                .any(|prefix| rest.starts_with(prefix))
            {
                (rest.len(), TokenClass::Comment)
            } else if let Some(len) = self.block_comment_len(rest) {
                (len, TokenClass::Comment)
            } else if self.grammar.quotes.contains(&ch) {
                (string_len(rest, ch), TokenClass::String)
            } else if ch.is_ascii_digit() {
                let len = re_number()
                    .find(rest)
                    .map(|m| m.end())
                    .unwrap_or(ch.len_utf8());
                (len, TokenClass::Number)
            } else if is_word_start(ch) {
                let len = prefix_len(rest, is_word_char);
                (len, self.classify_word(&rest[..len]))
            } else if OPERATOR_CHARS.contains(ch) {
                (ch.len_utf8(), TokenClass::Operator)
            } else if ch.is_ascii_punctuation() {
                (ch.len_utf8(), TokenClass::Punctuation)
            } else {
                (ch.len_utf8(), TokenClass::Plain)
            };

            self.push(len, class);
        }
        self.tokens
    }

    fn block_comment_len(&self, rest: &str) -> Option<usize> {
        let (open, close) = self.grammar.block_comment?;
        if !rest.starts_with(open) {
            return None;
        }
        Some(
            rest[open.len()..]
                .find(close)
                .map(|end| open.len() + end + close.len())
                .unwrap_or(rest.len()),
        )
    }

    fn classify_word(&self, word: &str) -> TokenClass {
        if self.grammar.is_keyword(word) {
            TokenClass::Keyword
        } else if self.grammar.is_builtin(word) {
            TokenClass::Builtin
        } else {
            TokenClass::Plain
        }
    }

    /// Emit `len` bytes from the current position, merging runs of the same
    /// class where the boundary carries no meaning.
    fn push(&mut self, len: usize, class: TokenClass) {
        debug_assert!(len > 0, "scanner must always make progress");
        let text = &self.line[self.pos..self.pos + len];
        self.pos += len;

        let mergeable = matches!(
            class,
            TokenClass::Whitespace
                | TokenClass::Punctuation
                | TokenClass::Operator
                | TokenClass::Plain
        );
        if mergeable
            && let Some(last) = self.tokens.last_mut()
            && last.class == class
        {
            last.text.push_str(text);
            return;
        }
        self.tokens.push(Token::new(text, class));
    }
}

fn is_word_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// Byte length of the longest prefix of `s` whose chars satisfy `pred`.
fn prefix_len(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.char_indices()
        .find(|&(_, c)| !pred(c))
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Byte length of a string literal starting at the opening `quote`,
/// including the closing quote when present.
fn string_len(s: &str, quote: char) -> usize {
    let mut escaped = false;
    for (i, c) in s.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return i + c.len_utf8();
        }
    }
    s.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::tokens_text;

    fn classes(tokens: &[Token]) -> Vec<(&str, TokenClass)> {
        tokens.iter().map(|t| (t.text.as_str(), t.class)).collect()
    }

    #[test]
    fn test_typescript_line() {
        let tokens = tokenize("const x = \"hi\"; // note", "ts").unwrap();
        assert_eq!(
            classes(&tokens),
            vec![
                ("const", TokenClass::Keyword),
                (" ", TokenClass::Whitespace),
                ("x", TokenClass::Plain),
                (" ", TokenClass::Whitespace),
                ("=", TokenClass::Operator),
                (" ", TokenClass::Whitespace),
                ("\"hi\"", TokenClass::String),
                (";", TokenClass::Punctuation),
                (" ", TokenClass::Whitespace),
                ("// note", TokenClass::Comment),
            ]
        );
    }

    #[test]
    fn test_json_line() {
        let tokens = tokenize("  \"port\": 8080,", "json").unwrap();
        assert_eq!(
            classes(&tokens),
            vec![
                ("  ", TokenClass::Whitespace),
                ("\"port\"", TokenClass::String),
                (":", TokenClass::Operator),
                (" ", TokenClass::Whitespace),
                ("8080", TokenClass::Number),
                (",", TokenClass::Punctuation),
            ]
        );
    }

    #[test]
    fn test_numbers() {
        let tokens = tokenize("0x1F 1_000 3.14e-2 10u32", "rust").unwrap();
        let numbers: Vec<_> = tokens
            .iter()
            .filter(|t| t.class == TokenClass::Number)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(numbers, vec!["0x1F", "1_000", "3.14e-2", "10u32"]);
    }

    #[test]
    fn test_escaped_quote_stays_in_string() {
        let tokens = tokenize(r#"s = "a\"b" + c"#, "py").unwrap();
        assert_eq!(tokens[4].text, r#""a\"b""#);
        assert_eq!(tokens[4].class, TokenClass::String);
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        let tokens = tokenize("let s = `open", "js").unwrap();
        let last = tokens.last().unwrap();
        assert_eq!(last.text, "`open");
        assert_eq!(last.class, TokenClass::String);
    }

    #[test]
    fn test_block_comment_closed_and_open() {
        let closed = tokenize("a /* b */ c", "c").unwrap();
        assert!(closed.iter().any(|t| t.text == "/* b */" && t.class == TokenClass::Comment));
        assert_eq!(closed.last().unwrap().text, "c");

        let open = tokenize("x /* trailing", "go").unwrap();
        assert_eq!(open.last().unwrap().text, "/* trailing");
    }

    #[test]
    fn test_builtins_and_sql_case() {
        let tokens = tokenize("console.log(Math.max(1, 2))", "js").unwrap();
        assert_eq!(tokens[0].class, TokenClass::Builtin);
        let sql = tokenize("SELECT count(*) FROM t -- all", "sql").unwrap();
        assert_eq!(sql[0].class, TokenClass::Keyword);
        assert_eq!(sql.last().unwrap().class, TokenClass::Comment);
    }

    #[test]
    fn test_unsupported_language() {
        let err = tokenize("x", "cobol").unwrap_err();
        assert_eq!(err, TokenizeError::UnsupportedLanguage("cobol".to_string()));
        assert_eq!(err.to_string(), "unsupported language: cobol");
    }

    #[test]
    fn test_plain_fallback_is_single_token() {
        let tokens = tokenize_or_plain("if (a) { b }", "cobol");
        assert_eq!(tokens, vec![Token::new("if (a) { b }", TokenClass::Plain)]);
        assert!(tokenize_or_plain("", "cobol").is_empty());
    }

    #[test]
    fn test_highlighter_resolves_once() {
        let known = Highlighter::for_language("TSX");
        assert!(!known.is_fallback());
        assert_eq!(known.grammar_name(), "TypeScript");
        let unknown = Highlighter::for_language("klingon");
        assert!(unknown.is_fallback());
        assert_eq!(unknown.highlight("a b").len(), 1);
    }

    #[test]
    fn test_round_trip_and_no_empty_tokens() {
        let samples = [
            "fn main() { println!(\"héllo, 世界\"); } // ok",
            "\t  x => x * 2 ",
            "<div class=\"a\"><!-- c --></div>",
            "key: 'value' # comment",
            "💡 emoji ünïcode $var",
            "\"unterminated \\",
            "0b1010 0o17 .5",
        ];
        for lang in ["rust", "ts", "html", "yaml", "sh", "json", "c", "sql", "plain"] {
            for line in samples {
                let tokens = tokenize(line, lang).unwrap();
                assert_eq!(tokens_text(&tokens), line, "round trip for {lang}");
                assert!(tokens.iter().all(|t| !t.text.is_empty()));
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let line = "export default function App() { return <a/>; }";
        assert_eq!(tokenize(line, "tsx").unwrap(), tokenize(line, "tsx").unwrap());
    }
}
