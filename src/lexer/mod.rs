//! # C Tokenizer
//!
//! Converts raw C source text into a flat [`Token`] stream consumed by the
//! structural parser. The tokenizer is deliberately permissive: it never
//! fails, and lexical problems (unterminated comments or string literals)
//! are recorded as [`LexWarning`]s so analysis can continue on partial
//! input. Preprocessor directives (`#...` to end of line) are skipped
//! rather than parsed.
//!
//! Line numbers are 1-based and increment on every newline character,
//! including newlines inside block comments and escaped newlines inside
//! string literals, so reported lines match the original file exactly.

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Name that is not a reserved word.
    Identifier,

    /// Reserved C keyword (`if`, `while`, `sizeof`, ...).
    Keyword,

    /// String literal, quotes included in the text.
    StringLiteral,

    /// Character literal, quotes included in the text.
    CharLiteral,

    /// Integer or floating constant.
    Number,

    /// Single punctuation character.
    Punct,

    /// Line or block comment.
    Comment,
}

/// Smallest lexical unit of the source, with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lexical category.
    pub kind: TokenKind,

    /// Verbatim lexeme text.
    pub text: String,

    /// 1-based line where the token starts.
    pub line: usize,
}

impl Token {
    /// Returns `true` for an identifier token.
    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    /// Returns `true` for the given punctuation character.
    pub fn is_punct(&self, ch: char) -> bool {
        self.kind == TokenKind::Punct && self.text.len() == 1 && self.text.starts_with(ch)
    }
}

/// Category of a recoverable lexical problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexWarningKind {
    /// Block comment still open at end of input.
    UnterminatedComment,

    /// String literal still open at end of line or input.
    UnterminatedString,
}

/// A recoverable lexical problem; surfaced as a Low-severity finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexWarning {
    /// What went wrong.
    pub kind: LexWarningKind,

    /// 1-based line where the offending construct starts.
    pub line: usize,
}

/// Reserved words of C89/C99. Names matching these are never treated as
/// call expressions by the parser.
const KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while", "_Bool", "_Complex", "_Imaginary",
];

/// Single-pass tokenizer over C source text.
///
/// Implements [`Iterator`], yielding one [`Token`] per call. Warnings
/// accumulate internally and are read out after the pass completes, either
/// through [`Lexer::into_warnings`] or the [`tokenize`] convenience.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    warnings: Vec<LexWarning>,
}

impl Lexer {
    /// Creates a new lexer for the given source string.
    pub fn new(source: &str) -> Self {
        Self {
            input: source.chars().collect(),
            position: 0,
            line: 1,
            warnings: Vec::new(),
        }
    }

    /// Consumes the lexer and returns the warnings gathered so far.
    pub fn into_warnings(self) -> Vec<LexWarning> {
        self.warnings
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    /// Consumes one character, keeping the line counter in sync.
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek();
        if let Some(c) = ch {
            self.position += 1;
            if c == '\n' {
                self.line += 1;
            }
        }
        ch
    }

    /// Skips spaces, tabs, carriage returns and newlines.
    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    /// Skips a preprocessor directive up to (not including) the newline.
    fn skip_directive(&mut self) {
        while matches!(self.peek(), Some(c) if c != '\n') {
            self.advance();
        }
    }

    fn line_comment(&mut self) -> Token {
        let start_line = self.line;
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            text.push(c);
            self.advance();
        }
        Token {
            kind: TokenKind::Comment,
            text,
            line: start_line,
        }
    }

    fn block_comment(&mut self) -> Token {
        let start_line = self.line;
        let mut text = String::from("/*");
        // opening '/' and '*' already consumed by the caller
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    text.push_str("*/");
                    break;
                }
                Some(c) => text.push(c),
                None => {
                    self.warnings.push(LexWarning {
                        kind: LexWarningKind::UnterminatedComment,
                        line: start_line,
                    });
                    break;
                }
            }
        }
        Token {
            kind: TokenKind::Comment,
            text,
            line: start_line,
        }
    }

    /// Lexes a string literal, quotes kept in the text.
    ///
    /// `\"` and `\\` (and every other backslash escape) are honored. An
    /// unescaped newline or end of input ends the literal best-effort and
    /// records a warning; the partial token is still emitted so downstream
    /// analysis continues.
    fn string_literal(&mut self) -> Token {
        let start_line = self.line;
        let mut text = String::from("\"");
        // opening quote already consumed by the caller
        loop {
            match self.peek() {
                Some('"') => {
                    self.advance();
                    text.push('"');
                    break;
                }
                Some('\\') => {
                    self.advance();
                    text.push('\\');
                    if let Some(escaped) = self.advance() {
                        text.push(escaped);
                    }
                }
                Some('\n') | None => {
                    self.warnings.push(LexWarning {
                        kind: LexWarningKind::UnterminatedString,
                        line: start_line,
                    });
                    break;
                }
                Some(c) => {
                    self.advance();
                    text.push(c);
                }
            }
        }
        Token {
            kind: TokenKind::StringLiteral,
            text,
            line: start_line,
        }
    }

    /// Lexes a character literal, quotes kept in the text.
    ///
    /// An unterminated literal ends best-effort at the newline, without a
    /// dedicated warning kind.
    fn char_literal(&mut self) -> Token {
        let start_line = self.line;
        let mut text = String::from("'");
        loop {
            match self.peek() {
                Some('\'') => {
                    self.advance();
                    text.push('\'');
                    break;
                }
                Some('\\') => {
                    self.advance();
                    text.push('\\');
                    if let Some(escaped) = self.advance() {
                        text.push(escaped);
                    }
                }
                Some('\n') | None => break,
                Some(c) => {
                    self.advance();
                    text.push(c);
                }
            }
        }
        Token {
            kind: TokenKind::CharLiteral,
            text,
            line: start_line,
        }
    }

    /// Lexes a numeric constant, including hex, suffixes and exponents.
    fn number(&mut self, first: char) -> Token {
        let start_line = self.line;
        let mut text = String::new();
        text.push(first);
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' {
                text.push(c);
                self.advance();
            } else if (c == '+' || c == '-')
                && matches!(text.chars().last(), Some('e' | 'E' | 'p' | 'P'))
            {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        Token {
            kind: TokenKind::Number,
            text,
            line: start_line,
        }
    }

    fn identifier_or_keyword(&mut self, first: char) -> Token {
        let start_line = self.line;
        let mut text = String::new();
        text.push(first);
        while let Some(c) = self.peek() {
            if !c.is_ascii_alphanumeric() && c != '_' {
                break;
            }
            text.push(c);
            self.advance();
        }
        let kind = if KEYWORDS.contains(&text.as_str()) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Token {
            kind,
            text,
            line: start_line,
        }
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            self.skip_whitespace();

            match self.peek()? {
                '#' => {
                    self.skip_directive();
                    continue;
                }
                '/' if self.peek_next() == Some('/') => {
                    return Some(self.line_comment());
                }
                '/' if self.peek_next() == Some('*') => {
                    self.advance();
                    self.advance();
                    return Some(self.block_comment());
                }
                '"' => {
                    self.advance();
                    return Some(self.string_literal());
                }
                '\'' => {
                    self.advance();
                    return Some(self.char_literal());
                }
                c if c.is_ascii_digit() => {
                    self.advance();
                    return Some(self.number(c));
                }
                c if c.is_ascii_alphabetic() || c == '_' => {
                    self.advance();
                    return Some(self.identifier_or_keyword(c));
                }
                c => {
                    let line = self.line;
                    self.advance();
                    return Some(Token {
                        kind: TokenKind::Punct,
                        text: c.to_string(),
                        line,
                    });
                }
            }
        }
    }
}

/// Tokenizes a complete source string in one forward pass.
///
/// # Returns
///
/// The token sequence and any lexical warnings gathered along the way.
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<LexWarning>) {
    let mut lexer = Lexer::new(source);
    let tokens: Vec<Token> = lexer.by_ref().collect();
    (tokens, lexer.into_warnings())
}
