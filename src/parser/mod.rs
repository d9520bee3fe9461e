//! # Structural Parser
//!
//! Recovers a shallow program model from the token stream: function
//! definitions and the call expressions inside them. This is not a C
//! grammar. The parser reacts to two heuristics (a function-definition
//! shape and a call shape) and skips everything else, so macro-heavy,
//! partial, or non-standard sources still produce a usable model instead
//! of a parse failure.
//!
//! ## Key Types
//!
//! - [`AnalysisContext`] - Complete context for analyzing one source unit
//! - [`ProgramModel`] - Recovered functions plus the global pseudo-function
//! - [`FunctionDefinition`] - One function and the calls in its body
//! - [`CallExpression`] - One call site with raw argument fragments

use crate::lexer::{self, LexWarning, Token, TokenKind};
use anyhow::Result;
use std::path::Path;

/// Scope name used for calls that appear outside any function body.
pub const GLOBAL_SCOPE: &str = "global";

/// A single call site recovered from the token stream.
///
/// Argument fragments are raw token text split on top-level commas, not
/// evaluated expressions; the rule layer matches on syntactic shape only
/// (literal vs. variable, width digits in a conversion).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpression {
    /// Callee name as written at the call site.
    pub callee: String,

    /// Raw argument text fragments, in order.
    pub args: Vec<String>,

    /// 1-based source line of the callee identifier.
    pub line: usize,
}

impl CallExpression {
    /// Reconstructs an approximate source snippet of the call.
    pub fn snippet(&self) -> String {
        format!("{}({})", self.callee, self.args.join(", "))
    }
}

/// A recovered function definition and the calls inside its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDefinition {
    /// Function name.
    pub name: String,

    /// 1-based line of the function name (0 for the synthetic global scope).
    pub start_line: usize,

    /// Calls in source order within the body.
    pub calls: Vec<CallExpression>,
}

/// The parser's structural view of one source unit.
///
/// Every call belongs to exactly one [`FunctionDefinition`] or to the
/// synthetic global pseudo-function; call order within a scope matches
/// source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramModel {
    /// Function definitions in source order.
    pub functions: Vec<FunctionDefinition>,

    /// Synthetic scope holding calls outside any function body.
    pub globals: FunctionDefinition,
}

impl ProgramModel {
    /// Iterates all scopes: functions in source order, then the global
    /// pseudo-function.
    pub fn scopes(&self) -> impl Iterator<Item = &FunctionDefinition> {
        self.functions.iter().chain(std::iter::once(&self.globals))
    }
}

/// Complete analysis context for one parsed source unit.
///
/// Carries the raw source (for snippets), the recovered model, and any
/// lexical warnings from tokenization. Discarded after findings are
/// extracted; findings own copies of everything they report.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    /// Path identifier for the source file.
    pub file_path: String,

    /// Raw source code content.
    pub source_code: String,

    /// Recovered structural model.
    pub model: ProgramModel,

    /// Lexical warnings gathered during tokenization.
    pub lex_warnings: Vec<LexWarning>,
}

impl AnalysisContext {
    /// Creates an analysis context from source code.
    ///
    /// Tokenizes and structurally parses the source. Never fails on
    /// malformed C; lexical problems land in `lex_warnings` and
    /// unrecognized token sequences are skipped.
    ///
    /// # Arguments
    ///
    /// * `file_path` - Path identifier for the source file
    /// * `source_code` - Raw C source text
    pub fn from_source(file_path: &str, source_code: String) -> Self {
        let (tokens, lex_warnings) = lexer::tokenize(&source_code);
        let model = parse_tokens(&tokens);

        Self {
            file_path: file_path.to_string(),
            source_code,
            model,
            lex_warnings,
        }
    }

    /// Retrieves a specific line from the source code.
    ///
    /// # Arguments
    ///
    /// * `line` - Line number (1-indexed)
    ///
    /// # Returns
    ///
    /// The content of the specified line, or `None` if out of bounds.
    pub fn get_source_line(&self, line: usize) -> Option<&str> {
        self.source_code.lines().nth(line.saturating_sub(1))
    }
}

/// Parses a C file from a filesystem path.
///
/// Reads the file content and creates an analysis context.
///
/// # Errors
///
/// Returns an error only if the file cannot be read; malformed source
/// never fails.
pub fn parse_c_file(path: &Path) -> Result<AnalysisContext> {
    let source_code = std::fs::read_to_string(path)?;
    Ok(AnalysisContext::from_source(
        &path.to_string_lossy(),
        source_code,
    ))
}

/// Builds the program model from a token sequence.
///
/// Two heuristics drive the scan:
///
/// 1. Function definition: identifier `(`...`)` `{`. Return-type tokens
///    before the identifier are ignored; keywords never match because
///    they are not identifier tokens.
/// 2. Call: identifier immediately followed by `(`. The argument span is
///    captured verbatim up to the matching `)` and split on top-level
///    commas. The scan resumes just past the callee so nested calls
///    inside the argument span are recorded as their own entries.
///
/// Brace depth is tracked inside a function; when it returns to zero the
/// function closes. Anything that matches neither heuristic is skipped
/// without producing a finding.
pub fn parse_tokens(tokens: &[Token]) -> ProgramModel {
    let tokens: Vec<&Token> = tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Comment)
        .collect();

    let mut functions: Vec<FunctionDefinition> = Vec::new();
    let mut globals = FunctionDefinition {
        name: GLOBAL_SCOPE.to_string(),
        start_line: 0,
        calls: Vec::new(),
    };
    let mut i = 0;

    while i < tokens.len() {
        let tok = tokens[i];

        if tok.is_identifier() && is_punct_at(&tokens, i + 1, '(') {
            if let Some(close) = matching_paren(&tokens, i + 1) {
                if is_punct_at(&tokens, close + 1, '{') {
                    let mut function = FunctionDefinition {
                        name: tok.text.clone(),
                        start_line: tok.line,
                        calls: Vec::new(),
                    };
                    i = scan_body(&tokens, close + 2, &mut function);
                    functions.push(function);
                    continue;
                }
                globals.calls.push(build_call(tok, &tokens[i + 2..close]));
                i += 2;
                continue;
            }
            // no matching ')' before end of input: not a call, resync
        }
        i += 1;
    }

    ProgramModel { functions, globals }
}

/// Scans a function body starting just past its opening `{`, collecting
/// calls until brace depth returns to zero. Returns the index of the
/// first token after the body; a body left open at end of input keeps
/// whatever was recovered.
fn scan_body(tokens: &[&Token], start: usize, function: &mut FunctionDefinition) -> usize {
    let mut depth = 1usize;
    let mut i = start;

    while i < tokens.len() && depth > 0 {
        let tok = tokens[i];

        if tok.is_punct('{') {
            depth += 1;
            i += 1;
            continue;
        }
        if tok.is_punct('}') {
            depth -= 1;
            i += 1;
            continue;
        }
        if tok.is_identifier() && is_punct_at(tokens, i + 1, '(') {
            if let Some(close) = matching_paren(tokens, i + 1) {
                function.calls.push(build_call(tok, &tokens[i + 2..close]));
                // resume inside the argument span so nested calls are found
                i += 2;
                continue;
            }
            // no matching ')' before end of input: not a call, resync
        }
        i += 1;
    }

    i
}

fn is_punct_at(tokens: &[&Token], index: usize, ch: char) -> bool {
    tokens.get(index).map_or(false, |t| t.is_punct(ch))
}

/// Returns the index of the `)` matching the `(` at `open`, respecting
/// nested parentheses, or `None` if the input ends first.
fn matching_paren(tokens: &[&Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, tok) in tokens[open..].iter().enumerate() {
        if tok.is_punct('(') {
            depth += 1;
        } else if tok.is_punct(')') {
            depth -= 1;
            if depth == 0 {
                return Some(open + offset);
            }
        }
    }
    None
}

/// Builds a [`CallExpression`] from the callee token and the tokens
/// between its parentheses, splitting argument fragments on commas that
/// are not nested inside inner parentheses.
fn build_call(callee: &Token, arg_tokens: &[&Token]) -> CallExpression {
    let mut args = Vec::new();
    let mut fragment: Vec<&str> = Vec::new();
    let mut depth = 0usize;

    for tok in arg_tokens {
        if tok.is_punct('(') {
            depth += 1;
        } else if tok.is_punct(')') {
            depth = depth.saturating_sub(1);
        } else if tok.is_punct(',') && depth == 0 {
            args.push(fragment.join(" "));
            fragment.clear();
            continue;
        }
        fragment.push(tok.text.as_str());
    }
    if !fragment.is_empty() || !args.is_empty() {
        args.push(fragment.join(" "));
    }

    CallExpression {
        callee: callee.text.clone(),
        args,
        line: callee.line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> ProgramModel {
        AnalysisContext::from_source("test.c", source.to_string()).model
    }

    #[test]
    fn test_function_with_calls_in_order() {
        let model = parse(
            "void f(char *s) {\n    gets(s);\n    strcpy(dst, s);\n}\n",
        );
        assert_eq!(model.functions.len(), 1);
        let f = &model.functions[0];
        assert_eq!(f.name, "f");
        assert_eq!(f.start_line, 1);
        let callees: Vec<&str> = f.calls.iter().map(|c| c.callee.as_str()).collect();
        assert_eq!(callees, vec!["gets", "strcpy"]);
        assert_eq!(f.calls[0].line, 2);
        assert_eq!(f.calls[1].args, vec!["dst", "s"]);
    }

    #[test]
    fn test_nested_blocks_stay_in_one_function() {
        let model = parse(
            "int main() {\n  if (x) {\n    while (y) {\n      system(cmd);\n    }\n  }\n  return 0;\n}\n",
        );
        assert_eq!(model.functions.len(), 1);
        assert_eq!(model.functions[0].calls.len(), 1);
        assert_eq!(model.functions[0].calls[0].callee, "system");
        assert_eq!(model.functions[0].calls[0].line, 4);
    }

    #[test]
    fn test_keyword_callees_excluded() {
        let model = parse("void f() { if (a) { } while (b) { } x = sizeof(int); }");
        assert!(model.functions[0].calls.is_empty());
    }

    #[test]
    fn test_nested_calls_recorded_individually() {
        let model = parse("void f() { outer(inner(x), y); }");
        let callees: Vec<&str> = model.functions[0]
            .calls
            .iter()
            .map(|c| c.callee.as_str())
            .collect();
        assert_eq!(callees, vec!["outer", "inner"]);
        // the outer call keeps the nested span in its first fragment
        assert_eq!(model.functions[0].calls[0].args[0], "inner ( x )");
    }

    #[test]
    fn test_global_calls_land_in_pseudo_function() {
        let model = parse("int x = setup();\nint main() { return 0; }\n");
        assert_eq!(model.globals.name, GLOBAL_SCOPE);
        assert_eq!(model.globals.calls.len(), 1);
        assert_eq!(model.globals.calls[0].callee, "setup");
        assert_eq!(model.functions.len(), 1);
    }

    #[test]
    fn test_string_argument_fragment_keeps_quotes() {
        let model = parse("void f() { printf(\"%s\", name); }");
        let call = &model.functions[0].calls[0];
        assert_eq!(call.args.len(), 2);
        assert!(call.args[0].starts_with('"'));
    }

    #[test]
    fn test_comma_inside_nested_parens_not_split() {
        let model = parse("void f() { g(h(a, b), c); }");
        let call = &model.functions[0].calls[0];
        assert_eq!(call.callee, "g");
        assert_eq!(call.args.len(), 2);
        assert_eq!(call.args[1], "c");
    }

    #[test]
    fn test_garbage_is_skipped_silently() {
        let model = parse("@@ $$ ::: void f() { gets(s); } %% }{");
        assert_eq!(model.functions.len(), 1);
        assert_eq!(model.functions[0].calls[0].callee, "gets");
    }

    #[test]
    fn test_unclosed_function_keeps_recovered_calls() {
        let model = parse("void f() {\n  system(cmd);\n");
        assert_eq!(model.functions.len(), 1);
        assert_eq!(model.functions[0].calls.len(), 1);
    }

    #[test]
    fn test_unmatched_open_paren_is_not_a_call() {
        let model = parse("void f() { broken(a, b; }");
        // `broken(` never closes; the scan resyncs without recording it
        assert!(model
            .functions
            .first()
            .map_or(true, |f| f.calls.iter().all(|c| c.callee != "broken")));
    }

    #[test]
    fn test_comment_between_callee_and_paren() {
        let model = parse("void f() { gets /* legacy */ (s); }");
        assert_eq!(model.functions[0].calls[0].callee, "gets");
    }

    #[test]
    fn test_call_with_no_arguments() {
        let model = parse("void f() { cleanup(); }");
        assert!(model.functions[0].calls[0].args.is_empty());
    }

    #[test]
    fn test_multiple_functions_in_source_order() {
        let model = parse("void a() { f1(); }\nvoid b() { f2(); }\n");
        let names: Vec<&str> = model.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
