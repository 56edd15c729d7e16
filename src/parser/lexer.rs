//! Line lexer for the text dialect using logos
//!
//! Each input line is classified on its own. A line is only recognized when
//! a single token covers it completely; everything else is ignored.

use logos::Logos;
use tracing::debug;

/// A `Key- "Value"` assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub key: String,
    pub value: String,
}

#[derive(Logos, Debug, Clone, PartialEq)]
pub enum LineToken {
    /// `Key- "Value"`; the key runs up to the first dash
    #[regex(r#"[^-"\n]+-[ \t]*"([^"\\\n]|\\.)*""#, assignment)]
    Assign(Assignment),

    /// `- bullet text`
    #[regex(r"-[ \t][^\n]*", |lex| lex.slice()[1..].trim().to_string())]
    Bullet(String),
}

fn assignment(lex: &mut logos::Lexer<LineToken>) -> Option<Assignment> {
    let (key, rest) = lex.slice().split_once('-')?;
    let quoted = rest.trim_start();
    let inner = quoted.strip_prefix('"')?.strip_suffix('"')?;
    Some(Assignment {
        key: key.trim().to_string(),
        value: unquote(inner),
    })
}

/// Resolve escapes inside a quoted value. Only `\"` is an escape; every
/// other backslash is kept as written.
pub fn unquote(inner: &str) -> String {
    inner.replace("\\\"", "\"")
}

/// Classify one line. Surrounding whitespace is ignored.
pub fn lex_line(line: &str) -> Option<LineToken> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    lex_exact(line).or_else(|| trailing_backslash(line))
}

fn lex_exact(line: &str) -> Option<LineToken> {
    let mut lexer = LineToken::lexer(line);
    let token = lexer.next()?.ok()?;
    (lexer.span() == (0..line.len())).then_some(token)
}

/// A value ending in a backslash, such as `Address- "C:\dir\"`, reads as
/// an escaped quote with no closing one. When the line ends that way the
/// final quote closes the value and the backslash is kept.
fn trailing_backslash(line: &str) -> Option<LineToken> {
    let body = line.strip_suffix("\\\"")?;
    match lex_exact(&format!("{}\"", body))? {
        LineToken::Assign(mut assignment) => {
            assignment.value.push('\\');
            Some(LineToken::Assign(assignment))
        }
        LineToken::Bullet(_) => None,
    }
}

/// Lex input into classified lines, keeping 1-based line numbers
pub fn lex(input: &str) -> impl Iterator<Item = (usize, Option<LineToken>)> + '_ {
    input.lines().enumerate().map(|(index, line)| {
        let token = lex_line(line);
        if token.is_none() && !line.trim().is_empty() {
            debug!(line = index + 1, text = line.trim(), "unrecognized line");
        }
        (index + 1, token)
    })
}
