//! Error types for reading input documents

use std::path::PathBuf;

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Fatal input errors. No partial record is produced.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed JSON at line {line}, column {column}: {message}")]
    Json {
        span: Span,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("cannot read input file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// Build a JSON error, locating serde_json's line/column in the source
    pub fn from_json(source: &str, err: &serde_json::Error) -> Self {
        let (line, column) = (err.line(), err.column());
        let start = byte_offset(source, line, column);
        let end = source[start..]
            .chars()
            .next()
            .map_or(start, |c| start + c.len_utf8());
        // serde_json appends " at line L column C"; the fields carry it instead
        let message = err.to_string();
        let message = match message.rfind(" at line ") {
            Some(index) => message[..index].to_string(),
            None => message,
        };
        ParseError::Json {
            span: start..end,
            line,
            column,
            message,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            ParseError::Json { span, message, .. } => {
                let mut buf = Vec::new();
                let written = Report::build(ReportKind::Error, filename, span.start)
                    .with_message("malformed JSON input")
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message(message)
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf);
                match written {
                    Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
                    Err(_) => self.to_string(),
                }
            }
            ParseError::Io { .. } => self.to_string(),
        }
    }
}

/// Convert a 1-based line and column to a byte offset, clamped to the
/// source and to a char boundary
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let mut offset = (line_start + column.saturating_sub(1)).min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
