//! Parser for the line-oriented text dialect
//!
//! ```text
//! FirstName- "Ada"
//! Section- "Work Experience"
//! Title- "Engineer"
//! Company- "Analytical Engines Ltd"
//! - Wrote the first program
//! ```
//!
//! Parsing is a fold over classified lines. The state carries the open
//! section and the entry being built; the entry is committed when the next
//! primary key, the next section or the end of input arrives.

use tracing::debug;

use super::lexer::{lex, Assignment, LineToken};
use super::record::{Entry, IdentityField, ResumeRecord, SectionKind};
use super::skipped::{SkipReason, Skipped};

/// Where the parser currently is
#[derive(Debug, Default)]
enum Context {
    /// Before any `Section-` line
    #[default]
    NoSection,
    /// After a `Section-` line naming no known section
    UnknownSection,
    /// Inside a known section, with the entry being built and the line it
    /// started on
    Section {
        kind: SectionKind,
        pending: Option<(usize, Entry)>,
    },
}

#[derive(Debug, Default)]
struct TextParser {
    record: ResumeRecord,
    skipped: Vec<Skipped>,
    context: Context,
}

impl TextParser {
    fn step(mut self, (line, token): (usize, Option<LineToken>)) -> Self {
        match token {
            Some(LineToken::Assign(assignment)) => self.assign(line, assignment),
            Some(LineToken::Bullet(text)) => self.bullet(line, &text),
            None => {}
        }
        self
    }

    fn skip(&mut self, line: usize, reason: SkipReason) {
        debug!(line, "{}", reason);
        self.skipped.push(Skipped::new(Some(line), reason));
    }

    fn assign(&mut self, line: usize, Assignment { key, value }: Assignment) {
        if key.eq_ignore_ascii_case("section") {
            self.close_section();
            self.context = match SectionKind::from_name(&value) {
                Some(kind) => Context::Section {
                    kind,
                    pending: None,
                },
                None => {
                    self.skip(line, SkipReason::UnknownSection { name: value });
                    Context::UnknownSection
                }
            };
            return;
        }

        let reason = match &mut self.context {
            Context::NoSection => match IdentityField::from_key(&key) {
                Some(field) => {
                    *self.record.identity_mut(field) = value;
                    return;
                }
                None => SkipReason::UnknownKey { section: None, key },
            },
            Context::UnknownSection => {
                debug!(line, %key, "key inside unknown section");
                return;
            }
            Context::Section { kind, pending } => {
                let section = *kind;
                let Some(field) = section.field_for_key(&key) else {
                    self.skip(
                        line,
                        SkipReason::UnknownKey {
                            section: Some(section),
                            key,
                        },
                    );
                    return;
                };
                if field == section.primary_field() {
                    let previous = pending.take();
                    let mut entry = Entry::new(section);
                    entry.set(field, value);
                    *pending = Some((line, entry));
                    if let Some((started, previous)) = previous {
                        self.commit(started, previous);
                    }
                    return;
                }
                match pending {
                    Some((_, entry)) => {
                        entry.set(field, value);
                        return;
                    }
                    None => SkipReason::FieldBeforePrimary { section, key },
                }
            }
        };
        self.skip(line, reason);
    }

    fn bullet(&mut self, line: usize, text: &str) {
        let reason = match &mut self.context {
            Context::Section {
                pending: Some((_, entry)),
                ..
            } => {
                if entry.push_bullet(text) {
                    return;
                }
                SkipReason::BulletNotAllowed {
                    section: entry.kind(),
                }
            }
            Context::UnknownSection => {
                debug!(line, "bullet inside unknown section");
                return;
            }
            _ => SkipReason::StrayBullet,
        };
        self.skip(line, reason);
    }

    fn close_section(&mut self) {
        if let Context::Section { pending, .. } = std::mem::take(&mut self.context) {
            if let Some((started, entry)) = pending {
                self.commit(started, entry);
            }
        }
    }

    /// Append a finished entry, or record it as dropped when its primary
    /// field is blank
    fn commit(&mut self, started: usize, entry: Entry) {
        let section = entry.kind();
        if entry.primary().trim().is_empty() {
            let dropped_before = self
                .skipped
                .iter()
                .filter(|s| {
                    matches!(s.reason, SkipReason::MissingPrimary { section: k, .. } if k == section)
                })
                .count();
            let position = self.record.section_len(section) + dropped_before + 1;
            self.skip(started, SkipReason::MissingPrimary { section, position });
            return;
        }
        self.record.push_entry(entry);
    }

    fn finish(mut self) -> (ResumeRecord, Vec<Skipped>) {
        self.close_section();
        (self.record, self.skipped)
    }
}

/// Parse text-dialect source into a record. Never fails: unrecognized lines
/// and incomplete entries are skipped.
pub fn parse_text(input: &str) -> ResumeRecord {
    parse_text_with_skipped(input).0
}

/// Parse text-dialect source, also returning the input that was skipped
pub fn parse_text_with_skipped(input: &str) -> (ResumeRecord, Vec<Skipped>) {
    lex(input)
        .fold(TextParser::default(), TextParser::step)
        .finish()
}
