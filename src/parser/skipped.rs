//! Input that parsed but did not make it into the record

use std::fmt;

use super::record::SectionKind;

/// A piece of input the parser discarded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    /// 1-based source line; JSON input carries none
    pub line: Option<usize>,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Entry whose primary field was blank. `position` counts every entry
    /// of the section in input order, dropped ones included.
    MissingPrimary {
        section: SectionKind,
        position: usize,
    },
    /// Field line before the section's primary key
    FieldBeforePrimary { section: SectionKind, key: String },
    /// Key that is not valid at top level (`section` is `None`) or in the
    /// open section
    UnknownKey {
        section: Option<SectionKind>,
        key: String,
    },
    UnknownSection { name: String },
    /// Bullet with no entry to attach to
    StrayBullet,
    /// Bullet under an entry of a section without bullet lists
    BulletNotAllowed { section: SectionKind },
}

impl Skipped {
    pub fn new(line: Option<usize>, reason: SkipReason) -> Self {
        Self { line, reason }
    }

    /// Whether the skipped input belonged to a list section
    pub fn in_section(&self) -> bool {
        !matches!(
            self.reason,
            SkipReason::UnknownKey { section: None, .. }
        )
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingPrimary { section, position } => write!(
                f,
                "{} #{}: {} is missing, entry dropped",
                section.name(),
                position,
                section.primary_key()
            ),
            SkipReason::FieldBeforePrimary { section, key } => write!(
                f,
                "{}: \"{}\" comes before any {}, ignored",
                section.name(),
                key,
                section.primary_key()
            ),
            SkipReason::UnknownKey {
                section: Some(section),
                key,
            } => write!(f, "{}: unknown key \"{}\", ignored", section.name(), key),
            SkipReason::UnknownKey { section: None, key } => {
                write!(f, "unknown top-level key \"{}\", ignored", key)
            }
            SkipReason::UnknownSection { name } => {
                write!(f, "unknown section \"{}\", its entries are ignored", name)
            }
            SkipReason::StrayBullet => write!(f, "bullet outside an entry, ignored"),
            SkipReason::BulletNotAllowed { section } => {
                write!(f, "{} entries take no bullets, ignored", section.name())
            }
        }
    }
}

impl fmt::Display for Skipped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.reason),
            None => write!(f, "{}", self.reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let dropped = Skipped::new(
            None,
            SkipReason::MissingPrimary {
                section: SectionKind::WorkExperience,
                position: 1,
            },
        );
        assert_eq!(
            dropped.to_string(),
            "Work Experience #1: Title is missing, entry dropped"
        );

        let early = Skipped::new(
            Some(3),
            SkipReason::FieldBeforePrimary {
                section: SectionKind::Education,
                key: "Institution".to_string(),
            },
        );
        assert_eq!(
            early.to_string(),
            "line 3: Education: \"Institution\" comes before any Degree, ignored"
        );
    }

    #[test]
    fn test_top_level_key_is_not_in_section() {
        let top = Skipped::new(
            Some(1),
            SkipReason::UnknownKey {
                section: None,
                key: "Nickname".to_string(),
            },
        );
        assert!(!top.in_section());
        assert!(Skipped::new(Some(2), SkipReason::StrayBullet).in_section());
    }
}
