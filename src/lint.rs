//! Lint checks for résumé content.
//!
//! Runs on a parsed record and reports content that is likely a mistake:
//! missing identity fields, malformed contact details, entries that lack
//! their secondary fields and input the parser had to skip. Warnings never
//! block rendering.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::record::ResumeRecord;
use crate::parser::{Parsed, Skipped};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(https?://)?(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b([-a-zA-Z0-9()@:%_+.~#?&/=]*)$",
    )
    .expect("valid url regex")
});

/// A lint warning about the record's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
}

/// Category of lint finding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    Identity,
    Contact,
    Entry,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Identity => write!(f, "identity"),
            LintCategory::Contact => write!(f, "contact"),
            LintCategory::Entry => write!(f, "entry"),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

/// Run all lint checks on a record.
pub fn check(record: &ResumeRecord) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    check_identity(record, &mut warnings);
    check_contact(record, &mut warnings);
    check_entries(record, &mut warnings);
    warnings
}

/// Lint a record and report what the parser skipped, so that entries
/// dropped for a blank or misspelled primary key are not lost silently.
pub fn check_parsed(parsed: &Parsed) -> Vec<LintWarning> {
    let mut warnings = check(&parsed.record);
    warnings.extend(parsed.skipped.iter().map(skipped_warning));
    warnings
}

fn skipped_warning(skipped: &Skipped) -> LintWarning {
    let category = if skipped.in_section() {
        LintCategory::Entry
    } else {
        LintCategory::Identity
    };
    LintWarning {
        category,
        message: skipped.to_string(),
    }
}

fn warn(warnings: &mut Vec<LintWarning>, category: LintCategory, message: String) {
    warnings.push(LintWarning { category, message });
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_identity(record: &ResumeRecord, warnings: &mut Vec<LintWarning>) {
    let required = [
        ("First name", &record.first_name),
        ("Last name", &record.last_name),
        ("Position", &record.position),
    ];
    for (label, value) in required {
        if is_blank(value) {
            warn(warnings, LintCategory::Identity, format!("{} is missing", label));
        }
    }
}

fn check_contact(record: &ResumeRecord, warnings: &mut Vec<LintWarning>) {
    let email = record.email.trim();
    if !email.is_empty() && !looks_like_email(email) {
        warn(
            warnings,
            LintCategory::Contact,
            format!("email \"{}\" does not look like an address", email),
        );
    }

    let homepage = record.homepage.trim();
    if !homepage.is_empty() && !looks_like_url(homepage) {
        warn(
            warnings,
            LintCategory::Contact,
            format!("homepage \"{}\" does not look like a URL", homepage),
        );
    }

    let handles = [
        ("GitHub", &record.github),
        ("LinkedIn", &record.linkedin),
        ("Twitter", &record.twitter),
    ];
    for (label, handle) in handles {
        if handle.trim().chars().any(char::is_whitespace) {
            warn(
                warnings,
                LintCategory::Contact,
                format!("{} handle \"{}\" contains whitespace", label, handle.trim()),
            );
        }
    }
}

fn check_entries(record: &ResumeRecord, warnings: &mut Vec<LintWarning>) {
    for (index, job) in record.work_experience.iter().enumerate() {
        if is_blank(&job.company) {
            warn(
                warnings,
                LintCategory::Entry,
                format!("Work Experience #{} (\"{}\"): company is missing", index + 1, job.title),
            );
        }
    }
    for (index, edu) in record.education.iter().enumerate() {
        if is_blank(&edu.institution) {
            warn(
                warnings,
                LintCategory::Entry,
                format!("Education #{} (\"{}\"): institution is missing", index + 1, edu.degree),
            );
        }
    }
    for (index, skill) in record.skills.iter().enumerate() {
        if is_blank(&skill.skills) {
            warn(
                warnings,
                LintCategory::Entry,
                format!("Skills #{} (\"{}\"): skill list is empty", index + 1, skill.category),
            );
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

fn looks_like_url(value: &str) -> bool {
    URL_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::record::{Education, Skill, WorkExperience};
    use crate::parser::{parse_with_skipped, InputFormat};

    fn complete_identity() -> ResumeRecord {
        ResumeRecord {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            position: "Analyst".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_clean_record_has_no_warnings() {
        let mut record = complete_identity();
        record.email = "ada@example.com".to_string();
        record.homepage = "https://www.example.org/about".to_string();
        record.github = "ada".to_string();
        assert!(check(&record).is_empty(), "{:?}", check(&record));
    }

    #[test]
    fn test_missing_identity() {
        let warnings = check(&ResumeRecord::default());
        let messages: Vec<_> = warnings
            .iter()
            .filter(|w| w.category == LintCategory::Identity)
            .map(|w| w.message.as_str())
            .collect();
        assert_eq!(
            messages,
            vec!["First name is missing", "Last name is missing", "Position is missing"]
        );
    }

    #[test]
    fn test_contact_shapes() {
        assert!(looks_like_email("a.b+c@mail.example.com"));
        assert!(!looks_like_email("ada@"));
        assert!(!looks_like_email("ada@example"));
        assert!(!looks_like_email("a da@example.com"));
        assert!(!looks_like_email(r#"a<b>"c@x.com"#));
        assert!(looks_like_url("example.com"));
        assert!(looks_like_url("http://localhost.dev:8080/x"));
        assert!(!looks_like_url("not a url"));
        assert!(!looks_like_url("https://example"));
        assert!(looks_like_url("www.example.co.uk/path?q=1&r=2#top"));
        assert!(!looks_like_url("javascript:alert(1)"));
    }

    #[test]
    fn test_contact_warnings() {
        let mut record = complete_identity();
        record.email = "ada-at-example".to_string();
        record.linkedin = "ada lovelace".to_string();
        let warnings = check(&record);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.category == LintCategory::Contact));
        assert_eq!(warnings[1].to_string(), "[contact] LinkedIn handle \"ada lovelace\" contains whitespace");
    }

    #[test]
    fn test_entry_warnings() {
        let mut record = complete_identity();
        record.work_experience.push(WorkExperience {
            title: "Eng".to_string(),
            ..Default::default()
        });
        record.education.push(Education {
            degree: "BSc".to_string(),
            institution: "Uni".to_string(),
            ..Default::default()
        });
        record.skills.push(Skill {
            category: "Langs".to_string(),
            skills: String::new(),
        });
        let warnings = check(&record);
        let categories: Vec<String> = warnings.iter().map(|w| w.category.to_string()).collect();
        assert_eq!(categories, vec!["entry", "entry"]);
        assert!(warnings[0].message.contains("company is missing"));
        assert!(warnings[1].message.contains("skill list is empty"));
    }

    #[test]
    fn test_contact_warning_for_email_with_markup() {
        let mut record = complete_identity();
        record.email = r#"a<b>"c@x.com"#.to_string();
        let warnings = check(&record);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, LintCategory::Contact);
    }

    #[test]
    fn test_dropped_text_entry_is_reported() {
        let source = r#"FirstName- "Ada"
LastName- "Lovelace"
Position- "Analyst"
Section- "Work Experience"
Titel- "Eng"
Company- "Acme"
- Did X
"#;
        let parsed = parse_with_skipped(source, InputFormat::Text).unwrap();
        assert!(parsed.record.work_experience.is_empty());
        let warnings = check_parsed(&parsed);
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().all(|w| w.category == LintCategory::Entry));
        assert!(warnings[0].message.contains("unknown key \"Titel\""));
    }

    #[test]
    fn test_dropped_json_entry_is_reported() {
        let source = r#"{"FirstName": "Ada", "LastName": "Lovelace", "Position": "Analyst",
            "Work Experience": [{"Company": "Acme"}]}"#;
        let parsed = parse_with_skipped(source, InputFormat::Json).unwrap();
        let warnings = check_parsed(&parsed);
        assert_eq!(
            warnings,
            vec![LintWarning {
                category: LintCategory::Entry,
                message: "Work Experience #1: Title is missing, entry dropped".to_string(),
            }]
        );
    }

    #[test]
    fn test_unknown_top_level_key_is_identity() {
        let parsed = parse_with_skipped("Nickname- \"Countess\"", InputFormat::Text).unwrap();
        let skipped: Vec<_> = check_parsed(&parsed)
            .into_iter()
            .filter(|w| w.message.contains("Nickname"))
            .collect();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].category, LintCategory::Identity);
    }
}
