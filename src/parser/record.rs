//! Canonical résumé record shared by both input dialects
//!
//! The serde attributes define the JSON dialect: key names match the keys
//! used by the Awesome-CV web form export (`FirstName`, `Work Experience`,
//! `items`, ...). Every field defaults to empty so partial documents decode.

use serde::{Deserialize, Serialize};

use super::skipped::{SkipReason, Skipped};

/// The canonical in-memory résumé
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeRecord {
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    /// Title line; may hold two roles joined by the typeset separator
    #[serde(rename = "Position")]
    pub position: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Mobile")]
    pub mobile: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Homepage")]
    pub homepage: String,
    #[serde(rename = "GitHub")]
    pub github: String,
    #[serde(rename = "LinkedIn")]
    pub linkedin: String,
    #[serde(rename = "Twitter")]
    pub twitter: String,
    #[serde(rename = "Quote")]
    pub quote: String,
    #[serde(rename = "Summary")]
    pub summary: String,

    #[serde(rename = "Work Experience")]
    pub work_experience: Vec<WorkExperience>,
    #[serde(rename = "Education")]
    pub education: Vec<Education>,
    #[serde(rename = "Skills")]
    pub skills: Vec<Skill>,
    #[serde(rename = "Certificates")]
    pub certificates: Vec<Certificate>,
    #[serde(rename = "Honors")]
    pub honors: Vec<Honor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct WorkExperience {
    pub title: String,
    pub company: String,
    pub location: String,
    pub date: String,
    #[serde(rename = "items")]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub date: String,
    #[serde(rename = "items")]
    pub bullets: Vec<String>,
}

/// One skill category; `skills` is kept as the comma-separated source string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Skill {
    pub category: String,
    pub skills: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Certificate {
    pub name: String,
    pub issuer: String,
    pub location: String,
    pub date: String,
    #[serde(rename = "items")]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Honor {
    pub name: String,
    pub issuer: String,
    pub location: String,
    pub date: String,
}

/// The five list sections of a résumé
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    WorkExperience,
    Education,
    Skills,
    Certificates,
    Honors,
}

/// Entry fields addressable from the text dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Company,
    Degree,
    Institution,
    Category,
    Skills,
    Name,
    Issuer,
    Location,
    Date,
}

/// Maps a text-dialect key to an entry field. The first spec of every
/// section table is that section's primary field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub field: Field,
}

const fn spec(key: &'static str, field: Field) -> FieldSpec {
    FieldSpec { key, field }
}

const WORK_FIELDS: &[FieldSpec] = &[
    spec("Title", Field::Title),
    spec("Company", Field::Company),
    spec("Location", Field::Location),
    spec("Date", Field::Date),
];

const EDUCATION_FIELDS: &[FieldSpec] = &[
    spec("Degree", Field::Degree),
    spec("Institution", Field::Institution),
    spec("Location", Field::Location),
    spec("Date", Field::Date),
];

const SKILL_FIELDS: &[FieldSpec] = &[
    spec("Category", Field::Category),
    spec("Skills", Field::Skills),
];

const CERTIFICATE_FIELDS: &[FieldSpec] = &[
    spec("Name", Field::Name),
    spec("Issuer", Field::Issuer),
    spec("Location", Field::Location),
    spec("Date", Field::Date),
];

const HONOR_FIELDS: &[FieldSpec] = &[
    spec("Name", Field::Name),
    spec("Issuer", Field::Issuer),
    spec("Location", Field::Location),
    spec("Date", Field::Date),
];

impl SectionKind {
    /// All sections in render order
    pub const ALL: [SectionKind; 5] = [
        SectionKind::WorkExperience,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Certificates,
        SectionKind::Honors,
    ];

    /// Name used by `Section-` lines and as the JSON array key
    pub fn name(self) -> &'static str {
        match self {
            SectionKind::WorkExperience => "Work Experience",
            SectionKind::Education => "Education",
            SectionKind::Skills => "Skills",
            SectionKind::Certificates => "Certificates",
            SectionKind::Honors => "Honors",
        }
    }

    /// Heading text printed in the document
    pub fn heading(self) -> &'static str {
        match self {
            SectionKind::Honors => "Honors & Awards",
            other => other.name(),
        }
    }

    /// Exact-match lookup of a section name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Key table recognized inside this section
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            SectionKind::WorkExperience => WORK_FIELDS,
            SectionKind::Education => EDUCATION_FIELDS,
            SectionKind::Skills => SKILL_FIELDS,
            SectionKind::Certificates => CERTIFICATE_FIELDS,
            SectionKind::Honors => HONOR_FIELDS,
        }
    }

    pub fn primary_field(self) -> Field {
        self.fields()[0].field
    }

    /// Key naming the primary field, e.g. `Title`
    pub fn primary_key(self) -> &'static str {
        self.fields()[0].key
    }

    /// Case-insensitive key lookup in this section's table
    pub fn field_for_key(self, key: &str) -> Option<Field> {
        self.fields()
            .iter()
            .find(|spec| spec.key.eq_ignore_ascii_case(key))
            .map(|spec| spec.field)
    }
}

/// Top-level scalar fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityField {
    FirstName,
    LastName,
    Position,
    Address,
    Mobile,
    Email,
    Homepage,
    GitHub,
    LinkedIn,
    Twitter,
    Quote,
    Summary,
}

const IDENTITY_KEYS: &[(&str, IdentityField)] = &[
    ("FirstName", IdentityField::FirstName),
    ("LastName", IdentityField::LastName),
    ("Position", IdentityField::Position),
    ("Address", IdentityField::Address),
    ("Mobile", IdentityField::Mobile),
    ("Email", IdentityField::Email),
    ("Homepage", IdentityField::Homepage),
    ("GitHub", IdentityField::GitHub),
    ("LinkedIn", IdentityField::LinkedIn),
    ("Twitter", IdentityField::Twitter),
    ("Quote", IdentityField::Quote),
    ("Summary", IdentityField::Summary),
];

impl IdentityField {
    pub fn from_key(key: &str) -> Option<Self> {
        IDENTITY_KEYS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, field)| *field)
    }
}

/// An entry of any section, used while the text dialect builds entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Work(WorkExperience),
    Education(Education),
    Skill(Skill),
    Certificate(Certificate),
    Honor(Honor),
}

impl Entry {
    /// Empty entry of the given section
    pub fn new(kind: SectionKind) -> Self {
        match kind {
            SectionKind::WorkExperience => Entry::Work(WorkExperience::default()),
            SectionKind::Education => Entry::Education(Education::default()),
            SectionKind::Skills => Entry::Skill(Skill::default()),
            SectionKind::Certificates => Entry::Certificate(Certificate::default()),
            SectionKind::Honors => Entry::Honor(Honor::default()),
        }
    }

    pub fn kind(&self) -> SectionKind {
        match self {
            Entry::Work(_) => SectionKind::WorkExperience,
            Entry::Education(_) => SectionKind::Education,
            Entry::Skill(_) => SectionKind::Skills,
            Entry::Certificate(_) => SectionKind::Certificates,
            Entry::Honor(_) => SectionKind::Honors,
        }
    }

    pub fn primary(&self) -> &str {
        match self {
            Entry::Work(e) => e.primary(),
            Entry::Education(e) => e.primary(),
            Entry::Skill(e) => e.primary(),
            Entry::Certificate(e) => e.primary(),
            Entry::Honor(e) => e.primary(),
        }
    }

    /// Set a field. Returns false when the field does not belong to this entry.
    pub fn set(&mut self, field: Field, value: String) -> bool {
        let slot = match (self, field) {
            (Entry::Work(e), Field::Title) => &mut e.title,
            (Entry::Work(e), Field::Company) => &mut e.company,
            (Entry::Work(e), Field::Location) => &mut e.location,
            (Entry::Work(e), Field::Date) => &mut e.date,
            (Entry::Education(e), Field::Degree) => &mut e.degree,
            (Entry::Education(e), Field::Institution) => &mut e.institution,
            (Entry::Education(e), Field::Location) => &mut e.location,
            (Entry::Education(e), Field::Date) => &mut e.date,
            (Entry::Skill(e), Field::Category) => &mut e.category,
            (Entry::Skill(e), Field::Skills) => &mut e.skills,
            (Entry::Certificate(e), Field::Name) => &mut e.name,
            (Entry::Certificate(e), Field::Issuer) => &mut e.issuer,
            (Entry::Certificate(e), Field::Location) => &mut e.location,
            (Entry::Certificate(e), Field::Date) => &mut e.date,
            (Entry::Honor(e), Field::Name) => &mut e.name,
            (Entry::Honor(e), Field::Issuer) => &mut e.issuer,
            (Entry::Honor(e), Field::Location) => &mut e.location,
            (Entry::Honor(e), Field::Date) => &mut e.date,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// Append a bullet. Whitespace-only text and entries without a bullet
    /// list are rejected.
    pub fn push_bullet(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let bullets = match self {
            Entry::Work(e) => &mut e.bullets,
            Entry::Education(e) => &mut e.bullets,
            Entry::Certificate(e) => &mut e.bullets,
            Entry::Skill(_) | Entry::Honor(_) => return false,
        };
        bullets.push(text.to_string());
        true
    }
}

/// Common view over the typed entries
pub trait SectionEntry {
    /// Value of the field that decides whether the entry exists
    fn primary(&self) -> &str;

    fn bullets_mut(&mut self) -> Option<&mut Vec<String>> {
        None
    }

    fn is_complete(&self) -> bool {
        !self.primary().trim().is_empty()
    }
}

impl SectionEntry for WorkExperience {
    fn primary(&self) -> &str {
        &self.title
    }

    fn bullets_mut(&mut self) -> Option<&mut Vec<String>> {
        Some(&mut self.bullets)
    }
}

impl SectionEntry for Education {
    fn primary(&self) -> &str {
        &self.degree
    }

    fn bullets_mut(&mut self) -> Option<&mut Vec<String>> {
        Some(&mut self.bullets)
    }
}

impl SectionEntry for Skill {
    fn primary(&self) -> &str {
        &self.category
    }
}

impl SectionEntry for Certificate {
    fn primary(&self) -> &str {
        &self.name
    }

    fn bullets_mut(&mut self) -> Option<&mut Vec<String>> {
        Some(&mut self.bullets)
    }
}

impl SectionEntry for Honor {
    fn primary(&self) -> &str {
        &self.name
    }
}

fn normalize_entries<T: SectionEntry>(
    section: SectionKind,
    entries: &mut Vec<T>,
    skipped: &mut Vec<Skipped>,
) {
    let mut position = 0;
    entries.retain(|entry| {
        position += 1;
        let keep = entry.is_complete();
        if !keep {
            skipped.push(Skipped::new(
                None,
                SkipReason::MissingPrimary { section, position },
            ));
        }
        keep
    });
    for entry in entries.iter_mut() {
        if let Some(bullets) = entry.bullets_mut() {
            bullets.retain(|bullet| !bullet.trim().is_empty());
        }
    }
}

impl ResumeRecord {
    /// Mutable access to a top-level scalar
    pub fn identity_mut(&mut self, field: IdentityField) -> &mut String {
        match field {
            IdentityField::FirstName => &mut self.first_name,
            IdentityField::LastName => &mut self.last_name,
            IdentityField::Position => &mut self.position,
            IdentityField::Address => &mut self.address,
            IdentityField::Mobile => &mut self.mobile,
            IdentityField::Email => &mut self.email,
            IdentityField::Homepage => &mut self.homepage,
            IdentityField::GitHub => &mut self.github,
            IdentityField::LinkedIn => &mut self.linkedin,
            IdentityField::Twitter => &mut self.twitter,
            IdentityField::Quote => &mut self.quote,
            IdentityField::Summary => &mut self.summary,
        }
    }

    /// Append an entry to its section list
    pub fn push_entry(&mut self, entry: Entry) {
        match entry {
            Entry::Work(e) => self.work_experience.push(e),
            Entry::Education(e) => self.education.push(e),
            Entry::Skill(e) => self.skills.push(e),
            Entry::Certificate(e) => self.certificates.push(e),
            Entry::Honor(e) => self.honors.push(e),
        }
    }

    /// "First Last", skipping whichever half is empty
    pub fn full_name(&self) -> String {
        [self.first_name.trim(), self.last_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn section_len(&self, section: SectionKind) -> usize {
        match section {
            SectionKind::WorkExperience => self.work_experience.len(),
            SectionKind::Education => self.education.len(),
            SectionKind::Skills => self.skills.len(),
            SectionKind::Certificates => self.certificates.len(),
            SectionKind::Honors => self.honors.len(),
        }
    }

    /// Drop entries without a primary field and whitespace-only bullets,
    /// returning what was dropped
    pub fn normalize(&mut self) -> Vec<Skipped> {
        let mut skipped = Vec::new();
        normalize_entries(SectionKind::WorkExperience, &mut self.work_experience, &mut skipped);
        normalize_entries(SectionKind::Education, &mut self.education, &mut skipped);
        normalize_entries(SectionKind::Skills, &mut self.skills, &mut skipped);
        normalize_entries(SectionKind::Certificates, &mut self.certificates, &mut skipped);
        normalize_entries(SectionKind::Honors, &mut self.honors, &mut skipped);
        skipped
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_lookup_is_exact() {
        assert_eq!(
            SectionKind::from_name("Work Experience"),
            Some(SectionKind::WorkExperience)
        );
        assert_eq!(SectionKind::from_name("work experience"), None);
        assert_eq!(SectionKind::from_name("Projects"), None);
    }

    #[test]
    fn test_primary_fields() {
        assert_eq!(SectionKind::WorkExperience.primary_field(), Field::Title);
        assert_eq!(SectionKind::Education.primary_field(), Field::Degree);
        assert_eq!(SectionKind::Skills.primary_field(), Field::Category);
        assert_eq!(SectionKind::Certificates.primary_field(), Field::Name);
        assert_eq!(SectionKind::Honors.primary_field(), Field::Name);
    }

    #[test]
    fn test_field_for_key_ignores_case() {
        assert_eq!(
            SectionKind::Education.field_for_key("institution"),
            Some(Field::Institution)
        );
        assert_eq!(SectionKind::Education.field_for_key("Company"), None);
    }

    #[test]
    fn test_entry_rejects_foreign_field() {
        let mut entry = Entry::new(SectionKind::Skills);
        assert!(!entry.set(Field::Title, "x".to_string()));
        assert!(entry.set(Field::Category, "Langs".to_string()));
        assert_eq!(entry.primary(), "Langs");
    }

    #[test]
    fn test_bullets_only_on_bulleted_entries() {
        let mut honor = Entry::new(SectionKind::Honors);
        assert!(!honor.push_bullet("won"));

        let mut work = Entry::new(SectionKind::WorkExperience);
        assert!(work.push_bullet("  shipped  "));
        assert!(!work.push_bullet("   "));
        match work {
            Entry::Work(w) => assert_eq!(w.bullets, vec!["shipped".to_string()]),
            other => panic!("unexpected entry {:?}", other),
        }
    }

    #[test]
    fn test_normalized_drops_incomplete_entries() {
        let record = ResumeRecord {
            work_experience: vec![
                WorkExperience {
                    title: "Engineer".to_string(),
                    bullets: vec!["a".to_string(), " ".to_string(), "b".to_string()],
                    ..Default::default()
                },
                WorkExperience {
                    company: "Nameless".to_string(),
                    ..Default::default()
                },
            ],
            honors: vec![Honor {
                name: "  ".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
        .normalized();

        assert_eq!(record.work_experience.len(), 1);
        assert_eq!(record.work_experience[0].bullets, vec!["a", "b"]);
        assert!(record.honors.is_empty());
    }

    #[test]
    fn test_normalize_reports_dropped_positions() {
        let mut record = ResumeRecord {
            education: vec![
                Education {
                    degree: "BSc".to_string(),
                    ..Default::default()
                },
                Education {
                    institution: "Uni".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let skipped = record.normalize();
        assert_eq!(
            skipped,
            vec![Skipped::new(
                None,
                SkipReason::MissingPrimary {
                    section: SectionKind::Education,
                    position: 2,
                }
            )]
        );
        assert_eq!(record.section_len(SectionKind::Education), 1);
    }

    #[test]
    fn test_full_name() {
        let mut record = ResumeRecord::default();
        record.first_name = "Ada".to_string();
        assert_eq!(record.full_name(), "Ada");
        record.last_name = "Lovelace".to_string();
        assert_eq!(record.full_name(), "Ada Lovelace");
    }
}
