//! JSON dialect: serde decode and encode of [`ResumeRecord`]

use std::fmt;

use serde::de::value::MapAccessDeserializer;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::ParseError;

use super::record::ResumeRecord;
use super::skipped::Skipped;

/// Decode a JSON document. Unknown keys are ignored and missing keys are
/// empty; incomplete entries and blank bullets are dropped after decoding.
pub fn parse_json(source: &str) -> Result<ResumeRecord, ParseError> {
    parse_json_with_skipped(source).map(|(record, _)| record)
}

/// Decode a JSON document and report the entries dropped while normalizing
pub fn parse_json_with_skipped(source: &str) -> Result<(ResumeRecord, Vec<Skipped>), ParseError> {
    let TopLevel(mut record) =
        serde_json::from_str(source).map_err(|err| ParseError::from_json(source, &err))?;
    let skipped = record.normalize();
    Ok((record, skipped))
}

/// The document root. Only an object is accepted; the derived struct
/// impl would also take an array and fill fields by position.
struct TopLevel(ResumeRecord);

impl<'de> Deserialize<'de> for TopLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TopLevelVisitor)
    }
}

struct TopLevelVisitor;

impl<'de> Visitor<'de> for TopLevelVisitor {
    type Value = TopLevel;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object of résumé fields")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<TopLevel, A::Error> {
        ResumeRecord::deserialize(MapAccessDeserializer::new(map)).map(TopLevel)
    }
}

impl ResumeRecord {
    /// Serialize to the JSON dialect (pretty-printed)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
