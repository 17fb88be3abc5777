// 👤 Party leader records - raw CSV rows and enriched records
//
// RawLeaderRow mirrors the CSV exactly (all text, dates optional).
// PartyLeader is the enriched, typed record the renderers consume.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::party::Party;
use crate::temporal::ResolvedDate;

/// Columns the input table must carry, in source order
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "name",
    "surname",
    "sex",
    "party_abr",
    "birth_date",
    "death_date",
    "assumed_office",
    "left_office",
];

// ============================================================================
// RAW ROW (as read from CSV)
// ============================================================================

/// One CSV row, untouched apart from empty cells becoming None
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawLeaderRow {
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub sex: String,
    pub party_abr: String,
    pub birth_date: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub death_date: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub assumed_office: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub left_office: Option<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

// ============================================================================
// ENRICHED RECORD
// ============================================================================

/// A party leader with defaulted dates and derived fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartyLeader {
    // Source columns
    pub name: String,
    pub surname: String,
    pub sex: String,
    pub party_abr: Party,
    pub birth_date: NaiveDate,
    pub death_date: ResolvedDate,
    pub assumed_office: ResolvedDate,
    pub left_office: ResolvedDate,

    // Derived columns
    pub age_when_assumed_office: i32,
    pub years_in_office: f64,
    pub full_name: String,
    pub full_name_years_in_office: String,
}

impl PartyLeader {
    /// True when no death date was recorded
    pub fn is_alive(&self) -> bool {
        self.death_date.is_defaulted()
    }

    /// True when no left-office date was recorded
    pub fn is_in_office(&self) -> bool {
        self.left_office.is_defaulted()
    }

    /// Chart coordinates: (age at assuming office, years in office)
    pub fn point(&self) -> (f64, f64) {
        (self.age_when_assumed_office as f64, self.years_in_office)
    }

    /// Hover label shown for this leader's marker
    pub fn hover_label(&self) -> &str {
        &self.full_name_years_in_office
    }
}

/// `name + " " + surname`
pub fn full_name(name: &str, surname: &str) -> String {
    format!("{} {}", name, surname)
}

/// `"<full_name> (<start_year> - <end_year>)"`
pub fn full_name_years_in_office(full_name: &str, start_year: i32, end_year: i32) -> String {
    format!("{} ({} - {})", full_name, start_year, end_year)
}
