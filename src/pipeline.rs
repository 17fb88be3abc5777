// 🔄 Data preparation pipeline
//
// load → default missing dates → normalize → derive → sort by spectrum
//
// `now` is always passed in: the binaries use today's local date, tests
// pin a fixed date.

use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{LeaderError, Result};
use crate::loader::load_csv;
use crate::party::Party;
use crate::record::{full_name, full_name_years_in_office, PartyLeader, RawLeaderRow};
use crate::temporal::{whole_years_between, years_in_office, DateSource, DateValue, ResolvedDate};

// ============================================================================
// STEP 2: DEFAULT MISSING DATES
// ============================================================================

/// A row whose optional dates have been resolved but not yet parsed
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultedRow {
    pub raw: RawLeaderRow,
    pub death_date: (DateValue, DateSource),
    pub assumed_office: (DateValue, DateSource),
    pub left_office: (DateValue, DateSource),
}

fn or_now(value: &Option<String>, now: NaiveDate) -> (DateValue, DateSource) {
    match value {
        Some(text) => (DateValue::Text(text.clone()), DateSource::Recorded),
        None => (DateValue::Date(now), DateSource::DefaultedToNow),
    }
}

/// Replace missing death/assumed/left dates with `now`.
pub fn default_missing_dates(raw: RawLeaderRow, now: NaiveDate) -> DefaultedRow {
    DefaultedRow {
        death_date: or_now(&raw.death_date, now),
        assumed_office: or_now(&raw.assumed_office, now),
        left_office: or_now(&raw.left_office, now),
        raw,
    }
}

// ============================================================================
// STEPS 3 + 4: NORMALIZE AND DERIVE
// ============================================================================

fn resolve(value: &(DateValue, DateSource), column: &'static str) -> Result<ResolvedDate> {
    let date = value.0.to_date(column)?;
    Ok(ResolvedDate {
        date,
        source: value.1,
    })
}

fn required<'a>(value: &'a str, column: &str, row: usize) -> Result<&'a str> {
    if value.trim().is_empty() {
        Err(LeaderError::empty_value(column, row))
    } else {
        Ok(value)
    }
}

/// Normalize dates, validate the party code and compute derived fields.
///
/// `row` is the 1-based data row number used in error reports.
pub fn derive(defaulted: DefaultedRow, row: usize) -> Result<PartyLeader> {
    let raw = &defaulted.raw;

    let name = required(&raw.name, "name", row)?;
    let surname = required(&raw.surname, "surname", row)?;
    let party_abr = required(&raw.party_abr, "party_abr", row)?
        .parse::<Party>()
        .map_err(|e| e.at_row(row))?;

    let birth_date = DateValue::Text(required(&raw.birth_date, "birth_date", row)?.to_string())
        .to_date("birth_date")
        .map_err(|e| e.at_row(row))?;
    let death_date = resolve(&defaulted.death_date, "death_date").map_err(|e| e.at_row(row))?;
    let assumed_office =
        resolve(&defaulted.assumed_office, "assumed_office").map_err(|e| e.at_row(row))?;
    let left_office = resolve(&defaulted.left_office, "left_office").map_err(|e| e.at_row(row))?;

    let full_name = full_name(name, surname);
    let label = full_name_years_in_office(&full_name, assumed_office.year(), left_office.year());

    Ok(PartyLeader {
        name: name.to_string(),
        surname: surname.to_string(),
        sex: raw.sex.clone(),
        party_abr,
        birth_date,
        death_date,
        assumed_office,
        left_office,
        age_when_assumed_office: whole_years_between(birth_date, assumed_office.date),
        years_in_office: years_in_office(assumed_office.date, left_office.date),
        full_name,
        full_name_years_in_office: label,
    })
}

// ============================================================================
// STEP 5: ORDER BY POLITICAL AFFILIATION
// ============================================================================

/// Stable sort, left to right on the spectrum.
pub fn sort_by_spectrum(leaders: &mut [PartyLeader]) {
    leaders.sort_by_key(|leader| leader.party_abr);
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Steps 2-5 over already loaded rows.
pub fn prepare(rows: Vec<RawLeaderRow>, now: NaiveDate) -> Result<Vec<PartyLeader>> {
    let mut leaders = rows
        .into_iter()
        .enumerate()
        .map(|(i, raw)| derive(default_missing_dates(raw, now), i + 1))
        .collect::<Result<Vec<_>>>()?;

    sort_by_spectrum(&mut leaders);

    let open_tenures = leaders.iter().filter(|l| l.is_in_office()).count();
    debug!(now = %now, open_tenures, "defaulted open tenures to load date");
    info!(records = leaders.len(), "prepared party leader records");

    Ok(leaders)
}

/// Full pipeline: load the CSV at `csv_path`, then prepare it.
pub fn run(csv_path: &Path, now: NaiveDate) -> Result<Vec<PartyLeader>> {
    let rows = load_csv(csv_path)?;
    prepare(rows, now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn today() -> NaiveDate {
        d(2026, 10, 17)
    }

    /// Helper to build a raw row with the given party and dates
    fn create_test_row(
        name: &str,
        surname: &str,
        party: &str,
        birth: &str,
        assumed: Option<&str>,
        left: Option<&str>,
    ) -> RawLeaderRow {
        RawLeaderRow {
            name: name.to_string(),
            surname: surname.to_string(),
            sex: "k".to_string(),
            party_abr: party.to_string(),
            birth_date: birth.to_string(),
            death_date: None,
            assumed_office: assumed.map(str::to_string),
            left_office: left.map(str::to_string),
        }
    }

    #[test]
    fn test_derived_fields() {
        let row = create_test_row(
            "Anna",
            "Andersson",
            "S",
            "1950-06-15",
            Some("1990-01-01"),
            Some("1997-07-01"),
        );
        let leader = derive(default_missing_dates(row, today()), 1).unwrap();

        assert_eq!(leader.age_when_assumed_office, 39);
        assert_eq!(leader.years_in_office, 7.5);
        assert_eq!(leader.full_name, "Anna Andersson");
        assert_eq!(leader.full_name_years_in_office, "Anna Andersson (1990 - 1997)");
        assert!(!leader.is_in_office());
        assert!(leader.is_alive());
    }

    #[test]
    fn test_empty_left_office_defaults_to_now() {
        let row = create_test_row("Anna", "Andersson", "S", "1950-06-15", Some("1985-03-01"), None);
        let leader = derive(default_missing_dates(row, today()), 1).unwrap();

        assert_eq!(leader.left_office.date, today());
        assert_eq!(leader.left_office.source, DateSource::DefaultedToNow);
        assert!(leader.is_in_office());
        assert_eq!(leader.full_name_years_in_office, "Anna Andersson (1985 - 2026)");
        assert_eq!(leader.years_in_office, 41.58);
    }

    #[test]
    fn test_empty_assumed_office_defaults_to_now() {
        let row = create_test_row("Anna", "Andersson", "S", "1950-06-15", None, None);
        let leader = derive(default_missing_dates(row, today()), 1).unwrap();

        assert_eq!(leader.assumed_office.date, today());
        assert!(leader.assumed_office.is_defaulted());
        assert_eq!(leader.years_in_office, 0.0);
    }

    #[test]
    fn test_recorded_death_date_is_kept() {
        let mut row = create_test_row(
            "Bertil",
            "Berg",
            "M",
            "1920-01-01",
            Some("1960-01-01"),
            Some("1970-01-01"),
        );
        row.death_date = Some("1999-12-31".to_string());
        let leader = derive(default_missing_dates(row, today()), 1).unwrap();

        assert_eq!(leader.death_date, ResolvedDate::recorded(d(1999, 12, 31)));
        assert!(!leader.is_alive());
    }

    #[test]
    fn test_sort_by_spectrum() {
        let rows = vec![
            create_test_row("A", "M-leader", "M", "1950-01-01", Some("1990-01-01"), None),
            create_test_row("B", "V-leader", "V", "1950-01-01", Some("1990-01-01"), None),
            create_test_row("C", "S-leader", "S", "1950-01-01", Some("1990-01-01"), None),
        ];
        let leaders = prepare(rows, today()).unwrap();
        let order: Vec<&str> = leaders.iter().map(|l| l.party_abr.code()).collect();
        assert_eq!(order, vec!["V", "S", "M"]);
    }

    #[test]
    fn test_sort_is_stable_within_party() {
        let rows = vec![
            create_test_row("First", "S", "S", "1950-01-01", Some("1990-01-01"), None),
            create_test_row("Only", "V", "V", "1950-01-01", Some("1990-01-01"), None),
            create_test_row("Second", "S", "S", "1950-01-01", Some("1990-01-01"), None),
            create_test_row("Third", "S", "S", "1950-01-01", Some("1990-01-01"), None),
        ];
        let leaders = prepare(rows, today()).unwrap();
        let names: Vec<&str> = leaders.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Only", "First", "Second", "Third"]);
    }

    #[test]
    fn test_unknown_party_reports_row() {
        let rows = vec![
            create_test_row("A", "A", "S", "1950-01-01", Some("1990-01-01"), None),
            create_test_row("B", "B", "Fi", "1950-01-01", Some("1990-01-01"), None),
        ];
        let err = prepare(rows, today()).unwrap_err();
        match err {
            LeaderError::UnknownParty { row, code } => {
                assert_eq!(row, 2);
                assert_eq!(code, "Fi");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_date_reports_row_and_column() {
        let rows = vec![create_test_row(
            "A",
            "A",
            "S",
            "1950-01-01",
            Some("1990/01/01"),
            None,
        )];
        let err = prepare(rows, today()).unwrap_err();
        match err {
            LeaderError::Parse { row, column, value } => {
                assert_eq!(row, 1);
                assert_eq!(column, "assumed_office");
                assert_eq!(value, "1990/01/01");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_birth_date_is_schema_error() {
        let rows = vec![create_test_row("A", "A", "S", "", Some("1990-01-01"), None)];
        let err = prepare(rows, today()).unwrap_err();
        assert!(matches!(err, LeaderError::Schema { ref column, .. } if column == "birth_date"));
    }
}
