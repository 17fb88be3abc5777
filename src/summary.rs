// 📊 Per-party summary of leaders

use serde::Serialize;

use crate::party::Party;
use crate::record::PartyLeader;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartySummary {
    pub party: Party,
    pub leaders: usize,
    pub mean_age_when_assumed_office: f64,
    pub mean_years_in_office: f64,
    /// Hover label of the longest-serving leader
    pub longest_serving: String,
}

/// One summary per party present in `leaders`, in spectrum order.
pub fn party_summaries(leaders: &[PartyLeader]) -> Vec<PartySummary> {
    Party::ALL
        .iter()
        .filter_map(|&party| {
            let members: Vec<&PartyLeader> =
                leaders.iter().filter(|l| l.party_abr == party).collect();
            if members.is_empty() {
                return None;
            }

            let count = members.len() as f64;
            let mean_age = members
                .iter()
                .map(|l| l.age_when_assumed_office as f64)
                .sum::<f64>()
                / count;
            let mean_years = members.iter().map(|l| l.years_in_office).sum::<f64>() / count;

            // First of equals wins so the result follows source order
            let longest = members.iter().copied().fold(members[0], |best, l| {
                if l.years_in_office > best.years_in_office {
                    l
                } else {
                    best
                }
            });

            Some(PartySummary {
                party,
                leaders: members.len(),
                mean_age_when_assumed_office: mean_age,
                mean_years_in_office: mean_years,
                longest_serving: longest.full_name_years_in_office.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::prepare;
    use crate::record::RawLeaderRow;
    use chrono::NaiveDate;

    fn row(name: &str, party: &str, birth: &str, assumed: &str, left: &str) -> RawLeaderRow {
        RawLeaderRow {
            name: name.to_string(),
            surname: "Svensson".to_string(),
            sex: "m".to_string(),
            party_abr: party.to_string(),
            birth_date: birth.to_string(),
            death_date: None,
            assumed_office: Some(assumed.to_string()),
            left_office: Some(left.to_string()),
        }
    }

    #[test]
    fn test_summaries_in_spectrum_order() {
        let leaders = prepare(
            vec![
                row("Mats", "M", "1950-01-01", "1990-01-01", "1994-01-01"),
                row("Stina", "S", "1940-01-01", "1980-01-01", "1990-01-01"),
                row("Sven", "S", "1950-01-01", "1990-01-01", "1996-01-01"),
            ],
            NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
        )
        .unwrap();

        let summaries = party_summaries(&leaders);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].party, Party::S);
        assert_eq!(summaries[1].party, Party::M);

        let s = &summaries[0];
        assert_eq!(s.leaders, 2);
        assert_eq!(s.mean_age_when_assumed_office, 40.0);
        assert_eq!(s.mean_years_in_office, 8.0);
        assert_eq!(s.longest_serving, "Stina Svensson (1980 - 1990)");
    }

    #[test]
    fn test_empty_input() {
        assert!(party_summaries(&[]).is_empty());
    }
}
