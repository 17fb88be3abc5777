// ✅ Data Quality - plausibility checks over enriched party leader records
//
// Checks never fail the pipeline. They report issues that usually point to
// a typo in the source table or to an ambiguous default.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::record::PartyLeader;
use crate::temporal::whole_years_between;

// ============================================================================
// QUALITY ISSUE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Warning, // Data is likely wrong
    Info,    // Data is valid but ambiguous
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityIssue {
    pub severity: Severity,
    pub rule_name: &'static str,
    pub leader: String,
    pub field: &'static str,
    pub issue: String,
    pub recommendation: &'static str,
}

// ============================================================================
// QUALITY ENGINE
// ============================================================================

pub struct QualityEngine {
    /// Youngest plausible age at assuming office
    min_age: i32,

    /// Oldest plausible age at assuming office
    max_age: i32,

    /// Age above which a leader without a death date is probably deceased
    presumed_dead_age: i32,
}

impl Default for QualityEngine {
    fn default() -> Self {
        QualityEngine {
            min_age: 18,
            max_age: 100,
            presumed_dead_age: 110,
        }
    }
}

impl QualityEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every rule against one leader
    pub fn validate(&self, leader: &PartyLeader, now: NaiveDate) -> Vec<QualityIssue> {
        let mut issues = Vec::new();
        let label = leader.full_name_years_in_office.clone();

        // Rule 1: tenure ends after it starts
        if leader.left_office.date < leader.assumed_office.date {
            issues.push(QualityIssue {
                severity: Severity::Warning,
                rule_name: "tenure_order",
                leader: label.clone(),
                field: "left_office",
                issue: format!(
                    "left office {} before assuming it {}",
                    leader.left_office.date, leader.assumed_office.date
                ),
                recommendation: "Check assumed_office and left_office for swapped values",
            });
        }

        // Rule 2: nobody leads a party after their death
        if !leader.death_date.is_defaulted() && leader.death_date.date < leader.left_office.date {
            issues.push(QualityIssue {
                severity: Severity::Warning,
                rule_name: "death_before_leaving_office",
                leader: label.clone(),
                field: "death_date",
                issue: format!(
                    "died {} before leaving office {}",
                    leader.death_date.date, leader.left_office.date
                ),
                recommendation: "Verify death_date and left_office",
            });
        }

        // Rule 3: plausible age at assuming office
        let age = leader.age_when_assumed_office;
        if age < self.min_age || age > self.max_age {
            issues.push(QualityIssue {
                severity: Severity::Warning,
                rule_name: "age_plausible",
                leader: label.clone(),
                field: "age_when_assumed_office",
                issue: format!("age {} when assuming office", age),
                recommendation: "Verify birth_date and assumed_office",
            });
        }

        // Rule 4: "alive" leaders of implausible age
        if leader.is_alive() && whole_years_between(leader.birth_date, now) > self.presumed_dead_age
        {
            issues.push(QualityIssue {
                severity: Severity::Info,
                rule_name: "presumed_deceased",
                leader: label,
                field: "death_date",
                issue: format!(
                    "no death date recorded but born {}",
                    leader.birth_date
                ),
                recommendation: "Add the death date if known",
            });
        }

        issues
    }

    /// Validate every leader and log what was found
    pub fn validate_batch(&self, leaders: &[PartyLeader], now: NaiveDate) -> Vec<QualityIssue> {
        let issues: Vec<QualityIssue> = leaders
            .iter()
            .flat_map(|leader| self.validate(leader, now))
            .collect();

        for issue in &issues {
            match issue.severity {
                Severity::Warning => warn!(
                    rule = issue.rule_name,
                    leader = %issue.leader,
                    field = issue.field,
                    "{}",
                    issue.issue
                ),
                Severity::Info => info!(
                    rule = issue.rule_name,
                    leader = %issue.leader,
                    field = issue.field,
                    "{}",
                    issue.issue
                ),
            }
        }

        issues
    }
}

/// Check `leaders` with the default thresholds.
pub fn check(leaders: &[PartyLeader], now: NaiveDate) -> Vec<QualityIssue> {
    QualityEngine::new().validate_batch(leaders, now)
}
