// ⚠️ Error taxonomy for loading and preparing party leader data
//
// Every variant is fatal for the load that produced it. Row numbers are
// 1-based data rows (the header row is not counted).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeaderError {
    #[error("input table not found: {}", .path.display())]
    MissingFile { path: PathBuf },

    #[error("schema error: required column '{column}' {detail}")]
    Schema { column: String, detail: String },

    #[error("row {row}: column '{column}' has malformed date '{value}' (expected YYYY-MM-DD)")]
    Parse {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: unknown party code '{code}' (expected one of V, S, Mp, C, L, M, Kd, Sd)")]
    UnknownParty { row: usize, code: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LeaderError {
    pub fn missing_column(column: &str) -> Self {
        LeaderError::Schema {
            column: column.to_string(),
            detail: "is absent from the header".to_string(),
        }
    }

    pub fn empty_value(column: &str, row: usize) -> Self {
        LeaderError::Schema {
            column: column.to_string(),
            detail: format!("is empty in row {}", row),
        }
    }

    /// Attach a row number to an error raised without one.
    pub fn at_row(self, row: usize) -> Self {
        match self {
            LeaderError::Parse { column, value, .. } => LeaderError::Parse { row, column, value },
            LeaderError::UnknownParty { code, .. } => LeaderError::UnknownParty { row, code },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, LeaderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_row_rewrites_row_number() {
        let err = LeaderError::Parse {
            row: 0,
            column: "birth_date",
            value: "1950/06/15".to_string(),
        }
        .at_row(7);

        match err {
            LeaderError::Parse { row, column, .. } => {
                assert_eq!(row, 7);
                assert_eq!(column, "birth_date");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_messages_name_the_offending_value() {
        let err = LeaderError::UnknownParty {
            row: 3,
            code: "Fi".to_string(),
        };
        assert!(err.to_string().contains("'Fi'"));
        assert!(err.to_string().contains("row 3"));

        let err = LeaderError::missing_column("left_office");
        assert!(err.to_string().contains("left_office"));
    }
}
