// 📂 Loader - CSV → RawLeaderRow
//
// Reads the party leader table, checks the header against the fixed
// schema and deserializes every row without interpreting it.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::{debug, info};

use crate::error::{LeaderError, Result};
use crate::record::{RawLeaderRow, REQUIRED_COLUMNS};

/// Default input file name, looked up in the working directory
pub const DEFAULT_INPUT: &str = "swedish_party_leaders.csv";

/// Load raw rows from a CSV file on disk.
pub fn load_csv(csv_path: &Path) -> Result<Vec<RawLeaderRow>> {
    if !csv_path.is_file() {
        return Err(LeaderError::MissingFile {
            path: csv_path.to_path_buf(),
        });
    }

    let file = std::fs::File::open(csv_path)?;
    let rows = read_rows(file)?;

    info!(path = %csv_path.display(), rows = rows.len(), "loaded party leader table");
    Ok(rows)
}

/// Read raw rows from any CSV source with a header row.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawLeaderRow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    debug!(?headers, "read header row");

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LeaderError::missing_column(column));
        }
    }

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: RawLeaderRow = result?;
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "name,surname,sex,party_abr,birth_date,death_date,assumed_office,left_office\n";

    #[test]
    fn test_read_rows_preserves_columns() {
        let data = format!(
            "{HEADER}Anna,Andersson,k,S,1950-06-15,,1985-03-01,1991-09-30\n\
             Bertil,Berg,m,M,1940-01-02,2010-05-05,1970-01-01,\n"
        );
        let rows = read_rows(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].surname, "Andersson");
        assert_eq!(rows[0].sex, "k");
        assert_eq!(rows[0].left_office.as_deref(), Some("1991-09-30"));
        assert_eq!(rows[1].death_date.as_deref(), Some("2010-05-05"));
        assert_eq!(rows[1].left_office, None);
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let data = "party_abr,name,surname,birth_date,sex,assumed_office,left_office,death_date\n\
                    Kd,Cecilia,Carlsson,1960-02-02,k,2000-01-01,,\n";
        let rows = read_rows(data.as_bytes()).unwrap();
        assert_eq!(rows[0].party_abr, "Kd");
        assert_eq!(rows[0].name, "Cecilia");
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let data = "name,surname,sex,party_abr,birth_date,death_date,assumed_office\n\
                    Anna,Andersson,k,S,1950-06-15,,1985-03-01\n";
        let err = read_rows(data.as_bytes()).unwrap_err();
        match err {
            LeaderError::Schema { column, .. } => assert_eq!(column, "left_office"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_csv(Path::new("/definitely/not/here/leaders.csv")).unwrap_err();
        assert!(matches!(err, LeaderError::MissingFile { .. }));
    }

    #[test]
    fn test_header_only_yields_no_rows() {
        let rows = read_rows(HEADER.as_bytes()).unwrap();
        assert!(rows.is_empty());
    }
}
