//! Reference dataset lookups over CSV via `DuckDB`.
//!
//! Each lookup opens an in-memory connection, loads the CSV with
//! `read_csv_auto` and runs one parameterized query, so concurrent requests
//! share nothing.

use std::path::{Path, PathBuf};

use duckdb::{Connection, OptionalExt, params};
use lens_core::CompanyRecord;

use crate::HarmonizeError;

const REQUIRED_COLUMNS: [&str; 4] = [
    "company_name",
    "total_funding_usd",
    "funding_rounds",
    "founding_year",
];

/// Raw row as read from `DuckDB`, before range checks.
type RawRow = (String, Option<f64>, Option<i64>, Option<i64>, Option<i64>);

/// Historical company table keyed by company name.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    path: PathBuf,
}

impl ReferenceDataset {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// First row whose `company_name` equals `name`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`HarmonizeError::InvalidDataset`] if the file is missing, a
    /// required column is absent or a matched value is null or out of range,
    /// and [`HarmonizeError::Dataset`] if `DuckDB` cannot read it.
    pub fn find(&self, name: &str) -> Result<Option<CompanyRecord>, HarmonizeError> {
        if !self.path.is_file() {
            return Err(HarmonizeError::invalid(&self.path, "file does not exist"));
        }

        let conn = Connection::open_in_memory()?;
        conn.execute_batch(&format!(
            "CREATE TEMP TABLE companies AS SELECT * FROM read_csv_auto('{}', header = true)",
            sql_string(&self.path.to_string_lossy())
        ))?;

        let columns = column_names(&conn)?;
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|c| !columns.iter().any(|have| have == *c))
        {
            return Err(HarmonizeError::invalid(
                &self.path,
                format!("missing column '{missing}'"),
            ));
        }
        let founders = if columns.iter().any(|c| c == "founder_count") {
            "TRY_CAST(founder_count AS BIGINT)"
        } else {
            "CAST(NULL AS BIGINT)"
        };

        let mut stmt = conn.prepare(&format!(
            "SELECT CAST(company_name AS VARCHAR),
                    TRY_CAST(total_funding_usd AS DOUBLE),
                    TRY_CAST(funding_rounds AS BIGINT),
                    {founders},
                    TRY_CAST(founding_year AS BIGINT)
             FROM companies
             WHERE lower(CAST(company_name AS VARCHAR)) = lower(?)
             ORDER BY rowid
             LIMIT 1"
        ))?;
        let row: Option<RawRow> = stmt
            .query_row(params![name.trim()], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
            })
            .optional()?;

        row.map(|raw| self.to_record(raw)).transpose()
    }

    fn to_record(&self, raw: RawRow) -> Result<CompanyRecord, HarmonizeError> {
        let (company_name, funding, rounds, founders, year) = raw;
        let missing = |column: &str| {
            HarmonizeError::invalid(
                &self.path,
                format!("'{company_name}' has no usable {column}"),
            )
        };

        let total_funding_usd = funding
            .filter(|f| f.is_finite())
            .ok_or_else(|| missing("total_funding_usd"))?;
        let funding_rounds = rounds
            .and_then(|r| u32::try_from(r).ok())
            .ok_or_else(|| missing("funding_rounds"))?;
        let founding_year = year
            .and_then(|y| i32::try_from(y).ok())
            .ok_or_else(|| missing("founding_year"))?;
        let founder_count = founders.and_then(|f| u32::try_from(f).ok());

        Ok(CompanyRecord {
            company_name,
            total_funding_usd,
            funding_rounds,
            founder_count,
            founding_year,
        })
    }
}

fn column_names(conn: &Connection) -> Result<Vec<String>, duckdb::Error> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('companies')")?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names)
}

/// Escape a value for a single-quoted SQL string literal.
fn sql_string(value: &str) -> String {
    value.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn dataset(temp: &TempDir, csv: &str) -> ReferenceDataset {
        let path = temp.path().join("crunchbase_startups.csv");
        std::fs::write(&path, csv).unwrap();
        ReferenceDataset::new(path)
    }

    const CSV: &str = "\
company_name,total_funding_usd,funding_rounds,founder_count,founding_year
Acme Robotics,2500000,3,2,2016
Nimbus Health,800000,1,,2021
";

    #[test]
    fn finds_row_ignoring_case() {
        let temp = TempDir::new().unwrap();
        let record = dataset(&temp, CSV).find("acme ROBOTICS").unwrap().unwrap();
        assert_eq!(
            record,
            CompanyRecord {
                company_name: "Acme Robotics".into(),
                total_funding_usd: 2_500_000.0,
                funding_rounds: 3,
                founder_count: Some(2),
                founding_year: 2016,
            }
        );
    }

    #[test]
    fn blank_founder_count_is_none() {
        let temp = TempDir::new().unwrap();
        let record = dataset(&temp, CSV).find("Nimbus Health").unwrap().unwrap();
        assert_eq!(record.founder_count, None);
        assert_eq!(record.founders_or_default(), 1);
    }

    #[test]
    fn unknown_company_is_none() {
        let temp = TempDir::new().unwrap();
        assert!(dataset(&temp, CSV).find("Initech").unwrap().is_none());
    }

    #[test]
    fn founder_column_is_optional() {
        let temp = TempDir::new().unwrap();
        let csv = "company_name,total_funding_usd,funding_rounds,founding_year\nSolo Labs,100000,1,2019\n";
        let record = dataset(&temp, csv).find("solo labs").unwrap().unwrap();
        assert_eq!(record.founder_count, None);
    }

    #[test]
    fn missing_required_column_is_invalid() {
        let temp = TempDir::new().unwrap();
        let csv = "company_name,funding_rounds,founding_year\nSolo Labs,1,2019\n";
        let err = dataset(&temp, csv).find("Solo Labs").unwrap_err();
        assert!(err.to_string().contains("total_funding_usd"), "{err}");
    }

    #[test]
    fn missing_file_is_invalid() {
        let temp = TempDir::new().unwrap();
        let err = ReferenceDataset::new(temp.path().join("absent.csv"))
            .find("Acme")
            .unwrap_err();
        assert!(matches!(err, HarmonizeError::InvalidDataset { .. }));
    }

    #[test]
    fn quotes_in_names_are_parameters_not_sql() {
        let temp = TempDir::new().unwrap();
        assert!(dataset(&temp, CSV).find("x' OR '1'='1").unwrap().is_none());
    }

    #[test]
    fn sql_string_doubles_quotes() {
        assert_eq!(sql_string("/data/o'brien.csv"), "/data/o''brien.csv");
    }
}
