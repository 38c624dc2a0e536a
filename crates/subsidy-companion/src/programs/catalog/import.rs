use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

use super::super::domain::ProgramRecord;

#[derive(Debug)]
pub enum ProgramImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Record { line: u64, message: String },
}

impl std::fmt::Display for ProgramImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgramImportError::Io(err) => {
                write!(f, "failed to read program catalog fixture: {}", err)
            }
            ProgramImportError::Csv(err) => write!(f, "invalid program catalog CSV: {}", err),
            ProgramImportError::Record { line, message } => {
                write!(f, "program catalog row {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for ProgramImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProgramImportError::Io(err) => Some(err),
            ProgramImportError::Csv(err) => Some(err),
            ProgramImportError::Record { .. } => None,
        }
    }
}

impl From<std::io::Error> for ProgramImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ProgramImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads catalog fixtures for demos and offline runs. This is not the live
/// feed; the service reaches upstream through `ProgramSource`.
pub struct ProgramCsvImporter;

impl ProgramCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ProgramRecord>, ProgramImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ProgramRecord>, ProgramImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for (index, row) in csv_reader.deserialize::<ProgramRow>().enumerate() {
            // Header occupies line 1, so data rows start at 2.
            let line = index as u64 + 2;
            let row = row?;
            records.push(into_record(row, line)?);
        }

        Ok(records)
    }
}

#[derive(Debug, Deserialize)]
struct ProgramRow {
    id: String,
    title: String,
    summary: String,
    category: String,
    published_date: String,
    url: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    funding_amount: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    deadline: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    data_source: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    source_agency: Option<String>,
    country: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    region: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    opportunity_number: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    is_high_priority: Option<String>,
}

fn into_record(row: ProgramRow, line: u64) -> Result<ProgramRecord, ProgramImportError> {
    let published_date = parse_date(&row.published_date).ok_or_else(|| {
        ProgramImportError::Record {
            line,
            message: format!("invalid published_date '{}'", row.published_date),
        }
    })?;

    let deadline = match row.deadline.as_deref() {
        Some(raw) => Some(
            parse_date(raw).ok_or_else(|| ProgramImportError::Record {
                line,
                message: format!("invalid deadline '{}'", raw),
            })?,
        ),
        None => None,
    };

    Ok(ProgramRecord {
        id: row.id,
        title: row.title,
        summary: row.summary,
        category: row.category,
        published_date,
        url: row.url,
        funding_amount: row.funding_amount,
        deadline,
        location: row.location,
        data_source: row.data_source,
        source_agency: row.source_agency,
        country: row.country,
        region: row.region,
        opportunity_number: row.opportunity_number,
        is_high_priority: row
            .is_high_priority
            .as_deref()
            .map(is_truthy)
            .unwrap_or(false),
    })
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "y"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "id,title,summary,category,published_date,url,funding_amount,deadline,location,data_source,source_agency,country,region,opportunity_number,is_high_priority\n";

    #[test]
    fn importer_fills_optionals_from_blank_cells() {
        let csv = format!(
            "{HEADER}eqip-2025,EQIP,Cost share for conservation,Conservation,2026-08-01,https://example.org/eqip,,,,grants_gov,,US,,,true\n"
        );
        let records = ProgramCsvImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id, "eqip-2025");
        assert!(record.funding_amount.is_none());
        assert!(record.deadline.is_none());
        assert!(record.location.is_none());
        assert!(record.is_high_priority);
    }

    #[test]
    fn importer_parses_dates_and_priority_flags() {
        let csv = format!(
            "{HEADER}csp-2025,CSP,Stewardship payments,Conservation,2026-07-15,https://example.org/csp,\"Up to $40,000\",2026-12-06,Iowa,usda_nrcs,USDA NRCS,US,IA,NRCS-CSP-26,no\n"
        );
        let records = ProgramCsvImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        let record = &records[0];
        assert_eq!(
            record.deadline,
            Some(NaiveDate::from_ymd_opt(2026, 12, 6).expect("valid date"))
        );
        assert_eq!(record.funding_amount.as_deref(), Some("Up to $40,000"));
        assert!(!record.is_high_priority);
    }

    #[test]
    fn importer_reports_the_failing_line() {
        let csv = format!(
            "{HEADER}ok,Program,Summary,Conservation,2026-08-01,https://example.org,,,,feed,,US,,,\n\
bad,Program,Summary,Conservation,not-a-date,https://example.org,,,,feed,,US,,,\n"
        );
        let error =
            ProgramCsvImporter::from_reader(Cursor::new(csv)).expect_err("expected row error");

        match error {
            ProgramImportError::Record { line, .. } => assert_eq!(line, 3),
            other => panic!("expected record error, got {other:?}"),
        }
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error = ProgramCsvImporter::from_path("./does-not-exist.csv")
            .expect_err("expected io error");

        match error {
            ProgramImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
