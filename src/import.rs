use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use encoding_rs::Encoding;
use log::{debug, info, warn};

use crate::{
    cli::GenerateArgs,
    io_utils,
    lookup::FOREIGN_PROVINCE_NAME,
    normalize::{RowOutcome, normalize_row},
    record::{self, NormalizedRecord, RawRecord},
    sql,
};

/// Counts reported after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub total_rows: usize,
    pub kept: usize,
    pub skipped: usize,
    pub foreign: usize,
}

#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub records: Vec<NormalizedRecord>,
    pub summary: ImportSummary,
}

pub fn execute(args: &GenerateArgs) -> Result<ImportSummary> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let delimiter = args.delimiter.unwrap_or(io_utils::DEFAULT_CSV_DELIMITER);
    info!(
        "Normalizing '{}' -> '{}' (delimiter '{}')",
        args.input.display(),
        args.output.display(),
        crate::printable_delimiter(delimiter)
    );
    let summary = generate(
        &args.input,
        &args.output,
        delimiter,
        encoding,
        Local::now().naive_local(),
    )?;
    report(&summary);
    info!("SQL file generated: {}", args.output.display());
    Ok(summary)
}

/// Reads `input`, normalizes every row and writes the import script to
/// `output`. Nothing is written unless every row was read successfully.
pub fn generate(
    input: &Path,
    output: &Path,
    delimiter: u8,
    encoding: &'static Encoding,
    generated_at: NaiveDateTime,
) -> Result<ImportSummary> {
    let raws = read_raw_records(input, delimiter, encoding)?;
    info!("Total rows in CSV: {}", raws.len());
    let batch = normalize_records(&raws);
    let script = sql::render_script(&batch.records, generated_at);
    io_utils::write_artifact(output, &script)
        .with_context(|| format!("Writing SQL script to {output:?}"))?;
    Ok(batch.summary)
}

pub fn read_raw_records(
    path: &Path,
    delimiter: u8,
    encoding: &'static Encoding,
) -> Result<Vec<RawRecord>> {
    let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
    let headers = io_utils::reader_headers(&mut reader, encoding)
        .with_context(|| format!("Reading headers from {path:?}"))?;
    record::validate_headers(&headers).with_context(|| format!("Validating headers of {path:?}"))?;
    debug!("Input headers: {:?}", headers);

    let mut raws = Vec::new();
    for (idx, row) in reader.byte_records().enumerate() {
        let row_number = idx + 2;
        let row = row.with_context(|| format!("Reading row {row_number}"))?;
        let values = io_utils::decode_record(&row, encoding)
            .with_context(|| format!("Decoding row {row_number}"))?;
        raws.push(RawRecord::new(row_number, &headers, values));
    }
    Ok(raws)
}

/// Normalizes rows in input order, logging warnings and discards.
pub fn normalize_records(raws: &[RawRecord]) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();
    batch.summary.total_rows = raws.len();

    for raw in raws {
        let normalized = normalize_row(raw);
        for warning in &normalized.warnings {
            warn!("Row {}: {}", raw.row_number(), warning);
        }
        match normalized.outcome {
            RowOutcome::Kept(record) => {
                if record.is_foreign() {
                    batch.summary.foreign += 1;
                }
                batch.records.push(record);
            }
            RowOutcome::Discarded(reason) => {
                if reason.is_silent() {
                    debug!("Row {}: {}", raw.row_number(), reason);
                } else {
                    warn!("Row {}: skipping row: {}", raw.row_number(), reason);
                }
                batch.summary.skipped += 1;
            }
        }
    }
    batch.summary.kept = batch.records.len();
    batch
}

pub fn report(summary: &ImportSummary) {
    info!("Successfully normalized: {} row(s)", summary.kept);
    info!("Skipped (empty/invalid): {} row(s)", summary.skipped);
    info!(
        "Users with '{}' province: {}",
        FOREIGN_PROVINCE_NAME, summary.foreign
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::*;
    use encoding_rs::UTF_8;
    use std::fs;
    use tempfile::tempdir;

    fn raw(row: usize, email: &str, province: &str) -> RawRecord {
        RawRecord::from_pairs(
            row,
            [
                (COL_EMAIL, email),
                (COL_GENDER, "IKHWAN"),
                (COL_FULL_NAME, "Rahmat"),
                (COL_PROVINCE, province),
                (COL_EDUCATION, "S2"),
                (COL_HEIGHT, "170"),
                (COL_WEIGHT, "65"),
            ],
        )
    }

    #[test]
    fn normalize_records_partitions_and_counts_foreign() {
        let raws = vec![
            raw(2, "a@x.id", "Luar Negeri"),
            raw(3, "", "Bali"),
            raw(4, "b@x.id", "Bali"),
            raw(5, "c@x.id", "Luar Negeri"),
        ];
        let batch = normalize_records(&raws);
        assert_eq!(
            batch.summary,
            ImportSummary {
                total_rows: 4,
                kept: 3,
                skipped: 1,
                foreign: 2,
            }
        );
        let emails = batch
            .records
            .iter()
            .map(|r| r.user_email.as_str())
            .collect::<Vec<_>>();
        assert_eq!(emails, vec!["a@x.id", "b@x.id", "c@x.id"]);
    }

    #[test]
    fn missing_required_column_is_fatal_and_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.sql");
        fs::write(&input, "email,Jenis Kelamin\na@x.id,IKHWAN\n").unwrap();
        let err = generate(
            &input,
            &output,
            b',',
            UTF_8,
            Local::now().naive_local(),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("missing required column"));
        assert!(!output.exists());
    }

    #[test]
    fn short_row_reads_as_blank_trailing_fields() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let header = REQUIRED_COLUMNS.join(",");
        fs::write(&input, format!("{header}\n,\nx@y.id,IKHWAN,Rahmat\n")).unwrap();

        let raws = read_raw_records(&input, b',', UTF_8).unwrap();
        assert_eq!(raws.len(), 2);
        assert_eq!(raws[0].trimmed(COL_EMAIL), "");
        assert_eq!(raws[1].trimmed(COL_FULL_NAME), "Rahmat");
        assert_eq!(raws[1].get(COL_HEIGHT), None);

        let batch = normalize_records(&raws);
        assert_eq!(batch.summary.skipped, 1);
        assert_eq!(batch.summary.kept, 1);
        assert_eq!(batch.records[0].height_cm, crate::normalize::DEFAULT_HEIGHT_CM);
    }

    #[test]
    fn missing_input_is_fatal() {
        let dir = tempdir().unwrap();
        let result = read_raw_records(&dir.path().join("absent.csv"), b',', UTF_8);
        assert!(result.is_err());
    }
}
