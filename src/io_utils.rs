//! I/O helpers for reading the profile export and writing the SQL artifact.
//!
//! - **Reading**: CSV readers with exact header handling, decoding every field
//!   through `encoding_rs` (UTF-8 unless overridden).
//! - **Writing**: the artifact is written to a sibling temporary file and
//!   renamed into place, so a failed run leaves any earlier artifact intact.
//! - **stdout**: the `-` path convention routes output to standard output.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use encoding_rs::{Encoding, UTF_8};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

/// Rows may be shorter than the header; absent trailing fields read as blank.
pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

pub fn open_csv_reader_from_path(
    path: &Path,
    delimiter: u8,
) -> Result<csv::Reader<BufReader<File>>> {
    let file = File::open(path).with_context(|| format!("Opening input file {path:?}"))?;
    Ok(open_csv_reader(BufReader::new(file), delimiter))
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

pub fn decode_record(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| decode_bytes(field, encoding))
        .collect()
}

/// Header names exactly as written, with only a leading UTF-8 BOM removed.
pub fn reader_headers<R>(
    reader: &mut csv::Reader<R>,
    encoding: &'static Encoding,
) -> Result<Vec<String>>
where
    R: Read,
{
    let headers = reader.byte_headers()?.clone();
    let mut decoded = decode_record(&headers, encoding)?;
    if let Some(first) = decoded.first_mut() {
        if let Some(stripped) = first.strip_prefix('\u{feff}') {
            *first = stripped.to_string();
        }
    }
    Ok(decoded)
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

/// Writes `contents` to `path` (or stdout for `-`) without leaving a
/// partially written file behind on failure.
pub fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    if is_dash(path) {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(contents.as_bytes())
            .context("Writing output to stdout")?;
        return stdout.flush().context("Flushing stdout");
    }

    let staging = staging_path(path);
    let result = write_file(&staging, contents).and_then(|()| {
        fs::rename(&staging, path)
            .with_context(|| format!("Moving {staging:?} into place at {path:?}"))
    });
    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    result
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Creating output file {path:?}"))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents.as_bytes())
        .with_context(|| format!("Writing output file {path:?}"))?;
    writer
        .into_inner()
        .map_err(|err| err.into_error())
        .with_context(|| format!("Flushing output file {path:?}"))?
        .sync_all()
        .with_context(|| format!("Syncing output file {path:?}"))
}
