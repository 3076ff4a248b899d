use anyhow::{Context, Result};
use log::info;

use crate::{cli::PreviewArgs, import, io_utils, table};

pub fn execute(args: &PreviewArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let delimiter = args.delimiter.unwrap_or(io_utils::DEFAULT_CSV_DELIMITER);
    let raws = import::read_raw_records(&args.input, delimiter, encoding)?;
    let batch = import::normalize_records(&raws);
    let shown = &batch.records[..batch.records.len().min(args.rows)];

    if args.json {
        for record in shown {
            let line = serde_json::to_string(record).context("Serializing normalized record")?;
            println!("{line}");
        }
    } else {
        print!("{}", table::render_records(shown));
    }

    info!(
        "Displayed {} of {} normalized record(s) from {:?}",
        shown.len(),
        batch.records.len(),
        args.input
    );
    import::report(&batch.summary);
    Ok(())
}
