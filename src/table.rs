use std::borrow::Cow;
use std::fmt::Write as _;

use crate::record::NormalizedRecord;

/// Longest cell rendered before truncation with an ellipsis.
pub const MAX_CELL_WIDTH: usize = 32;

pub const PREVIEW_HEADERS: [&str; 9] = [
    "user_email",
    "gender",
    "full_name",
    "birth_date",
    "province_id",
    "education",
    "height_cm",
    "weight_kg",
    "full_address",
];

pub fn record_cells(record: &NormalizedRecord) -> Vec<String> {
    vec![
        record.user_email.clone(),
        record.gender.to_string(),
        record.full_name.clone(),
        record
            .birth_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "NULL".to_string()),
        record
            .province_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "NULL".to_string()),
        record.education.to_string(),
        record.height_cm.to_string(),
        record.weight_kg.to_string(),
        record.full_address.clone(),
    ]
}

pub fn render_records(records: &[NormalizedRecord]) -> String {
    let headers = PREVIEW_HEADERS.map(String::from);
    let rows = records.iter().map(record_cells).collect::<Vec<_>>();
    render_table(&headers, &rows)
}

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let column_count = headers.len();
    let mut widths = headers.iter().map(|h| display_width(h)).collect::<Vec<_>>();

    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(display_width(&clip(cell)));
        }
    }

    for width in &mut widths {
        *width = (*width).max(3);
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_row(headers, &widths));

    let separator = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&separator, &widths));

    for row in rows {
        let _ = writeln!(output, "{}", format_row(row, &widths));
    }

    output
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    let mut line = values
        .iter()
        .zip(widths)
        .map(|(value, width)| {
            let cell = clip(value);
            let padding = width.saturating_sub(display_width(&cell));
            format!("{cell}{}", " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join("  ");
    while line.ends_with(' ') {
        line.pop();
    }
    line
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn clip(value: &str) -> Cow<'_, str> {
    let flattened = if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    };
    if display_width(&flattened) <= MAX_CELL_WIDTH {
        return flattened;
    }
    let mut clipped = flattened
        .chars()
        .take(MAX_CELL_WIDTH - 1)
        .collect::<String>();
    clipped.push('…');
    Cow::Owned(clipped)
}
