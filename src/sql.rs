//! SQL text generation for the `cv_data` import script.
//!
//! The script is a header comment block, one multi-row INSERT, and a row
//! count query. String values are emitted as standard SQL literals with
//! embedded single quotes doubled; optional integers and dates become `NULL`.

use chrono::NaiveDateTime;
use itertools::Itertools;

use crate::record::NormalizedRecord;

pub const TARGET_TABLE: &str = "public.cv_data";

pub const COLUMNS: [&str; 14] = [
    "user_email",
    "gender",
    "full_name",
    "birth_date",
    "province_id",
    "education",
    "occupation",
    "income_bracket",
    "height_cm",
    "weight_kg",
    "marital_status",
    "full_address",
    "ciri_fisik",
    "disease_history",
];

pub const VERIFY_QUERY: &str = "SELECT COUNT(*) as total_imported FROM public.cv_data;";

const SQL_NULL: &str = "NULL";
const JSON_CAST: &str = "::jsonb";
const BANNER: &str = "-- =====================================================";
const PER_LINE: usize = 5;

pub fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}

fn quoted(value: &str) -> String {
    format!("'{}'", escape_literal(value))
}

/// SQL value expressions for one record, in [`COLUMNS`] order.
pub fn record_values(record: &NormalizedRecord) -> [String; 14] {
    [
        quoted(&record.user_email),
        quoted(record.gender.as_str()),
        quoted(&record.full_name),
        record
            .birth_date
            .map(|date| quoted(&date.format("%Y-%m-%d").to_string()))
            .unwrap_or_else(|| SQL_NULL.to_string()),
        record
            .province_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| SQL_NULL.to_string()),
        quoted(record.education.as_str()),
        quoted(&record.occupation),
        quoted(record.income_bracket.as_str()),
        record.height_cm.to_string(),
        record.weight_kg.to_string(),
        quoted(record.marital_status.as_str()),
        quoted(&record.full_address),
        quoted(&record.ciri_fisik),
        format!("{}{JSON_CAST}", quoted(&record.disease_history)),
    ]
}

fn wrap_lines<S: AsRef<str>>(items: &[S], indent: &str) -> String {
    items
        .chunks(PER_LINE)
        .map(|chunk| format!("{indent}{}", chunk.iter().map(|item| item.as_ref()).join(", ")))
        .join(",\n")
}

fn render_tuple(record: &NormalizedRecord) -> String {
    format!("  (\n{}\n  )", wrap_lines(&record_values(record), "    "))
}

/// Multi-row INSERT for `records`, or `None` when there is nothing to insert.
pub fn render_insert(records: &[NormalizedRecord]) -> Option<String> {
    if records.is_empty() {
        return None;
    }
    let tuples = records.iter().map(render_tuple).join(",\n");
    Some(format!(
        "INSERT INTO {TARGET_TABLE} (\n{}\n) VALUES\n{tuples};",
        wrap_lines(&COLUMNS, "  ")
    ))
}

/// Complete import script. `generated_at` only affects the header comment.
pub fn render_script(records: &[NormalizedRecord], generated_at: NaiveDateTime) -> String {
    let mut lines = vec![
        BANNER.to_string(),
        "-- Import CV Data from datauser.csv".to_string(),
        format!("-- Total records: {}", records.len()),
        format!("-- Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
        BANNER.to_string(),
        String::new(),
    ];
    match render_insert(records) {
        Some(insert) => {
            lines.push("-- Insert cv_data records".to_string());
            lines.push(insert);
        }
        None => lines.push("-- No valid records; INSERT skipped".to_string()),
    }
    lines.push(String::new());
    lines.push("-- Verify insertion".to_string());
    lines.push(VERIFY_QUERY.to_string());
    let mut script = lines.join("\n");
    script.push('\n');
    script
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{Education, Gender, IncomeBracket, MaritalStatus};
    use chrono::NaiveDate;

    fn sample(email: &str, name: &str) -> NormalizedRecord {
        NormalizedRecord {
            user_email: email.to_string(),
            gender: Gender::Ikhwan,
            full_name: name.to_string(),
            birth_date: NaiveDate::from_ymd_opt(1994, 7, 9),
            province_id: Some(9),
            education: Education::SmaSmk,
            occupation: "Wiraswasta".to_string(),
            income_bracket: IncomeBracket::FiveToTen,
            height_cm: 172,
            weight_kg: 68,
            marital_status: MaritalStatus::Duda,
            full_address: "Jl. Asia Afrika 8".to_string(),
            ciri_fisik: "Tinggi".to_string(),
            disease_history: r#"["Tidak ada"]"#.to_string(),
        }
    }

    fn generated_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap()
    }

    #[test]
    fn escape_literal_doubles_single_quotes() {
        assert_eq!(escape_literal("O'Brien"), "O''Brien");
        assert_eq!(escape_literal("''"), "''''");
        assert_eq!(escape_literal("plain"), "plain");
    }

    #[test]
    fn record_values_follow_column_order() {
        let values = record_values(&sample("a@b.c", "Andi"));
        assert_eq!(values.len(), COLUMNS.len());
        assert_eq!(values[0], "'a@b.c'");
        assert_eq!(values[1], "'IKHWAN'");
        assert_eq!(values[3], "'1994-07-09'");
        assert_eq!(values[4], "9");
        assert_eq!(values[5], "'SMA_SMK'");
        assert_eq!(values[7], "'5_10'");
        assert_eq!(values[8], "172");
        assert_eq!(values[10], "'DUDA'");
        assert_eq!(values[13], r#"'["Tidak ada"]'::jsonb"#);
    }

    #[test]
    fn optional_values_render_as_null() {
        let mut record = sample("a@b.c", "Andi");
        record.birth_date = None;
        record.province_id = None;
        let values = record_values(&record);
        assert_eq!(values[3], "NULL");
        assert_eq!(values[4], "NULL");
    }

    #[test]
    fn insert_escapes_every_string_field() {
        let mut record = sample("o'brien@example.com", "Sean O'Brien");
        record.occupation = "Chef d'cuisine".to_string();
        record.full_address = "Jl. Jend' Sudirman".to_string();
        record.ciri_fisik = "Rambut 'ikal'".to_string();
        record.disease_history = r#"["Alergi 'udang'"]"#.to_string();
        let insert = render_insert(&[record]).expect("insert");
        assert!(insert.contains("'Sean O''Brien'"));
        assert!(insert.contains("'o''brien@example.com'"));
        assert!(insert.contains("'Chef d''cuisine'"));
        assert!(insert.contains("'Jl. Jend'' Sudirman'"));
        assert!(insert.contains("'Rambut ''ikal'''"));
        assert!(insert.contains(r#"'["Alergi ''udang''"]'::jsonb"#));
        assert_eq!(insert.matches('\'').count() % 2, 0);
    }

    #[test]
    fn insert_is_balanced_with_matching_column_count() {
        let records = vec![sample("a@b.c", "Andi"), sample("d@e.f", "Dewi")];
        let insert = render_insert(&records).expect("insert");
        assert!(insert.starts_with("INSERT INTO public.cv_data (\n  user_email, gender"));
        assert!(insert.ends_with("  );"));
        assert_eq!(insert.matches('(').count(), insert.matches(')').count());
        assert_eq!(insert.matches("  (\n").count(), 2);
        assert!(insert.contains("  ),\n  (\n"));

        let tuple = render_tuple(&records[0]);
        let body = tuple
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .trim();
        let lines = body.split(",\n").collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        let value_count: usize = lines.iter().map(|line| line.split(", ").count()).sum();
        assert_eq!(value_count, COLUMNS.len());
    }

    #[test]
    fn empty_input_skips_insert() {
        assert!(render_insert(&[]).is_none());
        let script = render_script(&[], generated_at());
        assert!(script.contains("-- Total records: 0"));
        assert!(!script.contains("INSERT INTO"));
        assert!(script.trim_end().ends_with(VERIFY_QUERY));
    }

    #[test]
    fn script_carries_header_and_verification_query() {
        let script = render_script(&[sample("a@b.c", "Andi")], generated_at());
        let lines = script.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], BANNER);
        assert_eq!(lines[2], "-- Total records: 1");
        assert_eq!(lines[3], "-- Generated: 2024-01-02 03:04:05");
        assert_eq!(lines[6], "-- Insert cv_data records");
        assert_eq!(lines[7], "INSERT INTO public.cv_data (");
        assert_eq!(lines.last().copied(), Some(VERIFY_QUERY));
    }
}
