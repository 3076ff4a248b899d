use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use serde::Serialize;

use crate::lookup::{Education, FOREIGN_PROVINCE_ID, Gender, IncomeBracket, MaritalStatus};

pub const COL_EMAIL: &str = "email";
pub const COL_GENDER: &str = "Jenis Kelamin";
pub const COL_FULL_NAME: &str = "Nama Lengkap";
// The export carries a trailing space in this header.
pub const COL_BIRTH_DATE: &str = "Tanggal Lahir ";
pub const COL_PROVINCE: &str = "daerah provinsi";
pub const COL_EDUCATION: &str = "Pendidikan Terakhir";
pub const COL_OCCUPATION: &str = "Pekerjaan";
pub const COL_INCOME: &str = "Penghasilan per Bulan";
pub const COL_HEIGHT: &str = "Tinggi (cm)";
pub const COL_WEIGHT: &str = "Berat (kg)";
pub const COL_MARITAL_STATUS: &str = "Status Pernikahan";
pub const COL_PHYSICAL: &str = "Ciri Fisik";
pub const COL_DISEASE_HISTORY: &str = "Riwayat Penyakit";
pub const COL_ADDRESS: &str = "full_address";

pub const REQUIRED_COLUMNS: &[&str] = &[
    COL_EMAIL,
    COL_GENDER,
    COL_FULL_NAME,
    COL_BIRTH_DATE,
    COL_PROVINCE,
    COL_EDUCATION,
    COL_OCCUPATION,
    COL_INCOME,
    COL_HEIGHT,
    COL_WEIGHT,
    COL_MARITAL_STATUS,
    COL_PHYSICAL,
    COL_DISEASE_HISTORY,
];

/// Fails when the header row lacks any column the normalizer reads.
///
/// Matching is exact, including embedded and trailing spaces. The address
/// column is optional.
pub fn validate_headers(headers: &[String]) -> Result<()> {
    let missing = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(anyhow!(
            "Input is missing required column(s): {}",
            missing.join(", ")
        ))
    }
}

/// One input row keyed by header name, in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    row_number: usize,
    fields: Vec<(String, String)>,
}

impl RawRecord {
    pub fn new(row_number: usize, headers: &[String], values: Vec<String>) -> Self {
        let fields = headers.iter().cloned().zip(values).collect();
        Self { row_number, fields }
    }

    pub fn from_pairs<K, V>(row_number: usize, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { row_number, fields }
    }

    /// 1-based line in the source file, counting the header as line 1.
    pub fn row_number(&self) -> usize {
        self.row_number
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Trimmed value, treating an absent column as empty.
    pub fn trimmed(&self, column: &str) -> &str {
        self.get(column).map(str::trim).unwrap_or("")
    }
}

/// A validated `cv_data` row. Field order matches the INSERT column list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRecord {
    pub user_email: String,
    pub gender: Gender,
    pub full_name: String,
    pub birth_date: Option<NaiveDate>,
    pub province_id: Option<u8>,
    pub education: Education,
    pub occupation: String,
    pub income_bracket: IncomeBracket,
    pub height_cm: i64,
    pub weight_kg: i64,
    pub marital_status: MaritalStatus,
    pub full_address: String,
    pub ciri_fisik: String,
    /// JSON text of a one-element string array.
    pub disease_history: String,
}

impl NormalizedRecord {
    pub fn is_foreign(&self) -> bool {
        self.province_id == Some(FOREIGN_PROVINCE_ID)
    }
}
