//! Row normalization: maps one raw export row onto a `cv_data` record.
//!
//! Each row resolves to [`RowOutcome::Kept`] or [`RowOutcome::Discarded`],
//! together with advisory [`NormalizeWarning`]s. Neither path is an error;
//! fatal conditions (unreadable input, missing columns) are handled by the
//! caller before rows reach this module.
//!
//! Field policy:
//!
//! | field          | on miss / parse failure            | warning |
//! |----------------|------------------------------------|---------|
//! | email          | discard                            | no      |
//! | gender         | discard                            | yes     |
//! | full name      | discard                            | yes     |
//! | birth date     | `NULL`                             | yes     |
//! | province       | `NULL`                             | no      |
//! | education      | `S1`                               | yes     |
//! | marital status | `SINGLE`                           | no      |
//! | income         | `SAAT_TAARUF`                      | no      |
//! | weight         | 50                                 | no      |
//! | height         | 160, or repaired when truncated    | no      |

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

use crate::{
    lookup::{self, Education, FOREIGN_PROVINCE_ID, Gender, IncomeBracket, MaritalStatus},
    record::{self, NormalizedRecord, RawRecord},
};

pub const DEFAULT_HEIGHT_CM: i64 = 160;
pub const DEFAULT_WEIGHT_KG: i64 = 50;
pub const DEFAULT_EDUCATION: Education = Education::S1;
pub const NO_DESCRIPTION: &str = "Tidak ada deskripsi";
pub const NO_DISEASE: &str = "Tidak ada";
pub const FOREIGN_ADDRESS_PLACEHOLDER: &str = "Alamat di luar negeri (belum dilengkapi)";

const NONE_SENTINELS: &[&str] = &["tidak ada", "-", ""];

static SLASH_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("slash date pattern compiles")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscardReason {
    #[error("row has no email")]
    MissingEmail,
    #[error("missing required fields for {email}")]
    MissingRequired { email: String },
    #[error("invalid gender for {email}: {gender}")]
    InvalidGender { email: String, gender: String },
}

impl DiscardReason {
    /// Rows without an email are treated as blank spreadsheet lines.
    pub fn is_silent(&self) -> bool {
        matches!(self, DiscardReason::MissingEmail)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeWarning {
    #[error("invalid date format: {value}")]
    InvalidBirthDate { value: String },
    #[error("invalid education for {email}: {value}, defaulting to {}", DEFAULT_EDUCATION)]
    UnmappedEducation { email: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Kept(NormalizedRecord),
    Discarded(DiscardReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub outcome: RowOutcome,
    pub warnings: Vec<NormalizeWarning>,
}

impl Normalized {
    fn discarded(reason: DiscardReason, warnings: Vec<NormalizeWarning>) -> Self {
        Self {
            outcome: RowOutcome::Discarded(reason),
            warnings,
        }
    }

    pub fn into_record(self) -> Option<NormalizedRecord> {
        match self.outcome {
            RowOutcome::Kept(record) => Some(record),
            RowOutcome::Discarded(_) => None,
        }
    }
}

pub fn normalize_row(raw: &RawRecord) -> Normalized {
    let mut warnings = Vec::new();

    let email = raw.trimmed(record::COL_EMAIL);
    if email.is_empty() {
        return Normalized::discarded(DiscardReason::MissingEmail, warnings);
    }

    let gender_code = raw.trimmed(record::COL_GENDER);
    let full_name = clean_name(raw.get(record::COL_FULL_NAME).unwrap_or(""));

    let birth_date_raw = raw.trimmed(record::COL_BIRTH_DATE);
    let birth_date = parse_birth_date(birth_date_raw);
    if birth_date.is_none() && !birth_date_raw.is_empty() {
        warnings.push(NormalizeWarning::InvalidBirthDate {
            value: birth_date_raw.to_string(),
        });
    }

    let province_name = raw.trimmed(record::COL_PROVINCE);
    let province_id = lookup::province_id(province_name);

    let education_label = raw.trimmed(record::COL_EDUCATION);
    let education = Education::from_label(education_label);
    let occupation = raw.trimmed(record::COL_OCCUPATION).to_string();
    let income_bracket =
        IncomeBracket::from_label(raw.trimmed(record::COL_INCOME)).unwrap_or_default();

    let weight_raw = raw.trimmed(record::COL_WEIGHT);
    let weight_kg = parse_weight(weight_raw);
    let height_cm = fix_height(raw.trimmed(record::COL_HEIGHT), weight_raw);

    let marital_status =
        MaritalStatus::from_label(raw.trimmed(record::COL_MARITAL_STATUS)).unwrap_or_default();
    let full_address = normalize_address(
        raw.trimmed(record::COL_ADDRESS),
        province_name,
        province_id,
    );
    let ciri_fisik = match raw.trimmed(record::COL_PHYSICAL) {
        "" => NO_DESCRIPTION.to_string(),
        text => text.to_string(),
    };
    let disease_history = encode_disease_history(raw.trimmed(record::COL_DISEASE_HISTORY));

    if gender_code.is_empty() || full_name.is_empty() {
        return Normalized::discarded(
            DiscardReason::MissingRequired {
                email: email.to_string(),
            },
            warnings,
        );
    }

    let Some(gender) = Gender::from_code(gender_code) else {
        return Normalized::discarded(
            DiscardReason::InvalidGender {
                email: email.to_string(),
                gender: gender_code.to_string(),
            },
            warnings,
        );
    };

    let education = education.unwrap_or_else(|| {
        warnings.push(NormalizeWarning::UnmappedEducation {
            email: email.to_string(),
            value: education_label.to_string(),
        });
        DEFAULT_EDUCATION
    });

    Normalized {
        outcome: RowOutcome::Kept(NormalizedRecord {
            user_email: email.to_string(),
            gender,
            full_name,
            birth_date,
            province_id,
            education,
            occupation,
            income_bracket,
            height_cm,
            weight_kg,
            marital_status,
            full_address,
            ciri_fisik,
            disease_history,
        }),
        warnings,
    }
}

/// Strips spreadsheet quoting artifacts from a name.
pub fn clean_name(name: &str) -> String {
    let name = name
        .trim()
        .trim_matches('"')
        .trim_matches('\'')
        .replace("\"\"\"", "")
        .replace("\"\"", "");
    name.trim().to_string()
}

/// Parses `M/D/YYYY`, falling back to `D/M/YYYY`.
pub fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    let captures = SLASH_DATE.captures(value.trim())?;
    let first: u32 = captures[1].parse().ok()?;
    let second: u32 = captures[2].parse().ok()?;
    let year: i32 = captures[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, first, second)
        .or_else(|| NaiveDate::from_ymd_opt(year, second, first))
}

pub fn parse_weight(value: &str) -> i64 {
    value.trim().parse().unwrap_or(DEFAULT_WEIGHT_KG)
}

/// Repairs heights that lost their leading digit during manual entry
/// (`56` recorded for `156`).
///
/// Only the 40..=90 window is repaired; anything else passes through
/// unchanged even when implausible. Both values must parse or the default
/// height is used. Values that do not fit in an `i64` count as unparsable.
pub fn fix_height(height: &str, weight: &str) -> i64 {
    let (Ok(height), Ok(_weight)) = (height.trim().parse::<i64>(), weight.trim().parse::<i64>())
    else {
        return DEFAULT_HEIGHT_CM;
    };
    if height < 100 && (40..=90).contains(&height) {
        return 150 + height % 10;
    }
    height
}

pub fn is_none_sentinel(value: &str) -> bool {
    let lowered = value.trim().to_lowercase();
    NONE_SENTINELS.contains(&lowered.as_str())
}

pub fn normalize_address(address: &str, province_name: &str, province_id: Option<u8>) -> String {
    let address = address.trim();
    if !is_none_sentinel(address) {
        return address.to_string();
    }
    if province_id == Some(FOREIGN_PROVINCE_ID) {
        FOREIGN_ADDRESS_PLACEHOLDER.to_string()
    } else {
        format!("Alamat lengkap di {province_name} (belum dilengkapi)")
    }
}

/// Encodes the history as JSON text of a one-element array.
pub fn encode_disease_history(value: &str) -> String {
    let value = value.trim();
    let entry = if is_none_sentinel(value) {
        NO_DISEASE
    } else {
        value
    };
    serde_json::Value::from(vec![entry]).to_string()
}
