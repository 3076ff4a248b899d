//! Fixed lookup tables mapping spreadsheet labels onto `cv_data` column values.
//!
//! Every table is matched exactly against the trimmed label; there is no
//! case folding or fuzzy matching. Callers decide what a miss means
//! (default, null, or discard).

use std::fmt;

use serde::Serialize;

/// Province id used for profiles living outside Indonesia.
pub const FOREIGN_PROVINCE_ID: u8 = 39;
pub const FOREIGN_PROVINCE_NAME: &str = "Luar Negeri";

const PROVINCES: &[(&str, u8)] = &[
    ("Aceh", 1),
    ("Bali", 2),
    ("Banten", 3),
    ("Bengkulu", 4),
    ("DI Yogyakarta", 5),
    ("DKI Jakarta", 6),
    ("Gorontalo", 7),
    ("Jambi", 8),
    ("Jawa Barat", 9),
    ("Jawa Tengah", 10),
    ("Jawa Timur", 11),
    ("Kalimantan Barat", 12),
    ("Kalimantan Selatan", 13),
    ("Kalimantan Tengah", 14),
    ("Kalimantan Timur", 15),
    ("Kalimantan Utara", 16),
    ("Kepulauan Bangka Belitung", 17),
    ("Kepulauan Riau", 18),
    ("Lampung", 19),
    ("Maluku", 20),
    ("Maluku Utara", 21),
    ("Nusa Tenggara Barat", 22),
    ("Nusa Tenggara Timur", 23),
    ("Papua", 24),
    ("Papua Barat", 25),
    ("Papua Barat Daya", 26),
    ("Papua Pegunungan", 27),
    ("Papua Selatan", 28),
    ("Papua Tengah", 29),
    ("Riau", 30),
    ("Sulawesi Barat", 31),
    ("Sulawesi Selatan", 32),
    ("Sulawesi Tengah", 33),
    ("Sulawesi Tenggara", 34),
    ("Sulawesi Utara", 35),
    ("Sumatera Barat", 36),
    ("Sumatera Selatan", 37),
    ("Sumatera Utara", 38),
    (FOREIGN_PROVINCE_NAME, FOREIGN_PROVINCE_ID),
];

pub fn province_id(name: &str) -> Option<u8> {
    PROVINCES
        .iter()
        .find(|(label, _)| *label == name)
        .map(|(_, id)| *id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    #[serde(rename = "IKHWAN")]
    Ikhwan,
    #[serde(rename = "AKHWAT")]
    Akhwat,
}

impl Gender {
    /// Gender is already stored as the enum code in the export.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "IKHWAN" => Some(Gender::Ikhwan),
            "AKHWAT" => Some(Gender::Akhwat),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Ikhwan => "IKHWAN",
            Gender::Akhwat => "AKHWAT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Education {
    #[serde(rename = "SMA_SMK")]
    SmaSmk,
    D3,
    S1,
    S2,
    S3,
}

impl Education {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "SMA/SMK" => Some(Education::SmaSmk),
            "D3" => Some(Education::D3),
            "S1" => Some(Education::S1),
            "S2" => Some(Education::S2),
            "S3" => Some(Education::S3),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Education::SmaSmk => "SMA_SMK",
            Education::D3 => "D3",
            Education::S1 => "S1",
            Education::S2 => "S2",
            Education::S3 => "S3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MaritalStatus {
    #[default]
    #[serde(rename = "SINGLE")]
    Single,
    #[serde(rename = "JANDA")]
    Janda,
    #[serde(rename = "DUDA")]
    Duda,
}

impl MaritalStatus {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Single" => Some(MaritalStatus::Single),
            "Janda" => Some(MaritalStatus::Janda),
            "Duda" => Some(MaritalStatus::Duda),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MaritalStatus::Single => "SINGLE",
            MaritalStatus::Janda => "JANDA",
            MaritalStatus::Duda => "DUDA",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum IncomeBracket {
    #[default]
    #[serde(rename = "SAAT_TAARUF")]
    SaatTaaruf,
    #[serde(rename = "0_2")]
    ZeroToTwo,
    #[serde(rename = "2_5")]
    TwoToFive,
    #[serde(rename = "5_10")]
    FiveToTen,
    #[serde(rename = "10_PLUS")]
    TenPlus,
}

impl IncomeBracket {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Saat Taaruf" => Some(IncomeBracket::SaatTaaruf),
            "0-2 Juta" => Some(IncomeBracket::ZeroToTwo),
            "2-5 Juta" => Some(IncomeBracket::TwoToFive),
            "5-10 Juta" => Some(IncomeBracket::FiveToTen),
            "10+ Juta" => Some(IncomeBracket::TenPlus),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeBracket::SaatTaaruf => "SAAT_TAARUF",
            IncomeBracket::ZeroToTwo => "0_2",
            IncomeBracket::TwoToFive => "2_5",
            IncomeBracket::FiveToTen => "5_10",
            IncomeBracket::TenPlus => "10_PLUS",
        }
    }
}

macro_rules! display_as_code {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

display_as_code!(Gender, Education, MaritalStatus, IncomeBracket);
