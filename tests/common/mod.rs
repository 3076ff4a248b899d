#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

pub const HEADER: &str = "email,Jenis Kelamin,Nama Lengkap,Tanggal Lahir ,daerah provinsi,\
Pendidikan Terakhir,Pekerjaan,Penghasilan per Bulan,Tinggi (cm),Berat (kg),\
Status Pernikahan,Ciri Fisik,Riwayat Penyakit";

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    /// Writes an export with the standard header followed by `rows`.
    pub fn write_export(&self, name: &str, rows: &[&str]) -> PathBuf {
        let mut contents = String::from(HEADER);
        contents.push('\n');
        for row in rows {
            contents.push_str(row);
            contents.push('\n');
        }
        self.write(name, &contents)
    }
}

/// Splits a generated script into its value tuples.
pub fn value_tuples(script: &str) -> Vec<String> {
    script
        .split("  (\n")
        .skip(1)
        .map(|chunk| chunk.split("\n  )").next().unwrap_or_default().to_string())
        .collect()
}
