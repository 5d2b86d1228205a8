//! File and JSON helpers
//!
//! Thin adapters over `std::fs` and `serde_json` that surface failures as
//! reports carrying the path (and parse position for JSON).

use std::fs::{File, OpenOptions};
use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::kind::HostError;
use crate::report::Report;
use crate::result::IntoReport;
use crate::KeelResult;

/// Access mode for [`open_file`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileMode {
    Read,
    /// Create or truncate
    Write,
    /// Read and write an existing file
    ReadWrite,
    /// Create or truncate, then read and write
    WriteRead,
}

impl FileMode {
    fn options(self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            FileMode::Read => options.read(true),
            FileMode::Write => options.write(true).create(true).truncate(true),
            FileMode::ReadWrite => options.read(true).write(true),
            FileMode::WriteRead => options.read(true).write(true).create(true).truncate(true),
        };
        options
    }
}

fn open_error_kind(err: &std::io::Error) -> HostError {
    match err.kind() {
        std::io::ErrorKind::NotFound => HostError::FileNotFound,
        std::io::ErrorKind::PermissionDenied => HostError::FileNoPermission,
        std::io::ErrorKind::AlreadyExists => HostError::FileAlreadyInUse,
        _ => HostError::FileCantOpen,
    }
}

fn path_value(path: &Path) -> Value {
    Value::String(path.display().to_string())
}

pub fn open_file(path: impl AsRef<Path>, mode: FileMode) -> KeelResult<File> {
    let path = path.as_ref();
    mode.options().open(path).map_err(|err| {
        Report::builder(open_error_kind(&err))
            .info("path", path_value(path))
            .cause(Report::builder(HostError::from(err.kind())).msg(err.to_string()).build())
            .build()
    })
}

pub fn read_file_text(path: impl AsRef<Path>) -> KeelResult<String> {
    let path = path.as_ref();
    let mut file = open_file(path, FileMode::Read)?;
    let mut text = String::new();
    file.read_to_string(&mut text).map_err(|err| {
        Report::builder(HostError::FileCantRead)
            .info("path", path_value(path))
            .msg(err.to_string())
            .build()
    })?;
    Ok(text)
}

pub fn parse_json_str(text: &str) -> KeelResult<Value> {
    serde_json::from_str(text).map_err(IntoReport::into_report)
}

pub fn parse_json_file(path: impl AsRef<Path>) -> KeelResult<Value> {
    let path = path.as_ref();
    let text = read_file_text(path)?;
    parse_json_str(&text).map_err(|report| {
        report
            .to_builder()
            .info("path", path_value(path))
            .build()
    })
}
