//! Error kinds
//!
//! Kinds are numeric codes split into two ranges:
//! - `0..CUSTOM_KIND_BASE`: reserved for host (engine) errors
//! - `CUSTOM_KIND_BASE..`: user-defined kinds

use std::fmt;
use std::hash::{Hash, Hasher};

/// First code of the user-defined range
pub const CUSTOM_KIND_BASE: i64 = 49;

/// Host-reserved error codes
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostError {
    Ok = 0,
    Failed = 1,
    Unavailable = 2,
    Unconfigured = 3,
    Unauthorized = 4,
    ParameterRangeError = 5,
    OutOfMemory = 6,
    FileNotFound = 7,
    FileBadDrive = 8,
    FileBadPath = 9,
    FileNoPermission = 10,
    FileAlreadyInUse = 11,
    FileCantOpen = 12,
    FileCantWrite = 13,
    FileCantRead = 14,
    FileUnrecognized = 15,
    FileCorrupt = 16,
    FileMissingDependencies = 17,
    FileEof = 18,
    CantOpen = 19,
    CantCreate = 20,
    QueryFailed = 21,
    AlreadyInUse = 22,
    Locked = 23,
    Timeout = 24,
    CantConnect = 25,
    CantResolve = 26,
    ConnectionError = 27,
    CantAcquireResource = 28,
    CantFork = 29,
    InvalidData = 30,
    InvalidParameter = 31,
    AlreadyExists = 32,
    DoesNotExist = 33,
    DatabaseCantRead = 34,
    DatabaseCantWrite = 35,
    CompilationFailed = 36,
    MethodNotFound = 37,
    LinkFailed = 38,
    ScriptFailed = 39,
    CyclicLink = 40,
    InvalidDeclaration = 41,
    DuplicateSymbol = 42,
    ParseError = 43,
    Busy = 44,
    Skip = 45,
    Help = 46,
    Bug = 47,
    PrinterOnFire = 48,
}

impl HostError {
    /// All host codes, indexed by code
    pub const ALL: [HostError; CUSTOM_KIND_BASE as usize] = [
        HostError::Ok,
        HostError::Failed,
        HostError::Unavailable,
        HostError::Unconfigured,
        HostError::Unauthorized,
        HostError::ParameterRangeError,
        HostError::OutOfMemory,
        HostError::FileNotFound,
        HostError::FileBadDrive,
        HostError::FileBadPath,
        HostError::FileNoPermission,
        HostError::FileAlreadyInUse,
        HostError::FileCantOpen,
        HostError::FileCantWrite,
        HostError::FileCantRead,
        HostError::FileUnrecognized,
        HostError::FileCorrupt,
        HostError::FileMissingDependencies,
        HostError::FileEof,
        HostError::CantOpen,
        HostError::CantCreate,
        HostError::QueryFailed,
        HostError::AlreadyInUse,
        HostError::Locked,
        HostError::Timeout,
        HostError::CantConnect,
        HostError::CantResolve,
        HostError::ConnectionError,
        HostError::CantAcquireResource,
        HostError::CantFork,
        HostError::InvalidData,
        HostError::InvalidParameter,
        HostError::AlreadyExists,
        HostError::DoesNotExist,
        HostError::DatabaseCantRead,
        HostError::DatabaseCantWrite,
        HostError::CompilationFailed,
        HostError::MethodNotFound,
        HostError::LinkFailed,
        HostError::ScriptFailed,
        HostError::CyclicLink,
        HostError::InvalidDeclaration,
        HostError::DuplicateSymbol,
        HostError::ParseError,
        HostError::Busy,
        HostError::Skip,
        HostError::Help,
        HostError::Bug,
        HostError::PrinterOnFire,
    ];

    #[inline]
    pub fn code(self) -> i64 {
        self as u8 as i64
    }

    /// Look up a host error by numeric code
    pub fn from_code(code: i64) -> Option<HostError> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| HostError::ALL.get(idx).copied())
    }

    /// Human-readable description
    pub fn as_str(self) -> &'static str {
        match self {
            HostError::Ok => "OK",
            HostError::Failed => "Failed",
            HostError::Unavailable => "Unavailable",
            HostError::Unconfigured => "Unconfigured",
            HostError::Unauthorized => "Unauthorized",
            HostError::ParameterRangeError => "Parameter out of range",
            HostError::OutOfMemory => "Out of memory",
            HostError::FileNotFound => "File not found",
            HostError::FileBadDrive => "File: Bad drive",
            HostError::FileBadPath => "File: Bad path",
            HostError::FileNoPermission => "File: Permission denied",
            HostError::FileAlreadyInUse => "File already in use",
            HostError::FileCantOpen => "Can't open file",
            HostError::FileCantWrite => "Can't write file",
            HostError::FileCantRead => "Can't read file",
            HostError::FileUnrecognized => "File unrecognized",
            HostError::FileCorrupt => "File corrupt",
            HostError::FileMissingDependencies => "Missing dependencies for file",
            HostError::FileEof => "End of file",
            HostError::CantOpen => "Can't open",
            HostError::CantCreate => "Can't create",
            HostError::QueryFailed => "Query failed",
            HostError::AlreadyInUse => "Already in use",
            HostError::Locked => "Locked",
            HostError::Timeout => "Timeout",
            HostError::CantConnect => "Can't connect",
            HostError::CantResolve => "Can't resolve",
            HostError::ConnectionError => "Connection error",
            HostError::CantAcquireResource => "Can't acquire resource",
            HostError::CantFork => "Can't fork",
            HostError::InvalidData => "Invalid data",
            HostError::InvalidParameter => "Invalid parameter",
            HostError::AlreadyExists => "Already exists",
            HostError::DoesNotExist => "Does not exist",
            HostError::DatabaseCantRead => "Can't read database",
            HostError::DatabaseCantWrite => "Can't write database",
            HostError::CompilationFailed => "Compilation failed",
            HostError::MethodNotFound => "Method not found",
            HostError::LinkFailed => "Link failed",
            HostError::ScriptFailed => "Script failed",
            HostError::CyclicLink => "Cyclic link detected",
            HostError::InvalidDeclaration => "Invalid declaration",
            HostError::DuplicateSymbol => "Duplicate symbol",
            HostError::ParseError => "Parse error",
            HostError::Busy => "Resource busy",
            HostError::Skip => "Skip error",
            HostError::Help => "Help error",
            HostError::Bug => "Bug",
            HostError::PrinterOnFire => "Printer on fire",
        }
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<std::io::ErrorKind> for HostError {
    fn from(kind: std::io::ErrorKind) -> Self {
        use std::io::ErrorKind as Io;
        match kind {
            Io::NotFound => HostError::FileNotFound,
            Io::PermissionDenied => HostError::FileNoPermission,
            Io::AlreadyExists => HostError::AlreadyExists,
            Io::InvalidData => HostError::InvalidData,
            Io::InvalidInput => HostError::InvalidParameter,
            Io::TimedOut => HostError::Timeout,
            Io::UnexpectedEof => HostError::FileEof,
            Io::OutOfMemory => HostError::OutOfMemory,
            Io::ConnectionRefused | Io::ConnectionReset | Io::ConnectionAborted => {
                HostError::ConnectionError
            }
            _ => HostError::Failed,
        }
    }
}

/// Kind of a [`Report`](crate::Report)
///
/// Custom kinds compare and hash by code only; the name is for display.
#[derive(Clone, Copy, Debug)]
pub enum ErrorKind {
    Host(HostError),
    Custom { code: i64, name: &'static str },
}

impl ErrorKind {
    /// Declare a user-defined kind. `code` must be `>= CUSTOM_KIND_BASE`.
    pub const fn custom(code: i64, name: &'static str) -> Self {
        debug_assert!(code >= CUSTOM_KIND_BASE, "custom kind code in host range");
        ErrorKind::Custom { code, name }
    }

    /// Classify a raw code by range
    pub fn from_code(code: i64) -> Self {
        match HostError::from_code(code) {
            Some(host) => ErrorKind::Host(host),
            None => ErrorKind::Custom { code, name: "Custom" },
        }
    }

    #[inline]
    pub fn code(self) -> i64 {
        match self {
            ErrorKind::Host(host) => host.code(),
            ErrorKind::Custom { code, .. } => code,
        }
    }

    /// Whether this kind lies in the host-reserved range
    #[inline]
    pub fn is_host(self) -> bool {
        is_host_code(self.code())
    }

    pub fn host(self) -> Option<HostError> {
        match self {
            ErrorKind::Host(host) => Some(host),
            ErrorKind::Custom { .. } => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Host(host) => host.as_str(),
            ErrorKind::Custom { name, .. } => name,
        }
    }
}

impl PartialEq for ErrorKind {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for ErrorKind {}

impl Hash for ErrorKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

impl PartialEq<HostError> for ErrorKind {
    fn eq(&self, other: &HostError) -> bool {
        self.code() == other.code()
    }
}

impl From<HostError> for ErrorKind {
    fn from(host: HostError) -> Self {
        ErrorKind::Host(host)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a raw code is host-reserved
#[inline]
pub fn is_host_code(code: i64) -> bool {
    (0..CUSTOM_KIND_BASE).contains(&code)
}

/// Human string for a raw host code, `None` outside the host range
pub fn host_error_string(code: i64) -> Option<&'static str> {
    HostError::from_code(code).map(HostError::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_codes_are_dense() {
        for (idx, host) in HostError::ALL.iter().enumerate() {
            assert_eq!(host.code(), idx as i64);
            assert_eq!(HostError::from_code(idx as i64), Some(*host));
        }
        assert_eq!(HostError::from_code(CUSTOM_KIND_BASE), None);
        assert_eq!(HostError::from_code(-1), None);
    }

    #[test]
    fn test_kind_range_boundary() {
        assert!(ErrorKind::from_code(0).is_host());
        assert!(ErrorKind::from_code(48).is_host());
        assert!(!ErrorKind::from_code(49).is_host());
        assert!(!ErrorKind::from_code(-3).is_host());
        assert_eq!(ErrorKind::from_code(43), HostError::ParseError);
    }

    #[test]
    fn test_custom_kinds_compare_by_code() {
        let a = ErrorKind::custom(100, "Stale");
        let b = ErrorKind::from_code(100);
        assert_eq!(a, b);
        assert_ne!(a, ErrorKind::custom(101, "Stale"));
        assert_eq!(a.to_string(), "Stale");
    }

    #[test]
    fn test_host_error_string() {
        assert_eq!(host_error_string(7), Some("File not found"));
        assert_eq!(host_error_string(400), None);
    }
}
