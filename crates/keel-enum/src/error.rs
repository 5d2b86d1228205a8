//! Catalogue errors

use keel_core::{ErrorKind, IntoReport, Report};
use thiserror::Error;

/// Tag does not name a declared variant
pub const NOT_CONTAINED: ErrorKind = ErrorKind::custom(100, "Not contained");

/// Instance lacks fields declared by its variant schema
pub const MISSING_FIELDS: ErrorKind = ErrorKind::custom(101, "Missing fields");

/// Catalogue declaration is malformed
pub const INVALID_CATALOGUE: ErrorKind = ErrorKind::custom(102, "Invalid catalogue");

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogueError {
    #[error("`{catalogue}` declares `{variant}` twice")]
    DuplicateVariant { catalogue: String, variant: String },

    #[error("`{0}` declares no variants")]
    Empty(String),

    #[error("schema for `{catalogue}::{variant}` is not a dictionary")]
    InvalidSchema { catalogue: String, variant: String },

    #[error("`{variant}` is not a variant of `{catalogue}`")]
    NotContained { catalogue: String, variant: String },

    #[error("`{catalogue}::{variant}` is missing fields {missing:?}")]
    MissingFields {
        catalogue: String,
        variant: String,
        missing: Vec<String>,
    },
}

impl CatalogueError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogueError::NotContained { .. } => NOT_CONTAINED,
            CatalogueError::MissingFields { .. } => MISSING_FIELDS,
            CatalogueError::DuplicateVariant { .. }
            | CatalogueError::Empty(_)
            | CatalogueError::InvalidSchema { .. } => INVALID_CATALOGUE,
        }
    }
}

impl From<CatalogueError> for Report {
    fn from(err: CatalogueError) -> Self {
        let builder = Report::builder(err.kind()).msg(err.to_string());
        match err {
            CatalogueError::DuplicateVariant { catalogue, variant }
            | CatalogueError::InvalidSchema { catalogue, variant }
            | CatalogueError::NotContained { catalogue, variant } => builder
                .info("catalogue", catalogue)
                .info("variant", variant)
                .build(),
            CatalogueError::MissingFields {
                catalogue,
                variant,
                missing,
            } => builder
                .info("catalogue", catalogue)
                .info("variant", variant)
                .info("missing", missing)
                .build(),
            CatalogueError::Empty(catalogue) => builder.info("catalogue", catalogue).build(),
        }
    }
}

impl IntoReport for CatalogueError {
    fn into_report(self) -> Report {
        Report::from(self)
    }
}
