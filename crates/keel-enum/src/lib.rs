//! Keel Enum - Sealed variant catalogues
//!
//! - `EnumStruct`: named variants with field schemas, instantiated as `EnumVariant`
//! - `EnumDict`: named variants mapped to plain host values
//!
//! Both are declared through a builder and sealed on `build()`.

pub mod error;
pub mod variant;
pub mod dict;

pub use error::*;
pub use variant::*;
pub use dict::*;
