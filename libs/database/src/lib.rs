//! Database connectors.
//!
//! Each backend lives behind a feature gate so consumers only compile the
//! drivers they use.

#[cfg(feature = "mongodb")]
pub mod mongodb;
