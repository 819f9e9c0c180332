//! Structural type information for the skiff build driver.
//!
//! The driver does not type-check programs itself; it consumes exported type
//! information produced by the frontend and answers one whole-program
//! question: which concrete types structurally satisfy which interfaces.
//! This crate holds the type model, the per-session type table, the
//! satisfaction check, and the export-data codec used by the archive cache.

#![warn(missing_docs)]

pub mod export;
pub mod model;
pub mod table;

pub use export::{decode_package, encode_package, ExportError};
pub use model::{error_interface, satisfies, MethodSig, TypeDef, TypeRef, TypeShape};
pub use table::{PackageTypes, TypeTable};
