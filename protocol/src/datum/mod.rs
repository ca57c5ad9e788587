//! # Datum Module
//!
//! Declarative datum definitions and the machinery to turn them into
//! concrete on-chain datums.
//!
//! ```text
//! definition.rs — DatumField / ConstructorTag / DatumParameterKey (the shape)
//! plutus.rs     — PlutusData (a filled-in datum)
//! builder.rs    — DefinitionBuilder: push parameters in, pull them back out
//! error.rs      — DatumError
//! ```
//!
//! Definitions are static values. Nothing in this module holds state; the
//! wallet provider asks for a datum when it assembles a payment to a
//! script address and attaches the result to the output.

pub mod builder;
pub mod definition;
pub mod plutus;

mod error;

pub use builder::{DatumParameters, DatumValue, DefinitionBuilder};
pub use definition::{ConstructorTag, DatumField, DatumParameterKey};
pub use error::DatumError;
pub use plutus::PlutusData;
