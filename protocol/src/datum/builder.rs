//! Filling definitions with parameters, and reading them back.
//!
//! [`DefinitionBuilder::push_parameters`] walks a definition and substitutes
//! each named slot with its value. [`DefinitionBuilder::pull_parameters`]
//! does the reverse against a datum read from chain, rejecting anything
//! whose structure doesn't line up with the definition.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::definition::{ConstructorTag, DatumField, DatumParameterKey};
use super::error::DatumError;
use super::plutus::PlutusData;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Value for a single datum parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatumValue {
    /// Integer value. Also used for parameter-keyed constructor tags.
    Int(i64),
    /// Raw bytes, e.g. a key hash or policy id.
    Bytes(Vec<u8>),
}

/// Parameter values keyed by name.
pub type DatumParameters = BTreeMap<DatumParameterKey, DatumValue>;

// ---------------------------------------------------------------------------
// DefinitionBuilder
// ---------------------------------------------------------------------------

/// Builds concrete datums from a definition.
#[derive(Debug, Clone)]
pub struct DefinitionBuilder {
    definition: DatumField,
}

impl DefinitionBuilder {
    /// Wraps a definition.
    pub fn new(definition: DatumField) -> Self {
        Self { definition }
    }

    /// The wrapped definition.
    pub fn definition(&self) -> &DatumField {
        &self.definition
    }

    /// Produces the concrete datum for `parameters`.
    ///
    /// Extra parameters not referenced by the definition are ignored.
    pub fn push_parameters(&self, parameters: &DatumParameters) -> Result<PlutusData, DatumError> {
        let datum = push_field(&self.definition, parameters)?;
        trace!(keys = parameters.len(), "datum built from definition");
        Ok(datum)
    }

    /// Extracts parameter values from `datum` by matching it against the
    /// definition.
    pub fn pull_parameters(&self, datum: &PlutusData) -> Result<DatumParameters, DatumError> {
        let mut parameters = DatumParameters::new();
        pull_field(&self.definition, datum, &mut parameters)?;
        Ok(parameters)
    }
}

fn push_field(field: &DatumField, parameters: &DatumParameters) -> Result<PlutusData, DatumError> {
    match field {
        DatumField::Constructor {
            constructor,
            fields,
        } => {
            let tag = match constructor {
                ConstructorTag::Fixed(tag) => *tag,
                ConstructorTag::Parameter(key) => {
                    let value = int_param(*key, parameters)?;
                    u64::try_from(value).map_err(|_| DatumError::InvalidConstructorTag(*key))?
                }
            };
            let fields = fields
                .iter()
                .map(|child| push_field(child, parameters))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(PlutusData::Constr {
                constructor: tag,
                fields,
            })
        }
        DatumField::Int { int } => Ok(PlutusData::Int {
            int: int_param(*int, parameters)?,
        }),
        DatumField::Bytes { bytes } => match parameters.get(bytes) {
            Some(DatumValue::Bytes(value)) => Ok(PlutusData::Bytes {
                bytes: value.clone(),
            }),
            Some(DatumValue::Int(_)) => Err(DatumError::TypeMismatch {
                key: *bytes,
                expected: "bytes",
            }),
            None => Err(DatumError::MissingParameter(*bytes)),
        },
    }
}

fn int_param(key: DatumParameterKey, parameters: &DatumParameters) -> Result<i64, DatumError> {
    match parameters.get(&key) {
        Some(DatumValue::Int(value)) => Ok(*value),
        Some(DatumValue::Bytes(_)) => Err(DatumError::TypeMismatch {
            key,
            expected: "int",
        }),
        None => Err(DatumError::MissingParameter(key)),
    }
}

fn pull_field(
    field: &DatumField,
    datum: &PlutusData,
    out: &mut DatumParameters,
) -> Result<(), DatumError> {
    match (field, datum) {
        (
            DatumField::Constructor {
                constructor,
                fields,
            },
            PlutusData::Constr {
                constructor: found,
                fields: found_fields,
            },
        ) => {
            match constructor {
                ConstructorTag::Fixed(expected) if expected != found => {
                    return Err(DatumError::ConstructorMismatch {
                        expected: *expected,
                        found: *found,
                    });
                }
                ConstructorTag::Fixed(_) => {}
                ConstructorTag::Parameter(key) => {
                    let tag =
                        i64::try_from(*found).map_err(|_| DatumError::InvalidConstructorTag(*key))?;
                    record(*key, DatumValue::Int(tag), out)?;
                }
            }
            if fields.len() != found_fields.len() {
                return Err(DatumError::FieldCountMismatch {
                    expected: fields.len(),
                    found: found_fields.len(),
                });
            }
            for (child, value) in fields.iter().zip(found_fields) {
                pull_field(child, value, out)?;
            }
            Ok(())
        }
        (DatumField::Int { int }, PlutusData::Int { int: value }) => {
            record(*int, DatumValue::Int(*value), out)
        }
        (DatumField::Bytes { bytes }, PlutusData::Bytes { bytes: value }) => {
            record(*bytes, DatumValue::Bytes(value.clone()), out)
        }
        (expected, found) => Err(DatumError::ShapeMismatch {
            expected: field_kind(expected),
            found: found.kind(),
        }),
    }
}

// A key may legitimately appear twice in a definition, but it must carry the
// same value both times.
fn record(
    key: DatumParameterKey,
    value: DatumValue,
    out: &mut DatumParameters,
) -> Result<(), DatumError> {
    match out.get(&key) {
        Some(existing) if *existing != value => Err(DatumError::ConflictingParameter(key)),
        _ => {
            out.insert(key, value);
            Ok(())
        }
    }
}

fn field_kind(field: &DatumField) -> &'static str {
    match field {
        DatumField::Constructor { .. } => "constructor",
        DatumField::Int { .. } => "int",
        DatumField::Bytes { .. } => "bytes",
    }
}
