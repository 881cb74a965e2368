//! Symbol to constellation/tone index mapping

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ModulationError, ModulationResult};

/// Name accepted in place of an explicit table for the identity mapping
pub const BINARY_MAPPING: &str = "binary";

/// Assignment of symbol values to constellation point (or tone) indices.
///
/// `Custom(table)` means symbol `i` goes to point `table[i]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MappingRepr", into = "MappingRepr")]
pub enum SymbolMapping {
    /// Identity mapping, `mapping[i] = i`, for any order
    #[default]
    Binary,
    Custom(Vec<usize>),
}

impl SymbolMapping {
    /// Validate against `m` and return the lookup table.
    ///
    /// Runs before any symbol is consumed.
    pub fn resolve(&self, m: usize) -> ModulationResult<Vec<usize>> {
        match self {
            SymbolMapping::Binary => Ok((0..m).collect()),
            SymbolMapping::Custom(table) if check_mapping(table, m) => Ok(table.clone()),
            SymbolMapping::Custom(table) => Err(ModulationError::InvalidMapping {
                mapping: table.clone(),
                m,
            }),
        }
    }
}

impl From<Vec<usize>> for SymbolMapping {
    fn from(table: Vec<usize>) -> Self {
        SymbolMapping::Custom(table)
    }
}

impl From<&[usize]> for SymbolMapping {
    fn from(table: &[usize]) -> Self {
        SymbolMapping::Custom(table.to_vec())
    }
}

impl fmt::Display for SymbolMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolMapping::Binary => write!(f, "{}", BINARY_MAPPING),
            SymbolMapping::Custom(table) => write!(f, "{:?}", table),
        }
    }
}

/// Returns true iff `mapping` has exactly `m` entries forming a permutation of `0..m`.
pub fn check_mapping(mapping: &[usize], m: usize) -> bool {
    if mapping.len() != m {
        return false;
    }

    let mut seen = vec![false; m];
    for &index in mapping {
        if index >= m || seen[index] {
            return false;
        }
        seen[index] = true;
    }

    true
}

/// Wire form: `"binary"` or a list of indices
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum MappingRepr {
    Name(String),
    Table(Vec<usize>),
}

impl TryFrom<MappingRepr> for SymbolMapping {
    type Error = String;

    fn try_from(repr: MappingRepr) -> Result<Self, Self::Error> {
        match repr {
            MappingRepr::Name(name) if name == BINARY_MAPPING => Ok(SymbolMapping::Binary),
            MappingRepr::Name(name) => Err(format!(
                "unknown symbol mapping \"{}\", expected \"{}\" or a list of indices",
                name, BINARY_MAPPING
            )),
            MappingRepr::Table(table) => Ok(SymbolMapping::Custom(table)),
        }
    }
}

impl From<SymbolMapping> for MappingRepr {
    fn from(mapping: SymbolMapping) -> Self {
        match mapping {
            SymbolMapping::Binary => MappingRepr::Name(BINARY_MAPPING.to_string()),
            SymbolMapping::Custom(table) => MappingRepr::Table(table),
        }
    }
}
