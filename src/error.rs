//! Error types shared by the PSK and FSK modulators

use thiserror::Error;

/// Result type for modulation calls
pub type ModulationResult<T> = Result<T, ModulationError>;

/// Errors raised while building a modulator or pulling samples from it.
///
/// Every variant is terminal for the call that produced it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModulationError {
    /// The symbol mapping is not a permutation of `0..m`
    #[error("Invalid symbol mapping {mapping:?}: expected a permutation of 0..{m}")]
    InvalidMapping { mapping: Vec<usize>, m: usize },

    /// A consumed symbol fell outside `[0, m-1]`
    #[error("Symbol {symbol} out of range: must be in [0, {max}]", max = .m - 1)]
    SymbolOutOfRange { symbol: usize, m: usize },

    /// A modulator parameter is unusable (order below 2, zero samples per symbol, ...)
    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },

    /// Placeholder operation
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

impl ModulationError {
    pub(crate) fn invalid_parameter(name: &'static str, value: impl ToString) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_range_message_names_valid_range() {
        let err = ModulationError::SymbolOutOfRange { symbol: 4, m: 4 };
        assert_eq!(err.to_string(), "Symbol 4 out of range: must be in [0, 3]");
    }

    #[test]
    fn test_invalid_mapping_carries_table() {
        let err = ModulationError::InvalidMapping {
            mapping: vec![0, 1, 1, 2],
            m: 4,
        };
        assert!(err.to_string().contains("[0, 1, 1, 2]"));
    }
}
