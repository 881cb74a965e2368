//! Digital modulators: symbol streams in, unit-magnitude baseband samples out.
//!
//! Frequencies are fractions of the sample rate and angles are radians.

use num_complex::Complex64;
use tracing::warn;

use crate::error::{ModulationError, ModulationResult};

pub mod fsk;
pub mod mapping;
pub mod psk;


pub use fsk::{FskModulator, discontinuous_bfsk_modulate, fsk_mod, fsk_tones};
pub use mapping::{BINARY_MAPPING, SymbolMapping, check_mapping};
pub use psk::{PskModulator, bpsk_mod, dpsk_mod, mpsk_mod, opsk_mod, qpsk_mod};

/// Range check applied to every symbol at the moment it is consumed
pub(crate) fn check_symbol(symbol: usize, m: usize) -> ModulationResult<usize> {
    if symbol < m {
        Ok(symbol)
    } else {
        warn!(symbol, m, "symbol out of range, stopping modulation");
        Err(ModulationError::SymbolOutOfRange { symbol, m })
    }
}

/// Generic amplitude/quadrature keying. Always fails.
pub fn qam_mod<S>(
    _symbols: S,
    _m: usize,
    _symbol_mapping: &SymbolMapping,
) -> ModulationResult<Vec<Complex64>>
where
    S: IntoIterator<Item = usize>,
{
    Err(ModulationError::NotImplemented("qam_mod"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_symbol_bounds() {
        assert_eq!(check_symbol(0, 2), Ok(0));
        assert_eq!(check_symbol(1, 2), Ok(1));
        assert_eq!(
            check_symbol(2, 2),
            Err(ModulationError::SymbolOutOfRange { symbol: 2, m: 2 })
        );
    }

    #[test]
    fn test_qam_not_implemented() {
        assert_eq!(
            qam_mod(Vec::new(), 16, &SymbolMapping::Binary),
            Err(ModulationError::NotImplemented("qam_mod"))
        );
        assert!(qam_mod([0, 1, 2], 4, &SymbolMapping::from(vec![9])).is_err());
    }
}
