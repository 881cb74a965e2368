//! PSK (Phase Shift Keying) modulation, absolute and differential
use num_complex::Complex64;
use std::f64::consts::PI;
use std::iter::FusedIterator;
use tracing::debug;

use super::check_symbol;
use super::mapping::SymbolMapping;
use crate::error::{ModulationError, ModulationResult};

/// Running state of a differential modulator
#[derive(Clone, Copy, Debug)]
struct DifferentialState {
    last_point: Complex64,
    reference_pending: bool,
}

/// Lazy M-PSK sample stream.
///
/// Pulls one symbol per sample. In differential mode an extra reference
/// sample `exp(i*phase_offset)` comes first, so the stream is one longer
/// than its input. A symbol outside `[0, m-1]` yields a single `Err` and
/// ends the stream; samples already yielded stay valid.
pub struct PskModulator<I> {
    symbols: I,
    m: usize,
    mapping: Vec<usize>,
    // absolute points, or per-symbol rotations in differential mode
    table: Vec<Complex64>,
    differential: Option<DifferentialState>,
    finished: bool,
}

impl<I: Iterator<Item = usize>> PskModulator<I> {
    pub fn new(
        symbols: I,
        m: usize,
        differential: bool,
        phase_offset: f64,
        symbol_mapping: &SymbolMapping,
    ) -> ModulationResult<Self> {
        if m < 2 {
            return Err(ModulationError::invalid_parameter("m", m));
        }
        if !phase_offset.is_finite() {
            return Err(ModulationError::invalid_parameter("phase_offset", phase_offset));
        }
        let mapping = symbol_mapping.resolve(m)?;

        let (table, differential) = if differential {
            let rotations = (0..m).map(|k| unit_phasor(2.0 * PI * k as f64 / m as f64));
            let state = DifferentialState {
                last_point: unit_phasor(phase_offset),
                reference_pending: true,
            };
            (rotations.collect(), Some(state))
        } else {
            (constellation(m, phase_offset), None)
        };

        debug!(
            m,
            differential = differential.is_some(),
            phase_offset,
            mapping = %symbol_mapping,
            "built PSK modulator"
        );

        Ok(Self {
            symbols,
            m,
            mapping,
            table,
            differential,
            finished: false,
        })
    }

    pub fn order(&self) -> usize {
        self.m
    }

    pub fn is_differential(&self) -> bool {
        self.differential.is_some()
    }
}

impl<I: Iterator<Item = usize>> Iterator for PskModulator<I> {
    type Item = ModulationResult<Complex64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if let Some(state) = self.differential.as_mut() {
            if state.reference_pending {
                state.reference_pending = false;
                return Some(Ok(state.last_point));
            }
        }

        let Some(symbol) = self.symbols.next() else {
            self.finished = true;
            return None;
        };
        if let Err(err) = check_symbol(symbol, self.m) {
            self.finished = true;
            return Some(Err(err));
        }

        let entry = self.table[self.mapping[symbol]];
        match self.differential.as_mut() {
            Some(state) => {
                state.last_point *= entry;
                Some(Ok(state.last_point))
            }
            None => Some(Ok(entry)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        let extra = match self.differential {
            Some(state) if state.reference_pending => 1,
            _ => 0,
        };
        let (lower, upper) = self.symbols.size_hint();
        (
            lower.saturating_add(extra),
            upper.and_then(|n| n.checked_add(extra)),
        )
    }
}

impl<I: Iterator<Item = usize>> FusedIterator for PskModulator<I> {}

/// `points[k] = exp(i*(2*pi*k/m + phase_offset))`
pub fn constellation(m: usize, phase_offset: f64) -> Vec<Complex64> {
    (0..m)
        .map(|k| unit_phasor(2.0 * PI * k as f64 / m as f64 + phase_offset))
        .collect()
}

fn unit_phasor(angle: f64) -> Complex64 {
    Complex64::from_polar(1.0, angle)
}

/// Modulate symbols in `[0, m-1]` onto an m-ary PSK constellation.
///
/// `symbol_mapping` is checked before any symbol is pulled.
pub fn mpsk_mod<S>(
    symbols: S,
    m: usize,
    differential: bool,
    phase_offset: f64,
    symbol_mapping: &SymbolMapping,
) -> ModulationResult<PskModulator<S::IntoIter>>
where
    S: IntoIterator<Item = usize>,
{
    PskModulator::new(
        symbols.into_iter(),
        m,
        differential,
        phase_offset,
        symbol_mapping,
    )
}

/// Equivalent to [`mpsk_mod`] with `m = 2`
pub fn bpsk_mod<S>(
    symbols: S,
    differential: bool,
    phase_offset: f64,
    symbol_mapping: &SymbolMapping,
) -> ModulationResult<PskModulator<S::IntoIter>>
where
    S: IntoIterator<Item = usize>,
{
    mpsk_mod(symbols, 2, differential, phase_offset, symbol_mapping)
}

/// Equivalent to [`mpsk_mod`] with `m = 4`
pub fn qpsk_mod<S>(
    symbols: S,
    differential: bool,
    phase_offset: f64,
    symbol_mapping: &SymbolMapping,
) -> ModulationResult<PskModulator<S::IntoIter>>
where
    S: IntoIterator<Item = usize>,
{
    mpsk_mod(symbols, 4, differential, phase_offset, symbol_mapping)
}

/// Equivalent to [`mpsk_mod`] with `differential = true`
pub fn dpsk_mod<S>(
    symbols: S,
    m: usize,
    phase_offset: f64,
    symbol_mapping: &SymbolMapping,
) -> ModulationResult<PskModulator<S::IntoIter>>
where
    S: IntoIterator<Item = usize>,
{
    mpsk_mod(symbols, m, true, phase_offset, symbol_mapping)
}

/// Order-variant PSK. Always fails.
pub fn opsk_mod<S>(
    _symbols: S,
    _m: usize,
    _phase_offset: f64,
    _symbol_mapping: &SymbolMapping,
) -> ModulationResult<PskModulator<S::IntoIter>>
where
    S: IntoIterator<Item = usize>,
{
    Err(ModulationError::NotImplemented("opsk_mod"))
}
