//! FSK (Frequency Shift Keying) modulation
//!
//! Tones are fractions of the sample rate, symmetric about zero.

use num_complex::Complex64;
use std::f64::consts::PI;
use std::iter::FusedIterator;
use tracing::debug;

use super::check_symbol;
use super::mapping::SymbolMapping;
use crate::error::{ModulationError, ModulationResult};

/// Oscillator model for one modulation call
#[derive(Clone, Copy, Debug)]
enum Oscillator {
    /// One steered oscillator: phase is integrated across symbols
    Continuous { phase: f64 },
    /// One free-running oscillator per tone, sampled at absolute time `t`
    Switched { t: u64 },
}

impl Oscillator {
    fn sample(&mut self, freq: f64) -> Complex64 {
        match self {
            Oscillator::Continuous { phase } => {
                *phase += 2.0 * PI * freq;
                // keep in [-pi, pi)
                *phase = (*phase + PI).rem_euclid(2.0 * PI) - PI;
                Complex64::from_polar(1.0, *phase)
            }
            Oscillator::Switched { t } => {
                let sample = Complex64::from_polar(1.0, 2.0 * PI * freq * *t as f64);
                *t += 1;
                sample
            }
        }
    }
}

/// Lazy M-FSK sample stream, `samples_per_symbol` samples per input symbol.
///
/// A symbol outside `[0, m-1]` yields a single `Err` once the samples of
/// the previous symbols are out, then the stream ends.
pub struct FskModulator<I> {
    symbols: I,
    m: usize,
    mapping: Vec<usize>,
    tones: Vec<f64>,
    samples_per_symbol: usize,
    oscillator: Oscillator,
    current_freq: f64,
    remaining: usize,
    finished: bool,
}

impl<I: Iterator<Item = usize>> FskModulator<I> {
    pub fn new(
        symbols: I,
        m: usize,
        h: f64,
        samples_per_symbol: usize,
        continuous_phase: bool,
        symbol_mapping: &SymbolMapping,
    ) -> ModulationResult<Self> {
        if m < 2 {
            return Err(ModulationError::invalid_parameter("m", m));
        }
        check_tone_parameters(h, samples_per_symbol, "samples_per_symbol")?;
        let mapping = symbol_mapping.resolve(m)?;
        let tones = fsk_tones(m, h, samples_per_symbol);

        debug!(
            m,
            h,
            samples_per_symbol,
            continuous_phase,
            mapping = %symbol_mapping,
            "built FSK modulator"
        );

        let oscillator = if continuous_phase {
            Oscillator::Continuous { phase: 0.0 }
        } else {
            Oscillator::Switched { t: 0 }
        };

        Ok(Self {
            symbols,
            m,
            mapping,
            tones,
            samples_per_symbol,
            oscillator,
            current_freq: 0.0,
            remaining: 0,
            finished: false,
        })
    }

    /// Tone table, most negative first
    pub fn tones(&self) -> &[f64] {
        &self.tones
    }

    pub fn samples_per_symbol(&self) -> usize {
        self.samples_per_symbol
    }
}

impl<I: Iterator<Item = usize>> Iterator for FskModulator<I> {
    type Item = ModulationResult<Complex64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if self.remaining == 0 {
            let Some(symbol) = self.symbols.next() else {
                self.finished = true;
                return None;
            };
            if let Err(err) = check_symbol(symbol, self.m) {
                self.finished = true;
                return Some(Err(err));
            }
            self.current_freq = self.tones[self.mapping[symbol]];
            self.remaining = self.samples_per_symbol;
        }

        self.remaining -= 1;
        Some(Ok(self.oscillator.sample(self.current_freq)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        let (lower, upper) = self.symbols.size_hint();
        let sps = self.samples_per_symbol;
        (
            lower.saturating_mul(sps).saturating_add(self.remaining),
            upper
                .and_then(|n| n.checked_mul(sps))
                .and_then(|n| n.checked_add(self.remaining)),
        )
    }
}

impl<I: Iterator<Item = usize>> FusedIterator for FskModulator<I> {}

fn check_tone_parameters(
    h: f64,
    samples_per_symbol: usize,
    rate_name: &'static str,
) -> ModulationResult<()> {
    if !h.is_finite() {
        return Err(ModulationError::invalid_parameter("h", h));
    }
    if samples_per_symbol == 0 {
        return Err(ModulationError::invalid_parameter(rate_name, samples_per_symbol));
    }
    Ok(())
}

/// Tone frequencies `k*h/samples_per_symbol`, shifted so the table is
/// centred on zero.
pub fn fsk_tones(m: usize, h: f64, samples_per_symbol: usize) -> Vec<f64> {
    let mut freqs: Vec<f64> = (0..m)
        .map(|k| k as f64 * h / samples_per_symbol as f64)
        .collect();
    if let (Some(&first), Some(&last)) = (freqs.first(), freqs.last()) {
        let shift = (last - first) / 2.0;
        for freq in freqs.iter_mut() {
            *freq -= shift;
        }
    }
    freqs
}

/// Modulate symbols in `[0, m-1]` onto `m` FSK tones.
///
/// With `continuous_phase` the phase carries across symbol boundaries;
/// otherwise each sample is taken from the tone's own free-running
/// oscillator at absolute sample time, which may jump at a transition.
pub fn fsk_mod<S>(
    symbols: S,
    m: usize,
    h: f64,
    samples_per_symbol: usize,
    continuous_phase: bool,
    symbol_mapping: &SymbolMapping,
) -> ModulationResult<FskModulator<S::IntoIter>>
where
    S: IntoIterator<Item = usize>,
{
    FskModulator::new(
        symbols.into_iter(),
        m,
        h,
        samples_per_symbol,
        continuous_phase,
        symbol_mapping,
    )
}

/// Bulk binary FSK with switched oscillators.
///
/// A bit `<= 0` selects the low tone and `> 0` the high tone. Produces the
/// same samples as [`fsk_mod`] with `m = 2`, the binary mapping and
/// `continuous_phase = false`.
pub fn discontinuous_bfsk_modulate<B>(
    bits: &[B],
    h: f64,
    samples_per_bit: usize,
) -> ModulationResult<Vec<Complex64>>
where
    B: Copy + Into<f64>,
{
    check_tone_parameters(h, samples_per_bit, "samples_per_bit")?;

    let fh = (h / 2.0) / samples_per_bit as f64;
    let fl = -(h / 2.0) / samples_per_bit as f64;
    let len = bits.len() * samples_per_bit;

    let carrier = |freq: f64| -> Vec<Complex64> {
        (0..len)
            .map(|t| Complex64::from_polar(1.0, 2.0 * PI * freq * t as f64))
            .collect()
    };
    let sh = carrier(fh);
    let sl = carrier(fl);

    let mask: Vec<f64> = bits
        .iter()
        .flat_map(|&bit| {
            let level = if bit.into() > 0.0 { 1.0 } else { 0.0 };
            std::iter::repeat_n(level, samples_per_bit)
        })
        .collect();

    Ok(sh
        .iter()
        .zip(sl.iter())
        .zip(mask.iter())
        .map(|((&high, &low), &level)| high * level + low * (1.0 - level))
        .collect())
}
