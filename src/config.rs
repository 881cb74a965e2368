//! JSON description of a single modulation call

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::ModulationResult;
use crate::modulation::{SymbolMapping, discontinuous_bfsk_modulate, fsk_mod, mpsk_mod};
use crate::utils::consts::*;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Scheme and parameters, tagged by `"scheme"`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "lowercase")]
pub enum ModulatorConfig {
    Psk {
        #[serde(default = "default_order")]
        m: usize,
        #[serde(default)]
        differential: bool,
        #[serde(default = "default_phase_offset")]
        phase_offset: f64,
        #[serde(default)]
        mapping: SymbolMapping,
    },
    Fsk {
        #[serde(default = "default_order")]
        m: usize,
        #[serde(default = "default_modulation_index")]
        h: f64,
        #[serde(default = "default_samples_per_symbol")]
        samples_per_symbol: usize,
        #[serde(default = "default_true")]
        continuous_phase: bool,
        #[serde(default)]
        mapping: SymbolMapping,
    },
    Bfsk {
        #[serde(default = "default_modulation_index")]
        h: f64,
        #[serde(default = "default_samples_per_symbol")]
        samples_per_bit: usize,
    },
}

fn default_order() -> usize {
    DEFAULT_ORDER
}

fn default_phase_offset() -> f64 {
    DEFAULT_PHASE_OFFSET
}

fn default_modulation_index() -> f64 {
    DEFAULT_MODULATION_INDEX
}

fn default_samples_per_symbol() -> usize {
    DEFAULT_SAMPLES_PER_SYMBOL
}

fn default_true() -> bool {
    true
}

impl Default for ModulatorConfig {
    fn default() -> Self {
        ModulatorConfig::Psk {
            m: DEFAULT_ORDER,
            differential: false,
            phase_offset: DEFAULT_PHASE_OFFSET,
            mapping: SymbolMapping::Binary,
        }
    }
}

impl ModulatorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn scheme_name(&self) -> &'static str {
        match self {
            ModulatorConfig::Psk { differential: true, .. } => "dpsk",
            ModulatorConfig::Psk { .. } => "psk",
            ModulatorConfig::Fsk { .. } => "fsk",
            ModulatorConfig::Bfsk { .. } => "bfsk",
        }
    }

    /// Symbol alphabet size the scheme expects
    pub fn order(&self) -> usize {
        match self {
            ModulatorConfig::Psk { m, .. } | ModulatorConfig::Fsk { m, .. } => *m,
            ModulatorConfig::Bfsk { .. } => 2,
        }
    }

    /// Output samples produced per input symbol
    pub fn samples_per_symbol(&self) -> usize {
        match self {
            ModulatorConfig::Psk { .. } => 1,
            ModulatorConfig::Fsk {
                samples_per_symbol, ..
            } => *samples_per_symbol,
            ModulatorConfig::Bfsk {
                samples_per_bit, ..
            } => *samples_per_bit,
        }
    }

    /// Run the configured modulator over `symbols` and collect the output.
    ///
    /// For `bfsk`, a symbol greater than zero selects the high tone.
    pub fn modulate(&self, symbols: &[usize]) -> ModulationResult<Vec<Complex64>> {
        let samples = match self {
            ModulatorConfig::Psk {
                m,
                differential,
                phase_offset,
                mapping,
            } => mpsk_mod(symbols.iter().copied(), *m, *differential, *phase_offset, mapping)?
                .collect::<ModulationResult<Vec<_>>>()?,
            ModulatorConfig::Fsk {
                m,
                h,
                samples_per_symbol,
                continuous_phase,
                mapping,
            } => fsk_mod(
                symbols.iter().copied(),
                *m,
                *h,
                *samples_per_symbol,
                *continuous_phase,
                mapping,
            )?
            .collect::<ModulationResult<Vec<_>>>()?,
            ModulatorConfig::Bfsk { h, samples_per_bit } => {
                let bits: Vec<u8> = symbols.iter().map(|&s| u8::from(s > 0)).collect();
                discontinuous_bfsk_modulate(&bits, *h, *samples_per_bit)?
            }
        };

        info!(
            scheme = self.scheme_name(),
            symbols = symbols.len(),
            samples = samples.len(),
            "modulation complete"
        );
        Ok(samples)
    }
}
