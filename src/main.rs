use clap::{Parser, ValueEnum};
use dmod_rs::utils::consts::*;
use dmod_rs::utils::dump::{IqDump, write_iq_wav};
use dmod_rs::utils::logging::init_logging;
use dmod_rs::{ModulationError, ModulatorConfig, SymbolMapping};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scheme {
    Psk,
    Dpsk,
    Fsk,
    Bfsk,
}

/// Map a symbol stream onto PSK/FSK baseband samples
#[derive(Parser, Debug)]
#[command(name = "dmod-rs", version)]
struct Args {
    /// JSON modulator config; overrides the inline scheme flags
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Scheme::Psk)]
    scheme: Scheme,

    /// Constellation size / tone count
    #[arg(long, default_value_t = DEFAULT_ORDER)]
    m: usize,

    /// PSK phase offset in radians
    #[arg(long, default_value_t = DEFAULT_PHASE_OFFSET, allow_negative_numbers = true)]
    phase_offset: f64,

    /// FSK modulation index
    #[arg(long, default_value_t = DEFAULT_MODULATION_INDEX)]
    h: f64,

    #[arg(long, default_value_t = DEFAULT_SAMPLES_PER_SYMBOL)]
    samples_per_symbol: usize,

    /// Switched-oscillator FSK instead of continuous phase
    #[arg(long)]
    discontinuous: bool,

    /// Comma separated mapping table, e.g. 0,1,3,2 (default: binary)
    #[arg(long, value_delimiter = ',')]
    mapping: Option<Vec<usize>>,

    /// Comma separated symbols
    #[arg(long, value_delimiter = ',', conflicts_with = "random")]
    symbols: Option<Vec<usize>>,

    /// Generate this many random symbols in [0, m-1]
    #[arg(long)]
    random: Option<usize>,

    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Write I/Q as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write I/Q as a stereo float WAV
    #[arg(long)]
    wav: Option<PathBuf>,
}

impl Args {
    fn modulator_config(&self) -> Result<ModulatorConfig, Box<dyn std::error::Error>> {
        if let Some(path) = &self.config {
            return Ok(ModulatorConfig::load(path)?);
        }

        let mapping = self
            .mapping
            .clone()
            .map(SymbolMapping::from)
            .unwrap_or_default();

        Ok(match self.scheme {
            Scheme::Psk | Scheme::Dpsk => ModulatorConfig::Psk {
                m: self.m,
                differential: matches!(self.scheme, Scheme::Dpsk),
                phase_offset: self.phase_offset,
                mapping,
            },
            Scheme::Fsk => ModulatorConfig::Fsk {
                m: self.m,
                h: self.h,
                samples_per_symbol: self.samples_per_symbol,
                continuous_phase: !self.discontinuous,
                mapping,
            },
            Scheme::Bfsk => ModulatorConfig::Bfsk {
                h: self.h,
                samples_per_bit: self.samples_per_symbol,
            },
        })
    }

    fn symbols(&self, m: usize) -> Result<Vec<usize>, ModulationError> {
        match (&self.symbols, self.random) {
            (Some(symbols), _) => Ok(symbols.clone()),
            (None, Some(_)) if m < 2 => Err(ModulationError::InvalidParameter {
                name: "m",
                value: m.to_string(),
            }),
            (None, Some(count)) => {
                let mut rng = StdRng::seed_from_u64(self.seed);
                Ok((0..count).map(|_| rng.random_range(0..m)).collect())
            }
            (None, None) => Ok(Vec::new()),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let args = Args::parse();

    let config = args.modulator_config()?;
    let symbols = args.symbols(config.order())?;
    tracing::info!(
        "Modulating {} symbols with {}",
        symbols.len(),
        config.scheme_name()
    );

    let samples = config.modulate(&symbols)?;

    if let Some(path) = &args.json {
        let dump = IqDump::new(config.scheme_name(), config.samples_per_symbol(), &samples);
        std::fs::write(path, dump.to_json()?)?;
        tracing::info!("Wrote {} samples to {}", samples.len(), path.display());
    }
    if let Some(path) = &args.wav {
        write_iq_wav(path, &samples)?;
        tracing::info!("Wrote {} samples to {}", samples.len(), path.display());
    }
    if args.json.is_none() && args.wav.is_none() {
        for sample in &samples {
            println!("{:+.6} {:+.6}", sample.re, sample.im);
        }
    }

    Ok(())
}
