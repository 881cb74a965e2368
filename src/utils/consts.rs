/// 日志级别（可被 RUST_LOG 覆盖）
pub const LOG_LEVEL: &str = "info";

// ============================================================================
// Modulation defaults
// ============================================================================

/// Default constellation size / tone count
pub const DEFAULT_ORDER: usize = 4;

/// Default PSK phase offset (radians)
pub const DEFAULT_PHASE_OFFSET: f64 = 0.0;

/// Default FSK modulation index
pub const DEFAULT_MODULATION_INDEX: f64 = 1.0;

/// Default samples per FSK symbol (or per bit on the binary fast path)
pub const DEFAULT_SAMPLES_PER_SYMBOL: usize = 8;

/// Nominal rate written into WAV headers; tone frequencies are normalized,
/// so this only affects how players label the time axis
pub const WAV_SAMPLE_RATE: u32 = 48000;

/// Seed for `--random` symbol generation
pub const DEFAULT_SEED: u64 = 1;
