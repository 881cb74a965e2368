//! PSK and FSK baseband modulators over lazy symbol streams.

pub mod config;
pub mod error;
pub mod modulation;
pub mod utils;

pub use config::{ConfigError, ModulatorConfig};
pub use error::{ModulationError, ModulationResult};
pub use modulation::*;
