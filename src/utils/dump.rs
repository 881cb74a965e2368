use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::consts::WAV_SAMPLE_RATE;

/// Modulated samples split into I and Q rails
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IqDump {
    pub scheme: String,
    pub samples_per_symbol: usize,
    pub i: Vec<f64>,
    pub q: Vec<f64>,
}

impl IqDump {
    pub fn new(scheme: &str, samples_per_symbol: usize, samples: &[Complex64]) -> Self {
        Self {
            scheme: scheme.to_string(),
            samples_per_symbol,
            i: samples.iter().map(|s| s.re).collect(),
            q: samples.iter().map(|s| s.im).collect(),
        }
    }

    pub fn samples(&self) -> Vec<Complex64> {
        self.i
            .iter()
            .zip(self.q.iter())
            .map(|(&re, &im)| Complex64::new(re, im))
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Write samples as a stereo 32-bit float WAV, I on the left channel and Q on the right
pub fn write_iq_wav(path: impl AsRef<Path>, samples: &[Complex64]) -> hound::Result<()> {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: WAV_SAMPLE_RATE,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for sample in samples {
        writer.write_sample(sample.re as f32)?;
        writer.write_sample(sample.im as f32)?;
    }
    writer.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iq_split() {
        let samples = vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, -1.0)];
        let dump = IqDump::new("psk", 1, &samples);
        assert_eq!(dump.i, vec![1.0, 0.0]);
        assert_eq!(dump.q, vec![0.0, -1.0]);
        assert_eq!(dump.samples(), samples);

        let parsed: IqDump = serde_json::from_str(&dump.to_json().unwrap()).unwrap();
        assert_eq!(parsed, dump);
    }

    #[test]
    fn test_wav_has_two_channels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iq.wav");
        let samples = vec![Complex64::new(0.5, -0.5); 16];
        write_iq_wav(&path, &samples).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().channels, 2);
        assert_eq!(reader.len(), 32);
    }
}
