use dmod_rs::{
    ModulationError, ModulationResult, ModulatorConfig, SymbolMapping, bpsk_mod, dpsk_mod,
    fsk_mod, opsk_mod, qam_mod, qpsk_mod,
};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Recover the symbol stream by picking the nearest rotation between adjacent samples
fn differential_decode(samples: &[Complex64], m: usize) -> Vec<usize> {
    samples
        .windows(2)
        .map(|pair| {
            let step = (pair[1] / pair[0]).arg().rem_euclid(2.0 * PI);
            ((step / (2.0 * PI / m as f64)).round() as usize) % m
        })
        .collect()
}

#[test]
fn dpsk_decodes_regardless_of_phase_offset() {
    let symbols = vec![3, 1, 4, 1, 5, 0, 2, 6, 7, 7, 0];
    for phase_offset in [0.0, 1.0, -2.5] {
        let samples: Vec<Complex64> = dpsk_mod(symbols.clone(), 8, phase_offset, &SymbolMapping::Binary)
            .unwrap()
            .collect::<ModulationResult<_>>()
            .unwrap();
        assert_eq!(differential_decode(&samples, 8), symbols);
    }
}

#[test]
fn lazy_psk_over_an_endless_source() {
    let endless = (0..).map(|i: usize| i % 2);
    let samples: Vec<Complex64> = bpsk_mod(endless, false, 0.0, &SymbolMapping::Binary)
        .unwrap()
        .take(6)
        .collect::<ModulationResult<_>>()
        .unwrap();
    assert!((samples[1] - Complex64::new(-1.0, 0.0)).norm() < 1e-10);
    assert_eq!(samples.len(), 6);
}

#[test]
fn range_error_is_terminal() {
    let outputs: Vec<ModulationResult<Complex64>> =
        qpsk_mod([0, 1, 2, 3, 4, 0, 1], false, 0.0, &SymbolMapping::Binary)
            .unwrap()
            .collect();
    assert_eq!(outputs.len(), 5);
    assert!(outputs[..4].iter().all(|o| o.is_ok()));
    assert!(matches!(
        outputs[4],
        Err(ModulationError::SymbolOutOfRange { symbol: 4, m: 4 })
    ));
}

#[test]
fn fsk_output_length_and_magnitude() {
    let samples: Vec<Complex64> = fsk_mod(vec![0, 3, 2, 1], 4, 0.5, 10, false, &SymbolMapping::Binary)
        .unwrap()
        .collect::<ModulationResult<_>>()
        .unwrap();
    assert_eq!(samples.len(), 40);
    assert!(samples.iter().all(|s| (s.norm() - 1.0).abs() < 1e-10));
}

#[test]
fn stubs_always_fail() {
    assert_eq!(
        opsk_mod(vec![0, 1], 4, 0.0, &SymbolMapping::Binary).err(),
        Some(ModulationError::NotImplemented("opsk_mod"))
    );
    assert_eq!(
        qam_mod(vec![0, 1], 16, &SymbolMapping::Binary),
        Err(ModulationError::NotImplemented("qam_mod"))
    );
}

#[test]
fn config_file_drives_modulation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fsk.json");
    std::fs::write(
        &path,
        r#"{"scheme": "fsk", "m": 2, "h": 1.0, "samples_per_symbol": 4, "continuous_phase": false}"#,
    )
    .unwrap();

    let config = ModulatorConfig::load(&path).unwrap();
    let from_config = config.modulate(&[0, 1, 1, 0]).unwrap();

    let bulk = ModulatorConfig::Bfsk {
        h: 1.0,
        samples_per_bit: 4,
    }
    .modulate(&[0, 1, 1, 0])
    .unwrap();

    assert_eq!(from_config.len(), 16);
    for (a, b) in from_config.iter().zip(bulk.iter()) {
        assert!((a - b).norm() < 1e-10);
    }
}
