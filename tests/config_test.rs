#![allow(clippy::panic, clippy::unwrap_used, clippy::expect_used)]

use huetag::{config_home, EngineConfig};

// HUETAG_HOME is process-global, so everything touching it lives in this
// one test; integration test binaries run their tests in one process.
#[test]
fn load_honors_huetag_home() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("HUETAG_HOME", dir.path());

    assert_eq!(config_home(), dir.path());

    // Absent file: defaults.
    let config = EngineConfig::load().unwrap();
    assert_eq!(config, EngineConfig::default());

    // Present file: parsed and validated.
    std::fs::write(
        dir.path().join("config.toml"),
        "min_luminance = 0.25\nlimit_palette = true\n",
    )
    .unwrap();
    let config = EngineConfig::load().unwrap();
    assert!((config.min_luminance - 0.25).abs() < f64::EPSILON);
    assert!(config.limit_palette);
    assert!((config.max_luminance - 0.75).abs() < f64::EPSILON);

    // Invalid band: load refuses rather than running with a bad band.
    std::fs::write(
        dir.path().join("config.toml"),
        "min_luminance = 0.9\nmax_luminance = 0.1\n",
    )
    .unwrap();
    assert!(EngineConfig::load().is_err());

    std::env::remove_var("HUETAG_HOME");
}
