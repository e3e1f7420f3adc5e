//! Config persistence round-trip against an isolated directory.
//!
//! Kept as a single test so the QUIZTIMER_CONFIG_DIR override is never
//! mutated concurrently.

use quiztimer_core::Config;

#[test]
fn config_persists_through_load_set_reload() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("QUIZTIMER_CONFIG_DIR", dir.path());

    // First load writes the defaults to disk.
    let mut cfg = Config::load().unwrap();
    assert_eq!(cfg.quiz.default_duration_secs, 600);
    assert!(dir.path().join("config.toml").exists());

    // set() persists immediately.
    cfg.set("quiz.default_duration_secs", "900").unwrap();
    cfg.set("notifications.bell", "false").unwrap();

    let reloaded = Config::load().unwrap();
    assert_eq!(reloaded.quiz.default_duration_secs, 900);
    assert!(!reloaded.notifications.bell);
    assert_eq!(reloaded.quiz.pause_credits, 2);

    // Unknown keys are rejected and change nothing on disk.
    assert!(cfg.set("quiz.no_such_key", "1").is_err());
    let reloaded = Config::load().unwrap();
    assert_eq!(reloaded.quiz.default_duration_secs, 900);
}
