use std::process::Command;

use masquerade_core::config::GameConfig;

fn masquerade() -> Command {
    Command::new(env!("CARGO_BIN_EXE_masquerade"))
}

#[test]
fn demo_session_runs_to_completion() {
    let demo = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos/corridor.toml");
    let output = masquerade()
        .args(["--config", demo, "--ticks", "600"])
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to launch masquerade");

    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("outcome: "), "{stdout}");
}

#[test]
fn printed_configuration_round_trips() {
    let output = masquerade()
        .args(["--print-config", "--seed", "99"])
        .output()
        .expect("failed to launch masquerade");

    assert!(output.status.success(), "{output:?}");
    let printed: GameConfig =
        toml::from_str(&String::from_utf8_lossy(&output.stdout)).expect("valid toml");
    let mut expected = GameConfig::default();
    expected.session.seed = 99;
    assert_eq!(printed, expected);
}

#[test]
fn missing_config_file_is_reported() {
    let output = masquerade()
        .args(["--config", "does/not/exist.toml"])
        .output()
        .expect("failed to launch masquerade");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read config"));
}
