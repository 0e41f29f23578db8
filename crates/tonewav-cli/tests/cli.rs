//! Integration tests for the `tonewav` binary.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p tonewav-cli --test cli
//! ```

use std::fs;
use std::process::Command;

use tempfile::tempdir;

fn tonewav() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tonewav"))
}

#[test]
fn test_generate_reference_tone() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("waveform.wav");

    let output = tonewav()
        .args([
            "generate",
            "--frequency",
            "440",
            "--amplitude",
            "0.5",
            "--duration-seconds",
            "2",
            "--sample-rate",
            "44100",
            "--bit-depth",
            "16",
            "--output",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute tonewav");

    assert!(output.status.success());
    assert!(output.stdout.is_empty(), "success should be silent");
    assert!(output.stderr.is_empty(), "success should be silent");

    let bytes = fs::read(&out).unwrap();
    assert_eq!(bytes.len(), 176444);
    assert_eq!(u32::from_le_bytes(bytes[4..8].try_into().unwrap()), 176436);
    assert_eq!(u32::from_le_bytes(bytes[40..44].try_into().unwrap()), 176400);
}

#[test]
fn test_generate_to_stdout() {
    let output = tonewav()
        .args(["generate", "--duration-seconds", "0.1", "--output", "-"])
        .output()
        .expect("Failed to execute tonewav");

    assert!(output.status.success());
    assert_eq!(output.stdout.len(), 44 + 4410 * 2);
    assert_eq!(&output.stdout[0..4], b"RIFF");
}

#[test]
fn test_generate_json_report() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("tone.wav");

    let output = tonewav()
        .args([
            "generate",
            "--duration-seconds",
            "0.5",
            "--output",
            out.to_str().unwrap(),
            "--json",
        ])
        .output()
        .expect("Failed to execute tonewav");

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["success"], true);
    assert_eq!(report["result"]["summary"]["num_samples"], 22050);
    assert_eq!(report["result"]["summary"]["file_bytes"], 44 + 44100);
    assert_eq!(report["result"]["config"]["sample_rate"], 44100);
    assert_eq!(report["result"]["pcm_hash"].as_str().unwrap().len(), 64);
}

#[test]
fn test_generate_from_config_file() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("from_config.wav");
    let config_path = tmp.path().join("tone.json");
    let config = serde_json::json!({
        "frequency": 1000.0,
        "durationSeconds": 0.25,
        "sampleRate": 8000,
        "outputPath": out,
    });
    fs::write(&config_path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

    let output = tonewav()
        .args(["generate", "--config", config_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute tonewav");

    assert!(output.status.success());
    assert_eq!(fs::metadata(&out).unwrap().len(), 44 + 2000 * 2);
}

#[test]
fn test_generate_rejects_bad_bit_depth() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("tone.wav");

    let output = tonewav()
        .args(["generate", "--bit-depth", "12", "--output", out.to_str().unwrap()])
        .output()
        .expect("Failed to execute tonewav");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bit_depth"), "stderr: {}", stderr);
    assert!(!out.exists());
}

#[test]
fn test_generate_unwritable_path_names_open_phase() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("missing").join("tone.wav");

    let output = tonewav()
        .args(["generate", "--output", out.to_str().unwrap()])
        .output()
        .expect("Failed to execute tonewav");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("open"), "stderr: {}", stderr);
}

#[test]
fn test_generate_warns_above_nyquist() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("alias.wav");

    let output = tonewav()
        .args([
            "generate",
            "--frequency",
            "30000",
            "--duration-seconds",
            "0.01",
            "--output",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute tonewav");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Nyquist"), "stderr: {}", stderr);
}

#[test]
fn test_inspect_generated_file() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("tone.wav");

    let status = tonewav()
        .args(["generate", "--duration-seconds", "0", "--output", out.to_str().unwrap()])
        .status()
        .expect("Failed to execute tonewav");
    assert!(status.success());

    let output = tonewav()
        .args(["inspect", "--input", out.to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute tonewav");

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["success"], true);
    assert_eq!(report["file_bytes"], 44);
    assert_eq!(report["header"]["data_size"], 0);
    assert_eq!(report["header"]["riff_size"], 36);
}
