use std::path::Path;
use std::process::Command;

use anyhow::Result;

#[test]
fn test_cli_outputs_one_fee_per_record_in_input_order() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_commission-engine");
    let sample_path = Path::new("samples").join("sample.csv");

    let output = Command::new(binary_path)
        .arg(sample_path)
        .output()?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let fees: Vec<&str> = stdout.lines().collect();

    assert_eq!(fees, vec!["0.00", "0.30", "1.50", "3.00", "0.00", "0.60"]);

    Ok(())
}

#[test]
fn test_cli_without_arguments_prints_usage_and_fails() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_commission-engine");

    let output = Command::new(binary_path).output()?;

    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Usage:"));

    Ok(())
}

#[test]
fn test_cli_with_missing_file_fails() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_commission-engine");

    let output = Command::new(binary_path)
        .arg("does_not_exist.csv")
        .output()?;

    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("File not found"));

    Ok(())
}
