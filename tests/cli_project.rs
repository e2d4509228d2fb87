use std::fs;
use std::process::Command;

use tempfile::tempdir;

#[test]
fn project_cli_writes_risk_table_and_summary() {
    let tmp = tempdir().expect("temporary directory");
    let out_path = tmp.path().join("risks.tsv");
    let summary_path = tmp.path().join("model.toml");

    let exe = env!("CARGO_BIN_EXE_absrisk");
    let status = Command::new(exe)
        .current_dir(tmp.path())
        .args([
            "project",
            "--prevalence",
            "0.05",
            "--auc",
            "0.65",
            "--z",
            "-2",
            "0",
            "2",
            "--out",
            out_path.to_str().expect("path str"),
            "--summary-out",
            summary_path.to_str().expect("path str"),
        ])
        .status()
        .expect("run absrisk cli");
    assert!(status.success(), "CLI exited with status {status:?}");

    let table = fs::read_to_string(&out_path).expect("read risk table");
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("raw_z\tadjusted_z\tabsolute_risk"));

    let summary = fs::read_to_string(&summary_path).expect("read summary");
    assert!(summary.contains("method_used = \"converted_auc\""));
}

#[test]
fn project_cli_reads_weights_and_score_files() {
    let tmp = tempdir().expect("temporary directory");
    let weights_path = tmp.path().join("weights.tsv");
    let scores_path = tmp.path().join("scores.tsv");
    fs::write(
        &weights_path,
        "VARIANT\tBETA\tAF\nrs123\t0.02\t0.3\nrs456\t0.01\t0.5\nrs789\t0.03\t0.1\n",
    )
    .expect("write weights");
    fs::write(&scores_path, "sample_id\tscore\nA\t-1.0\nB\t1.5\n").expect("write scores");

    let exe = env!("CARGO_BIN_EXE_absrisk");
    let status = Command::new(exe)
        .current_dir(tmp.path())
        .args([
            "project",
            "--prevalence",
            "0.01",
            "--weights",
            weights_path.to_str().expect("path str"),
            "--z-file",
            scores_path.to_str().expect("path str"),
        ])
        .status()
        .expect("run absrisk cli");
    assert!(status.success(), "CLI exited with status {status:?}");

    let table = fs::read_to_string(tmp.path().join("risks.tsv")).expect("read risk table");
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("sample_id\traw_z"));
    assert!(lines[1].starts_with("A\t-1\t"));
    assert!(lines[2].starts_with("B\t1.5\t"));
}

#[test]
fn project_cli_rejects_invalid_prevalence() {
    let tmp = tempdir().expect("temporary directory");
    let exe = env!("CARGO_BIN_EXE_absrisk");
    let output = Command::new(exe)
        .current_dir(tmp.path())
        .args(["project", "--prevalence", "1.0", "--r-squared", "0.1", "--z", "0"])
        .output()
        .expect("run absrisk cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Prevalence"), "unexpected stderr: {stderr}");
    assert!(!tmp.path().join("risks.tsv").exists());
}

#[test]
fn demo_cli_runs() {
    let exe = env!("CARGO_BIN_EXE_absrisk");
    let output = Command::new(exe).arg("demo").output().expect("run absrisk demo");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"method_used\": \"direct_r2\""));
    assert!(stdout.contains("\"method_used\": \"converted_auc\""));
    assert!(stdout.contains("rs789\t0.03\t0.1"));
}

#[test]
fn project_help_states_auc_ceiling() {
    let exe = env!("CARGO_BIN_EXE_absrisk");
    let output = Command::new(exe)
        .args(["project", "--help"])
        .output()
        .expect("run absrisk help");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0.9618"), "help does not mention the AUC ceiling: {stdout}");
}

#[test]
fn project_cli_rejects_auc_above_ceiling() {
    let tmp = tempdir().expect("temporary directory");
    let exe = env!("CARGO_BIN_EXE_absrisk");
    let output = Command::new(exe)
        .current_dir(tmp.path())
        .args(["project", "--prevalence", "0.05", "--auc", "0.97", "--z", "0"])
        .output()
        .expect("run absrisk cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("0.9618"), "unexpected stderr: {stderr}");
}
