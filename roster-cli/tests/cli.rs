//! Exercises the binary end-to-end over real CSV files, the one place in the
//! workspace the CSV-adapter boundary actually gets driven through `std::fs`.

use std::fs;
use std::io::Write;
use std::process::Command;

fn write_csv(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn solves_a_minimal_roster_from_csv() {
    let dir = tempfile::tempdir().unwrap();
    let skills = write_csv(&dir, "skills.csv", "mechanic_id,aw139_af,aw139_r,aw139_av\n1,1,1,1\n2,1,1,1\n");
    let schedule = write_csv(&dir, "schedule.csv", "base_id,period,shift,aw139\n1,1,1,1\n");
    let cost = write_csv(&dir, "cost.csv", "id,A\n1,10\n2,20\n");

    let output = Command::new(env!("CARGO_BIN_EXE_roster-cli"))
        .arg("--skills")
        .arg(&skills)
        .arg("--schedule")
        .arg(&schedule)
        .arg("--cost")
        .arg(&cost)
        .output()
        .expect("failed to run roster-cli");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let solution: serde_json::Value = serde_json::from_str(&stdout).expect("stdout should be JSON");
    assert_eq!(solution["solve_status"], "Optimal");
    assert_eq!(solution["assignments"].as_array().unwrap().len(), 1);
    assert_eq!(solution["movement_cost"], 10.0);
}

#[test]
fn missing_required_column_exits_with_schema_error_code() {
    let dir = tempfile::tempdir().unwrap();
    let skills = write_csv(&dir, "skills.csv", "aw139_af\n1\n"); // missing mechanic_id
    let schedule = write_csv(&dir, "schedule.csv", "base_id,period,shift,aw139\n1,1,1,1\n");
    let cost = write_csv(&dir, "cost.csv", "id,A\n1,10\n");

    let status = Command::new(env!("CARGO_BIN_EXE_roster-cli"))
        .arg("--skills")
        .arg(&skills)
        .arg("--schedule")
        .arg(&schedule)
        .arg("--cost")
        .arg(&cost)
        .status()
        .expect("failed to run roster-cli");

    assert_eq!(status.code(), Some(2));
}
