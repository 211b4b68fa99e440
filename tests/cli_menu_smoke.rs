use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn run_roster(data_dir: &Path, script: &str) -> Output {
    let exe = env!("CARGO_BIN_EXE_roster");
    let mut child = Command::new(exe)
        .arg("--data-dir")
        .arg(data_dir)
        .env_remove("RUST_LOG")
        .env_remove("ROSTER_REPORT_DIR")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn roster");
    {
        let mut stdin = child.stdin.take().expect("child stdin");
        stdin.write_all(script.as_bytes()).expect("write script");
    }
    let out = child.wait_with_output().expect("wait for roster");
    assert!(out.status.success(), "roster exited with {:?}", out.status);
    out
}

#[test]
fn menu_session_persists_students_and_grades() {
    let workspace = temp_dir("roster-cli-session");
    let data_dir = workspace.join("data");

    let script = concat!(
        "1\nS1\nAna Putri\n10A\ny\nMath\n95\ny\nPhysics\n85\nn\n",
        "1\nS2\nBudi\n10A\nn\n",
        "6\nS2\nMath\n150\n60\nn\n",
        "7\n",
        "11\n",
    );
    let out = run_roster(&data_dir, script);
    let stdout = String::from_utf8_lossy(&out.stdout);

    assert!(stdout.contains("Welcome to the Student Grade Roster!"));
    assert!(stdout.contains("Score must be a number between 0 and 100."));
    let rank1 = stdout.find("Rank 1\nID: S1").expect("S1 ranked first");
    let rank2 = stdout.find("Rank 2\nID: S2").expect("S2 ranked second");
    assert!(rank1 < rank2);

    let raw = std::fs::read_to_string(data_dir.join("students.json")).expect("snapshot");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("snapshot json");
    let students = value.as_array().expect("array");
    assert_eq!(students.len(), 2);
    assert_eq!(students[0]["name"], "Ana Putri");
    assert_eq!(students[0]["grades"]["Physics"], 85.0);
    assert_eq!(students[1]["grades"]["Math"], 60.0);

    // A second session sees what the first one saved.
    let out = run_roster(&data_dir, "3\nS2\n11\n");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Name: Budi"));
    assert!(stdout.contains("Average: 60"));
    assert!(stdout.contains("Status: Fail"));

    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn corrupt_snapshot_is_reported_and_session_continues() {
    let workspace = temp_dir("roster-cli-corrupt");
    let data_dir = workspace.join("data");
    std::fs::create_dir_all(&data_dir).expect("create data dir");
    std::fs::write(
        data_dir.join("students.json"),
        r#"[{"id": "S1", "name": "", "class": "10A"}]"#,
    )
    .expect("write snapshot");

    let out = run_roster(&data_dir, "2\n11\n");
    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);

    assert!(stdout.contains("Warning: saved students could not be loaded"));
    assert!(stdout.contains("No students recorded yet."));
    assert!(stderr.contains("failed to load students"));

    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn report_export_goes_under_data_dir_by_default() {
    let workspace = temp_dir("roster-cli-report");
    let data_dir = workspace.join("data");

    let out = run_roster(&data_dir, "1\nS1\nAna\n10A\ny\nMath\n80\nn\n10\n11\n");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Report with 1 student(s) exported to"));

    let reports: Vec<PathBuf> = std::fs::read_dir(data_dir.join("reports"))
        .expect("reports dir")
        .map(|e| e.expect("dir entry").path())
        .collect();
    assert_eq!(reports.len(), 1);
    let body = std::fs::read_to_string(&reports[0]).expect("read report");
    assert!(body.contains("Total students: 1"));
    assert!(body.contains("10A: 1 student(s), average 80, highest 80, lowest 80"));
    assert!(body.contains("Status: Pass"));

    let _ = std::fs::remove_dir_all(workspace);
}
