use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn write_records(dir: &Path) -> std::path::PathBuf {
    let file = dir.join("tree.json");
    std::fs::write(
        &file,
        r#"[
            {"dir": "", "label": "src"},
            {"dir": "/src", "label": "main.rs"},
            {"dir": "/src", "label": "lib.rs"},
            {"dir": "", "label": "Cargo.toml"}
        ]"#,
    )
    .unwrap();
    file
}

fn treenav(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_treenav"))
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env_remove("TREENAV_LOG")
        .env_remove("TREENAV_INDENT")
        .env_remove("TREENAV_UNICODE")
        .output()
        .unwrap()
}

#[test]
fn test_print_collapsed_tree() {
    let dir = tempdir().unwrap();
    let file = write_records(dir.path());

    let output = treenav(
        dir.path(),
        &[
            "print",
            file.to_str().unwrap(),
            "--path-key",
            "dir",
            "--name-key",
            "label",
            "--ascii",
        ],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "      [ ] Cargo.toml\n  [>] [ ] src\n");
}

#[test]
fn test_print_selected_node_expands_ancestors() {
    let dir = tempdir().unwrap();
    let file = write_records(dir.path());

    let output = treenav(
        dir.path(),
        &[
            "print",
            file.to_str().unwrap(),
            "--path-key",
            "dir",
            "--name-key",
            "label",
            "--select",
            "/src/main.rs",
            "--ascii",
        ],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "      [ ] Cargo.toml",
            "  [v] [ ] src",
            "        [ ] lib.rs",
            "        [x] main.rs",
        ]
    );
}

#[test]
fn test_print_json_snapshot() {
    let dir = tempdir().unwrap();
    let file = write_records(dir.path());

    let output = treenav(
        dir.path(),
        &[
            "print",
            file.to_str().unwrap(),
            "--path-key",
            "dir",
            "--name-key",
            "label",
            "--expand-all",
            "--json",
        ],
    );

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = json["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["/", "/Cargo.toml", "/src", "/src/lib.rs", "/src/main.rs"]);
    assert_eq!(json["state"]["expanded"], serde_json::json!(["/src"]));
    assert_eq!(json["nodes"][0]["data"], serde_json::Value::Null);
}

#[test]
fn test_print_honours_project_config() {
    let dir = tempdir().unwrap();
    let file = write_records(dir.path());
    std::fs::write(dir.path().join(".treenav.toml"), "[display]\nindent = 4\nfoo = 1\n").unwrap();

    let output = treenav(
        dir.path(),
        &[
            "print",
            file.to_str().unwrap(),
            "--path-key",
            "dir",
            "--name-key",
            "label",
            "--expand-all",
            "--ascii",
        ],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\n          [ ] lib.rs\n"), "got:\n{stdout}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown config key 'foo'"), "got:\n{stderr}");
}

#[test]
fn test_print_rejects_non_array() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("bad.json");
    std::fs::write(&file, r#"{"not": "an array"}"#).unwrap();

    let output = treenav(dir.path(), &["print", file.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("must hold a JSON array of records"), "got:\n{stderr}");
}

#[test]
fn test_browse_requires_terminal() {
    let dir = tempdir().unwrap();

    let output = treenav(dir.path(), &["browse", "."]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("interactive terminal"), "got:\n{stderr}");
}
