#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! End-to-end tests running the questkit binary

use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use test_utils::{BigFixture, SAMPLE_QST, write_temp_text};

fn questkit(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_questkit"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("QUESTKIT_LOG")
        .output()
        .expect("failed to run questkit")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}

#[test]
fn big_extract_writes_payload() {
    let fixture = BigFixture::new()
        .bank("GBANK_MAIN_PC", 1)
        .entry("MESH_HERO", b"mesh payload")
        .entry("TX_HERO", b"tx");
    let (dir, archive) = fixture.write_temp();
    let target = dir.path().join("out/mesh.bin");

    let output = questkit(&[
        "big",
        "extract",
        path_arg(&archive),
        "mesh_hero",
        "--output",
        path_arg(&target),
    ]);

    assert!(output.status.success(), "{output:?}");
    assert_eq!(fs::read(&target).unwrap(), b"mesh payload");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("MESH_HERO: 12 bytes"));
}

#[test]
fn big_list_prints_one_line_per_entry() {
    let fixture = BigFixture::new()
        .bank("A", 1)
        .entry("ONE", b"1")
        .entry("TWO", b"2")
        .bank("B", 2)
        .entry("THREE", b"3");
    let (_dir, archive) = fixture.write_temp();

    let output = questkit(&["big", "list", path_arg(&archive)]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let symbols: Vec<&str> = stdout
        .lines()
        .map(|line| line.split('\t').nth(1).unwrap())
        .collect();
    assert_eq!(symbols, ["ONE", "TWO", "THREE"]);
}

#[test]
fn big_info_rejects_bad_magic() {
    let (_dir, archive) = BigFixture::new().magic(*b"NOPE").write_temp();

    let output = questkit(&["big", "info", path_arg(&archive)]);
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Invalid BIG magic"), "{stderr}");
}

#[test]
fn qst_add_updates_file_in_place() {
    let (_dir, path) = write_temp_text("quests.qst", SAMPLE_QST);

    let output = questkit(&["qst", "add", path_arg(&path), "Q7_Finale"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "added Q7_Finale\n");

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.ends_with("AddQuest(\"Q7_Finale\", \t\t\tTRUE);\r\n"));
    assert!(text.contains("AddQuest(\"Q3_Secret\", \t\t\tSOME_FLAG);\r\n"));
}
