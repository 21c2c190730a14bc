use std::{
    io::Write,
    process::{Command, Output, Stdio},
};

fn run_with_stdin(input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_rod-labyrinth"))
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();

    child.wait_with_output().unwrap()
}

#[test]
fn reports_the_move_count() {
    let output = run_with_stdin("...\n...\n...\n");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Found a solution in 2 moves"), "{}", stdout);
}

#[test]
fn reports_unreachable() {
    let output = run_with_stdin("....\n....\n..##\n..#.\n");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("No solution found"), "{}", stdout);
}

#[test]
fn blocked_start_is_reported_as_invalid() {
    let output = run_with_stdin("..#\n...\n...\n");
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(
        stderr.trim_end(),
        "invalid labyrinth: the three top-left cells must be free"
    );
}

#[test]
fn empty_input_is_reported_as_invalid() {
    let output = run_with_stdin("");
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.starts_with("invalid labyrinth: 0 rows"), "{}", stderr);
}

#[test]
fn stray_spaces_are_rejected() {
    let output = run_with_stdin(" ...\n...\n... \n");
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.starts_with("invalid labyrinth:"), "{}", stderr);
}
