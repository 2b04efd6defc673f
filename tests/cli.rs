use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn skicl(args: &[&Path], stdin: &str, home: &Path) -> Output {
    run(Command::new(env!("CARGO_BIN_EXE_skicl")).args(args), stdin, home)
}

fn run(command: &mut Command, stdin: &str, home: &Path) -> Output {
    let mut child = command
        .env("HOME", home)
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
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).to_string()
}

#[test]
fn interactive_session() {
    let home = tempfile::tempdir().unwrap();
    let out = skicl(
        &[],
        "puts [+ 1 [* 2 3]]\nset x 5\n$y\nproc add {a b} {+ $a $b}\nadd $x 3\n",
        home.path(),
    );
    assert!(out.status.success());

    let stdout = text(&out.stdout);
    assert!(stdout.starts_with("[skicl, ver "), "missing banner: {stdout}");
    assert!(stdout.contains("a tiny tcl dialect"));
    assert!(stdout.contains("7\n"));
    assert!(stdout.contains(">> 5\n"));
    assert!(stdout.contains(">> add\n"));
    assert!(stdout.contains(">> 8\n"));

    let stderr = text(&out.stderr);
    assert_eq!(stderr, "error: undeclared identifier y\n");
}

#[test]
fn batch_files_share_namespace() {
    let dir = tempfile::tempdir().unwrap();
    let lib = dir.path().join("lib.tcl");
    let main = dir.path().join("main.tcl");
    std::fs::write(&lib, "proc greet {who} {puts $who}\nset n 2\n").unwrap();
    std::fs::write(&main, "# uses lib.tcl\ngreet world\nputs [* $n 21]\n").unwrap();

    let out = skicl(&[&lib, &main], "", dir.path());
    assert!(out.status.success(), "stderr: {}", text(&out.stderr));
    assert_eq!(text(&out.stdout), "world\n42\n");
}

#[test]
fn batch_error_stops() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.tcl");
    let never = dir.path().join("never.tcl");
    std::fs::write(&bad, "puts before\nputs [+ 1 2\n").unwrap();
    std::fs::write(&never, "puts never\n").unwrap();

    let out = skicl(&[&bad, &never], "", dir.path());
    assert!(!out.status.success());
    assert_eq!(text(&out.stdout), "before\n");
    assert!(text(&out.stderr).starts_with("error: invalid syntax in "));
}

#[test]
fn batch_missing_file_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.tcl");
    let present = dir.path().join("present.tcl");
    std::fs::write(&present, "puts here\n").unwrap();

    let out = skicl(&[&missing, &present], "", dir.path());
    assert!(out.status.success());
    assert_eq!(text(&out.stdout), "here\n");
}

#[test]
fn load_from_home_library() {
    let home = tempfile::tempdir().unwrap();
    let library = home.path().join(".skicl");
    std::fs::create_dir(&library).unwrap();
    std::fs::write(
        library.join("skicl-cli-test-math.tcl"),
        "proc sq {x} {* $x $x}\n",
    )
    .unwrap();

    let out = skicl(
        &[],
        "load skicl-cli-test-math.tcl\nsq 12\n",
        home.path(),
    );
    assert!(out.status.success());
    assert!(text(&out.stdout).contains(">> 144\n"));
    assert_eq!(text(&out.stderr), "");
}

#[test]
fn load_relative_to_working_directory() {
    let home = tempfile::tempdir().unwrap();
    let work = tempfile::tempdir().unwrap();
    std::fs::write(work.path().join("rel.tcl"), "set r 7\n").unwrap();
    // Same name in the library; the working directory wins.
    let library = home.path().join(".skicl");
    std::fs::create_dir(&library).unwrap();
    std::fs::write(library.join("rel.tcl"), "set r 0\n").unwrap();

    let out = run(
        Command::new(env!("CARGO_BIN_EXE_skicl")).current_dir(work.path()),
        "load rel.tcl\n+ $r 0\n",
        home.path(),
    );
    assert!(out.status.success());
    let stdout = text(&out.stdout);
    assert!(stdout.contains(">> 7\n>> 7\n"), "unexpected output: {stdout}");
    assert_eq!(text(&out.stderr), "");
}
