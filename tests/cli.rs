use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const OUTPUT: &str = "collected_code.txt";

fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Runs the binary in `cwd` with `HOME` pointed at `home` so no real presets leak in.
fn run_collect(cwd: &Path, home: &Path, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_collect-code");
    Command::new(bin)
        .current_dir(cwd)
        .env("HOME", home)
        .env("RUST_LOG", "info")
        .args(args)
        .output()
        .unwrap()
}

fn assert_success(out: &Output) {
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
}

#[test]
fn excluded_build_dir_is_not_collected() {
    let work = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_file(work.path(), "project/src/main.py", "print(1)");
    write_file(work.path(), "project/src/build/gen.py", "x=1");

    let out = run_collect(work.path(), home.path(), &["project", "--exclude", "build"]);
    assert_success(&out);

    let collected = fs::read_to_string(work.path().join(OUTPUT)).unwrap();
    assert_eq!(collected, "[project/src/main.py]\nprint(1)\n\n");
}

#[test]
fn all_files_still_honours_excluded_languages() {
    let work = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_file(work.path(), "folder/a.py", "py");
    write_file(work.path(), "folder/a.txt", "txt");

    let out = run_collect(
        work.path(),
        home.path(),
        &["folder", "--all-files", "--exclude-langs=py"],
    );
    assert_success(&out);

    let collected = fs::read_to_string(work.path().join(OUTPUT)).unwrap();
    assert_eq!(collected, "[folder/a.txt]\ntxt\n\n");
}

#[test]
fn no_valid_roots_fails_without_output() {
    let work = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();

    let out = run_collect(work.path(), home.path(), &["missing", "also-missing"]);
    assert!(!out.status.success());
    assert!(!work.path().join(OUTPUT).exists());
    assert!(String::from_utf8_lossy(&out.stderr).contains("no valid root folders"));
}

#[test]
fn invalid_root_is_skipped_when_others_are_valid() {
    let work = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_file(work.path(), "good/lib.c", "int x;");

    let out = run_collect(work.path(), home.path(), &["missing", "good"]);
    assert_success(&out);
    assert!(String::from_utf8_lossy(&out.stderr).contains("does not exist"));

    let collected = fs::read_to_string(work.path().join(OUTPUT)).unwrap();
    assert_eq!(collected, "[good/lib.c]\nint x;\n\n");
}

#[test]
fn repeated_runs_produce_identical_output() {
    let work = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_file(work.path(), "repo/b/z.py", "z");
    write_file(work.path(), "repo/a.java", "class A {}");
    write_file(work.path(), "repo/b/y.h", "#pragma once");
    write_file(work.path(), "repo/c.cpp", "int main() {}");

    assert_success(&run_collect(work.path(), home.path(), &["repo"]));
    let first = fs::read(work.path().join(OUTPUT)).unwrap();
    assert_success(&run_collect(work.path(), home.path(), &["repo"]));
    let second = fs::read(work.path().join(OUTPUT)).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        String::from_utf8(first).unwrap(),
        "[repo/a.java]\nclass A {}\n\n\
         [repo/b/y.h]\n#pragma once\n\n\
         [repo/b/z.py]\nz\n\n\
         [repo/c.cpp]\nint main() {}\n\n"
    );
}

#[test]
fn output_file_is_never_collected() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let proj = work.path().join("proj");
    write_file(&proj, "a.txt", "hello");

    assert_success(&run_collect(&proj, home.path(), &[".", "--all-files"]));
    assert_success(&run_collect(&proj, home.path(), &[".", "--all-files"]));

    let collected = fs::read_to_string(proj.join(OUTPUT)).unwrap();
    assert_eq!(collected, "[proj/a.txt]\nhello\n\n");
}

#[test]
fn preset_from_home_config_is_applied() {
    let work = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_file(
        home.path(),
        ".config/collect_code/presets.toml",
        "[docs]\nall_files = true\nexclude_langs = [\"txt\"]\n",
    );
    write_file(work.path(), "src/readme.md", "# hi");
    write_file(work.path(), "src/notes.txt", "skip");

    let out = run_collect(work.path(), home.path(), &["src", "--preset", "docs"]);
    assert_success(&out);

    let collected = fs::read_to_string(work.path().join(OUTPUT)).unwrap();
    assert_eq!(collected, "[src/readme.md]\n# hi\n\n");
}

#[test]
fn requires_a_folder_argument() {
    let work = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();

    let out = run_collect(work.path(), home.path(), &[]);
    assert!(!out.status.success());
    assert!(!work.path().join(OUTPUT).exists());
}
