use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn texarticle(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_texarticle"))
        .current_dir(cwd)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run texarticle")
}

/// A scratch working directory holding `paper1/` with the given sources.
fn workspace(sources: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("paper1")).unwrap();
    for (lang, body) in sources {
        fs::write(dir.path().join("paper1").join(format!("paper1_{lang}.tex")), body).unwrap();
    }
    dir
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn bare_invocation_prints_usage() {
    let dir = tempfile::tempdir().unwrap();
    let out = texarticle(dir.path(), &[]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("Usage"));
}

#[test]
fn missing_key_directory_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let out = texarticle(dir.path(), &["-k", "paper9"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("Folder 'paper9' does not exist or is not a directory"));
    assert!(!dir.path().join("dist").exists());
}

#[test]
fn unsupported_language_is_rejected() {
    let dir = workspace(&[("en", "")]);
    let out = texarticle(dir.path(), &["-k", "paper1", "-l", "en", "fr"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("Unsupported language: fr"));
    assert!(stdout(&out).is_empty());
}

#[test]
fn missing_sources_are_reported_and_run_succeeds() {
    let dir = workspace(&[]);
    let out = texarticle(dir.path(), &["--key", "paper1"]);
    assert!(out.status.success());
    assert_eq!(
        stdout(&out),
        "File for language 'ru' not found: paper1/paper1_ru.tex\n\
         File for language 'en' not found: paper1/paper1_en.tex\n"
    );
    assert!(!dir.path().join("dist").exists());
}

#[test]
fn dry_run_prints_both_passes() {
    let dir = workspace(&[("en", "")]);
    let out = texarticle(dir.path(), &["-k", "paper1/", "-l", "en", "--dry-run"]);
    assert!(out.status.success());
    assert_eq!(
        stdout(&out),
        "[dry-run] pass 1: pdflatex -interaction=nonstopmode -output-directory=dist paper1/paper1_en.tex\n\
         [dry-run] pass 2: pdflatex -interaction=nonstopmode -output-directory=dist paper1/paper1_en.tex\n"
    );
    assert!(!dir.path().join("dist").exists());
}

#[test]
fn json_output_is_one_event_per_line() {
    let dir = workspace(&[("en", "")]);
    let out = texarticle(dir.path(), &["-k", "paper1", "--json", "--dry-run"]);
    assert!(out.status.success());

    let events: Vec<serde_json::Value> = stdout(&out)
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0]["event"], "failed");
    assert_eq!(events[0]["code"], "source_missing");
    assert_eq!(events[0]["language"], "ru");
    assert_eq!(events[1]["event"], "planned");
    assert_eq!(events[1]["pass"], 1);
    assert_eq!(events[2]["pass"], 2);
    assert_eq!(events[2]["command"][0], "pdflatex");
}

#[cfg(unix)]
mod fake_compiler {
    use std::os::unix::fs::PermissionsExt;

    use super::*;

    /// Install a fake `pdflatex` that appends its arguments to `calls.log`
    /// in the working directory and fails for sources containing `FAIL`.
    fn install(dir: &Path) -> String {
        let bin = dir.join("bin");
        fs::create_dir(&bin).unwrap();
        let script = bin.join("pdflatex");
        fs::write(
            &script,
            "#!/bin/sh\n\
             echo \"$@\" >> calls.log\n\
             if grep -q FAIL \"$3\"; then echo 'fake failure'; echo 'fake stderr' >&2; exit 1; fi\n\
             exit 0\n",
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let path = std::env::var("PATH").unwrap_or_default();
        format!("{}:{path}", bin.display())
    }

    fn run_with_path(cwd: &Path, path: &str, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_texarticle"))
            .current_dir(cwd)
            .args(args)
            .env("PATH", path)
            .env_remove("RUST_LOG")
            .output()
            .expect("failed to run texarticle")
    }

    fn calls(dir: &Path) -> Vec<String> {
        fs::read_to_string(dir.join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn missing_language_then_two_passes() {
        let dir = workspace(&[("en", "ok")]);
        let path = install(dir.path());
        let out = run_with_path(dir.path(), &path, &["-k", "paper1", "-l", "ru", "en"]);

        assert!(out.status.success());
        assert_eq!(
            stdout(&out),
            "File for language 'ru' not found: paper1/paper1_ru.tex\n\
             Compiling paper1/paper1_en.tex...\n\
             Successfully compiled: paper1_en.pdf to dist folder\n"
        );
        let expected = "-interaction=nonstopmode -output-directory=dist paper1/paper1_en.tex";
        assert_eq!(calls(dir.path()), vec![expected, expected]);
        assert!(dir.path().join("dist").is_dir());
    }

    #[test]
    fn first_pass_failure_skips_second_and_continues() {
        let dir = workspace(&[("ru", "FAIL"), ("en", "ok")]);
        let path = install(dir.path());
        let out = run_with_path(dir.path(), &path, &["-k", "paper1"]);

        assert!(out.status.success());
        let text = stdout(&out);
        assert!(text.contains("Compilation error for paper1/paper1_ru.tex:\nfake failure\n\nfake stderr\n"));
        assert!(text.contains("Successfully compiled: paper1_en.pdf to dist folder"));

        let log = calls(dir.path());
        assert_eq!(log.len(), 3);
        assert!(log[0].ends_with("paper1/paper1_ru.tex"));
        assert!(log[1].ends_with("paper1/paper1_en.tex"));
        assert!(log[2].ends_with("paper1/paper1_en.tex"));
    }

    #[test]
    fn missing_compiler_is_reported() {
        let dir = workspace(&[("en", "ok")]);
        let empty = dir.path().join("empty-bin");
        fs::create_dir(&empty).unwrap();
        let out = run_with_path(
            dir.path(),
            empty.to_str().unwrap(),
            &["-k", "paper1", "-l", "en"],
        );

        assert!(out.status.success());
        assert!(stdout(&out).contains("Failed to run compiler for paper1/paper1_en.tex"));
    }

    #[test]
    fn output_dir_blocked_by_file_fails_run() {
        let dir = workspace(&[("en", "ok")]);
        fs::write(dir.path().join("dist"), "").unwrap();
        let path = install(dir.path());
        let out = run_with_path(dir.path(), &path, &["-k", "paper1", "-l", "en"]);

        assert_eq!(out.status.code(), Some(74));
        assert!(stderr(&out).contains("Error: Cannot create output directory 'dist'"));
        assert!(calls(dir.path()).is_empty());
    }
}
