//! CLI integration tests for Drydock.
//!
//! These tests drive the real binary against a throwaway project whose
//! `drydock.toml` points at fake `cmake` and `ctest` scripts. The fakes log
//! every invocation and leave behind the same files the real tools would.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const FAKE_CMAKE: &str = r##"#!/bin/sh
echo "cmake $*" >> "$DRYDOCK_TEST_LOG"
case "$1" in
  -S)
    mkdir -p "$4"
    echo "# fake cache" > "$4/CMakeCache.txt"
    echo "-- Build files have been written to: $4"
    exit "${FAKE_CONFIGURE_STATUS:-0}"
    ;;
  --build)
    status="${FAKE_BUILD_STATUS:-0}"
    if [ "$status" != 0 ]; then
      echo "main.c:1: error: boom" >&2
      exit "$status"
    fi
    cat > "$2/app" <<'APP'
#!/bin/sh
if [ "$1" = "-" ]; then
  read line
  echo "app read: [$line]"
fi
echo "app ran: $*"
exit "${FAKE_RUN_STATUS:-0}"
APP
    chmod +x "$2/app"
    echo "[100%] Built target app"
    ;;
  *)
    exit 64
    ;;
esac
"##;

const FAKE_CTEST: &str = r##"#!/bin/sh
echo "ctest $*" >> "$DRYDOCK_TEST_LOG"
echo "100% tests passed, 0 tests failed out of 1"
exit "${FAKE_TEST_STATUS:-0}"
"##;

/// A project directory with fake tools and an isolated drydock home.
struct Project {
    tmp: TempDir,
}

impl Project {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();

        fs::write(
            root.join("CMakeLists.txt"),
            "cmake_minimum_required(VERSION 3.20)\nproject(app C)\n",
        )
        .unwrap();

        let tools = root.join("tools");
        fs::create_dir_all(&tools).unwrap();
        write_script(&tools.join("cmake"), FAKE_CMAKE);
        write_script(&tools.join("ctest"), FAKE_CTEST);

        fs::write(
            root.join("drydock.toml"),
            "[build]\nartifact = \"app\"\n\n[toolchain]\ncmake = \"tools/cmake\"\nctest = \"tools/ctest\"\n",
        )
        .unwrap();

        fs::create_dir_all(root.join("home")).unwrap();
        Project { tmp }
    }

    fn root(&self) -> &Path {
        self.tmp.path()
    }

    fn build_root(&self) -> PathBuf {
        self.root().join("build")
    }

    fn log_path(&self) -> PathBuf {
        self.root().join("invocations.log")
    }

    /// Every tool invocation so far, one per line.
    fn log(&self) -> Vec<String> {
        fs::read_to_string(self.log_path())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn count(&self, prefix: &str) -> usize {
        self.log().iter().filter(|l| l.starts_with(prefix)).count()
    }

    fn drydock(&self) -> Command {
        let mut cmd = Command::cargo_bin("drydock").unwrap();
        cmd.current_dir(self.root())
            .env("DRYDOCK_HOME", self.root().join("home"))
            .env("DRYDOCK_TEST_LOG", self.log_path())
            .env_remove("RUST_LOG")
            .arg("--color=never");
        cmd
    }
}

fn write_script(path: &Path, body: &str) {
    fs::write(path, body).unwrap();
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}

// ============================================================================
// drydock all
// ============================================================================

#[test]
fn test_all_runs_every_stage() {
    let project = Project::new();

    project
        .drydock()
        .arg("all")
        .assert()
        .success()
        .stdout(predicate::str::contains("[100%] Built target app"))
        .stdout(predicate::str::contains("100% tests passed"));

    assert!(project.build_root().join("CMakeCache.txt").is_file());
    assert!(project.build_root().join("app").is_file());

    let log = project.log();
    assert_eq!(log.len(), 3);
    assert!(log[0].starts_with("cmake -S"));
    assert!(log[1].starts_with("cmake --build"));
    assert!(log[2].starts_with("ctest"));
}

#[test]
fn test_all_with_run() {
    let project = Project::new();

    project
        .drydock()
        .args(["all", "--with-run", "--", "--emit", "ir"])
        .assert()
        .success()
        .stdout(predicate::str::contains("app ran: --emit ir"));
}

#[test]
fn test_build_failure_exit_code_and_short_circuit() {
    let project = Project::new();

    project
        .drydock()
        .args(["all", "--with-run"])
        .env("FAKE_BUILD_STATUS", "2")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("main.c:1: error: boom"))
        .stderr(predicate::str::contains("build stage failed"))
        .stderr(predicate::str::contains("status: 2"))
        .stdout(predicate::str::contains("app ran").not());

    assert_eq!(project.count("ctest"), 0);
    assert!(!project.build_root().join("app").exists());
}

#[test]
fn test_quiet_failure_replays_output() {
    let project = Project::new();

    project
        .drydock()
        .args(["--quiet", "build"])
        .env("FAKE_BUILD_STATUS", "3")
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("main.c:1: error: boom"))
        .stderr(predicate::str::contains("error: build stage failed"));
}

#[test]
fn test_quiet_success_prints_nothing() {
    let project = Project::new();

    project
        .drydock()
        .args(["-q", "build"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

// ============================================================================
// auto-chaining
// ============================================================================

#[test]
fn test_test_chains_configure_and_build() {
    let project = Project::new();

    project.drydock().arg("test").assert().success();
    assert_eq!(project.count("cmake -S"), 1);
    assert_eq!(project.count("cmake --build"), 1);
    assert_eq!(project.count("ctest"), 1);

    // Everything is on disk now; only the tests run again
    project.drydock().arg("test").assert().success();
    assert_eq!(project.count("cmake -S"), 1);
    assert_eq!(project.count("cmake --build"), 1);
    assert_eq!(project.count("ctest"), 2);
}

#[test]
fn test_status_lines_show_commands() {
    let project = Project::new();

    project
        .drydock()
        .arg("build")
        .assert()
        .success()
        .stderr(predicate::str::is_match(r"Configuring \S*tools/cmake -S ").unwrap())
        .stderr(predicate::str::is_match(r"Building \S*tools/cmake --build ").unwrap());
}

#[test]
fn test_release_profile_is_forwarded() {
    let project = Project::new();

    project.drydock().args(["build", "--release", "-j", "4"]).assert().success();

    let log = project.log();
    assert!(log[0].contains("-DCMAKE_BUILD_TYPE=Release"));
    assert!(log[1].contains("--config Release"));
    assert!(log[1].contains("--parallel 4"));
}

#[test]
fn test_zero_jobs_is_usage_error() {
    let project = Project::new();

    project
        .drydock()
        .args(["build", "-j", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid invocation"));

    assert!(project.log().is_empty());
}

// ============================================================================
// drydock run
// ============================================================================

#[test]
fn test_run_passes_extra_args() {
    let project = Project::new();

    project
        .drydock()
        .args(["run", "extra1", "extra2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("app ran: extra1 extra2"));
}

#[test]
fn test_run_forwards_stdin() {
    let project = Project::new();

    assert_cmd::Command::from_std(project.drydock())
        .args(["run", "-"])
        .write_stdin("hello-from-user\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("app read: [hello-from-user]"));
}

#[test]
fn test_run_propagates_exit_code() {
    let project = Project::new();

    project
        .drydock()
        .arg("run")
        .env("FAKE_RUN_STATUS", "7")
        .assert()
        .code(7)
        .stderr(predicate::str::contains("run stage failed"));
}

// ============================================================================
// drydock clean
// ============================================================================

#[test]
fn test_clean_without_build_root() {
    let project = Project::new();

    project.drydock().arg("clean").assert().success();

    assert!(project.log().is_empty());
    assert!(!project.build_root().exists());
}

#[test]
fn test_clean_removes_build_root() {
    let project = Project::new();

    project.drydock().arg("build").assert().success();
    assert!(project.build_root().exists());

    project
        .drydock()
        .arg("clean")
        .assert()
        .success()
        .stderr(predicate::str::contains("Removed"));
    assert!(!project.build_root().exists());
}

#[test]
fn test_clean_removes_dangling_build_root_link() {
    let project = Project::new();
    std::os::unix::fs::symlink(project.root().join("gone"), project.build_root()).unwrap();

    project
        .drydock()
        .arg("clean")
        .assert()
        .success()
        .stderr(predicate::str::contains("Removed"));
    assert!(fs::symlink_metadata(project.build_root()).is_err());
}

// ============================================================================
// drydock status
// ============================================================================

#[test]
fn test_status_json() {
    let project = Project::new();

    let output = project.drydock().args(["status", "--json"]).output().unwrap();
    assert!(output.status.success());
    let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["configured"], false);
    assert_eq!(status["built"], false);

    project.drydock().arg("build").assert().success();

    let output = project.drydock().args(["status", "--json"]).output().unwrap();
    let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["configured"], true);
    assert_eq!(status["built"], true);
    assert!(status["artifact"].as_str().unwrap().ends_with("app"));
}

// ============================================================================
// invocation errors
// ============================================================================

#[test]
fn test_unknown_subcommand() {
    let project = Project::new();

    project
        .drydock()
        .arg("deploy")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("deploy"));

    assert!(project.log().is_empty());
}

#[test]
fn test_missing_tool_reports_spawn_failure() {
    let project = Project::new();
    fs::write(
        project.root().join("drydock.toml"),
        "[toolchain]\ncmake = \"tools/no-such-cmake\"\n",
    )
    .unwrap();

    project
        .drydock()
        .arg("configure")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("configure stage could not run"));
}

#[test]
fn test_completions() {
    Command::cargo_bin("drydock")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("drydock"));
}
