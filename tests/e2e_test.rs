/// End-to-end tests for the CLI
///
/// Only analyses that need no network access run against the fixture here;
/// the networked ones are covered with mocks in `integration_test.rs`.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/workspace.json")
}

fn fixture_arg() -> String {
    fixture().display().to_string()
}

/// Copies the fixture into a fresh directory so no config file is discovered
/// next to it and outputs can be written alongside.
fn isolated_workspace() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("depscope-workspace.json");
    fs::copy(fixture(), &input).unwrap();
    (dir, input)
}

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: Success - normal execution
    #[test]
    fn test_exit_code_success() {
        cargo_bin_cmd!("depscope")
            .args(["-i", &fixture_arg(), "list"])
            .assert()
            .code(0);
    }

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("depscope").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("depscope")
            .arg("--version")
            .assert()
            .code(0)
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("depscope")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("depscope")
            .args(["-f", "invalid_format", "list"])
            .assert()
            .code(2);
    }

    /// Exit code 2: Missing required subcommand option
    #[test]
    fn test_exit_code_missing_group() {
        cargo_bin_cmd!("depscope").arg("insight").assert().code(2);
    }

    /// Exit code 3: Application error - non-existent snapshot
    #[test]
    fn test_exit_code_application_error_nonexistent_input() {
        cargo_bin_cmd!("depscope")
            .args(["-i", "/nonexistent/path/depscope-workspace.json", "list"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("An error occurred"));
    }

    /// Exit code 3: Application error - input is not a snapshot
    #[test]
    fn test_exit_code_application_error_unparsable_input() {
        cargo_bin_cmd!("depscope")
            .args(["-i", "Cargo.toml", "list"])
            .assert()
            .code(3);
    }

    /// Exit code 3: Application error - invalid pattern
    #[test]
    fn test_exit_code_application_error_invalid_pattern() {
        cargo_bin_cmd!("depscope")
            .args(["-i", &fixture_arg(), "insight", "-g", "org/slf4j"])
            .assert()
            .code(3);
    }

    /// Exit code 1: --check with pending changes
    #[test]
    fn test_exit_code_check_with_changes() {
        cargo_bin_cmd!("depscope")
            .args(["-i", &fixture_arg(), "--check", "sbom"])
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty());
    }

    /// Exit code 0: --check without pending changes
    #[test]
    fn test_exit_code_check_without_changes() {
        cargo_bin_cmd!("depscope")
            .args(["-i", &fixture_arg(), "--check", "list"])
            .assert()
            .code(0);
    }
}

mod output_tests {
    use super::*;

    #[test]
    fn test_snapshot_goes_to_stdout_and_report_to_stderr() {
        let output = cargo_bin_cmd!("depscope")
            .args(["-i", &fixture_arg(), "insight", "-g", "org.slf4j"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(snapshot["documents"].as_array().unwrap().len(), 3);
        assert_eq!(
            snapshot["documents"][0]["markers"][0],
            "Found dependency: org.slf4j:slf4j-api:1.7.36"
        );

        let stderr = String::from_utf8(output.stderr).unwrap();
        assert!(stderr.contains("Loaded 3 document(s)"));
        assert!(stderr.contains("\"table\": \"dependency_in_use\""));
    }

    #[test]
    fn test_writes_snapshot_and_report_files() {
        let (dir, input) = isolated_workspace();
        let snapshot = dir.path().join("out.json");
        let report = dir.path().join("report.md");

        cargo_bin_cmd!("depscope")
            .args([
                "-i",
                input.to_str().unwrap(),
                "-o",
                snapshot.to_str().unwrap(),
                "-r",
                report.to_str().unwrap(),
                "-f",
                "markdown",
                "upgrade",
                "-g",
                "org.slf4j",
                "-a",
                "slf4j-api",
                "--to",
                "2.0.9",
            ])
            .assert()
            .code(0)
            .stdout(predicate::str::is_empty());

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&snapshot).unwrap()).unwrap();
        assert_eq!(
            written["documents"][0]["dependencies"][3]["version"],
            "2.0.9"
        );

        let markdown = fs::read_to_string(&report).unwrap();
        assert!(markdown.starts_with("# Dependency Report"));
        assert!(markdown.contains("## Version upgrades"));
        assert!(markdown.contains("1.7.36"));
    }

    #[test]
    fn test_sbom_snapshot_contains_generated_documents() {
        let (dir, input) = isolated_workspace();
        let snapshot = dir.path().join("out.json");

        cargo_bin_cmd!("depscope")
            .args([
                "-i",
                input.to_str().unwrap(),
                "-o",
                snapshot.to_str().unwrap(),
                "sbom",
            ])
            .assert()
            .code(0);

        let content = fs::read_to_string(&snapshot).unwrap();
        assert!(content.contains("services/orders/sbom.json"));
        assert!(content.contains("apps/web/sbom.json"));

        // The rewritten snapshot is stable under a second run
        cargo_bin_cmd!("depscope")
            .args(["-i", snapshot.to_str().unwrap(), "--check", "sbom"])
            .assert()
            .code(0);
    }

    #[test]
    fn test_relocated_report() {
        cargo_bin_cmd!("depscope")
            .args(["-i", &fixture_arg(), "relocated"])
            .assert()
            .code(0)
            .stderr(predicate::str::contains("jakarta.xml.bind-api"));
    }

    #[test]
    fn test_min_version_report() {
        cargo_bin_cmd!("depscope")
            .args([
                "-i",
                &fixture_arg(),
                "min-version",
                "-g",
                "com.fasterxml.jackson.core",
                "-a",
                "jackson-annotations",
            ])
            .assert()
            .code(0)
            .stdout(predicate::str::contains(
                "Minimum version in use: com.fasterxml.jackson.core:jackson-annotations:2.16.0",
            ));
    }

    #[test]
    fn test_list_transitive_runtime() {
        cargo_bin_cmd!("depscope")
            .args([
                "-i",
                &fixture_arg(),
                "list",
                "--scope",
                "runtime",
                "--transitive",
            ])
            .assert()
            .code(0)
            .stderr(predicate::str::contains("jaxb-api"))
            .stderr(predicate::str::contains("\"direct\": false"));
    }

    #[test]
    fn test_licenses_report() {
        cargo_bin_cmd!("depscope")
            .args(["-i", &fixture_arg(), "licenses"])
            .assert()
            .code(0)
            .stderr(predicate::str::contains("\"table\": \"license\""))
            .stderr(predicate::str::contains("\"license_type\": \"Apache2\""))
            .stderr(predicate::str::contains("\"license_type\": \"Unknown\""));
    }

    #[test]
    fn test_remove_rewrites_snapshot() {
        let output = cargo_bin_cmd!("depscope")
            .args(["-i", &fixture_arg(), "remove", "-g", "junit", "-a", "junit"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let dependencies = snapshot["documents"][0]["dependencies"].as_array().unwrap();
        assert_eq!(dependencies.len(), 4);
        assert!(dependencies.iter().all(|d| d["group"] != "junit"));
        assert!(String::from_utf8(output.stderr)
            .unwrap()
            .contains("\"table\": \"removed_dependency\""));
    }

    #[test]
    fn test_change_with_check_reports_pending_changes() {
        cargo_bin_cmd!("depscope")
            .args([
                "-i",
                &fixture_arg(),
                "--check",
                "change",
                "-g",
                "javax.xml.bind",
                "--new-group",
                "jakarta.xml.bind",
                "--new-artifact",
                "jakarta.xml.bind-api",
            ])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("jakarta.xml.bind:jakarta.xml.bind-api:2.3.1"));
    }

    #[test]
    fn test_does_not_include_marks_only_missing_projects() {
        let output = cargo_bin_cmd!("depscope")
            .args(["-i", &fixture_arg(), "does-not-include", "-g", "junit"])
            .output()
            .unwrap();

        let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert!(snapshot["documents"][0].get("markers").map_or(true, |m| m
            .as_array()
            .unwrap()
            .is_empty()));
        assert_eq!(
            snapshot["documents"][1]["markers"][0],
            "Does not include dependency: junit:*"
        );
    }

    #[test]
    fn test_repository_order_report() {
        cargo_bin_cmd!("depscope")
            .args(["-i", &fixture_arg(), "repository-order"])
            .assert()
            .code(0)
            .stdout(predicate::str::contains(
                "Repository #1: https://nexus.example.com/repository/maven-public",
            ))
            .stderr(predicate::str::contains("\"table\": \"repository_order\""));
    }

    #[test]
    fn test_invalid_list_scope_is_rejected() {
        cargo_bin_cmd!("depscope")
            .args(["-i", &fixture_arg(), "list", "--scope", "provided"])
            .assert()
            .code(2);
    }
}
