use super::helpers::TestProject;
use license_header_audit::license::{
    render_commented, render_plain, Dialect, LicenseVersion,
};

#[test]
fn test_compliant_tree_exits_zero() {
    let project = TestProject::new();
    project.init_compliant_tree();

    let output = project.run(&["check"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("all checks passed"));
}

#[test]
fn test_zero_argument_invocation_runs_the_gate() {
    let project = TestProject::new();
    project.init_compliant_tree();

    let output = project.run(&[]);

    assert!(output.status.success());
}

#[test]
fn test_stale_license_year_fails_the_gate() {
    let project = TestProject::new();
    project.init_compliant_tree();
    // Canonical text says 1996-2025; the file on disk says 1996-2024
    project.write_raw(
        "LICENSE.txt",
        &render_plain(&LicenseVersion::with_end_year(2024)),
    );

    let output = project.run(&["check"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("license text differs"));
    assert!(stderr.contains("1996-2024"));
}

#[test]
fn test_mutated_header_fails_and_names_the_file() {
    let project = TestProject::new();
    project.init_compliant_tree();
    let mut header = render_commented(&LicenseVersion::current(), Dialect::Native);
    let pos = header.find("Copyright").unwrap();
    header.replace_range(pos..pos + 1, "c");
    project.write_raw("src/broken.cc", &header);

    let output = project.run(&["check"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("broken.cc"));
    assert!(stderr.contains("header mismatch"));
}

#[test]
fn test_headerless_file_in_excluded_path_does_not_fail() {
    let project = TestProject::new();
    project.init_compliant_tree();
    project.write_raw("venv/lib/site.py", "print('no header at all')\n");

    let output = project.run(&["check"]);

    assert!(output.status.success());
}

#[test]
fn test_empty_script_passes() {
    let project = TestProject::new();
    project.init_compliant_tree();
    project.write_raw("tools/__init__.py", "");

    let output = project.run(&["check"]);

    assert!(output.status.success());
}

#[test]
fn test_script_without_shebang_also_passes() {
    let project = TestProject::new();
    project.init_compliant_tree();
    project.write_script("tools/plain.py", "print('fine')\n", false);

    let output = project.run(&["check"]);

    assert!(output.status.success());
}

#[test]
fn test_json_output_carries_verdicts() {
    let project = TestProject::new();
    project.init_compliant_tree();

    let output = project.run(&["check", "--format", "json"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"files\""));
    assert!(stdout.contains("\"success\": true"));
    assert!(stdout.contains("model.cc"));
}

#[test]
fn test_human_mode_spells_out_the_mismatch() {
    let project = TestProject::new();
    project.init_compliant_tree();
    project.write_raw("src/raw.cc", "int main() {}\n");

    let output = project.run(&["check", "--human"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("should read"));
}

#[test]
fn test_failures_accumulate_instead_of_aborting() {
    let project = TestProject::new();
    project.init_compliant_tree();
    project.write_raw("src/one.cc", "int one;\n");
    project.write_raw("src/two.cc", "int two;\n");

    let output = project.run(&["check"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("one.cc"));
    assert!(stderr.contains("two.cc"));
}

#[test]
fn test_render_plain_matches_license_file_contract() {
    let project = TestProject::new();
    project.init_compliant_tree();

    let output = project.run(&["render"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("ThermoSim, Copyright (c) 1996-2025"));
    assert_eq!(stdout, render_plain(&LicenseVersion::current()));
}

#[test]
fn test_render_script_dialect() {
    let project = TestProject::new();

    let output = project.run(&["render", "--dialect", "script"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().all(|l| l.starts_with('#')));
}

#[test]
fn test_init_then_validate() {
    let project = TestProject::new();

    let init_output = project.run(&["init"]);
    assert!(init_output.status.success());

    let validate_output = project.run(&["config", "--validate"]);
    assert!(validate_output.status.success());
    assert!(String::from_utf8_lossy(&validate_output.stdout).contains("Configuration is valid"));

    // A second init must refuse to clobber the file
    let again = project.run(&["init"]);
    assert!(!again.status.success());
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let project = TestProject::new();
    project.init_compliant_tree();

    let output = project.run(&["check", "--config", "nope.toml"]);

    assert!(!output.status.success());
}
