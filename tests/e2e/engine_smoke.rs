use license_header_audit::engine::{
    ArtifactParser, EngineError, EngineHarness, ARTIFACT_FILENAME,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Stand-in for the external markup parser: the harness contract is only
/// "parses without error".
struct AcceptAll;

impl ArtifactParser for AcceptAll {
    fn parse(&self, _text: &str) -> Result<(), String> {
        Ok(())
    }
}

struct RejectAll;

impl ArtifactParser for RejectAll {
    fn parse(&self, _text: &str) -> Result<(), String> {
        Err("mismatched closing tag".to_string())
    }
}

#[cfg(unix)]
fn install_fake_engine(dir: &Path, script: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join("thermosim");
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
fn harness_with(dir: &TempDir, script: &str) -> EngineHarness {
    let exe = install_fake_engine(dir.path(), script);
    let weather = dir.path().join("site.epw");
    fs::write(&weather, "LOCATION,Test Site\n").unwrap();
    EngineHarness::new(exe, weather, dir.path().to_path_buf())
}

#[cfg(unix)]
#[test]
fn test_engine_run_deposits_artifact() {
    let dir = TempDir::new().unwrap();
    let harness = harness_with(
        &dir,
        "#!/bin/sh\nprintf '<tables><table name=\"Site\"/></tables>' > simtbl.xml\n",
    );

    let artifact = harness.run().unwrap();
    assert!(artifact.ends_with(ARTIFACT_FILENAME));
    harness.run_and_validate(&AcceptAll).unwrap();
}

#[cfg(unix)]
#[test]
fn test_missing_weather_file_is_a_hard_failure() {
    let dir = TempDir::new().unwrap();
    // The fake engine insists on its weather file, like the real one
    let harness = harness_with(&dir, "#!/bin/sh\ntest -f \"$2\" || exit 9\n");
    fs::remove_file(&harness.weather_file).unwrap();

    match harness.run() {
        Err(EngineError::Failed { status }) => assert_eq!(status.code(), Some(9)),
        other => panic!("expected Failed, got {:?}", other.map(|p| p.display().to_string())),
    }
}

#[cfg(unix)]
#[test]
fn test_successful_run_without_artifact_is_reported() {
    let dir = TempDir::new().unwrap();
    let harness = harness_with(&dir, "#!/bin/sh\nexit 0\n");

    match harness.run() {
        Err(EngineError::MissingArtifact { .. }) => {}
        other => panic!("expected MissingArtifact, got {:?}", other.map(|p| p.display().to_string())),
    }
}

#[cfg(unix)]
#[test]
fn test_malformed_artifact_is_a_hard_failure() {
    let dir = TempDir::new().unwrap();
    let harness = harness_with(&dir, "#!/bin/sh\nprintf '<tables>' > simtbl.xml\n");

    match harness.run_and_validate(&RejectAll) {
        Err(EngineError::Malformed { reason, .. }) => {
            assert!(reason.contains("closing tag"));
        }
        other => panic!("expected Malformed, got {:?}", other.err()),
    }
}

#[cfg(unix)]
#[test]
fn test_artifact_text_decodes_latin1() {
    let dir = TempDir::new().unwrap();
    let harness = harness_with(&dir, "#!/bin/sh\nexit 0\n");
    // 0xE9 is e-acute in Latin-1 and invalid as standalone UTF-8
    fs::write(
        dir.path().join(ARTIFACT_FILENAME),
        b"<cell>Montr\xE9al</cell>",
    )
    .unwrap();

    let text = harness.artifact_text().unwrap();
    assert!(text.contains("Montréal"));
}

#[test]
#[ignore = "Requires a ThermoSim engine build; set THERMOSIM_EXE and THERMOSIM_EPW"]
fn test_real_engine_produces_wellformed_tables() {
    let exe = std::env::var("THERMOSIM_EXE").expect("THERMOSIM_EXE not set");
    let epw = std::env::var("THERMOSIM_EPW").expect("THERMOSIM_EPW not set");
    let dir = TempDir::new().unwrap();

    let harness = EngineHarness::new(
        PathBuf::from(exe),
        PathBuf::from(epw),
        dir.path().to_path_buf(),
    );
    harness.run().expect("engine run failed");
    let text = harness.artifact_text().expect("artifact unreadable");
    assert!(text.trim_start().starts_with('<'));
}
