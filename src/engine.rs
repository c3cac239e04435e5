use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

/// Fixed name of the tabular output artifact the engine deposits in its
/// working directory after a successful run.
pub const ARTIFACT_FILENAME: &str = "simtbl.xml";

/// Failures of the engine smoke contract. None of these are recovered into
/// a soft verdict: a broken engine fails the run outright.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to launch engine {executable}: {source}")]
    Launch {
        executable: PathBuf,
        source: std::io::Error,
    },

    #[error("engine exited with {status}")]
    Failed { status: ExitStatus },

    #[error("engine finished without producing {file} in {dir}")]
    MissingArtifact { file: &'static str, dir: PathBuf },

    #[error("failed to read artifact {file}: {source}")]
    Unreadable {
        file: PathBuf,
        source: std::io::Error,
    },

    #[error("artifact {file} is not well-formed: {reason}")]
    Malformed { file: PathBuf, reason: String },
}

/// The well-formedness parser is an external collaborator; the harness only
/// requires "parses without error".
pub trait ArtifactParser {
    fn parse(&self, text: &str) -> Result<(), String>;
}

/// Drives one engine run: launch with `-w <weather-file>` inside `workdir`,
/// wait for termination, then pick up the artifact from its fixed filename.
#[derive(Debug, Clone)]
pub struct EngineHarness {
    pub executable: PathBuf,
    pub weather_file: PathBuf,
    pub workdir: PathBuf,
}

impl EngineHarness {
    pub fn new(executable: PathBuf, weather_file: PathBuf, workdir: PathBuf) -> Self {
        EngineHarness {
            executable,
            weather_file,
            workdir,
        }
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.workdir.join(ARTIFACT_FILENAME)
    }

    /// Launch the engine and wait for normal termination. Engine output is
    /// discarded; the artifact file is the only channel inspected.
    pub fn run(&self) -> Result<PathBuf, EngineError> {
        let status = Command::new(&self.executable)
            .arg("-w")
            .arg(&self.weather_file)
            .current_dir(&self.workdir)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| EngineError::Launch {
                executable: self.executable.clone(),
                source,
            })?;
        if !status.success() {
            return Err(EngineError::Failed { status });
        }
        let artifact = self.artifact_path();
        if !artifact.is_file() {
            return Err(EngineError::MissingArtifact {
                file: ARTIFACT_FILENAME,
                dir: self.workdir.clone(),
            });
        }
        Ok(artifact)
    }

    /// Artifact bytes decoded as Latin-1, the artifact's declared encoding.
    pub fn artifact_text(&self) -> Result<String, EngineError> {
        let file = self.artifact_path();
        let bytes = fs::read(&file).map_err(|source| EngineError::Unreadable {
            file: file.clone(),
            source,
        })?;
        Ok(decode_latin1(&bytes))
    }

    /// Full smoke contract: run, read, parse. Any failure propagates.
    pub fn run_and_validate<P: ArtifactParser>(&self, parser: &P) -> Result<(), EngineError> {
        let artifact = self.run()?;
        let text = self.artifact_text()?;
        parser.parse(&text).map_err(|reason| EngineError::Malformed {
            file: artifact,
            reason,
        })
    }
}

/// Latin-1 is a strict prefix of Unicode: every byte maps to the code point
/// of the same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
