use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::checker::{CheckerOptions, ExcludeSet};
use crate::output::DiagnosticMode;

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "license-audit.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Name used as the diagnostic prefix
    pub toolname: Option<String>,

    /// License file compared verbatim against the canonical text
    pub license_file: Option<PathBuf>,

    /// Diagnostic wording (default, human)
    pub diagnostics: Option<DiagnosticMode>,

    /// Output format (table, json)
    pub format: Option<String>,

    /// Block-comment dialect section
    pub native: DialectConfig,

    /// Line-comment dialect section
    pub script: DialectConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialectConfig {
    /// Directory roots walked by the checker
    pub roots: Vec<PathBuf>,

    /// File suffixes selected under those roots
    pub extensions: Vec<String>,

    /// Leading lines skipped before the header is expected
    #[serde(default)]
    pub offset: usize,

    /// Tolerate one shebang line ahead of the header
    #[serde(default)]
    pub shebang: bool,

    /// Zero-byte files are trivially compliant
    #[serde(default)]
    pub empty_passes: bool,

    /// Paths matching any of these regular expressions are skipped
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        AuditConfig {
            toolname: Some("license-audit".to_string()),
            license_file: Some(PathBuf::from("LICENSE.txt")),
            diagnostics: Some(DiagnosticMode::Default),
            format: Some("table".to_string()),
            native: DialectConfig {
                roots: vec![PathBuf::from("./src"), PathBuf::from("./tst")],
                extensions: vec!["cc".to_string(), "hh".to_string()],
                offset: 0,
                shebang: false,
                empty_passes: false,
                exclude: vec![],
            },
            script: DialectConfig {
                roots: vec![PathBuf::from("./")],
                extensions: vec!["py".to_string()],
                offset: 0,
                shebang: true,
                empty_passes: true,
                exclude: vec![
                    r".*third_party.*".to_string(),
                    r"^\.(\\|/)build.*".to_string(),
                    r"^\.(\\|/)bin.*".to_string(),
                    r".*readthedocs.*".to_string(),
                    r".*venv.*".to_string(),
                    r".*cmake-build-.*".to_string(),
                ],
            },
        }
    }
}

impl AuditConfig {
    pub fn toolname(&self) -> &str {
        self.toolname.as_deref().unwrap_or("license-audit")
    }

    pub fn license_path(&self) -> PathBuf {
        self.license_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("LICENSE.txt"))
    }

    pub fn diagnostic_mode(&self) -> DiagnosticMode {
        self.diagnostics.unwrap_or_default()
    }

    /// Checker options for one dialect section.
    pub fn checker_options(&self, section: &DialectConfig) -> CheckerOptions {
        CheckerOptions {
            offset: section.offset,
            extensions: section.extensions.clone(),
            shebang: section.shebang,
            empty_passes: section.empty_passes,
            toolname: self.toolname().to_string(),
        }
    }

    /// Fail early on configuration that cannot drive a run: empty selections
    /// or exclusion patterns that do not compile.
    pub fn validate(&self) -> Result<()> {
        for (name, section) in [("native", &self.native), ("script", &self.script)] {
            if section.roots.is_empty() {
                anyhow::bail!("[{}] section has no roots", name);
            }
            if section.extensions.is_empty() {
                anyhow::bail!("[{}] section has no extensions", name);
            }
            ExcludeSet::compile(&section.exclude)
                .with_context(|| format!("[{}] section", name))?;
        }
        if let Some(format) = self.format.as_deref() {
            if format != "table" && format != "json" {
                anyhow::bail!("unknown output format {:?}", format);
            }
        }
        Ok(())
    }
}

/// Load configuration. An explicitly given path must exist; the default
/// `license-audit.toml` falls back to built-in defaults when absent.
pub fn load_config(path: Option<&Path>) -> Result<AuditConfig> {
    let (path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(CONFIG_FILE), false),
    };

    if !path.exists() {
        if explicit {
            anyhow::bail!("configuration file not found: {}", path.display());
        }
        return Ok(AuditConfig::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: AuditConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(config)
}
