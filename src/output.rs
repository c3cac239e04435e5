use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How failure diagnostics are worded. An explicit configuration value,
/// handed to the driver once; never process-global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticMode {
    /// One condensed, parseable line per failure.
    #[default]
    Default,
    /// Plain-English wording with the expected and actual lines spelled out.
    Human,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    HeaderMismatch,
    TruncatedHeader,
    Unreadable,
    LicenseFileMismatch,
}

/// Per-file verdict. Excluded files never receive one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

/// One failure, recorded where it was found and worded at print time.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub kind: DiagnosticKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Diagnostic {
    pub fn header_mismatch(file: &str, line: usize, expected: &str, actual: &str) -> Self {
        Diagnostic {
            file: file.to_string(),
            kind: DiagnosticKind::HeaderMismatch,
            line: Some(line),
            expected: Some(expected.to_string()),
            actual: Some(actual.to_string()),
            detail: None,
        }
    }

    pub fn truncated(file: &str, line: usize, expected: &str) -> Self {
        Diagnostic {
            file: file.to_string(),
            kind: DiagnosticKind::TruncatedHeader,
            line: Some(line),
            expected: Some(expected.to_string()),
            actual: None,
            detail: None,
        }
    }

    pub fn unreadable(file: &str, detail: String) -> Self {
        Diagnostic {
            file: file.to_string(),
            kind: DiagnosticKind::Unreadable,
            line: None,
            expected: None,
            actual: None,
            detail: Some(detail),
        }
    }

    pub fn license_file(
        file: &str,
        line: usize,
        expected: Option<&str>,
        actual: Option<&str>,
    ) -> Self {
        Diagnostic {
            file: file.to_string(),
            kind: DiagnosticKind::LicenseFileMismatch,
            line: Some(line),
            expected: expected.map(str::to_string),
            actual: actual.map(str::to_string),
            detail: None,
        }
    }

    /// Render this diagnostic for the terminal in the requested mode.
    pub fn render(&self, toolname: &str, mode: DiagnosticMode) -> String {
        match mode {
            DiagnosticMode::Default => self.render_default(toolname),
            DiagnosticMode::Human => self.render_human(),
        }
    }

    fn render_default(&self, toolname: &str) -> String {
        let line = self.line.unwrap_or(0);
        match self.kind {
            DiagnosticKind::HeaderMismatch => format!(
                "{}:{}:{}: header mismatch: expected {:?}, found {:?}",
                toolname,
                self.file,
                line,
                self.expected.as_deref().unwrap_or(""),
                self.actual.as_deref().unwrap_or(""),
            ),
            DiagnosticKind::TruncatedHeader => format!(
                "{}:{}:{}: header truncated: expected {:?}",
                toolname,
                self.file,
                line,
                self.expected.as_deref().unwrap_or(""),
            ),
            DiagnosticKind::Unreadable => format!(
                "{}:{}: read failed: {}",
                toolname,
                self.file,
                self.detail.as_deref().unwrap_or("unknown I/O error"),
            ),
            DiagnosticKind::LicenseFileMismatch => format!(
                "{}:{}:{}: license text differs: expected {:?}, found {:?}",
                toolname,
                self.file,
                line,
                self.expected.as_deref().unwrap_or("<end of file>"),
                self.actual.as_deref().unwrap_or("<end of file>"),
            ),
        }
    }

    fn render_human(&self) -> String {
        match self.kind {
            DiagnosticKind::HeaderMismatch => format!(
                "{}: the license header does not match the current license text\n  \
                 line {} should read:\n    {}\n  but the file contains:\n    {}",
                self.file,
                self.line.unwrap_or(0),
                self.expected.as_deref().unwrap_or(""),
                self.actual.as_deref().unwrap_or(""),
            ),
            DiagnosticKind::TruncatedHeader => format!(
                "{}: the file ends before the license header is complete\n  \
                 line {} should read:\n    {}",
                self.file,
                self.line.unwrap_or(0),
                self.expected.as_deref().unwrap_or(""),
            ),
            DiagnosticKind::Unreadable => format!(
                "{}: could not be read ({})",
                self.file,
                self.detail.as_deref().unwrap_or("unknown I/O error"),
            ),
            DiagnosticKind::LicenseFileMismatch => format!(
                "{}: does not match the current license text\n  \
                 line {} should read:\n    {}\n  but the file contains:\n    {}",
                self.file,
                self.line.unwrap_or(0),
                self.expected.as_deref().unwrap_or("<end of file>"),
                self.actual.as_deref().unwrap_or("<end of file>"),
            ),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct Summary {
    pub checked: usize,
    pub passed: usize,
    pub failed: usize,
    pub license_file_ok: bool,
}

/// Aggregate result of one audit run. File order follows traversal order,
/// which is deterministic, so serialized reports diff cleanly.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub files: IndexMap<String, Verdict>,
    pub summary: Summary,
    pub diagnostics: Vec<Diagnostic>,
    pub success: bool,
}

impl CheckReport {
    pub fn new(tool: &str) -> Self {
        CheckReport {
            tool: tool.to_string(),
            generated_at: Utc::now(),
            files: IndexMap::new(),
            summary: Summary {
                license_file_ok: true,
                ..Summary::default()
            },
            diagnostics: Vec::new(),
            success: true,
        }
    }

    pub fn record_license_file(&mut self, mismatch: Option<Diagnostic>) {
        if let Some(diag) = mismatch {
            self.summary.license_file_ok = false;
            self.success = false;
            self.diagnostics.push(diag);
        }
    }

    pub fn absorb(&mut self, visit: crate::checker::VisitReport) {
        for (file, verdict) in visit.files {
            match verdict {
                Verdict::Pass => self.summary.passed += 1,
                Verdict::Fail => {
                    self.summary.failed += 1;
                    self.success = false;
                }
            }
            self.summary.checked += 1;
            self.files.insert(file, verdict);
        }
        self.diagnostics.extend(visit.diagnostics);
    }

    pub fn format_summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "📋 License audit ({} files checked)\n",
            self.summary.checked
        ));
        out.push_str(&format!(
            "✅ {} compliant  🚫 {} failing  📄 license file {}\n",
            self.summary.passed,
            self.summary.failed,
            if self.summary.license_file_ok { "ok" } else { "stale" },
        ));
        if self.success {
            out.push_str("✅ all checks passed\n");
        } else {
            out.push_str("🚫 license audit failed\n");
        }
        out
    }
}
