use anyhow::{Context, Result};
use indexmap::IndexMap;
use regex::RegexSet;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::license::{header_lines, Dialect, LicenseVersion};
use crate::output::{Diagnostic, Verdict};

/// Options recognized by a [`Checker`].
#[derive(Debug, Clone)]
pub struct CheckerOptions {
    /// Leading lines skipped unconditionally before the header is expected.
    pub offset: usize,
    /// File suffixes the checker selects.
    pub extensions: Vec<String>,
    /// Tolerate (never require) one shebang line after the offset skip.
    pub shebang: bool,
    /// A zero-byte file is trivially compliant.
    pub empty_passes: bool,
    /// Name used as the diagnostic prefix.
    pub toolname: String,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        CheckerOptions {
            offset: 0,
            extensions: vec!["cc".to_string(), "hh".to_string()],
            shebang: false,
            empty_passes: false,
            toolname: "license-audit".to_string(),
        }
    }
}

/// Ordered exclusion patterns, compiled once at configuration time.
/// A path matching any pattern is skipped entirely: no verdict, no effect
/// on the aggregate result.
#[derive(Debug, Clone)]
pub struct ExcludeSet {
    patterns: Vec<String>,
    set: RegexSet,
}

impl ExcludeSet {
    pub fn compile(patterns: &[String]) -> Result<Self> {
        let set = RegexSet::new(patterns)
            .with_context(|| format!("invalid exclusion pattern in {:?}", patterns))?;
        Ok(ExcludeSet {
            patterns: patterns.to_vec(),
            set,
        })
    }

    pub fn empty() -> Self {
        ExcludeSet {
            patterns: Vec::new(),
            set: RegexSet::empty(),
        }
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.set.is_match(path)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// Result of one `visit` call: per-file verdicts in traversal order plus the
/// diagnostics explaining every failure.
#[derive(Debug, Default)]
pub struct VisitReport {
    pub files: IndexMap<String, Verdict>,
    pub diagnostics: Vec<Diagnostic>,
}

impl VisitReport {
    fn record_pass(&mut self, file: String) {
        self.files.insert(file, Verdict::Pass);
    }

    fn record_fail(&mut self, file: String, diag: Diagnostic) {
        self.files.insert(file, Verdict::Fail);
        self.diagnostics.push(diag);
    }

    /// Logical AND over every non-excluded file seen by the visit.
    pub fn success(&self) -> bool {
        self.files.values().all(|v| *v == Verdict::Pass)
    }
}

/// Walks source roots and verifies that every selected file opens with the
/// expected comment-framed license header.
pub struct Checker {
    header: Vec<String>,
    opts: CheckerOptions,
}

impl Checker {
    pub fn new(version: &LicenseVersion, dialect: Dialect, opts: CheckerOptions) -> Self {
        Checker {
            header: header_lines(version, dialect),
            opts,
        }
    }

    /// Recursively check every selected file under `root`. Traversal is
    /// sorted so diagnostics come out in a reproducible order. A root that
    /// does not exist contributes nothing, matching a walk over an empty
    /// tree. I/O failures on individual files are verdicts, not aborts.
    pub fn visit(&self, root: &Path, excludes: &ExcludeSet) -> VisitReport {
        let mut report = VisitReport::default();
        if !root.exists() {
            return report;
        }
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let file = err
                        .path()
                        .unwrap_or(root)
                        .display()
                        .to_string();
                    let detail = err.to_string();
                    report.record_fail(file.clone(), Diagnostic::unreadable(&file, detail));
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if !self.selects(path) {
                continue;
            }
            let file = path.display().to_string();
            if excludes.is_match(&file) {
                continue;
            }
            match fs::read_to_string(path) {
                Ok(content) => self.check_content(&file, &content, &mut report),
                Err(err) => {
                    report.record_fail(file.clone(), Diagnostic::unreadable(&file, err.to_string()))
                }
            }
        }
        report
    }

    fn selects(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.opts.extensions.iter().any(|want| want == ext))
            .unwrap_or(false)
    }

    /// Line-by-line header comparison. The `offset` skip and the shebang
    /// tolerance compose independently: exactly `offset` lines are dropped
    /// first, then at most one shebang line when tolerated.
    fn check_content(&self, file: &str, content: &str, report: &mut VisitReport) {
        if content.is_empty() {
            if self.opts.empty_passes {
                report.record_pass(file.to_string());
            } else {
                report.record_fail(
                    file.to_string(),
                    Diagnostic::truncated(file, 1, &self.header[0]),
                );
            }
            return;
        }

        let mut lines = content.lines().peekable();
        let mut line_no = 0usize;
        for _ in 0..self.opts.offset {
            if lines.next().is_some() {
                line_no += 1;
            }
        }
        if self.opts.shebang {
            if let Some(first) = lines.peek() {
                if first.starts_with("#!") {
                    lines.next();
                    line_no += 1;
                }
            }
        }

        for expected in &self.header {
            line_no += 1;
            match lines.next() {
                Some(actual) if actual == expected => {}
                Some(actual) => {
                    report.record_fail(
                        file.to_string(),
                        Diagnostic::header_mismatch(file, line_no, expected, actual),
                    );
                    return;
                }
                None => {
                    report.record_fail(
                        file.to_string(),
                        Diagnostic::truncated(file, line_no, expected),
                    );
                    return;
                }
            }
        }
        report.record_pass(file.to_string());
    }
}
