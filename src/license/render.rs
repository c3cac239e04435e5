use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::LicenseVersion;
use crate::output::Diagnostic;

/// Comment-framing convention for a source-file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Block-comment framing: `/*`, the license lines verbatim, `*/`.
    Native,
    /// Line-comment framing: every line prefixed with `# `, paragraph
    /// separators rendered as a bare `#`. A shebang line ahead of the
    /// header is tolerated by the checker, never part of the rendering.
    Script,
}

/// Exact text of the standalone license file: paragraphs joined by one blank
/// line, every line newline-terminated.
pub fn render_plain(version: &LicenseVersion) -> String {
    let mut out = String::new();
    for (i, para) in version.paragraphs().iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for line in para.lines() {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// The header a compliant source file must carry, line by line.
pub fn header_lines(version: &LicenseVersion, dialect: Dialect) -> Vec<String> {
    let mut body: Vec<String> = Vec::new();
    for (i, para) in version.paragraphs().iter().enumerate() {
        if i > 0 {
            body.push(String::new());
        }
        body.extend(para.lines().iter().cloned());
    }
    match dialect {
        Dialect::Native => {
            let mut lines = Vec::with_capacity(body.len() + 2);
            lines.push("/*".to_string());
            lines.append(&mut body);
            lines.push("*/".to_string());
            lines
        }
        Dialect::Script => body
            .iter()
            .map(|line| {
                if line.is_empty() {
                    "#".to_string()
                } else {
                    format!("# {}", line)
                }
            })
            .collect(),
    }
}

pub fn render_commented(version: &LicenseVersion, dialect: Dialect) -> String {
    let mut out = header_lines(version, dialect).join("\n");
    out.push('\n');
    out
}

/// Compare the on-disk license file against the canonical rendering, byte
/// for byte. `Ok(None)` means the file matches; `Ok(Some(_))` carries a
/// diagnostic pointing at the first differing line. A missing or unreadable
/// license file is an unrecoverable error for the whole run.
pub fn check_license_file(path: &Path, version: &LicenseVersion) -> Result<Option<Diagnostic>> {
    let on_disk = fs::read_to_string(path)
        .with_context(|| format!("failed to read license file {}", path.display()))?;
    let canonical = render_plain(version);
    if on_disk == canonical {
        return Ok(None);
    }

    let file = path.display().to_string();
    let mut expected_lines = canonical.lines();
    let mut actual_lines = on_disk.lines();
    let mut line_no = 0;
    loop {
        line_no += 1;
        match (expected_lines.next(), actual_lines.next()) {
            (Some(expected), Some(actual)) if expected == actual => continue,
            (expected, actual) => {
                return Ok(Some(Diagnostic::license_file(&file, line_no, expected, actual)));
            }
        }
    }
}
