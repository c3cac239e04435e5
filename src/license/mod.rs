pub mod render;

// Re-export the rendering surface
pub use render::{check_license_file, header_lines, render_commented, render_plain, Dialect};

/// First year of the ThermoSim copyright range.
pub const FIRST_COPYRIGHT_YEAR: u16 = 1996;

/// End year of the copyright range in the current edition.
pub const CURRENT_COPYRIGHT_YEAR: u16 = 2025;

// Wrap widths. Native headers and LICENSE.txt share the wide wrap; the
// script edition is re-wrapped narrow so that "# "-prefixed lines stay
// inside 80 columns.
const WIDE_WIDTH: usize = 95;
const NARROW_WIDTH: usize = 77;

const NOTICE: &str = "NOTICE: This software was developed under funding from public \
building-energy research programs, and the sponsoring agencies consequently retain \
certain rights. As such, the sponsors have been granted for themselves and others \
acting on their behalf a paid-up, nonexclusive, irrevocable, worldwide license in the \
software to reproduce, distribute copies to the public, prepare derivative works, and \
display publicly, and to permit others to do so.";

const PREAMBLE: &str = "Redistribution and use in source and binary forms, with or \
without modification, are permitted provided that the following conditions are met:";

const CONDITIONS: [&str; 4] = [
    "(1) Redistributions of source code must retain the above copyright notice, this \
list of conditions and the following disclaimer.",
    "(2) Redistributions in binary form must reproduce the above copyright notice, \
this list of conditions and the following disclaimer in the documentation and/or other \
materials provided with the distribution.",
    "(3) Neither the name of the ThermoSim Development Consortium, the Institute for \
Building Energy Research, nor the names of its contributors may be used to endorse or \
promote products derived from this software without specific prior written permission.",
    "(4) Use of the ThermoSim name. If Licensee (i) distributes the software in \
stand-alone form without changes from the version obtained under this license, or (ii) \
makes a reference solely to the software portion of its product, Licensee must refer \
to the software as \"ThermoSim version X\" software, where \"X\" is the version number \
Licensee obtained under this license, and may not use a different name for the \
software.",
];

const DISCLAIMER: &str = "THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND \
CONTRIBUTORS \"AS IS\" AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT \
LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR \
PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT OWNER OR CONTRIBUTORS BE \
LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL \
DAMAGES HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT \
LIABILITY, OR TORT, ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF \
ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.";

/// One paragraph of license text, wrapped into lines at construction.
/// Line order is meaningful and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    lines: Vec<String>,
}

impl Paragraph {
    /// Greedy word-wrap at `width` columns. Numbered condition paragraphs
    /// (`(1) ...`) get a 4-space hanging indent on continuation lines.
    fn wrap(text: &str, width: usize) -> Self {
        let indent = if is_numbered_condition(text) { "    " } else { "" };
        let mut lines: Vec<String> = Vec::new();
        let mut line = String::new();
        for word in text.split_whitespace() {
            if line.is_empty() {
                if !lines.is_empty() {
                    line.push_str(indent);
                }
                line.push_str(word);
            } else if line.len() + 1 + word.len() <= width {
                line.push(' ');
                line.push_str(word);
            } else {
                lines.push(std::mem::take(&mut line));
                line.push_str(indent);
                line.push_str(word);
            }
        }
        if !line.is_empty() {
            lines.push(line);
        }
        Paragraph { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

fn is_numbered_condition(text: &str) -> bool {
    let b = text.as_bytes();
    b.len() > 3 && b[0] == b'(' && b[1].is_ascii_digit() && b[2] == b')' && b[3] == b' '
}

/// One canonical edition of the license: an ordered, immutable sequence of
/// pre-wrapped paragraphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseVersion {
    paragraphs: Vec<Paragraph>,
}

impl LicenseVersion {
    /// The current edition, wrapped wide. Authoritative for LICENSE.txt and
    /// native-dialect headers.
    pub fn current() -> Self {
        Self::assemble(CURRENT_COPYRIGHT_YEAR, WIDE_WIDTH)
    }

    /// The current edition re-wrapped narrow for line-comment framing in
    /// script files. Same legal text, different line breaks.
    pub fn current_script() -> Self {
        Self::assemble(CURRENT_COPYRIGHT_YEAR, NARROW_WIDTH)
    }

    /// Wide-wrapped edition with a different copyright end year. Exists so
    /// stale-year fixtures can be produced without string surgery.
    pub fn with_end_year(end_year: u16) -> Self {
        Self::assemble(end_year, WIDE_WIDTH)
    }

    fn assemble(end_year: u16, width: usize) -> Self {
        let copyright = format!(
            "ThermoSim, Copyright (c) {}-{}, The ThermoSim Development Consortium, the \
             Institute for Building Energy Research, and other contributors. All rights \
             reserved.",
            FIRST_COPYRIGHT_YEAR, end_year
        );
        let mut sources: Vec<&str> = vec![&copyright, NOTICE, PREAMBLE];
        sources.extend(CONDITIONS);
        sources.push(DISCLAIMER);
        LicenseVersion {
            paragraphs: sources.into_iter().map(|t| Paragraph::wrap(t, width)).collect(),
        }
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }
}
