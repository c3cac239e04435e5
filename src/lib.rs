pub mod checker;
pub mod config;
pub mod engine;
pub mod init;
pub mod license;
pub mod output;

// Re-export main types for easy access
pub use checker::{Checker, CheckerOptions, ExcludeSet, VisitReport};
pub use license::{Dialect, LicenseVersion};
pub use output::{CheckReport, Diagnostic, DiagnosticMode, Verdict};
