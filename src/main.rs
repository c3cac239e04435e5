use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

// Import from our library
use license_header_audit::checker::{Checker, ExcludeSet};
use license_header_audit::config::{load_config, AuditConfig, DialectConfig};
use license_header_audit::license::{
    check_license_file, render_commented, render_plain, Dialect, LicenseVersion,
};
use license_header_audit::output::{CheckReport, DiagnosticMode};
use license_header_audit::init;

#[derive(Parser)]
#[command(name = "license-header-audit")]
#[command(about = "Verify license headers across the ThermoSim source tree")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the license compliance gate (the default)
    Check {
        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Plain-English diagnostics
        #[arg(long)]
        human: bool,

        /// Suppress the summary, print diagnostics only
        #[arg(short, long)]
        quiet: bool,

        /// Path to the configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the canonical license text
    Render {
        /// Framing to render
        #[arg(short, long, default_value = "plain")]
        dialect: RenderDialect,
    },
    /// Write a starter license-audit.toml
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
    /// Show or validate configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,

        /// Path to the configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Clone, ValueEnum)]
enum RenderDialect {
    Plain,
    Native,
    Script,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Check {
        format: None,
        human: false,
        quiet: false,
        config: None,
    }) {
        Commands::Check {
            format,
            human,
            quiet,
            config,
        } => handle_check(format, human, quiet, config),
        Commands::Render { dialect } => handle_render(dialect),
        Commands::Init { force } => init::generate_config(force),
        Commands::Config {
            show,
            validate,
            config,
        } => handle_config(show, validate, config),
    }
}

/// One license-file comparison plus one visit per dialect root. The process
/// result is the AND across all of them: exit 0 on full compliance, exit 1
/// on any mismatch. No partial or warning status exists.
fn handle_check(
    format: Option<OutputFormat>,
    human: bool,
    quiet: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config_path.as_deref())?;
    config.validate()?;

    let mode = if human {
        DiagnosticMode::Human
    } else {
        config.diagnostic_mode()
    };

    let mut report = CheckReport::new(config.toolname());

    // The standalone license file, byte for byte
    let current = LicenseVersion::current();
    report.record_license_file(check_license_file(&config.license_path(), &current)?);

    // Native headers
    run_dialect(&config, &config.native, &current, Dialect::Native, &mut report)?;

    // Script headers use the narrow-wrapped edition
    let script_version = LicenseVersion::current_script();
    run_dialect(&config, &config.script, &script_version, Dialect::Script, &mut report)?;

    let toolname = config.toolname();
    for diag in &report.diagnostics {
        eprintln!("{}", diag.render(toolname, mode));
    }

    let format = format.unwrap_or_else(|| match config.format.as_deref() {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Table,
    });
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => {
            if !quiet {
                print!("{}", report.format_summary());
            }
        }
    }

    if !report.success {
        std::process::exit(1);
    }
    Ok(())
}

fn run_dialect(
    config: &AuditConfig,
    section: &DialectConfig,
    version: &LicenseVersion,
    dialect: Dialect,
    report: &mut CheckReport,
) -> Result<()> {
    let checker = Checker::new(version, dialect, config.checker_options(section));
    let excludes = ExcludeSet::compile(&section.exclude)?;
    for root in &section.roots {
        report.absorb(checker.visit(root, &excludes));
    }
    Ok(())
}

fn handle_render(dialect: RenderDialect) -> Result<()> {
    let text = match dialect {
        RenderDialect::Plain => render_plain(&LicenseVersion::current()),
        RenderDialect::Native => render_commented(&LicenseVersion::current(), Dialect::Native),
        RenderDialect::Script => {
            render_commented(&LicenseVersion::current_script(), Dialect::Script)
        }
    };
    print!("{}", text);
    Ok(())
}

fn handle_config(show: bool, validate: bool, config_path: Option<PathBuf>) -> Result<()> {
    if show {
        match load_config(config_path.as_deref()) {
            Ok(config) => {
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            Err(e) => {
                eprintln!("Error loading configuration: {}", e);
                std::process::exit(1);
            }
        }
    }

    if validate {
        match load_config(config_path.as_deref()).and_then(|c| c.validate()) {
            Ok(_) => println!("Configuration is valid"),
            Err(e) => {
                eprintln!("Configuration validation failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    if !show && !validate {
        eprintln!("Use --show or --validate");
        std::process::exit(1);
    }

    Ok(())
}
