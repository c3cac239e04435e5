use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::CONFIG_FILE;

/// Starter configuration written by `init`. Matches the built-in defaults so
/// a freshly scaffolded run behaves the same as an unconfigured one.
const CONFIG_TEMPLATE: &str = r#"# license-audit configuration
# Every path and pattern is resolved relative to the directory the tool
# runs in, normally the repository root.

toolname = "license-audit"
license_file = "LICENSE.txt"
# "default" prints condensed parseable diagnostics, "human" spells them out
diagnostics = "default"
format = "table"

[native]
roots = ["./src", "./tst"]
extensions = ["cc", "hh"]

[script]
roots = ["./"]
extensions = ["py"]
shebang = true
empty_passes = true
# Regular expressions; a matching path is skipped without a verdict
exclude = [
    '.*third_party.*',
    '^\.(\\|/)build.*',
    '^\.(\\|/)bin.*',
    '.*readthedocs.*',
    '.*venv.*',
    '.*cmake-build-.*',
]
"#;

pub fn generate_config(force: bool) -> Result<()> {
    generate_config_at_path(CONFIG_FILE, force)
}

pub fn generate_config_at_path<P: AsRef<Path>>(path: P, force: bool) -> Result<()> {
    let path = path.as_ref();
    if path.exists() && !force {
        return Err(anyhow::anyhow!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }
    fs::write(path, CONFIG_TEMPLATE)?;
    println!("✅ Wrote {}", path.display());
    Ok(())
}
