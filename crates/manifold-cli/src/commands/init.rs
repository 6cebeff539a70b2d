use std::path::Path;

use anyhow::bail;
use manifold_core::ManifoldConfig;

pub fn init(config_path: &Path, manifest: Option<&str>) -> anyhow::Result<()> {
    if config_path.exists() {
        bail!("{} already exists", config_path.display());
    }
    let config = ManifoldConfig::scaffold(manifest.unwrap_or("default"));
    config.validate()?;
    std::fs::write(config_path, config.to_toml_string()?)?;
    println!("✓ Generated {}", config_path.display());
    Ok(())
}
