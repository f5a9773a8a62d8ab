use std::path::Path;

use anyhow::bail;
use vmplan_core::PlannerConfig;

pub fn init(path: &str) -> anyhow::Result<()> {
    let output = Path::new(path).join("vmplan.toml");
    if output.exists() {
        bail!("{} already exists", output.display());
    }
    std::fs::write(&output, PlannerConfig::scaffold().to_toml_string()?)?;
    println!("✓ Generated {}", output.display());
    Ok(())
}
