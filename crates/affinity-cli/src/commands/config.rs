use std::path::Path;

use affinity_core::AffinityConfig;

pub fn init(path: &str, force: bool) -> anyhow::Result<()> {
    let output = Path::new(path);
    write_default(output, force)?;
    println!("✓ Generated {}", output.display());
    Ok(())
}

pub fn check(path: &str) -> anyhow::Result<()> {
    let config = AffinityConfig::from_file(Path::new(path))?;
    println!("✓ {path} is valid");
    print!("{}", config.to_toml_string()?);
    Ok(())
}

fn write_default(output: &Path, force: bool) -> anyhow::Result<()> {
    if output.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", output.display());
    }
    std::fs::write(output, AffinityConfig::default().to_toml_string()?)?;
    Ok(())
}
