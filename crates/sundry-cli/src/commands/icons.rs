//! `sundry icons`

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use sundry_core::SundryConfig;
use sundry_png::{IconStyle, write_icon_set};

pub fn run(config: &SundryConfig, out: Option<PathBuf>, sizes: Vec<u32>) -> Result<()> {
    let out = out.unwrap_or_else(|| config.icons.out_dir.clone());
    let sizes = if sizes.is_empty() {
        config.icons.sizes.clone()
    } else {
        sizes
    };
    if sizes.is_empty() {
        bail!("No icon sizes given");
    }

    let written = write_icon_set(&out, &sizes, &IconStyle::default())
        .with_context(|| format!("Failed to write icons to {}", out.display()))?;
    for path in &written {
        println!("Created {}", path.display());
    }
    println!("{} icon(s) written to {}", written.len(), out.display());
    Ok(())
}
