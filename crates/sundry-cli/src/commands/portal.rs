//! `sundry portal build`

use std::path::Path;

use anyhow::{Context, Result};
use sundry_core::SundryConfig;
use sundry_portal::{build_from_manifest, write_portal};

use crate::cli::PortalAction;

pub fn run(config: &SundryConfig, action: PortalAction) -> Result<()> {
    match action {
        PortalAction::Build { manifests, out_dir } => {
            let out_dir = out_dir.unwrap_or_else(|| config.portal.out_dir.clone());
            for manifest in &manifests {
                build_one(manifest, &out_dir)?;
            }
            Ok(())
        }
    }
}

fn build_one(manifest: &Path, out_dir: &Path) -> Result<()> {
    let portal = build_from_manifest(manifest)
        .with_context(|| format!("Failed to build portal from {}", manifest.display()))?;
    let path = out_dir.join(&portal.output);
    write_portal(&portal, &path)?;

    println!("{}", portal.title);
    println!("  Documents:  {}", portal.documents.len());
    println!("  Categories: {}", portal.categories);
    for missing in &portal.missing {
        println!("  Skipped (missing): {}", missing.display());
    }
    println!("  Written to: {}", path.display());
    Ok(())
}
