//! `sundry chart`

use std::path::PathBuf;

use anyhow::Result;
use sundry_chart::{Holdings, summary_table, write_charts};
use sundry_core::SundryConfig;

pub fn run(
    config: &SundryConfig,
    out: Option<PathBuf>,
    total: Option<f64>,
    summary_only: bool,
) -> Result<()> {
    let total = total.unwrap_or(config.chart.total);
    let holdings = Holdings::raw().normalized(total)?;

    print!("{}", summary_table(&holdings));
    if summary_only {
        return Ok(());
    }

    let out = out.unwrap_or_else(|| config.chart.out_dir.clone());
    let written = write_charts(&out, &holdings)?;
    println!();
    for path in &written {
        println!("Created {}", path.display());
    }
    Ok(())
}
