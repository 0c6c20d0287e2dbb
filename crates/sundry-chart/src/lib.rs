//! U.S. Treasury ownership charts.
//!
//! Each chart is rendered to a standalone SVG string with no external
//! assets; [`dashboard_html`] combines them into one page.
//!
//! ```
//! use sundry_chart::{Holdings, pie_svg, summary_table};
//!
//! let holdings = Holdings::default();
//! assert!((holdings.total() - 36.0).abs() < 1e-9);
//! assert!(pie_svg(&holdings).starts_with("<svg"));
//! assert!(summary_table(&holdings).contains("TOTAL"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod data;
pub mod donut;
pub mod error;
pub mod pie;
pub mod report;
pub mod sankey;
pub mod svg;
pub mod treemap;

use std::path::{Path, PathBuf};

pub use data::{DEFAULT_TOTAL, Group, Holding, Holdings};
pub use donut::donut_svg;
pub use error::{Error, Result};
pub use pie::pie_svg;
pub use report::{dashboard_html, summary_table};
pub use sankey::sankey_svg;
pub use treemap::{Rect, squarify, treemap_svg};

/// File names written by [`write_charts`], in order.
pub const OUTPUT_FILES: [&str; 5] = [
    "pie.svg",
    "treemap.svg",
    "sankey.svg",
    "donut.svg",
    "dashboard.html",
];

/// Write every chart and the dashboard into `dir`.
pub fn write_charts(dir: &Path, holdings: &Holdings) -> Result<Vec<PathBuf>> {
    let contents = [
        pie_svg(holdings),
        treemap_svg(holdings),
        sankey_svg(holdings),
        donut_svg(holdings),
        dashboard_html(holdings),
    ];
    let mut written = Vec::with_capacity(contents.len());
    for (name, content) in OUTPUT_FILES.iter().zip(contents) {
        let path = dir.join(name);
        sundry_core::write_atomic(&path, content.as_bytes())?;
        log::info!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
