//! Text summary and the combined HTML dashboard.

use std::fmt::{self, Write};

use crate::data::Holdings;
use crate::{donut_svg, pie_svg, sankey_svg, treemap_svg};

/// Fixed-width summary, largest holder first, with a TOTAL row.
pub fn summary_table(holdings: &Holdings) -> String {
    let mut out = String::new();
    write_summary(&mut out, holdings)
        .map(|()| out)
        .unwrap_or_default()
}

fn write_summary(out: &mut String, holdings: &Holdings) -> fmt::Result {
    let rule = "-".repeat(50);
    writeln!(out, "U.S. Treasury Ownership ({})", holdings.as_of)?;
    writeln!(out, "{rule}")?;
    for h in holdings.sorted_desc() {
        writeln!(
            out,
            "{:<30} ${:>5.1}T ({:>5.1}%)",
            h.name,
            h.amount,
            holdings.share(h.amount)
        )?;
    }
    writeln!(out, "{rule}")?;
    writeln!(
        out,
        "{:<30} ${:>5.1}T ({:>5.1}%)",
        "TOTAL",
        holdings.total(),
        100.0
    )
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// One HTML page holding all four charts and the summary.
pub fn dashboard_html(holdings: &Holdings) -> String {
    let mut page = String::with_capacity(256 * 1024);
    write_dashboard(&mut page, holdings)
        .map(|()| page)
        .unwrap_or_default()
}

fn write_dashboard(page: &mut String, holdings: &Holdings) -> fmt::Result {
    let charts = [
        ("Ownership Share", pie_svg(holdings)),
        ("Relative Size", treemap_svg(holdings)),
        ("Ownership Flow", sankey_svg(holdings)),
        ("Government vs. Market", donut_svg(holdings)),
    ];

    page.push_str(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>U.S. Treasury Market Ownership Analysis</title>
<style>
body { font-family: Helvetica, Arial, sans-serif; margin: 0; background: #f4f6f8; color: #222; }
header { background: #2E5090; color: #fff; padding: 1.5rem 2rem; }
header h1 { margin: 0 0 .3rem; font-size: 1.7rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(560px, 1fr)); gap: 1.5rem; padding: 1.5rem; }
.card { background: #fff; border-radius: 8px; box-shadow: 0 1px 4px rgba(0,0,0,.1); padding: 1rem; }
.card h2 { margin: 0 0 .5rem; font-size: 1.1rem; color: #2E5090; }
.card svg { width: 100%; height: auto; }
pre { background: #fff; margin: 0 1.5rem 1.5rem; padding: 1rem; border-radius: 8px; }
</style>
</head>
<body>
"#,
    );
    writeln!(
        page,
        "<header><h1>U.S. Treasury Market Ownership Analysis - Complete Dashboard</h1>\
         <p>{} | Total Market Size: ${:.0} Trillion</p></header>",
        escape(&holdings.as_of),
        holdings.total()
    )?;
    page.push_str("<div class=\"grid\">\n");
    for (title, svg) in &charts {
        writeln!(page, "<section class=\"card\"><h2>{title}</h2>\n{svg}</section>")?;
    }
    page.push_str("</div>\n");
    writeln!(page, "<pre>{}</pre>", escape(&summary_table(holdings)))?;
    page.push_str("</body>\n</html>\n");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_table_rows() {
        let table = summary_table(&Holdings::default());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "U.S. Treasury Ownership (December 2025)");
        assert_eq!(
            lines[2],
            "Foreign Official Holders       $  8.1T ( 22.6%)"
        );
        assert_eq!(
            lines.last().unwrap(),
            &"TOTAL                          $ 36.0T (100.0%)"
        );
        assert_eq!(lines.len(), 11);
    }

    #[test]
    fn test_dashboard_contains_everything() {
        let html = dashboard_html(&Holdings::default());
        assert!(html.contains("Complete Dashboard"));
        assert!(html.contains("December 2025 | Total Market Size: $36 Trillion"));
        assert_eq!(html.matches("<svg").count(), 4);
        assert!(html.contains("TOTAL"));
        assert!(html.contains("U.S. Mutual Funds &amp; ETFs"));
    }
}
