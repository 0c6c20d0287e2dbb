//! Two-ring donut: holders outside, government versus the rest inside.

use crate::data::{Group, Holdings, money};
use crate::pie::legend;
use crate::svg::{Svg, polar, sector_path};

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 600.0;
const CENTER: (f64, f64) = (330.0, 325.0);
const OUTER: (f64, f64) = (140.0, 230.0);
const INNER: (f64, f64) = (80.0, 136.0);
const START_ANGLE: f64 = 90.0;

const GOVERNMENT_COLOR: &str = "#3F51B5";
const NON_GOVERNMENT_COLOR: &str = "#FF6F00";

/// Government and non-government totals for the inner ring.
pub fn inner_split(holdings: &Holdings) -> (f64, f64) {
    let government: f64 = holdings.in_group(Group::Government).map(|h| h.amount).sum();
    (government, holdings.total() - government)
}

fn ring(svg: &mut Svg, parts: &[(f64, &str)], radii: (f64, f64), labels: &[String]) {
    let total: f64 = parts.iter().map(|(v, _)| v).sum();
    if total <= 0.0 {
        return;
    }
    let (cx, cy) = CENTER;
    let mut angle = START_ANGLE;
    for (i, (value, color)) in parts.iter().enumerate() {
        let sweep = value / total * 360.0;
        if sweep <= 0.0 {
            continue;
        }
        svg.path(
            &sector_path(cx, cy, radii.1, radii.0, angle, sweep),
            color,
            2.0,
        );
        if sweep >= 12.0
            && let Some(label) = labels.get(i)
        {
            let (lx, ly) = polar(cx, cy, (radii.0 + radii.1) / 2.0, angle + sweep / 2.0);
            svg.text(lx, ly + 4.0, label, 11.0, "middle", "bold", "#ffffff");
        }
        angle += sweep;
    }
}

/// Render the donut chart.
pub fn donut_svg(holdings: &Holdings) -> String {
    let mut svg = Svg::new(
        WIDTH,
        HEIGHT,
        &format!("Government vs. Market Holdings ({})", holdings.as_of),
    );

    // Outer ring keeps source order so each group's holders sit together.
    let outer: Vec<(f64, &str)> = holdings
        .items
        .iter()
        .map(|h| (h.amount, h.color.as_str()))
        .collect();
    let outer_labels: Vec<String> = holdings
        .items
        .iter()
        .map(|h| format!("{:.0}%", holdings.share(h.amount)))
        .collect();
    ring(&mut svg, &outer, OUTER, &outer_labels);

    let (government, other) = inner_split(holdings);
    ring(
        &mut svg,
        &[(government, GOVERNMENT_COLOR), (other, NON_GOVERNMENT_COLOR)],
        INNER,
        &[
            format!("Gov {}", money(government)),
            format!("Non-Gov {}", money(other)),
        ],
    );

    let (cx, cy) = CENTER;
    svg.text(
        cx,
        cy + 6.0,
        &format!("${:.0}T Total", holdings.total()),
        16.0,
        "middle",
        "bold",
        "#222222",
    );

    legend(&mut svg, holdings, 640.0, 160.0);
    let key_y = 160.0 + holdings.items.len() as f64 * 26.0 + 20.0;
    svg.rect(640.0, key_y - 12.0, 14.0, 14.0, GOVERNMENT_COLOR, None);
    svg.text(662.0, key_y, "Government (inner)", 12.0, "start", "normal", "#333333");
    svg.rect(640.0, key_y + 14.0, 14.0, 14.0, NON_GOVERNMENT_COLOR, None);
    svg.text(662.0, key_y + 26.0, "Non-Government (inner)", 12.0, "start", "normal", "#333333");
    svg.finish()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_split_sums_to_total() {
        let h = Holdings::default();
        let (gov, other) = inner_split(&h);
        assert!((gov + other - 36.0).abs() < 1e-9);
        assert!((gov - 13.3 * 36.0 / 37.6).abs() < 1e-9);
    }

    #[test]
    fn test_donut_svg_contents() {
        let svg = donut_svg(&Holdings::default());
        // 7 outer sectors + 2 inner sectors
        assert_eq!(svg.matches("<path").count(), 9);
        assert!(svg.contains("$36T Total"));
        assert!(svg.contains(GOVERNMENT_COLOR));
        assert!(svg.contains(NON_GOVERNMENT_COLOR));
    }

    #[test]
    fn test_outer_ring_in_source_order() {
        let holdings = Holdings::default();
        let svg = donut_svg(&holdings);
        let fills: Vec<&str> = svg
            .split("<path")
            .skip(1)
            .filter_map(|p| p.split("fill=\"").nth(1))
            .filter_map(|p| p.split('"').next())
            .collect();
        let expected: Vec<&str> = holdings.items.iter().map(|h| h.color.as_str()).collect();
        assert_eq!(&fills[..expected.len()], expected.as_slice());
        // Largest holder is not first in source order.
        assert_ne!(fills[0], holdings.sorted_desc()[0].color);
    }
}
