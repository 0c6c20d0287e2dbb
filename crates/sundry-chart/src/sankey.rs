//! Three-column flow diagram: total, then group, then holder.

use crate::data::{Group, Holdings, money};
use crate::svg::{Svg, num};

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 640.0;
const TOP: f64 = 70.0;
const BOTTOM: f64 = 610.0;
const NODE_WIDTH: f64 = 22.0;
const GAP: f64 = 14.0;
const COLUMNS: [f64; 3] = [60.0, 400.0, 720.0];
const TREASURY_COLOR: &str = "#37474F";

/// A placed node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Label
    pub label: String,
    /// Column index, 0 to 2
    pub column: usize,
    /// Top edge
    pub y: f64,
    /// Height, proportional to value
    pub height: f64,
    /// Value in trillions
    pub value: f64,
    /// Fill colour
    pub color: String,
}

/// A band between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Flow {
    /// Source node index
    pub from: usize,
    /// Target node index
    pub to: usize,
    /// Band top at the source
    pub y0: f64,
    /// Band top at the target
    pub y1: f64,
    /// Band thickness
    pub width: f64,
    /// Fill colour
    pub color: &'static str,
}

/// Node and flow positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Treasury, then groups, then holders
    pub nodes: Vec<Node>,
    /// Total to group, then group to holder
    pub flows: Vec<Flow>,
}

fn column_scale(count: usize, total: f64) -> f64 {
    let gaps = count.saturating_sub(1) as f64 * GAP;
    if total > 0.0 {
        (BOTTOM - TOP - gaps) / total
    } else {
        0.0
    }
}

/// Compute positions. Groups with no holders are left out.
pub fn sankey_layout(holdings: &Holdings) -> Layout {
    let total = holdings.total();
    let groups: Vec<(Group, f64)> = holdings
        .group_totals()
        .into_iter()
        .filter(|(g, _)| holdings.in_group(*g).next().is_some())
        .collect();
    let holder_count = groups
        .iter()
        .map(|(g, _)| holdings.in_group(*g).count())
        .sum();
    // One scale for every column so band widths match at both ends.
    let scale = column_scale(holder_count, total);

    let mut nodes = vec![Node {
        label: "U.S. Treasuries".to_string(),
        column: 0,
        y: TOP + (BOTTOM - TOP - total * scale) / 2.0,
        height: total * scale,
        value: total,
        color: TREASURY_COLOR.to_string(),
    }];
    let mut flows = Vec::new();

    let group_span = total * scale + groups.len().saturating_sub(1) as f64 * GAP;
    let mut group_y = TOP + (BOTTOM - TOP - group_span) / 2.0;
    let mut treasury_offset = nodes[0].y;
    let mut holder_y = TOP;

    for (group, value) in &groups {
        let group_index = nodes.len();
        let height = value * scale;
        nodes.push(Node {
            label: group.label().to_string(),
            column: 1,
            y: group_y,
            height,
            value: *value,
            color: group.color().to_string(),
        });
        flows.push(Flow {
            from: 0,
            to: group_index,
            y0: treasury_offset,
            y1: group_y,
            width: height,
            color: group.flow_color(),
        });
        treasury_offset += height;

        let mut group_offset = group_y;
        for holding in holdings.in_group(*group) {
            let h = holding.amount * scale;
            let index = nodes.len();
            nodes.push(Node {
                label: holding.name.clone(),
                column: 2,
                y: holder_y,
                height: h,
                value: holding.amount,
                color: holding.color.clone(),
            });
            flows.push(Flow {
                from: group_index,
                to: index,
                y0: group_offset,
                y1: holder_y,
                width: h,
                color: group.flow_color(),
            });
            group_offset += h;
            holder_y += h + GAP;
        }
        group_y += height + GAP;
    }

    Layout { nodes, flows }
}

fn band_path(x0: f64, y0: f64, x1: f64, y1: f64, width: f64) -> String {
    let xm = (x0 + x1) / 2.0;
    format!(
        "M {x0} {y0} C {xm} {y0} {xm} {y1} {x1} {y1} L {x1} {y1b} C {xm} {y1b} {xm} {y0b} {x0} {y0b} Z",
        x0 = num(x0),
        y0 = num(y0),
        x1 = num(x1),
        y1 = num(y1),
        xm = num(xm),
        y0b = num(y0 + width),
        y1b = num(y1 + width),
    )
}

/// Render the flow diagram.
pub fn sankey_svg(holdings: &Holdings) -> String {
    let mut svg = Svg::new(
        WIDTH,
        HEIGHT,
        &format!("Flow of Treasury Ownership ({})", holdings.as_of),
    );
    let layout = sankey_layout(holdings);

    for flow in &layout.flows {
        let from = &layout.nodes[flow.from];
        let to = &layout.nodes[flow.to];
        let d = band_path(
            COLUMNS[from.column] + NODE_WIDTH,
            flow.y0,
            COLUMNS[to.column],
            flow.y1,
            flow.width,
        );
        svg.raw(&format!(r#"<path d="{d}" fill="{}"/>"#, flow.color));
    }

    for node in &layout.nodes {
        let x = COLUMNS[node.column];
        svg.rect(x, node.y, NODE_WIDTH, node.height, &node.color, None);
        let lx = x + NODE_WIDTH + 8.0;
        let mid = node.y + node.height / 2.0;
        svg.text(lx, mid - 2.0, &node.label, 12.0, "start", "bold", "#333333");
        svg.text(lx, mid + 13.0, &money(node.value), 11.0, "start", "normal", "#555555");
    }
    svg.finish()
}
