//! Squarified treemap.

use crate::data::{Holdings, money};
use crate::svg::Svg;

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 600.0;
const AREA: Rect = Rect {
    x: 20.0,
    y: 60.0,
    w: 920.0,
    h: 520.0,
};

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub w: f64,
    /// Height
    pub h: f64,
}

impl Rect {
    /// Area.
    pub fn area(&self) -> f64 {
        self.w * self.h
    }
}

/// Worst aspect ratio of a row laid along a side of length `side`.
fn worst(row: &[f64], side: f64) -> f64 {
    let sum: f64 = row.iter().sum();
    if sum <= 0.0 || side <= 0.0 {
        return f64::INFINITY;
    }
    let max = row.iter().copied().fold(f64::MIN, f64::max);
    let min = row.iter().copied().fold(f64::MAX, f64::min);
    if min <= 0.0 {
        return f64::INFINITY;
    }
    let s2 = sum * sum;
    let side2 = side * side;
    (side2 * max / s2).max(s2 / (side2 * min))
}

/// Place `row` along the shorter side of `rect`; returns what is left.
fn layout_row(row: &[f64], rect: Rect, out: &mut Vec<Rect>) -> Rect {
    let sum: f64 = row.iter().sum();
    if sum <= 0.0 {
        out.extend(row.iter().map(|_| Rect { w: 0.0, h: 0.0, ..rect }));
        return rect;
    }
    if rect.w >= rect.h {
        let col_w = sum / rect.h;
        let mut y = rect.y;
        for &a in row {
            let h = a / col_w;
            out.push(Rect { x: rect.x, y, w: col_w, h });
            y += h;
        }
        Rect {
            x: rect.x + col_w,
            w: (rect.w - col_w).max(0.0),
            ..rect
        }
    } else {
        let row_h = sum / rect.w;
        let mut x = rect.x;
        for &a in row {
            let w = a / row_h;
            out.push(Rect { x, y: rect.y, w, h: row_h });
            x += w;
        }
        Rect {
            y: rect.y + row_h,
            h: (rect.h - row_h).max(0.0),
            ..rect
        }
    }
}

/// Split `rect` into one tile per value, areas proportional to the values.
///
/// Values should be sorted largest first for the best aspect ratios.
/// Non-positive values get empty tiles. Output order matches input order.
pub fn squarify(values: &[f64], rect: Rect) -> Vec<Rect> {
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    if total <= 0.0 {
        return values.iter().map(|_| Rect { w: 0.0, h: 0.0, ..rect }).collect();
    }
    let scale = rect.area() / total;
    let areas: Vec<f64> = values.iter().map(|v| v.max(0.0) * scale).collect();

    let mut out = Vec::with_capacity(areas.len());
    let mut free = rect;
    let mut start = 0;
    while start < areas.len() {
        let side = free.w.min(free.h);
        let mut end = start + 1;
        let mut best = worst(&areas[start..end], side);
        while end < areas.len() {
            let candidate = worst(&areas[start..=end], side);
            if candidate > best {
                break;
            }
            best = candidate;
            end += 1;
        }
        free = layout_row(&areas[start..end], free, &mut out);
        start = end;
    }
    out
}

/// Render the treemap.
pub fn treemap_svg(holdings: &Holdings) -> String {
    let mut svg = Svg::new(
        WIDTH,
        HEIGHT,
        &format!("Treasury Holdings by Size ({})", holdings.as_of),
    );
    let sorted = holdings.sorted_desc();
    let values: Vec<f64> = sorted.iter().map(|h| h.amount).collect();

    for (h, tile) in sorted.iter().zip(squarify(&values, AREA)) {
        if tile.area() <= 0.0 {
            continue;
        }
        svg.rect(tile.x, tile.y, tile.w, tile.h, &h.color, Some(3.0));
        let cx = tile.x + tile.w / 2.0;
        let cy = tile.y + tile.h / 2.0;
        let share = holdings.share(h.amount);
        if tile.w > 160.0 && tile.h > 70.0 {
            svg.text(cx, cy - 14.0, &h.name, 15.0, "middle", "bold", "#ffffff");
            svg.text(cx, cy + 6.0, &money(h.amount), 14.0, "middle", "normal", "#ffffff");
            svg.text(cx, cy + 24.0, &format!("{share:.1}%"), 13.0, "middle", "normal", "#ffffff");
        } else {
            svg.text(cx, cy - 4.0, &h.short, 12.0, "middle", "bold", "#ffffff");
            svg.text(
                cx,
                cy + 12.0,
                &format!("{} ({share:.0}%)", money(h.amount)),
                11.0,
                "middle",
                "normal",
                "#ffffff",
            );
        }
    }
    svg.finish()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const UNIT: Rect = Rect {
        x: 0.0,
        y: 0.0,
        w: 6.0,
        h: 4.0,
    };

    fn assert_tiles_cover(values: &[f64], rect: Rect, tiles: &[Rect]) {
        assert_eq!(tiles.len(), values.len());
        let total: f64 = values.iter().sum();
        let area: f64 = tiles.iter().map(Rect::area).sum();
        assert!((area - rect.area()).abs() < 1e-6 * rect.area());
        for (v, t) in values.iter().zip(tiles) {
            assert!((t.area() - v / total * rect.area()).abs() < 1e-6 * rect.area());
            assert!(t.x >= rect.x - 1e-9 && t.y >= rect.y - 1e-9);
            assert!(t.x + t.w <= rect.x + rect.w + 1e-6);
            assert!(t.y + t.h <= rect.y + rect.h + 1e-6);
        }
    }

    #[test]
    fn test_squarify_classic_example() {
        // The worked example from Bruls, Huizing and van Wijk.
        let values = [6.0, 6.0, 4.0, 3.0, 2.0, 2.0, 1.0];
        let tiles = squarify(&values, UNIT);
        assert_tiles_cover(&values, UNIT, &tiles);
        // First row: the two 6s stacked in a 3-wide column.
        assert_eq!(tiles[0], Rect { x: 0.0, y: 0.0, w: 3.0, h: 2.0 });
        assert_eq!(tiles[1], Rect { x: 0.0, y: 2.0, w: 3.0, h: 2.0 });
    }

    #[test]
    fn test_squarify_single_value_fills_rect() {
        let tiles = squarify(&[5.0], UNIT);
        assert_eq!(tiles, vec![UNIT]);
    }

    #[test]
    fn test_squarify_zero_values() {
        let tiles = squarify(&[3.0, 0.0], UNIT);
        assert_eq!(tiles.len(), 2);
        assert!((tiles[0].area() - UNIT.area()).abs() < 1e-9);
        assert_eq!(tiles[1].area(), 0.0);
        assert!(squarify(&[], UNIT).is_empty());
    }

    #[test]
    fn test_treemap_svg_tiles() {
        let svg = treemap_svg(&Holdings::default());
        // background + one tile per holder
        assert_eq!(svg.matches("<rect").count(), 8);
        assert!(svg.contains("Foreign Official Holders"));
    }

    proptest! {
        #[test]
        fn squarify_tiles_the_rectangle(
            mut values in proptest::collection::vec(0.1f64..50.0, 1..15),
            w in 10.0f64..1000.0,
            h in 10.0f64..1000.0,
        ) {
            values.sort_by(|a, b| b.total_cmp(a));
            let rect = Rect { x: 5.0, y: 7.0, w, h };
            let tiles = squarify(&values, rect);
            assert_tiles_cover(&values, rect, &tiles);
        }
    }
}
