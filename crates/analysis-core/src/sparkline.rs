//! Mini price-chart encoding.
//!
//! Prices are laid out as an SVG path on a fixed 120x40 canvas. X is spaced
//! evenly across the series, the lowest price sits on the bottom edge and the
//! highest on the top edge.

pub const SPARKLINE_WIDTH: f64 = 120.0;
pub const SPARKLINE_HEIGHT: f64 = 40.0;

/// Encode `prices` as an SVG path (`M x,y L x,y ...`).
///
/// Fewer than two points yields an empty string. A flat series degenerates
/// to a horizontal line through the middle of the canvas.
pub fn sparkline_path(prices: &[f64]) -> String {
    if prices.len() < 2 {
        return String::new();
    }

    let min_p = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max_p = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mid = SPARKLINE_HEIGHT / 2.0;

    if min_p == max_p {
        return format!("M 0,{:.1} L {},{:.1}", mid, SPARKLINE_WIDTH, mid);
    }

    let step = SPARKLINE_WIDTH / (prices.len() - 1) as f64;
    let points: Vec<String> = prices
        .iter()
        .enumerate()
        .map(|(i, price)| {
            let x = i as f64 * step;
            let y = SPARKLINE_HEIGHT - (price - min_p) / (max_p - min_p) * SPARKLINE_HEIGHT;
            format!("{:.1},{:.1}", x, y)
        })
        .collect();

    format!("M {}", points.join(" L "))
}

/// Percent change from the first to the last price, one decimal.
/// Returns 0 for fewer than two prices or a zero starting price.
pub fn trend_pct(prices: &[f64]) -> f64 {
    match (prices.first(), prices.last()) {
        (Some(&first), Some(&last)) if prices.len() > 1 && first != 0.0 => {
            crate::round_dp((last - first) / first * 100.0, 1)
        }
        _ => 0.0,
    }
}
