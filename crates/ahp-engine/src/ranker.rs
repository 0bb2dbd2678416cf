//! Candidate Ranking Module
//!
//! Each raw metric is turned into a share of the candidate set (so every
//! criterion column sums to 1), then weighted by the AHP priorities.

use analysis_core::{
    round_dp, Criterion, CriterionScores, MetricsDisplay, RankedResult, StockMetrics,
    WeightVector,
};

/// Keeps 1/x finite for beta or P/E of exactly zero
const INVERSE_OFFSET: f64 = 0.01;

/// Lower bound on the denominator of columns that can be all zero
const ZERO_SUM_FLOOR: f64 = 0.0001;

/// Divide each value by the column total. Non-finite shares become 0.
fn share_of_total(values: &[f64], floor: Option<f64>) -> Vec<f64> {
    let sum: f64 = values.iter().sum();
    let denom = match floor {
        Some(f) => sum.max(f),
        None => sum,
    };
    values
        .iter()
        .map(|v| {
            let s = v / denom;
            if s.is_finite() { s } else { 0.0 }
        })
        .collect()
}

fn inverse(x: f64) -> f64 {
    1.0 / (x + INVERSE_OFFSET)
}

/// Per-candidate normalized values, in input order.
///
/// - Risk: lower beta is better, so 1/beta is shared out.
/// - Profit: negative margins count as zero.
/// - Value: lower P/E is cheaper, so 1/PE is shared out.
/// - Dividend: raw yield.
pub fn normalize_candidates(metrics: &[StockMetrics]) -> Vec<CriterionScores> {
    let risk: Vec<f64> = metrics.iter().map(|m| inverse(m.fundamentals.beta)).collect();
    let profit: Vec<f64> = metrics
        .iter()
        .map(|m| m.fundamentals.profit_margin.max(0.0))
        .collect();
    let value: Vec<f64> = metrics
        .iter()
        .map(|m| inverse(m.fundamentals.trailing_pe))
        .collect();
    let dividend: Vec<f64> = metrics.iter().map(|m| m.fundamentals.dividend_yield).collect();

    let risk = share_of_total(&risk, None);
    let profit = share_of_total(&profit, Some(ZERO_SUM_FLOOR));
    let value = share_of_total(&value, None);
    let dividend = share_of_total(&dividend, Some(ZERO_SUM_FLOOR));

    (0..metrics.len())
        .map(|i| CriterionScores {
            risk: risk[i],
            profit: profit[i],
            value: value[i],
            dividend: dividend[i],
        })
        .collect()
}

/// Score and sort candidates, best first.
///
/// Scores are `100 * (normalized . weights)` rounded to one decimal. The sort
/// is stable, so equal scores keep their input order. The reason is the
/// criterion with the largest weighted contribution, ties resolved in the
/// order Risk, Profit, Value, Dividend.
pub fn rank_candidates(metrics: Vec<StockMetrics>, weights: &WeightVector) -> Vec<RankedResult> {
    if metrics.is_empty() {
        return Vec::new();
    }

    let normalized = normalize_candidates(&metrics);

    let mut results: Vec<RankedResult> = metrics
        .into_iter()
        .zip(normalized)
        .map(|(metrics, normalized)| {
            let contributions = normalized.weighted(weights);
            RankedResult {
                score: round_dp(contributions.total() * 100.0, 1),
                reason: contributions.dominant(),
                display: MetricsDisplay::from(&metrics.fundamentals),
                metrics,
                normalized,
                contributions,
            }
        })
        .collect();

    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if let Some(top) = results.first() {
        tracing::debug!(
            "Ranked {} candidates, top {} ({:.1}, {})",
            results.len(),
            top.metrics.ticker,
            top.score,
            top.reason.label()
        );
    }

    results
}
