use serde::{Deserialize, Serialize};

pub const DEFAULT_BETA: f64 = 1.5;
pub const DEFAULT_PROFIT_MARGIN: f64 = 0.0;
pub const DEFAULT_TRAILING_PE: f64 = 50.0;
pub const DEFAULT_DIVIDEND_YIELD: f64 = 0.0;

/// Round to a fixed number of decimal places, halves to even.
pub fn round_dp(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// Decision criteria, in the fixed order used by every vector in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Criterion {
    Risk,
    Profit,
    Value,
    Dividend,
}

impl Criterion {
    pub const ALL: [Criterion; 4] = [
        Criterion::Risk,
        Criterion::Profit,
        Criterion::Value,
        Criterion::Dividend,
    ];

    pub fn index(self) -> usize {
        match self {
            Criterion::Risk => 0,
            Criterion::Profit => 1,
            Criterion::Value => 2,
            Criterion::Dividend => 3,
        }
    }

    /// Human-readable label shown as the ranking reason
    pub fn label(&self) -> &'static str {
        match self {
            Criterion::Risk => "Reliability",
            Criterion::Profit => "Growth",
            Criterion::Value => "Cheapness",
            Criterion::Dividend => "Dividends",
        }
    }
}

/// Six pairwise preference sliders, each nominally an integer in [-4, 4].
///
/// A negative value favors the first-named criterion of the pair, a positive
/// value the second one, and 0 means indifferent. Values are kept as `f64`
/// so that fractional or out-of-range input survives until weight derivation,
/// which rounds and fails closed instead of rejecting it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SliderInput {
    #[serde(default)]
    pub risk_profit: f64,
    #[serde(default)]
    pub risk_value: f64,
    #[serde(default)]
    pub risk_div: f64,
    #[serde(default)]
    pub profit_value: f64,
    #[serde(default)]
    pub profit_div: f64,
    #[serde(default)]
    pub value_div: f64,
}

/// Priority weights over (Risk, Profit, Value, Dividend). Sums to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector([f64; 4]);

impl WeightVector {
    pub fn new(weights: [f64; 4]) -> Self {
        Self(weights)
    }

    pub fn uniform() -> Self {
        Self([0.25; 4])
    }

    pub fn get(&self, criterion: Criterion) -> f64 {
        self.0[criterion.index()]
    }

    pub fn as_array(&self) -> [f64; 4] {
        self.0
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Whole-number percentages for display
    pub fn percentages(&self) -> WeightPercentages {
        let pct = |c: Criterion| (self.get(c) * 100.0).round_ties_even() as u32;
        WeightPercentages {
            risk: pct(Criterion::Risk),
            profit: pct(Criterion::Profit),
            value: pct(Criterion::Value),
            dividend: pct(Criterion::Dividend),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightPercentages {
    pub risk: u32,
    pub profit: u32,
    pub value: u32,
    pub dividend: u32,
}

/// One value per criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CriterionScores {
    pub risk: f64,
    pub profit: f64,
    pub value: f64,
    pub dividend: f64,
}

impl CriterionScores {
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Risk => self.risk,
            Criterion::Profit => self.profit,
            Criterion::Value => self.value,
            Criterion::Dividend => self.dividend,
        }
    }

    pub fn weighted(&self, weights: &WeightVector) -> CriterionScores {
        CriterionScores {
            risk: self.risk * weights.get(Criterion::Risk),
            profit: self.profit * weights.get(Criterion::Profit),
            value: self.value * weights.get(Criterion::Value),
            dividend: self.dividend * weights.get(Criterion::Dividend),
        }
    }

    pub fn total(&self) -> f64 {
        self.risk + self.profit + self.value + self.dividend
    }

    /// Criterion with the largest value. Ties go to the earliest criterion.
    pub fn dominant(&self) -> Criterion {
        let mut best = Criterion::Risk;
        for criterion in Criterion::ALL.into_iter().skip(1) {
            if self.get(criterion) > self.get(best) {
                best = criterion;
            }
        }
        best
    }
}

/// Analyst consensus derived from the provider's recommendation key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
    NoData,
    Unknown,
}

impl Recommendation {
    pub fn from_key(key: Option<&str>) -> Self {
        match key.unwrap_or("none") {
            "strong_buy" => Recommendation::StrongBuy,
            "buy" => Recommendation::Buy,
            "hold" => Recommendation::Hold,
            "sell" => Recommendation::Sell,
            "strong_sell" => Recommendation::StrongSell,
            "none" => Recommendation::NoData,
            _ => Recommendation::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "Strong Buy",
            Recommendation::Buy => "Buy",
            Recommendation::Hold => "Hold",
            Recommendation::Sell => "Sell",
            Recommendation::StrongSell => "Strong Sell",
            Recommendation::NoData => "No data",
            Recommendation::Unknown => "Unknown",
        }
    }
}

/// Display category for a provider sector name. Unknown or missing sectors
/// fall into "Other".
pub fn sector_category(sector: Option<&str>) -> &'static str {
    match sector.unwrap_or_default() {
        "Technology" => "Technology",
        "Financial Services" => "Finance",
        "Healthcare" => "Healthcare",
        "Consumer Cyclical" => "Autos/Consumer",
        "Consumer Defensive" => "Food/Beverages",
        "Energy" => "Energy",
        "Industrials" => "Industrials",
        "Communication Services" => "Telecom",
        "Utilities" => "Utilities",
        "Real Estate" => "Real Estate",
        "Basic Materials" => "Raw Materials",
        _ => "Other",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
    /// Headlines could not be retrieved
    NoData,
}

impl SentimentLabel {
    pub fn label(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::NoData => "No data",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub score: i32,
    pub label: SentimentLabel,
}

impl SentimentSummary {
    pub fn no_data() -> Self {
        Self {
            score: 0,
            label: SentimentLabel::NoData,
        }
    }
}

impl Default for SentimentSummary {
    fn default() -> Self {
        Self {
            score: 0,
            label: SentimentLabel::Neutral,
        }
    }
}

/// Raw provider payload for one ticker. Every fundamental is optional here
/// and gets its default in [`TickerSnapshot::fundamentals`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickerSnapshot {
    pub symbol: String,
    pub name: Option<String>,
    pub current_price: Option<f64>,
    pub beta: Option<f64>,
    pub profit_margin: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub sector: Option<String>,
    pub recommendation_key: Option<String>,
    /// Daily closes over the last month, oldest first
    #[serde(default)]
    pub closes: Vec<f64>,
    /// `None` when the news lookup itself failed
    pub headlines: Option<Vec<String>>,
}

impl TickerSnapshot {
    pub fn fundamentals(&self) -> Fundamentals {
        Fundamentals {
            beta: self.beta.unwrap_or(DEFAULT_BETA),
            profit_margin: self.profit_margin.unwrap_or(DEFAULT_PROFIT_MARGIN),
            trailing_pe: self.trailing_pe.unwrap_or(DEFAULT_TRAILING_PE),
            dividend_yield: self.dividend_yield.unwrap_or(DEFAULT_DIVIDEND_YIELD),
        }
    }
}

/// The four raw metrics the ranker consumes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    pub beta: f64,
    pub profit_margin: f64,
    pub trailing_pe: f64,
    pub dividend_yield: f64,
}

impl Default for Fundamentals {
    fn default() -> Self {
        Self {
            beta: DEFAULT_BETA,
            profit_margin: DEFAULT_PROFIT_MARGIN,
            trailing_pe: DEFAULT_TRAILING_PE,
            dividend_yield: DEFAULT_DIVIDEND_YIELD,
        }
    }
}

/// Fully resolved per-ticker record fed to the ranker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMetrics {
    pub ticker: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(flatten)]
    pub fundamentals: Fundamentals,
    pub history: Vec<f64>,
    pub sparkline: String,
    /// Percent change from first to last close
    pub trend_pct: f64,
    pub sentiment: SentimentSummary,
    pub recommendation: Recommendation,
}

impl StockMetrics {
    /// Bare record with only the ranked metrics populated
    pub fn with_fundamentals(ticker: &str, fundamentals: Fundamentals) -> Self {
        Self {
            ticker: ticker.to_uppercase(),
            name: ticker.to_string(),
            category: sector_category(None).to_string(),
            price: 0.0,
            fundamentals,
            history: Vec::new(),
            sparkline: String::new(),
            trend_pct: 0.0,
            sentiment: SentimentSummary::default(),
            recommendation: Recommendation::NoData,
        }
    }
}

/// Raw metrics rounded for presentation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsDisplay {
    pub beta: f64,
    /// Profit margin in percent
    pub profit_pct: f64,
    pub pe: f64,
    /// Dividend yield in percent
    pub dividend_pct: f64,
}

impl From<&Fundamentals> for MetricsDisplay {
    fn from(f: &Fundamentals) -> Self {
        Self {
            beta: round_dp(f.beta, 2),
            profit_pct: round_dp(f.profit_margin * 100.0, 1),
            pe: round_dp(f.trailing_pe, 1),
            dividend_pct: round_dp(f.dividend_yield * 100.0, 2),
        }
    }
}

/// A candidate after scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    #[serde(flatten)]
    pub metrics: StockMetrics,
    /// Composite score on a 0-100 scale, one decimal
    pub score: f64,
    /// Sum-to-one share of each criterion across the candidate set
    pub normalized: CriterionScores,
    /// `normalized` multiplied by the criterion weights
    pub contributions: CriterionScores,
    pub reason: Criterion,
    pub display: MetricsDisplay,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_defaults() {
        let snapshot = TickerSnapshot {
            symbol: "XYZ".into(),
            profit_margin: Some(0.12),
            ..Default::default()
        };
        let f = snapshot.fundamentals();
        assert_eq!(f.beta, 1.5);
        assert_eq!(f.profit_margin, 0.12);
        assert_eq!(f.trailing_pe, 50.0);
        assert_eq!(f.dividend_yield, 0.0);
    }

    #[test]
    fn test_recommendation_keys() {
        assert_eq!(Recommendation::from_key(Some("strong_buy")), Recommendation::StrongBuy);
        assert_eq!(Recommendation::from_key(Some("hold")), Recommendation::Hold);
        assert_eq!(Recommendation::from_key(None), Recommendation::NoData);
        assert_eq!(Recommendation::from_key(Some("underperform")), Recommendation::Unknown);
        assert_eq!(Recommendation::Unknown.label(), "Unknown");
    }

    #[test]
    fn test_sector_category() {
        assert_eq!(sector_category(Some("Financial Services")), "Finance");
        assert_eq!(sector_category(Some("Consumer Defensive")), "Food/Beverages");
        assert_eq!(sector_category(Some("Shipping")), "Other");
        assert_eq!(sector_category(None), "Other");
    }

    #[test]
    fn test_dominant_first_max_wins() {
        let scores = CriterionScores {
            risk: 0.1,
            profit: 0.3,
            value: 0.3,
            dividend: 0.2,
        };
        assert_eq!(scores.dominant(), Criterion::Profit);

        let flat = CriterionScores {
            risk: 0.25,
            profit: 0.25,
            value: 0.25,
            dividend: 0.25,
        };
        assert_eq!(flat.dominant(), Criterion::Risk);
    }

    #[test]
    fn test_weight_percentages() {
        let w = WeightVector::new([0.5, 0.25, 0.125, 0.125]);
        let pct = w.percentages();
        assert_eq!(pct.risk, 50);
        assert_eq!(pct.profit, 25);
        assert_eq!(pct.value, 12);
        assert_eq!(pct.dividend, 12);
    }

    #[test]
    fn test_round_dp_halves_to_even() {
        assert_eq!(round_dp(1.125, 2), 1.12);
        assert_eq!(round_dp(0.375, 2), 0.38);
        assert_eq!(round_dp(12.5, 0), 12.0);
        assert_eq!(round_dp(-2.5, 0), -2.0);
        assert_eq!(round_dp(1.23456, 2), 1.23);
    }

    #[test]
    fn test_metrics_display_halves_to_even() {
        let d = MetricsDisplay::from(&Fundamentals {
            beta: 1.125,
            ..Default::default()
        });
        assert_eq!(d.beta, 1.12);
    }

    #[test]
    fn test_metrics_display_rounding() {
        let f = Fundamentals {
            beta: 1.23456,
            profit_margin: 0.25312,
            trailing_pe: 31.449,
            dividend_yield: 0.004567,
        };
        let d = MetricsDisplay::from(&f);
        assert_eq!(d.beta, 1.23);
        assert_eq!(d.profit_pct, 25.3);
        assert_eq!(d.pe, 31.4);
        assert_eq!(d.dividend_pct, 0.46);
    }

    #[test]
    fn test_metrics_serialize_flat() {
        let metrics = StockMetrics::with_fundamentals(
            "ko",
            Fundamentals {
                dividend_yield: 0.03,
                ..Default::default()
            },
        );
        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["ticker"], "KO");
        assert_eq!(json["beta"], 1.5);
        assert_eq!(json["dividend_yield"], 0.03);
        assert!(json.get("fundamentals").is_none());

        let back: StockMetrics = serde_json::from_value(json).unwrap();
        assert_eq!(back, metrics);
    }
}
