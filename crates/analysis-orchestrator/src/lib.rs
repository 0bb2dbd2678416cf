use ahp_engine::{derive_weights, rank_candidates};
use analysis_core::{
    round_dp, sector_category,
    sparkline::{sparkline_path, trend_pct},
    AnalysisError, MarketDataProvider, MetricsCache, RankedResult, Recommendation, SliderInput,
    StockMetrics, TickerSnapshot, WeightPercentages, WeightVector,
};
use chrono::{DateTime, Utc};
use sentiment_analysis::HeadlineSentimentScorer;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

pub mod cache;
pub mod catalog;
pub mod config;

pub use cache::{NoCache, TtlCache};
pub use catalog::{CatalogEntry, CatalogGroup, StockCatalog};
pub use config::ScreenerConfig;

/// Split a comma-separated ticker list, trimming blanks
pub fn parse_ticker_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Upper-case and de-duplicate, keeping first-seen order
fn unique_symbols(tickers: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    tickers
        .iter()
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .collect()
}

/// Metrics for every ticker that could be fetched, plus the ones that could not
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    pub metrics: Vec<StockMetrics>,
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreenOutcome {
    pub results: Vec<RankedResult>,
    pub weights: WeightVector,
    pub weight_percentages: WeightPercentages,
    /// Distinct tickers asked for
    pub requested: usize,
    pub skipped: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Fetches metrics for a ticker list and ranks them against slider weights.
///
/// Tickers are processed one after another. A ticker whose provider call
/// fails or times out is logged and left out; the batch carries on.
pub struct AhpScreener<P: MarketDataProvider> {
    provider: P,
    cache: Arc<dyn MetricsCache>,
    catalog: StockCatalog,
    sentiment: HeadlineSentimentScorer,
    config: ScreenerConfig,
}

impl<P: MarketDataProvider> AhpScreener<P> {
    pub fn new(provider: P, catalog: StockCatalog, config: ScreenerConfig) -> Self {
        let sentiment = HeadlineSentimentScorer::new().with_max_headlines(config.max_headlines);
        Self {
            provider,
            cache: Arc::new(NoCache),
            catalog,
            sentiment,
            config,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn MetricsCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn catalog(&self) -> &StockCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ScreenerConfig {
        &self.config
    }

    /// Resolve a raw provider snapshot into ranker input
    pub fn build_metrics(&self, snapshot: TickerSnapshot) -> StockMetrics {
        let ticker = snapshot.symbol.to_uppercase();
        let fundamentals = snapshot.fundamentals();
        let name = snapshot
            .name
            .clone()
            .or_else(|| self.catalog.find(&ticker).map(|e| e.name.clone()))
            .unwrap_or_else(|| ticker.clone());

        StockMetrics {
            name,
            category: sector_category(snapshot.sector.as_deref()).to_string(),
            price: round_dp(snapshot.current_price.unwrap_or(0.0), 2),
            fundamentals,
            sparkline: sparkline_path(&snapshot.closes),
            trend_pct: trend_pct(&snapshot.closes),
            sentiment: self.sentiment.score_optional(snapshot.headlines.as_deref()),
            recommendation: Recommendation::from_key(snapshot.recommendation_key.as_deref()),
            history: snapshot.closes,
            ticker,
        }
    }

    async fn fetch_one(&self, symbol: &str) -> Result<StockMetrics, AnalysisError> {
        if let Some(cached) = self.cache.get(symbol) {
            tracing::debug!("Cache hit for {}", symbol);
            return Ok(cached);
        }

        let snapshot = tokio::time::timeout(
            self.config.ticker_timeout,
            self.provider.fetch_snapshot(symbol),
        )
        .await
        .map_err(|_| AnalysisError::Timeout {
            symbol: symbol.to_string(),
            secs: self.config.ticker_timeout.as_secs(),
        })??;

        let metrics = self.build_metrics(snapshot);
        self.cache.put(symbol, &metrics);
        Ok(metrics)
    }

    /// Fetch every distinct ticker, reporting the ones that were skipped
    pub async fn fetch_batch(&self, tickers: &[String]) -> FetchReport {
        let mut report = FetchReport::default();

        for symbol in unique_symbols(tickers) {
            match self.fetch_one(&symbol).await {
                Ok(metrics) => report.metrics.push(metrics),
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", symbol, e);
                    report.skipped.push(symbol);
                }
            }
        }

        report
    }

    /// Metrics for every ticker that could be fetched, in request order
    pub async fn fetch_metrics(&self, tickers: &[String]) -> Vec<StockMetrics> {
        self.fetch_batch(tickers).await.metrics
    }

    /// Full pipeline: weights from sliders, fetch, rank.
    pub async fn screen(
        &self,
        tickers: &[String],
        sliders: &SliderInput,
    ) -> Result<ScreenOutcome, AnalysisError> {
        let requested = unique_symbols(tickers).len();
        if requested == 0 {
            return Err(AnalysisError::NoTickers);
        }

        tracing::info!("📊 Screening {} tickers", requested);

        let weights = derive_weights(sliders);
        let report = self.fetch_batch(tickers).await;

        if report.metrics.is_empty() {
            return Err(AnalysisError::EmptyBatch { requested });
        }

        let results = rank_candidates(report.metrics, &weights);

        tracing::info!(
            "✅ Screen complete: {}/{} tickers ranked, {} skipped",
            results.len(),
            requested,
            report.skipped.len()
        );

        Ok(ScreenOutcome {
            results,
            weight_percentages: weights.percentages(),
            weights,
            requested,
            skipped: report.skipped,
            timestamp: Utc::now(),
        })
    }
}
