use async_trait::async_trait;
use crate::{AnalysisError, StockMetrics, TickerSnapshot};

/// Source of per-ticker fundamentals, price history and headlines
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch everything known about `symbol`. An `Err` means the ticker
    /// should be skipped; partial data is reported through `None` fields.
    async fn fetch_snapshot(&self, symbol: &str) -> Result<TickerSnapshot, AnalysisError>;
}

/// Result cache keyed by upper-cased ticker. Caching must never change
/// ranking output, only avoid repeated provider calls.
pub trait MetricsCache: Send + Sync {
    fn get(&self, ticker: &str) -> Option<StockMetrics>;
    fn put(&self, ticker: &str, metrics: &StockMetrics);
}

#[async_trait]
impl<T: MarketDataProvider + ?Sized> MarketDataProvider for std::sync::Arc<T> {
    async fn fetch_snapshot(&self, symbol: &str) -> Result<TickerSnapshot, AnalysisError> {
        (**self).fetch_snapshot(symbol).await
    }
}
