use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Symbol not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Request timed out after {secs}s: {symbol}")]
    Timeout { symbol: String, secs: u64 },

    #[error("No results: none of the {requested} requested tickers could be fetched")]
    EmptyBatch { requested: usize },

    #[error("No tickers requested")]
    NoTickers,
}

impl AnalysisError {
    /// Per-ticker fetch failures are skipped; everything else ends the request.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::ApiError(_)
                | AnalysisError::NotFound(_)
                | AnalysisError::InvalidData(_)
                | AnalysisError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_classification() {
        assert!(AnalysisError::ApiError("HTTP 500".into()).is_fetch_error());
        assert!(AnalysisError::Timeout { symbol: "AAPL".into(), secs: 5 }.is_fetch_error());
        assert!(!AnalysisError::EmptyBatch { requested: 3 }.is_fetch_error());
        assert!(!AnalysisError::NoTickers.is_fetch_error());
    }

    #[test]
    fn test_empty_batch_message() {
        let err = AnalysisError::EmptyBatch { requested: 2 };
        assert!(err.to_string().starts_with("No results"));
    }
}
