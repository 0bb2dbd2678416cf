use analysis_core::{AnalysisError, MarketDataProvider, TickerSnapshot};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const BASE_URL: &str = "https://query2.finance.yahoo.com";
const USER_AGENT: &str = "Mozilla/5.0";
const QUOTE_MODULES: &str = "price,summaryProfile,summaryDetail,defaultKeyStatistics,financialData";
const DEFAULT_NEWS_COUNT: usize = 5;

/// Yahoo Finance public JSON endpoints.
///
/// Fundamentals come from `quoteSummary`, the one-month daily history from
/// `chart` and headlines from `search`. Only the fundamentals call is
/// required; history and news degrade to empty / unavailable.
#[derive(Clone)]
pub struct YahooClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    news_count: usize,
}

impl YahooClient {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: BASE_URL.to_string(),
            timeout,
            news_count: DEFAULT_NEWS_COUNT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_news_count(mut self, news_count: usize) -> Self {
        self.news_count = news_count;
        self
    }

    /// Single GET with status mapping. No retries.
    async fn get_json<T: DeserializeOwned>(
        &self,
        symbol: &str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, AnalysisError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.map_transport_error(symbol, e))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(AnalysisError::NotFound(symbol.to_string()));
        }
        if !status.is_success() {
            return Err(AnalysisError::ApiError(format!(
                "HTTP {}: {}",
                status,
                response.text().await.unwrap_or_default()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AnalysisError::InvalidData(format!("{}: {}", symbol, e)))
    }

    fn map_transport_error(&self, symbol: &str, e: reqwest::Error) -> AnalysisError {
        if e.is_timeout() {
            AnalysisError::Timeout {
                symbol: symbol.to_string(),
                secs: self.timeout.as_secs(),
            }
        } else {
            AnalysisError::ApiError(e.to_string())
        }
    }

    /// Fundamentals, sector, name and recommendation for a symbol.
    /// History and headlines are left empty.
    pub async fn get_quote_summary(&self, symbol: &str) -> Result<TickerSnapshot, AnalysisError> {
        let url = format!("{}/v10/finance/quoteSummary/{}", self.base_url, symbol);
        let body: QuoteSummaryResponse = self
            .get_json(symbol, &url, &[("modules", QUOTE_MODULES.to_string())])
            .await?;
        parse_quote_summary(symbol, body)
    }

    /// Daily closes over the last month, oldest first
    pub async fn get_daily_closes(&self, symbol: &str) -> Result<Vec<f64>, AnalysisError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        let body: ChartResponse = self
            .get_json(
                symbol,
                &url,
                &[("range", "1mo".to_string()), ("interval", "1d".to_string())],
            )
            .await?;
        Ok(parse_chart_closes(body))
    }

    /// Most recent headlines mentioning the symbol
    pub async fn get_headlines(&self, symbol: &str) -> Result<Vec<String>, AnalysisError> {
        let url = format!("{}/v1/finance/search", self.base_url);
        let body: SearchResponse = self
            .get_json(
                symbol,
                &url,
                &[
                    ("q", symbol.to_string()),
                    ("quotesCount", "0".to_string()),
                    ("newsCount", self.news_count.to_string()),
                ],
            )
            .await?;

        Ok(body
            .news
            .into_iter()
            .filter_map(|n| n.title)
            .take(self.news_count)
            .collect())
    }
}

#[async_trait]
impl MarketDataProvider for YahooClient {
    async fn fetch_snapshot(&self, symbol: &str) -> Result<TickerSnapshot, AnalysisError> {
        let mut snapshot = self.get_quote_summary(symbol).await?;

        snapshot.closes = match self.get_daily_closes(symbol).await {
            Ok(closes) => closes,
            Err(e) => {
                tracing::warn!("Price history unavailable for {}: {}", symbol, e);
                Vec::new()
            }
        };

        snapshot.headlines = match self.get_headlines(symbol).await {
            Ok(headlines) => Some(headlines),
            Err(e) => {
                tracing::warn!("News unavailable for {}: {}", symbol, e);
                None
            }
        };

        Ok(snapshot)
    }
}

fn parse_quote_summary(
    symbol: &str,
    body: QuoteSummaryResponse,
) -> Result<TickerSnapshot, AnalysisError> {
    let summary = body.quote_summary;
    let result = match summary.result.and_then(|r| r.into_iter().next()) {
        Some(result) => result,
        None => {
            return Err(match summary.error {
                Some(err) if err.code.as_deref() == Some("Not Found") => {
                    AnalysisError::NotFound(symbol.to_string())
                }
                Some(err) => AnalysisError::ApiError(
                    err.description.unwrap_or_else(|| "quoteSummary error".to_string()),
                ),
                None => AnalysisError::InvalidData(format!("{}: empty quoteSummary", symbol)),
            });
        }
    };

    let price = result.price.unwrap_or_default();
    let detail = result.summary_detail.unwrap_or_default();
    let stats = result.default_key_statistics.unwrap_or_default();
    let financial = result.financial_data.unwrap_or_default();

    Ok(TickerSnapshot {
        symbol: symbol.to_string(),
        name: price.short_name.or(price.long_name),
        current_price: financial.current_price.raw().or(price.regular_market_price.raw()),
        beta: detail.beta.raw().or(stats.beta.raw()),
        profit_margin: financial.profit_margins.raw().or(stats.profit_margins.raw()),
        trailing_pe: detail.trailing_pe.raw(),
        dividend_yield: detail.dividend_yield.raw(),
        sector: result.summary_profile.and_then(|p| p.sector),
        recommendation_key: financial.recommendation_key,
        closes: Vec::new(),
        headlines: None,
    })
}

fn parse_chart_closes(body: ChartResponse) -> Vec<f64> {
    body.chart
        .result
        .and_then(|r| r.into_iter().next())
        .and_then(|r| r.indicators.quote.into_iter().next())
        .map(|q| q.close.into_iter().flatten().collect())
        .unwrap_or_default()
}

// Yahoo wraps numbers as {"raw": 1.23, "fmt": "1.23"}, or {} when missing
#[derive(Debug, Default, Deserialize)]
struct RawValue {
    #[serde(default)]
    raw: Option<f64>,
}

trait RawField {
    fn raw(&self) -> Option<f64>;
}

impl RawField for Option<RawValue> {
    fn raw(&self) -> Option<f64> {
        self.as_ref().and_then(|v| v.raw)
    }
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummary,
}

#[derive(Debug, Deserialize)]
struct QuoteSummary {
    #[serde(default)]
    result: Option<Vec<QuoteSummaryResult>>,
    #[serde(default)]
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResult {
    #[serde(default)]
    price: Option<PriceModule>,
    #[serde(default)]
    summary_profile: Option<SummaryProfile>,
    #[serde(default)]
    summary_detail: Option<SummaryDetail>,
    #[serde(default)]
    default_key_statistics: Option<KeyStatistics>,
    #[serde(default)]
    financial_data: Option<FinancialData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    long_name: Option<String>,
    #[serde(default)]
    regular_market_price: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
struct SummaryProfile {
    #[serde(default)]
    sector: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDetail {
    #[serde(default)]
    beta: Option<RawValue>,
    #[serde(default, rename = "trailingPE")]
    trailing_pe: Option<RawValue>,
    #[serde(default)]
    dividend_yield: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyStatistics {
    #[serde(default)]
    beta: Option<RawValue>,
    #[serde(default)]
    profit_margins: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinancialData {
    #[serde(default)]
    current_price: Option<RawValue>,
    #[serde(default)]
    profit_margins: Option<RawValue>,
    #[serde(default)]
    recommendation_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    // Non-trading slots come back as null
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    news: Vec<SearchNews>,
}

#[derive(Debug, Deserialize)]
struct SearchNews {
    #[serde(default)]
    title: Option<String>,
}
