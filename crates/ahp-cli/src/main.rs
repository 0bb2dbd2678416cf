//! ahp-cli: rank a list of stocks with AHP slider weights.
//!
//! Fetches fundamentals, one month of prices and recent headlines for each
//! ticker from Yahoo Finance, then prints the ranking.
//!
//! Usage:
//!   cargo run -p ahp-cli -- AAPL,KO,XOM
//!   cargo run -p ahp-cli -- --rp -3 --vd 2 AAPL MSFT TSLA
//!   cargo run -p ahp-cli -- --json KO PEP
//!   cargo run -p ahp-cli -- --catalog
//!
//! Sliders run from -4 (strongly prefer the first criterion of the pair) to
//! 4 (strongly prefer the second): --rp risk/profit, --rv risk/value,
//! --rd risk/dividend, --pv profit/value, --pd profit/dividend,
//! --vd value/dividend.

use analysis_core::{AnalysisError, SliderInput};
use analysis_orchestrator::{
    parse_ticker_list, AhpScreener, ScreenOutcome, ScreenerConfig, StockCatalog, TtlCache,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yahoo_client::YahooClient;

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    tickers: Vec<String>,
    sliders: SliderInput,
    json: bool,
    show_catalog: bool,
}

fn parse_args(args: &[String]) -> anyhow::Result<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut invalid_slider = false;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let slot = match arg.as_str() {
            "--json" => {
                parsed.json = true;
                continue;
            }
            "--catalog" => {
                parsed.show_catalog = true;
                continue;
            }
            "--rp" => &mut parsed.sliders.risk_profit,
            "--rv" => &mut parsed.sliders.risk_value,
            "--rd" => &mut parsed.sliders.risk_div,
            "--pv" => &mut parsed.sliders.profit_value,
            "--pd" => &mut parsed.sliders.profit_div,
            "--vd" => &mut parsed.sliders.value_div,
            flag if flag.starts_with("--") => anyhow::bail!("Unknown option {}", flag),
            tickers => {
                parsed.tickers.extend(parse_ticker_list(tickers));
                continue;
            }
        };

        let raw = iter
            .next()
            .ok_or_else(|| anyhow::anyhow!("{} needs a value", arg))?;
        match raw.parse::<f64>() {
            Ok(v) => *slot = v,
            Err(_) => {
                tracing::warn!("Invalid slider value {:?} for {}", raw, arg);
                invalid_slider = true;
            }
        }
    }

    // One bad slider resets them all to indifferent
    if invalid_slider {
        parsed.sliders = SliderInput::default();
    }

    Ok(parsed)
}

fn render_catalog(catalog: &StockCatalog) -> String {
    let mut out = String::new();
    for group in catalog.groups() {
        out.push_str(&format!("{}\n", group.name));
        for entry in &group.entries {
            out.push_str(&format!("  {:<6} {}\n", entry.ticker, entry.name));
        }
    }
    out
}

fn render_table(outcome: &ScreenOutcome) -> String {
    let w = &outcome.weight_percentages;
    let mut out = format!(
        "Weights: Risk {}%  Profit {}%  Value {}%  Dividend {}%\n\n",
        w.risk, w.profit, w.value, w.dividend
    );

    out.push_str(&format!(
        "{:>3}  {:<6} {:<24} {:>6}  {:<12} {:>5} {:>7} {:>7} {:>6} {:>7}  {:<9} {}\n",
        "#", "Ticker", "Name", "Score", "Reason", "Beta", "Margin%", "P/E", "Div%", "Trend%",
        "Sentiment", "Analysts"
    ));

    for (i, r) in outcome.results.iter().enumerate() {
        let name: String = r.metrics.name.chars().take(24).collect();
        out.push_str(&format!(
            "{:>3}  {:<6} {:<24} {:>6.1}  {:<12} {:>5.2} {:>7.1} {:>7.1} {:>6.2} {:>7.1}  {:<9} {}\n",
            i + 1,
            r.metrics.ticker,
            name,
            r.score,
            r.reason.label(),
            r.display.beta,
            r.display.profit_pct,
            r.display.pe,
            r.display.dividend_pct,
            r.metrics.trend_pct,
            r.metrics.sentiment.label.label(),
            r.metrics.recommendation.label(),
        ));
    }

    if !outcome.skipped.is_empty() {
        out.push_str(&format!("\nSkipped: {}\n", outcome.skipped.join(", ")));
    }

    out
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ahp_cli=info,analysis_orchestrator=info,yahoo_client=warn".into());

    if json_logging {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args)?;
    let config = ScreenerConfig::from_env();
    let catalog = StockCatalog::default();

    if cli.show_catalog {
        print!("{}", render_catalog(&catalog));
        return Ok(());
    }

    let provider = YahooClient::new(config.request_timeout).with_news_count(config.max_headlines);
    let cache_ttl = config.cache_ttl;
    let caching = config.caching_enabled();
    let mut screener = AhpScreener::new(provider, catalog, config);
    if caching {
        screener = screener.with_cache(Arc::new(TtlCache::new(cache_ttl)));
    }

    match screener.screen(&cli.tickers, &cli.sliders).await {
        Ok(outcome) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print!("{}", render_table(&outcome));
            }
            Ok(())
        }
        Err(AnalysisError::EmptyBatch { requested }) => {
            eprintln!("No results: none of the {} tickers could be fetched", requested);
            Ok(())
        }
        Err(AnalysisError::NoTickers) => {
            anyhow::bail!("Add at least one ticker, e.g. `ahp-cli AAPL,KO,XOM` (see --catalog)")
        }
        Err(e) => Err(e.into()),
    }
}
