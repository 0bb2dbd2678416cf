use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub ticker: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogGroup {
    pub name: String,
    pub entries: Vec<CatalogEntry>,
}

/// Curated tickers offered for selection, grouped by theme.
///
/// Passed into the screener at construction. The screener only uses it to
/// name tickers the provider returned without a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockCatalog {
    groups: Vec<CatalogGroup>,
}

fn group(name: &str, entries: &[(&str, &str)]) -> CatalogGroup {
    CatalogGroup {
        name: name.to_string(),
        entries: entries
            .iter()
            .map(|(ticker, name)| CatalogEntry {
                ticker: ticker.to_string(),
                name: name.to_string(),
            })
            .collect(),
    }
}

impl StockCatalog {
    pub fn new(groups: Vec<CatalogGroup>) -> Self {
        Self { groups }
    }

    pub fn empty() -> Self {
        Self { groups: Vec::new() }
    }

    pub fn groups(&self) -> &[CatalogGroup] {
        &self.groups
    }

    /// Case-insensitive lookup across all groups
    pub fn find(&self, ticker: &str) -> Option<&CatalogEntry> {
        let ticker = ticker.trim();
        self.groups
            .iter()
            .flat_map(|g| g.entries.iter())
            .find(|e| e.ticker.eq_ignore_ascii_case(ticker))
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StockCatalog {
    fn default() -> Self {
        Self::new(vec![
            group(
                "World Top",
                &[
                    ("AAPL", "Apple"),
                    ("MSFT", "Microsoft"),
                    ("NVDA", "NVIDIA"),
                    ("AMZN", "Amazon"),
                    ("GOOGL", "Google"),
                ],
            ),
            group(
                "Autos",
                &[
                    ("TSLA", "Tesla (Electric)"),
                    ("TM", "Toyota (Reliability)"),
                    ("F", "Ford"),
                    ("RACE", "Ferrari"),
                ],
            ),
            group(
                "Food & Drinks",
                &[
                    ("KO", "Coca-Cola"),
                    ("MCD", "McDonald's"),
                    ("PEP", "PepsiCo"),
                    ("SBUX", "Starbucks"),
                ],
            ),
            group(
                "Tech & IT",
                &[
                    ("AMD", "AMD (Chips)"),
                    ("INTC", "Intel"),
                    ("SONY", "Sony"),
                    ("NFLX", "Netflix"),
                ],
            ),
            group(
                "Finance",
                &[
                    ("V", "Visa"),
                    ("MA", "Mastercard"),
                    ("JPM", "J.P. Morgan"),
                    ("PYPL", "PayPal"),
                ],
            ),
            group(
                "Energy (Dividends)",
                &[
                    ("XOM", "Exxon Mobil"),
                    ("CVX", "Chevron"),
                    ("SHEL", "Shell"),
                    ("TTE", "TotalEnergies"),
                ],
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = StockCatalog::default();
        assert_eq!(catalog.groups().len(), 6);
        assert_eq!(catalog.len(), 25);
        assert_eq!(catalog.groups()[0].entries[0].ticker, "AAPL");
    }

    #[test]
    fn test_find() {
        let catalog = StockCatalog::default();
        assert_eq!(catalog.find("jpm").map(|e| e.name.as_str()), Some("J.P. Morgan"));
        assert_eq!(catalog.find(" TTE ").map(|e| e.name.as_str()), Some("TotalEnergies"));
        assert!(catalog.find("BRK.B").is_none());
        assert!(StockCatalog::empty().find("AAPL").is_none());
    }
}
