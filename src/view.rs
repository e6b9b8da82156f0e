//! Stock table filtering and row formatting.

use std::collections::HashMap;

use crate::config::NOT_AVAILABLE;
use crate::models::{is_value, AnalysisResult, Market, MarketFilter, Stock, TickerStatus};

const PLACEHOLDER: &str = "-";

/// Stocks matching the search term and market tab, in listing order.
///
/// Names match case-insensitively, tickers verbatim. An empty search term
/// matches everything.
pub fn filter_stocks<'a>(stocks: &'a [Stock], search: &str, filter: MarketFilter) -> Vec<&'a Stock> {
    let needle = search.to_lowercase();
    stocks
        .iter()
        .filter(|s| s.name.to_lowercase().contains(&needle) || s.ticker.contains(search))
        .filter(|s| filter.matches(s.market))
        .collect()
}

// ---------------------------------------------------------------------------
// StockRow
// ---------------------------------------------------------------------------

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockRow {
    pub ticker: String,
    pub name: String,
    pub market: Market,
    pub price: String,
    pub opinion: String,
    pub target_price: String,
    pub range_52w: String,
    pub loading: bool,
    pub ai_loading: bool,
    /// `(recommendation, solution)` when an AI report is attached.
    pub strategy: Option<(String, String)>,
}

impl StockRow {
    pub fn new(stock: &Stock, result: Option<&AnalysisResult>, status: TickerStatus) -> Self {
        let price = result
            .and_then(|r| non_empty(r.current_price.as_deref()))
            .unwrap_or(PLACEHOLDER)
            .to_string();

        let opinion = match result {
            Some(r) if is_value(r.opinion.as_deref()) => format!(
                "{} ({})",
                r.opinion.as_deref().unwrap_or_default(),
                r.opinion_score.as_deref().unwrap_or_default()
            ),
            _ => PLACEHOLDER.to_string(),
        };

        let target_price = result
            .and_then(|r| non_empty(r.target_price.as_deref()))
            .unwrap_or(PLACEHOLDER)
            .to_string();

        let range_52w = match result {
            Some(r) if r.low_52w.is_some() && r.low_52w.as_deref() != Some(NOT_AVAILABLE) => format!(
                "{} ~ {}",
                r.low_52w.as_deref().unwrap_or_default(),
                r.high_52w.as_deref().unwrap_or_default()
            ),
            _ => PLACEHOLDER.to_string(),
        };

        let strategy = result.filter(|r| r.has_strategy()).map(|r| {
            (
                r.strategic_recommendation.clone().unwrap_or_default(),
                r.strategic_solution.clone().unwrap_or_default(),
            )
        });

        Self {
            ticker: stock.ticker.clone(),
            name: stock.name.clone(),
            market: stock.market,
            price,
            opinion,
            target_price,
            range_52w,
            loading: status.loading,
            ai_loading: status.ai_loading,
            strategy,
        }
    }
}

/// Render up to `limit` rows for `stocks`.
pub fn table_rows(
    stocks: &[&Stock],
    results: &HashMap<String, AnalysisResult>,
    statuses: &HashMap<String, TickerStatus>,
    limit: usize,
) -> Vec<StockRow> {
    stocks
        .iter()
        .take(limit)
        .map(|s| {
            StockRow::new(
                s,
                results.get(&s.ticker),
                statuses.get(&s.ticker).copied().unwrap_or_default(),
            )
        })
        .collect()
}

fn non_empty(field: Option<&str>) -> Option<&str> {
    field.filter(|v| !v.is_empty())
}
