use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Market
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Market {
    Kospi,
    Kosdaq,
}

impl Market {
    pub fn as_str(&self) -> &'static str {
        match self {
            Market::Kospi => "KOSPI",
            Market::Kosdaq => "KOSDAQ",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MarketFilter — market tab selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarketFilter {
    #[default]
    All,
    Only(Market),
}

impl MarketFilter {
    pub fn matches(&self, market: Market) -> bool {
        match self {
            MarketFilter::All => true,
            MarketFilter::Only(m) => *m == market,
        }
    }
}

// ---------------------------------------------------------------------------
// Stock — listed equity (stock list entry)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub ticker: String,
    pub name: String,
    pub market: Market,
}
