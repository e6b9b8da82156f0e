use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::NOT_AVAILABLE;

// ---------------------------------------------------------------------------
// AnalysisResult — per-ticker analysis record
// ---------------------------------------------------------------------------

/// Analysis and AI strategy fields accumulated for one ticker.
///
/// Every field is an opaque display string. `None` means the backend never
/// sent the field; `Some("N/A")` means it sent the "no value" sentinel.
/// Fields the dashboard does not render (`per`, `pbr`, `market_cap`, an
/// `error` message, ...) are kept in [`extra`](Self::extra) so they round-trip
/// to the AI endpoint and the export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opinion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opinion_score: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_52w: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_52w: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategic_recommendation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategic_solution: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisResult {
    /// Shallow overlay: every field present in `other` overwrites the same
    /// field here, every field absent in `other` is left untouched.
    pub fn overlay(&mut self, other: AnalysisResult) {
        fn put(dst: &mut Option<String>, src: Option<String>) {
            if src.is_some() {
                *dst = src;
            }
        }
        put(&mut self.opinion, other.opinion);
        put(&mut self.opinion_score, other.opinion_score);
        put(&mut self.target_price, other.target_price);
        put(&mut self.high_52w, other.high_52w);
        put(&mut self.low_52w, other.low_52w);
        put(&mut self.current_price, other.current_price);
        put(&mut self.sector, other.sector);
        put(&mut self.strategic_recommendation, other.strategic_recommendation);
        put(&mut self.strategic_solution, other.strategic_solution);
        self.extra.extend(other.extra);
    }

    /// Whether a usable price is cached: present, non-empty and not "N/A".
    pub fn has_price(&self) -> bool {
        is_value(self.current_price.as_deref())
    }

    /// Whether an AI strategy report is attached.
    pub fn has_strategy(&self) -> bool {
        self.strategic_recommendation
            .as_deref()
            .is_some_and(|s| !s.is_empty())
    }

    /// Error message the backend embedded in an otherwise successful response.
    pub fn error(&self) -> Option<&str> {
        self.extra.get("error").and_then(|v| v.as_str())
    }
}

/// A display field carries a real value (present, non-empty, not "N/A").
pub fn is_value(field: Option<&str>) -> bool {
    matches!(field, Some(v) if !v.is_empty() && v != NOT_AVAILABLE)
}

// ---------------------------------------------------------------------------
// TickerStatus — transient per-ticker flags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickerStatus {
    pub loading: bool,
    pub ai_loading: bool,
}

// ---------------------------------------------------------------------------
// MergeMode
// ---------------------------------------------------------------------------

/// How a plain analysis run commits into an existing record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeMode {
    /// Success replaces the record wholesale (AI fields are lost); failure
    /// replaces it with an empty record. Matches the dashboard's behavior.
    #[default]
    Compatible,
    /// Success overlays onto the existing record; failure keeps it and only
    /// clears the loading flag.
    Preserving,
}
