use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{AnalysisResult, Stock};

// ---------------------------------------------------------------------------
// ExportRequest — body of the spreadsheet export call
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub stocks: Vec<Stock>,
    pub analysis: BTreeMap<String, AnalysisResult>,
}

// ---------------------------------------------------------------------------
// StrategyRequest — body of the AI strategy call
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRequest {
    #[serde(flatten)]
    pub analysis: AnalysisResult,
    pub ticker: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// CredentialCheck — response of the credential validation call
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialCheck {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
