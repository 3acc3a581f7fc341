//! Wire types exchanged with the analysis endpoint
//!
//! The backend does all of the scoring. These types only describe the shape of
//! what it returns so the renderer can turn it into gauges, bars, and a chart.
//!
//! Maps are `BTreeMap` so iteration order is stable: rendering the same
//! result twice must produce the same chart segments and keyword rows.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request body for `POST /analyze`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// Body of a non-2xx response. The backend may omit `error` entirely.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// -1.0 (negative) to 1.0 (positive)
    pub polarity: f64,
    /// 0.0 (objective) to 1.0 (subjective)
    pub subjectivity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersuasiveKeywords {
    pub count: u32,
    #[serde(default)]
    pub by_category: BTreeMap<String, u32>,
    #[serde(default)]
    pub words_found: Vec<String>,
}

/// One analysis response. Transient: replaced by the next request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub persuasion_score: f64,
    pub persuasion_label: String,
    pub ethical_score: f64,
    pub ethical_reflection: String,
    pub sentiment: Sentiment,
    /// Emotion name -> percentage share. Usually sums to ~100, not enforced.
    #[serde(default)]
    pub emotions: BTreeMap<String, f64>,
    pub persuasive_keywords: PersuasiveKeywords,
    /// Trusted markup produced by the backend
    pub highlighted_text: String,
    /// Echo of the submitted text, when the backend includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
}
