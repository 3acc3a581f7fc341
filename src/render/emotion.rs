//! Emotion breakdown chart
//!
//! One segment per emotion key, in key order. The four emotions the backend
//! knows about have fixed colors; anything else gets a neutral gray so a new
//! backend category still renders.

use std::collections::BTreeMap;

pub const JOY: &str = "#fbbf24";
pub const FEAR: &str = "#a371f7";
pub const ANGER: &str = "#f85149";
pub const TRUST: &str = "#3fb950";
pub const OTHER: &str = "#7d8590";

pub fn emotion_color(key: &str) -> &'static str {
    match key.to_ascii_lowercase().as_str() {
        "joy" => JOY,
        "fear" => FEAR,
        "anger" => ANGER,
        "trust" => TRUST,
        _ => OTHER,
    }
}

/// ANSI color name for the terminal rendition.
pub fn emotion_term_color(key: &str) -> &'static str {
    match key.to_ascii_lowercase().as_str() {
        "joy" => "yellow",
        "fear" => "magenta",
        "anger" => "red",
        "trust" => "green",
        _ => "white",
    }
}

/// Uppercase the first character, leave the rest alone.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub key: String,
    pub label: String,
    /// Percentage share as sent by the backend
    pub value: f64,
    pub color: &'static str,
}

impl Segment {
    pub fn tooltip(&self) -> String {
        format!("{}: {:.1}%", self.label, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmotionChart {
    pub segments: Vec<Segment>,
}

impl EmotionChart {
    pub fn from_emotions(emotions: &BTreeMap<String, f64>) -> Self {
        let segments = emotions
            .iter()
            .map(|(key, &value)| Segment {
                key: key.clone(),
                label: capitalize(key),
                value,
                color: emotion_color(key),
            })
            .collect();
        Self { segments }
    }

    /// Sum of the drawable (non-negative) values.
    pub fn total(&self) -> f64 {
        self.segments.iter().map(|s| s.value.max(0.0)).sum()
    }

    /// Fraction of the chart each segment occupies. All zero when there is
    /// nothing to draw.
    pub fn proportions(&self) -> Vec<f64> {
        let total = self.total();
        self.segments
            .iter()
            .map(|s| if total > 0.0 { s.value.max(0.0) / total } else { 0.0 })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.total() <= 0.0
    }
}
