//! Polarity and subjectivity bars

use crate::model::Sentiment;

#[derive(Debug, Clone, PartialEq)]
pub struct SentimentBars {
    pub polarity: f64,
    pub subjectivity: f64,
    /// Percentage width of the polarity bar, 0-100
    pub polarity_fill: f64,
    /// Percentage width of the subjectivity bar, 0-100
    pub subjectivity_fill: f64,
}

impl SentimentBars {
    pub fn from_sentiment(sentiment: &Sentiment) -> Self {
        Self {
            polarity: sentiment.polarity,
            subjectivity: sentiment.subjectivity,
            polarity_fill: polarity_fill(sentiment.polarity),
            subjectivity_fill: subjectivity_fill(sentiment.subjectivity),
        }
    }

    pub fn polarity_text(&self) -> String {
        format_raw(self.polarity)
    }

    pub fn subjectivity_text(&self) -> String {
        format_raw(self.subjectivity)
    }
}

/// Maps polarity [-1, 1] onto [0, 100]: -1 is empty, 0 is half, 1 is full.
pub fn polarity_fill(polarity: f64) -> f64 {
    (polarity.clamp(-1.0, 1.0) + 1.0) / 2.0 * 100.0
}

/// Maps subjectivity [0, 1] onto [0, 100].
pub fn subjectivity_fill(subjectivity: f64) -> f64 {
    subjectivity.clamp(0.0, 1.0) * 100.0
}

/// Three decimal places, without a "-0.000".
pub fn format_raw(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0.000".to_string();
    }
    format!("{:.3}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity_endpoints() {
        assert_eq!(polarity_fill(-1.0), 0.0);
        assert_eq!(polarity_fill(0.0), 50.0);
        assert_eq!(polarity_fill(1.0), 100.0);
    }

    #[test]
    fn test_polarity_linear_between() {
        assert!((polarity_fill(0.5) - 75.0).abs() < 1e-9);
        assert!((polarity_fill(-0.5) - 25.0).abs() < 1e-9);
        for i in -10..=10 {
            let p = i as f64 / 10.0;
            assert!((polarity_fill(p) - (p + 1.0) / 2.0 * 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_subjectivity_is_direct() {
        assert_eq!(subjectivity_fill(0.0), 0.0);
        assert_eq!(subjectivity_fill(1.0), 100.0);
        assert!((subjectivity_fill(0.35) - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        // The backend should never send these, but bars must stay in their track
        assert_eq!(polarity_fill(-3.0), 0.0);
        assert_eq!(polarity_fill(2.0), 100.0);
        assert_eq!(subjectivity_fill(1.5), 100.0);
    }

    #[test]
    fn test_raw_values_three_decimals() {
        assert_eq!(format_raw(0.123456), "0.123");
        assert_eq!(format_raw(-0.25), "-0.250");
        assert_eq!(format_raw(1.0), "1.000");
        assert_eq!(format_raw(-0.0001), "0.000");
    }

    #[test]
    fn test_bars_from_sentiment() {
        let bars = SentimentBars::from_sentiment(&Sentiment {
            polarity: -0.2,
            subjectivity: 0.9,
        });
        assert!((bars.polarity_fill - 40.0).abs() < 1e-9);
        assert!((bars.subjectivity_fill - 90.0).abs() < 1e-9);
        assert_eq!(bars.polarity_text(), "-0.200");
        assert_eq!(bars.subjectivity_text(), "0.900");
    }
}
