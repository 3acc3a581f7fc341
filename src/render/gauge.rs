//! Persuasion gauge and ethical score ring
//!
//! Both dials map a 0-100 score onto an arc and pick a color tier from two
//! thresholds. They differ only in geometry (half arc vs full circle), in the
//! thresholds, and in which end of the scale is alarming.
//!
//! # Tiers
//!
//! | Dial       | High   | Moderate    | Low   |
//! |------------|--------|-------------|-------|
//! | Persuasion | s > 80 | 50 < s <= 80 | s <= 50 |
//! | Ethical    | s > 70 | 40 < s <= 70 | s <= 40 |
//!
//! A highly persuasive text is a warning (red), a highly ethical one is
//! reassuring (green), so the palettes run in opposite directions.

use serde::Serialize;
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dial {
    Persuasion,
    Ethical,
}

impl Dial {
    pub fn title(&self) -> &'static str {
        match self {
            Dial::Persuasion => "Persuasion",
            Dial::Ethical => "Ethical Score",
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        match self {
            Dial::Persuasion => PERSUASION_THRESHOLDS,
            Dial::Ethical => ETHICAL_THRESHOLDS,
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Dial::Persuasion => PERSUASION_PALETTE,
            Dial::Ethical => ETHICAL_PALETTE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    High,
    Moderate,
    Low,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::High => write!(f, "high"),
            Tier::Moderate => write!(f, "moderate"),
            Tier::Low => write!(f, "low"),
        }
    }
}

/// Strict lower bounds: a score must exceed `high` to be High.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub high: f64,
    pub moderate: f64,
}

pub const PERSUASION_THRESHOLDS: Thresholds = Thresholds { high: 80.0, moderate: 50.0 };
pub const ETHICAL_THRESHOLDS: Thresholds = Thresholds { high: 70.0, moderate: 40.0 };

impl Thresholds {
    pub fn tier(&self, score: f64) -> Tier {
        if score > self.high {
            Tier::High
        } else if score > self.moderate {
            Tier::Moderate
        } else {
            Tier::Low
        }
    }
}

/// One color per tier. `hex` feeds the HTML page, `term` names an ANSI color
/// understood by indicatif templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub hex: &'static str,
    pub term: &'static str,
}

pub const RED: Swatch = Swatch { hex: "#f85149", term: "red" };
pub const AMBER: Swatch = Swatch { hex: "#d29922", term: "yellow" };
pub const GREEN: Swatch = Swatch { hex: "#3fb950", term: "green" };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub high: Swatch,
    pub moderate: Swatch,
    pub low: Swatch,
}

pub const PERSUASION_PALETTE: Palette = Palette { high: RED, moderate: AMBER, low: GREEN };
pub const ETHICAL_PALETTE: Palette = Palette { high: GREEN, moderate: AMBER, low: RED };

impl Palette {
    pub fn swatch(&self, tier: Tier) -> Swatch {
        match tier {
            Tier::High => self.high,
            Tier::Moderate => self.moderate,
            Tier::Low => self.low,
        }
    }
}

/// Shape of the stroke a dial fills.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArcGeometry {
    /// Upper half circle, filled left to right
    HalfCircle { radius: f64 },
    /// Full ring, filled clockwise from 12 o'clock
    Circle { radius: f64 },
}

impl ArcGeometry {
    pub fn radius(&self) -> f64 {
        match *self {
            ArcGeometry::HalfCircle { radius } | ArcGeometry::Circle { radius } => radius,
        }
    }

    /// Stroke length of the whole arc.
    pub fn length(&self) -> f64 {
        match *self {
            ArcGeometry::HalfCircle { radius } => PI * radius,
            ArcGeometry::Circle { radius } => 2.0 * PI * radius,
        }
    }

    /// Dash offset that leaves exactly `fraction` of the arc visible.
    pub fn dash_offset(&self, fraction: f64) -> f64 {
        self.length() * (1.0 - fraction.clamp(0.0, 1.0))
    }
}

/// Radii of the two dials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialGeometry {
    pub gauge_radius: f64,
    pub ring_radius: f64,
}

impl Default for DialGeometry {
    fn default() -> Self {
        Self {
            gauge_radius: 80.0,
            ring_radius: 54.0,
        }
    }
}

impl DialGeometry {
    pub fn arc(&self, dial: Dial) -> ArcGeometry {
        match dial {
            Dial::Persuasion => ArcGeometry::HalfCircle { radius: self.gauge_radius },
            Dial::Ethical => ArcGeometry::Circle { radius: self.ring_radius },
        }
    }
}

/// Everything a surface needs to draw one dial at its final value.
#[derive(Debug, Clone, PartialEq)]
pub struct DialView {
    pub dial: Dial,
    pub score: f64,
    /// score / 100, clamped to [0, 1]
    pub fraction: f64,
    pub tier: Tier,
    pub swatch: Swatch,
    pub arc: ArcGeometry,
    /// Persuasion label or ethical reflection
    pub caption: String,
}

impl DialView {
    pub fn new(dial: Dial, score: f64, caption: &str, geometry: &DialGeometry) -> Self {
        let tier = dial.thresholds().tier(score);
        Self {
            dial,
            score,
            fraction: (score / 100.0).clamp(0.0, 1.0),
            tier,
            swatch: dial.palette().swatch(tier),
            arc: geometry.arc(dial),
            caption: caption.to_string(),
        }
    }

    pub fn dash_offset(&self) -> f64 {
        self.arc.dash_offset(self.fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // TIER THRESHOLD TESTS
    // ==========================================================================
    //
    // Thresholds are strict: exactly 80 is still Moderate for persuasion,
    // exactly 50 is Low. The ethical ring uses 70/40 the same way.
    // ==========================================================================

    #[test]
    fn test_persuasion_tiers() {
        let t = PERSUASION_THRESHOLDS;
        assert_eq!(t.tier(100.0), Tier::High);
        assert_eq!(t.tier(80.5), Tier::High);
        assert_eq!(t.tier(80.0), Tier::Moderate);
        assert_eq!(t.tier(50.5), Tier::Moderate);
        assert_eq!(t.tier(50.0), Tier::Low);
        assert_eq!(t.tier(0.0), Tier::Low);
    }

    #[test]
    fn test_ethical_tiers() {
        let t = ETHICAL_THRESHOLDS;
        assert_eq!(t.tier(71.0), Tier::High);
        assert_eq!(t.tier(70.0), Tier::Moderate);
        assert_eq!(t.tier(41.0), Tier::Moderate);
        assert_eq!(t.tier(40.0), Tier::Low);
        assert_eq!(t.tier(0.0), Tier::Low);
    }

    #[test]
    fn test_tier_sweep_is_monotonic() {
        // Walking up the scale must never step back down a tier
        let rank = |t: Tier| match t {
            Tier::Low => 0,
            Tier::Moderate => 1,
            Tier::High => 2,
        };
        for dial in [Dial::Persuasion, Dial::Ethical] {
            let mut last = 0;
            for s in 0..=100 {
                let r = rank(dial.thresholds().tier(s as f64));
                assert!(r >= last, "{:?} tier dropped at {}", dial, s);
                last = r;
            }
        }
    }

    #[test]
    fn test_palettes_run_opposite_ways() {
        assert_eq!(Dial::Persuasion.palette().swatch(Tier::High), RED);
        assert_eq!(Dial::Ethical.palette().swatch(Tier::High), GREEN);
        assert_eq!(Dial::Persuasion.palette().swatch(Tier::Low), GREEN);
        assert_eq!(Dial::Ethical.palette().swatch(Tier::Low), RED);
    }

    // ==========================================================================
    // ARC GEOMETRY TESTS
    // ==========================================================================

    #[test]
    fn test_arc_lengths_follow_radius() {
        let half = ArcGeometry::HalfCircle { radius: 80.0 };
        let ring = ArcGeometry::Circle { radius: 54.0 };
        assert!((half.length() - 251.327).abs() < 0.001);
        assert!((ring.length() - 339.292).abs() < 0.001);
    }

    #[test]
    fn test_dash_offset_proportional_to_score() {
        let arc = ArcGeometry::HalfCircle { radius: 100.0 };
        assert!((arc.dash_offset(0.0) - arc.length()).abs() < 1e-9);
        assert!(arc.dash_offset(1.0).abs() < 1e-9);
        assert!((arc.dash_offset(0.25) - arc.length() * 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_dial_view_clamps_fraction() {
        let geometry = DialGeometry::default();
        let over = DialView::new(Dial::Persuasion, 140.0, "", &geometry);
        assert_eq!(over.fraction, 1.0);
        assert_eq!(over.tier, Tier::High);

        let under = DialView::new(Dial::Ethical, -5.0, "", &geometry);
        assert_eq!(under.fraction, 0.0);
        assert!((under.dash_offset() - under.arc.length()).abs() < 1e-9);
    }

    #[test]
    fn test_dial_view_uses_matching_arc() {
        let geometry = DialGeometry::default();
        let gauge = DialView::new(Dial::Persuasion, 73.0, "Strong pitch", &geometry);
        assert_eq!(gauge.arc, ArcGeometry::HalfCircle { radius: 80.0 });
        assert_eq!(gauge.tier, Tier::Moderate);
        assert_eq!(gauge.swatch, AMBER);
        assert_eq!(gauge.caption, "Strong pitch");

        let ring = DialView::new(Dial::Ethical, 73.0, "", &geometry);
        assert_eq!(ring.arc, ArcGeometry::Circle { radius: 54.0 });
        assert_eq!(ring.tier, Tier::High);
    }
}
