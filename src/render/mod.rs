//! Turns one analysis result into updates on a [`Surface`]
//!
//! The renderer is the only owner of the live emotion chart. Every render
//! destroys the previous chart before creating the next one, so rendering the
//! same result twice leaves the page in the same state with exactly one chart.
//!
//! Render order:
//!
//! 1. persuasion gauge and ethical ring (static parts, then the count-up)
//! 2. sentiment bars
//! 3. emotion chart
//! 4. keyword panel
//! 5. highlighted text

pub mod emotion;
pub mod gauge;
pub mod keywords;
pub mod sentiment;
pub mod tween;

use crate::model::AnalysisResult;
use crate::surface::Surface;
use emotion::EmotionChart;
use gauge::{Dial, DialGeometry, DialView};
use keywords::KeywordPanel;
use sentiment::SentimentBars;
use tracing::debug;
use tween::{Animation, Ticker, Tween};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderConfig {
    pub animation: Animation,
    pub geometry: DialGeometry,
}

pub struct ResultRenderer<C> {
    config: RenderConfig,
    chart: Option<C>,
}

impl<C> ResultRenderer<C> {
    pub fn new(config: RenderConfig) -> Self {
        Self { config, chart: None }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn has_chart(&self) -> bool {
        self.chart.is_some()
    }

    pub fn render<S, T>(&mut self, surface: &mut S, ticker: &mut T, result: &AnalysisResult)
    where
        S: Surface<Chart = C> + ?Sized,
        T: Ticker + ?Sized,
    {
        let geometry = &self.config.geometry;
        let gauge = DialView::new(Dial::Persuasion, result.persuasion_score, &result.persuasion_label, geometry);
        let ring = DialView::new(Dial::Ethical, result.ethical_score, &result.ethical_reflection, geometry);

        surface.draw_dial(&gauge);
        surface.draw_dial(&ring);
        animate(surface, ticker, self.config.animation, &[&gauge, &ring]);
        surface.dials_settled();

        surface.draw_sentiment(&SentimentBars::from_sentiment(&result.sentiment));

        self.replace_chart(surface, &EmotionChart::from_emotions(&result.emotions));

        surface.draw_keywords(&KeywordPanel::from_keywords(&result.persuasive_keywords));
        surface.insert_highlighted(&result.highlighted_text);
    }

    /// Destroy the live chart, if any.
    pub fn dispose<S>(&mut self, surface: &mut S)
    where
        S: Surface<Chart = C> + ?Sized,
    {
        if let Some(old) = self.chart.take() {
            debug!("disposing emotion chart");
            surface.destroy_chart(old);
        }
    }

    fn replace_chart<S>(&mut self, surface: &mut S, chart: &EmotionChart)
    where
        S: Surface<Chart = C> + ?Sized,
    {
        self.dispose(surface);
        self.chart = Some(surface.create_chart(chart));
    }
}

/// Runs every dial's tween on one cooperative tick loop. Each dial stops on
/// its own target; the loop ends when all have.
fn animate<S, T>(surface: &mut S, ticker: &mut T, animation: Animation, dials: &[&DialView])
where
    S: Surface + ?Sized,
    T: Ticker + ?Sized,
{
    let mut tweens: Vec<(Dial, Tween)> = dials
        .iter()
        .map(|view| (view.dial, Tween::new(0.0, view.score, animation)))
        .collect();

    loop {
        let mut active = false;
        for (dial, tween) in tweens.iter_mut() {
            if let Some(value) = tween.next() {
                surface.set_dial_value(*dial, value);
                active = true;
            }
        }
        if !active {
            break;
        }
        ticker.wait(animation.tick);
    }
}
