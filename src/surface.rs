//! The page abstraction the pipeline drives
//!
//! A page has two faces. [`Controls`] is the input side (the analyze trigger,
//! the busy indicator, the results area, and blocking notices) and is driven
//! by the [`RequestOrchestrator`](crate::orchestrator::RequestOrchestrator).
//! [`Surface`] is the output side and is driven by the
//! [`ResultRenderer`](crate::render::ResultRenderer).
//!
//! The terminal and HTML pages implement both.

use crate::render::emotion::EmotionChart;
use crate::render::gauge::{Dial, DialView};
use crate::render::keywords::KeywordPanel;
use crate::render::sentiment::SentimentBars;

pub trait Controls {
    fn set_trigger_enabled(&mut self, enabled: bool);
    fn set_busy(&mut self, busy: bool);
    fn set_results_visible(&mut self, visible: bool);
    /// Blocking notice: validation failures and request errors.
    fn notify(&mut self, message: &str);
}

pub trait Surface {
    /// Handle to a live chart. Must be passed back to `destroy_chart`.
    type Chart;

    /// Static parts of a dial: arc fill, tier color, caption.
    fn draw_dial(&mut self, view: &DialView);
    /// Displayed number of a dial, called once per animation tick.
    fn set_dial_value(&mut self, dial: Dial, value: i64);
    /// Both dials reached their targets.
    fn dials_settled(&mut self) {}
    fn draw_sentiment(&mut self, bars: &SentimentBars);
    fn create_chart(&mut self, chart: &EmotionChart) -> Self::Chart;
    fn destroy_chart(&mut self, chart: Self::Chart);
    fn draw_keywords(&mut self, panel: &KeywordPanel);
    /// Trusted markup from the backend, inserted as is.
    fn insert_highlighted(&mut self, markup: &str);
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording page used by renderer and orchestrator tests.

    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    pub struct RecordingPage {
        pub trigger_enabled: bool,
        pub busy: bool,
        pub results_visible: bool,
        pub notices: Vec<String>,
        /// Every trigger/busy transition, in order
        pub control_log: Vec<String>,

        pub dials: HashMap<Dial, DialView>,
        pub dial_frames: HashMap<Dial, Vec<i64>>,
        pub settled: usize,
        pub sentiment: Option<SentimentBars>,
        pub next_chart: u64,
        pub live_charts: Vec<(u64, EmotionChart)>,
        pub destroyed: Vec<u64>,
        pub keywords: Option<KeywordPanel>,
        pub highlighted: Option<String>,
    }

    impl RecordingPage {
        pub fn new() -> Self {
            Self {
                trigger_enabled: true,
                ..Default::default()
            }
        }

        pub fn final_value(&self, dial: Dial) -> Option<i64> {
            self.dial_frames.get(&dial).and_then(|f| f.last().copied())
        }
    }

    impl Controls for RecordingPage {
        fn set_trigger_enabled(&mut self, enabled: bool) {
            self.trigger_enabled = enabled;
            self.control_log.push(format!("trigger:{}", enabled));
        }

        fn set_busy(&mut self, busy: bool) {
            self.busy = busy;
            self.control_log.push(format!("busy:{}", busy));
        }

        fn set_results_visible(&mut self, visible: bool) {
            self.results_visible = visible;
        }

        fn notify(&mut self, message: &str) {
            self.notices.push(message.to_string());
        }
    }

    impl Surface for RecordingPage {
        type Chart = u64;

        fn draw_dial(&mut self, view: &DialView) {
            self.dials.insert(view.dial, view.clone());
            self.dial_frames.insert(view.dial, Vec::new());
        }

        fn set_dial_value(&mut self, dial: Dial, value: i64) {
            self.dial_frames.entry(dial).or_default().push(value);
        }

        fn dials_settled(&mut self) {
            self.settled += 1;
        }

        fn draw_sentiment(&mut self, bars: &SentimentBars) {
            self.sentiment = Some(bars.clone());
        }

        fn create_chart(&mut self, chart: &EmotionChart) -> u64 {
            self.next_chart += 1;
            self.live_charts.push((self.next_chart, chart.clone()));
            self.next_chart
        }

        fn destroy_chart(&mut self, chart: u64) {
            self.live_charts.retain(|(id, _)| *id != chart);
            self.destroyed.push(chart);
        }

        fn draw_keywords(&mut self, panel: &KeywordPanel) {
            self.keywords = Some(panel.clone());
        }

        fn insert_highlighted(&mut self, markup: &str) {
            self.highlighted = Some(markup.to_string());
        }
    }
}
