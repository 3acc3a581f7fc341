//! Report generation for a finished analysis
//!
//! This module writes one analysis result to disk:
//!
//! - **HTML**: the same page the `serve` mode shows, frozen with final values
//! - **JSON**: machine-readable result plus a summary block
//!
//! # Usage
//!
//! ```ignore
//! use persuasion_lens::report;
//!
//! // Automatically picks format based on extension
//! report::generate("report.html", &text, &result, &config)?;  // HTML
//! report::generate("report.json", &text, &result, &config)?;  // JSON
//! ```

pub mod html;
pub mod json;

use crate::model::AnalysisResult;
use crate::render::emotion::capitalize;
use crate::render::gauge::{Dial, Tier};
use crate::render::tween::Immediate;
use crate::render::{RenderConfig, ResultRenderer};
use crate::surface::Controls;
use html::{HtmlChart, HtmlPage, PageMode};
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;

/// Generate a report in the appropriate format based on file extension
pub fn generate<P: AsRef<Path>>(
    path: P,
    input: &str,
    result: &AnalysisResult,
    config: &RenderConfig,
) -> io::Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut file = std::fs::File::create(path)?;

    match ext.as_str() {
        "json" => json::write(&mut file, result),
        _ => write_html(&mut file, input, result, config),
    }
}

/// Render `result` into a report page and write it out.
pub fn write_html<W: Write>(
    writer: &mut W,
    input: &str,
    result: &AnalysisResult,
    config: &RenderConfig,
) -> io::Result<()> {
    let mut page = HtmlPage::new(PageMode::Report, config.animation);
    page.set_input(input);
    page.set_generated(&chrono::Local::now().to_rfc3339());
    page.set_results_visible(true);

    let mut renderer: ResultRenderer<HtmlChart> = ResultRenderer::new(*config);
    renderer.render(&mut page, &mut Immediate, result);
    page.write(writer)
}

/// One-line digest of a result, for quiet mode and report headers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub persuasion: f64,
    pub persuasion_tier: Tier,
    pub ethical: f64,
    pub ethical_tier: Tier,
    pub dominant_emotion: Option<String>,
    pub dominant_share: Option<f64>,
    pub keyword_count: u32,
}

impl Summary {
    pub fn from_result(result: &AnalysisResult) -> Self {
        // Ties go to the alphabetically first emotion
        let dominant = result
            .emotions
            .iter()
            .filter(|(_, share)| **share > 0.0)
            .fold(None::<(&String, f64)>, |best, (name, &share)| match best {
                Some((_, top)) if top >= share => best,
                _ => Some((name, share)),
            });

        Self {
            persuasion: result.persuasion_score,
            persuasion_tier: Dial::Persuasion.thresholds().tier(result.persuasion_score),
            ethical: result.ethical_score,
            ethical_tier: Dial::Ethical.thresholds().tier(result.ethical_score),
            dominant_emotion: dominant.map(|(name, _)| capitalize(name)),
            dominant_share: dominant.map(|(_, share)| share),
            keyword_count: result.persuasive_keywords.count,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "persuasion {:.0} ({}) | ethical {:.0} ({}) | ",
            self.persuasion, self.persuasion_tier, self.ethical, self.ethical_tier
        )?;
        match (&self.dominant_emotion, self.dominant_share) {
            (Some(name), Some(share)) => write!(f, "{} {:.1}%", name, share)?,
            _ => write!(f, "no dominant emotion")?,
        }
        write!(f, " | {} keyword(s)", self.keyword_count)
    }
}
