//! Persuasion Lens - see how hard a text is trying to move you
//!
//! Persuasion Lens is the presentation side of a text-analysis service. It
//! validates the text, sends it to the analysis backend in a single request,
//! and renders the returned scores as a persuasion gauge, an ethical score
//! ring, sentiment bars, an emotion chart, keyword tags, and highlighted text.
//!
//! # Overview
//!
//! All scoring happens in the backend. This crate never computes a score; it
//! only decides how to show one. The pipeline is:
//!
//! 1. **Validate**: trimmed text must be at least 10 characters.
//! 2. **Request**: disable the trigger, show a busy indicator, `POST` the text.
//! 3. **Render**: reveal the results and update every region, or show the
//!    error as a notice. The trigger is re-enabled either way.
//!
//! # Quick Start
//!
//! ```no_run
//! use persuasion_lens::{
//!     HttpAnalysisClient, Immediate, RenderConfig, RequestOrchestrator, ResultRenderer, TerminalPage,
//! };
//!
//! let client = HttpAnalysisClient::new("http://127.0.0.1:5000/analyze").unwrap();
//! let mut orchestrator = RequestOrchestrator::new(client, ResultRenderer::new(RenderConfig::default()));
//! let mut page = TerminalPage::new(std::io::stdout(), false, true);
//!
//! match orchestrator.submit(&mut page, &mut Immediate, "Act now! Only a few left!") {
//!     Ok(result) => println!("Persuasion: {}/100", result.persuasion_score),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```
//!
//! # Tiers
//!
//! | Dial       | High  | Moderate | Low   |
//! |------------|-------|----------|-------|
//! | Persuasion | > 80  | > 50     | <= 50 |
//! | Ethical    | > 70  | > 40     | <= 40 |
//!
//! # Modules
//!
//! - [`orchestrator`]: validation and request lifecycle
//! - [`render`]: dial, sentiment, chart, and keyword view models plus the renderer
//! - [`surface`]: the page traits every output implements
//! - [`terminal`]: ANSI terminal page
//! - [`report`]: HTML page and JSON report
//! - [`serve`]: local web UI

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod render;
pub mod report;
pub mod serve;
pub mod surface;
pub mod terminal;
pub mod validate;

pub use client::{AnalysisService, HttpAnalysisClient, DEFAULT_ENDPOINT};
pub use config::Config;
pub use error::{Error, RequestError, Result, ValidationError};
pub use model::{AnalysisResult, PersuasiveKeywords, Sentiment};
pub use orchestrator::RequestOrchestrator;
pub use render::tween::{Immediate, SleepTicker, Ticker};
pub use render::{RenderConfig, ResultRenderer};
pub use surface::{Controls, Surface};
pub use terminal::TerminalPage;
pub use validate::{InputValidator, MIN_INPUT_CHARS};
