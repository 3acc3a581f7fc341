//! Terminal page: ANSI output with indicatif spinner and dial bars
//!
//! In interactive mode the busy indicator is a spinner and each dial is a
//! progress bar whose position follows the count-up. Otherwise everything is
//! written as plain lines once the values settle, which is what pipes and
//! tests see.

use crate::render::emotion::{emotion_term_color, EmotionChart};
use crate::render::gauge::{Dial, DialView};
use crate::render::keywords::KeywordPanel;
use crate::render::sentiment::SentimentBars;
use crate::surface::{Controls, Surface};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::Write;
use std::time::Duration;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[90m";
const BAR_WIDTH: usize = 40;

/// Handle for a chart drawn to the terminal.
#[derive(Debug, PartialEq, Eq)]
pub struct TerminalChart(u64);

struct DialLine {
    view: DialView,
    value: i64,
    bar: Option<ProgressBar>,
}

pub struct TerminalPage<W: Write> {
    out: W,
    interactive: bool,
    color: bool,
    spinner: Option<ProgressBar>,
    multi: Option<MultiProgress>,
    dials: Vec<DialLine>,
    next_chart: u64,
    live_charts: usize,
}

impl<W: Write> TerminalPage<W> {
    pub fn new(out: W, interactive: bool, color: bool) -> Self {
        Self {
            out,
            interactive,
            color,
            spinner: None,
            multi: None,
            dials: Vec::new(),
            next_chart: 0,
            live_charts: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn live_charts(&self) -> usize {
        self.live_charts
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn section(&mut self, title: &str) {
        let heading = self.paint(BOLD, title);
        let _ = writeln!(self.out, "\n{}", heading);
        let _ = writeln!(self.out, "{}", "─".repeat(50));
    }

    fn write_dial(&mut self, index: usize) {
        let line = &self.dials[index];
        let text = format!(
            "{:<14} [{}] {:>3}/100  {}",
            line.view.dial.title(),
            bar(line.view.fraction, BAR_WIDTH),
            line.value,
            line.view.tier
        );
        let painted = self.paint(ansi(line.view.swatch.term), &text);
        let caption = self.paint(DIM, &line.view.caption);
        let _ = writeln!(self.out, "{}", painted);
        let _ = writeln!(self.out, "{:<14} {}", "", caption);
    }
}

impl<W: Write> Controls for TerminalPage<W> {
    // One submission per process; there is no trigger to redraw
    fn set_trigger_enabled(&mut self, _enabled: bool) {}

    fn set_busy(&mut self, busy: bool) {
        if busy && self.interactive && self.spinner.is_none() {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message("Analyzing...");
            spinner.enable_steady_tick(Duration::from_millis(80));
            self.spinner = Some(spinner);
        } else if !busy {
            if let Some(spinner) = self.spinner.take() {
                spinner.finish_and_clear();
            }
        }
    }

    fn set_results_visible(&mut self, visible: bool) {
        if visible {
            let title = self.paint(BOLD, "Persuasion Lens");
            let _ = writeln!(self.out, "{}", title);
            let _ = writeln!(self.out, "{}", "─".repeat(50));
        }
    }

    fn notify(&mut self, message: &str) {
        let painted = self.paint("\x1b[31m", message);
        let _ = writeln!(self.out, "{}", painted);
        let _ = self.out.flush();
    }
}

impl<W: Write> Surface for TerminalPage<W> {
    type Chart = TerminalChart;

    fn draw_dial(&mut self, view: &DialView) {
        let progress = if self.interactive {
            let multi = self
                .multi
                .get_or_insert_with(|| MultiProgress::with_draw_target(ProgressDrawTarget::stderr()));
            let pb = multi.add(ProgressBar::new(100));
            let template = format!(
                "{{prefix:<14}} [{{bar:{}.{}}}] {{pos:>3}}/100  {{msg}}",
                BAR_WIDTH, view.swatch.term
            );
            if let Ok(style) = ProgressStyle::default_bar().template(&template) {
                pb.set_style(style.progress_chars("█▉░"));
            }
            pb.set_prefix(view.dial.title());
            pb.set_message(view.tier.to_string());
            Some(pb)
        } else {
            None
        };

        self.dials.retain(|d| d.view.dial != view.dial);
        self.dials.push(DialLine {
            view: view.clone(),
            value: 0,
            bar: progress,
        });
    }

    fn set_dial_value(&mut self, dial: Dial, value: i64) {
        if let Some(line) = self.dials.iter_mut().find(|d| d.view.dial == dial) {
            line.value = value;
            if let Some(ref pb) = line.bar {
                pb.set_position(value.clamp(0, 100) as u64);
            }
        }
    }

    fn dials_settled(&mut self) {
        let interactive = self.interactive;
        for line in &self.dials {
            if let Some(ref pb) = line.bar {
                pb.finish();
            }
        }
        self.multi = None;

        if interactive {
            // Bars stay on screen; only the captions are missing
            let captions: Vec<(Dial, String)> = self
                .dials
                .iter()
                .map(|d| (d.view.dial, d.view.caption.clone()))
                .collect();
            for (dial, caption) in captions {
                let caption = self.paint(DIM, &caption);
                let _ = writeln!(self.out, "{:<14} {}", dial.title(), caption);
            }
        } else {
            for i in 0..self.dials.len() {
                self.write_dial(i);
            }
        }
        self.dials.clear();
    }

    fn draw_sentiment(&mut self, bars: &SentimentBars) {
        self.section("Sentiment");
        let _ = writeln!(
            self.out,
            "{:<14} [{}] {}",
            "Polarity",
            bar(bars.polarity_fill / 100.0, BAR_WIDTH),
            bars.polarity_text()
        );
        let _ = writeln!(
            self.out,
            "{:<14} [{}] {}",
            "Subjectivity",
            bar(bars.subjectivity_fill / 100.0, BAR_WIDTH),
            bars.subjectivity_text()
        );
    }

    fn create_chart(&mut self, chart: &EmotionChart) -> TerminalChart {
        self.section("Emotions");
        if chart.segments.is_empty() {
            let empty = self.paint(DIM, "No emotion data.");
            let _ = writeln!(self.out, "{}", empty);
        }
        for (segment, share) in chart.segments.iter().zip(chart.proportions()) {
            let line = format!(
                "{:<14} [{}] {:.1}%",
                segment.label,
                bar(share, BAR_WIDTH),
                segment.value
            );
            let painted = self.paint(ansi(emotion_term_color(&segment.key)), &line);
            let _ = writeln!(self.out, "{}", painted);
        }

        self.next_chart += 1;
        self.live_charts += 1;
        TerminalChart(self.next_chart)
    }

    fn destroy_chart(&mut self, _chart: TerminalChart) {
        // Printed lines stay in the scrollback; only the handle goes away
        self.live_charts = self.live_charts.saturating_sub(1);
    }

    fn draw_keywords(&mut self, panel: &KeywordPanel) {
        self.section(&format!("Persuasive Keywords ({})", panel.count));
        for row in &panel.rows {
            let _ = writeln!(self.out, "{:<14} {}", row.label, row.count);
        }
        match panel.placeholder() {
            Some(placeholder) => {
                let placeholder = self.paint(DIM, placeholder);
                let _ = writeln!(self.out, "{}", placeholder);
            }
            None => {
                let tags: Vec<String> = panel
                    .tags
                    .iter()
                    .map(|t| self.paint("\x1b[35m", &format!("[{}]", t)))
                    .collect();
                let _ = writeln!(self.out, "{}", tags.join(" "));
            }
        }
    }

    fn insert_highlighted(&mut self, markup: &str) {
        self.section("Highlighted Text");
        let text = highlight_to_ansi(markup, self.color);
        let _ = writeln!(self.out, "{}", text);
        let _ = self.out.flush();
    }
}

/// Map an indicatif color name to an ANSI escape.
fn ansi(term: &str) -> &'static str {
    match term {
        "red" => "\x1b[31m",
        "green" => "\x1b[32m",
        "yellow" => "\x1b[33m",
        "magenta" => "\x1b[35m",
        "cyan" => "\x1b[36m",
        _ => "\x1b[37m",
    }
}

/// Fixed-width bar, `fraction` clamped to [0, 1].
pub fn bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

const SPAN_OPEN: &str = "<span class=\"highlight-";
const SPAN_CLOSE: &str = "</span>";

/// Translate the backend's `highlight-*` spans into terminal styling.
///
/// With color, each highlighted word is wrapped in the color of its kind.
/// Without color it is wrapped in brackets. Any other markup passes through.
pub fn highlight_to_ansi(markup: &str, color: bool) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(pos) = rest.find(SPAN_OPEN) {
        let after = &rest[pos + SPAN_OPEN.len()..];
        let parsed = after.find("\">").and_then(|quote| {
            let kind = &after[..quote];
            let body = &after[quote + 2..];
            body.find(SPAN_CLOSE)
                .map(|end| (kind, &body[..end], &body[end + SPAN_CLOSE.len()..]))
        });
        // Malformed span: emit the remainder untouched
        let Some((kind, word, tail)) = parsed else {
            break;
        };

        out.push_str(&rest[..pos]);
        if color {
            out.push_str(highlight_color(kind));
            out.push_str(word);
            out.push_str(RESET);
        } else {
            out.push('[');
            out.push_str(word);
            out.push(']');
        }
        rest = tail;
    }

    out.push_str(rest);
    out
}

fn highlight_color(kind: &str) -> &'static str {
    match kind {
        "persuasive" => "\x1b[1;35m",
        other => ansi(emotion_term_color(other)),
    }
}
