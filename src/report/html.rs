//! HTML page: SVG gauge, score ring, and emotion donut
//!
//! [`HtmlPage`] is both the `serve` mode page and the HTML report. It keeps
//! the state the pipeline pushes into it and writes a self-contained document
//! on demand. The server only ever renders final values: the arc stroke
//! fills with a CSS animation, and an inline script counts each dial's number
//! up from its `data-target`, `data-duration` and `data-tick` attributes.

use crate::render::emotion::EmotionChart;
use crate::render::gauge::{Dial, DialView};
use crate::render::keywords::KeywordPanel;
use crate::render::sentiment::SentimentBars;
use crate::render::tween::Animation;
use crate::surface::{Controls, Surface};
use std::f64::consts::PI;
use std::io::{self, Write};

const DONUT_RADIUS: f64 = 70.0;
const DONUT_STROKE: f64 = 28.0;
const DIAL_STROKE: f64 = 14.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// Served page with the input form and analyze trigger
    Interactive,
    /// Static report of one finished analysis
    Report,
}

/// Handle for a chart embedded in the page.
#[derive(Debug, PartialEq, Eq)]
pub struct HtmlChart(u64);

pub struct HtmlPage {
    mode: PageMode,
    animation: Animation,
    input: String,
    generated: Option<String>,
    trigger_enabled: bool,
    busy: bool,
    results_visible: bool,
    notice: Option<String>,
    dials: Vec<(DialView, i64)>,
    sentiment: Option<SentimentBars>,
    next_chart: u64,
    charts: Vec<(u64, EmotionChart)>,
    keywords: Option<KeywordPanel>,
    highlighted: Option<String>,
}

impl HtmlPage {
    pub fn new(mode: PageMode, animation: Animation) -> Self {
        Self {
            mode,
            animation,
            input: String::new(),
            generated: None,
            trigger_enabled: true,
            busy: false,
            results_visible: false,
            notice: None,
            dials: Vec::new(),
            sentiment: None,
            next_chart: 0,
            charts: Vec::new(),
            keywords: None,
            highlighted: None,
        }
    }

    /// Text shown in the input box (interactive) or quoted (report).
    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    pub fn set_generated(&mut self, timestamp: &str) {
        self.generated = Some(timestamp.to_string());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn live_charts(&self) -> usize {
        self.charts.len()
    }

    pub fn trigger_enabled(&self) -> bool {
        self.trigger_enabled
    }

    pub fn to_html(&self) -> String {
        let mut buf = Vec::new();
        // Writing to a Vec cannot fail
        let _ = self.write(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let form = match self.mode {
            PageMode::Interactive => self.form_html(),
            PageMode::Report => format!(
                r#"<blockquote class="source">{}</blockquote>"#,
                html_escape(&self.input)
            ),
        };
        let notice = self
            .notice
            .as_ref()
            .map(|n| format!(r#"<div class="notice" role="alert">{}</div>"#, html_escape(n)))
            .unwrap_or_default();
        let generated = self
            .generated
            .as_ref()
            .map(|g| format!(r#"<span class="subtitle">Generated {}</span>"#, html_escape(g)))
            .unwrap_or_default();

        let dials: String = self
            .dials
            .iter()
            .map(|(view, value)| dial_html(view, *value, &self.animation))
            .collect();
        let sentiment = self.sentiment.as_ref().map(sentiment_html).unwrap_or_default();
        let charts: String = self.charts.iter().map(|(_, chart)| donut_html(chart)).collect();
        let keywords = self.keywords.as_ref().map(keywords_html).unwrap_or_default();
        // Trusted markup from the backend, inserted verbatim
        let highlighted = self.highlighted.as_deref().unwrap_or("");

        write!(writer, r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Persuasion Lens</title>
    <style>
        :root {{
            --bg: #0d1117;
            --card: #161b22;
            --border: #30363d;
            --text: #e6edf3;
            --dim: #7d8590;
            --accent: #58a6ff;
            --danger: #f85149;
        }}
        * {{ box-sizing: border-box; margin: 0; padding: 0; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
            background: var(--bg);
            color: var(--text);
            line-height: 1.5;
        }}
        .container {{ max-width: 1100px; margin: 0 auto; padding: 2rem; }}
        .header {{
            display: flex;
            align-items: baseline;
            gap: 1rem;
            margin-bottom: 2rem;
            padding-bottom: 1rem;
            border-bottom: 1px solid var(--border);
        }}
        .logo {{
            font-size: 2.25rem;
            font-weight: 800;
            background: linear-gradient(135deg, var(--accent), #a371f7);
            -webkit-background-clip: text;
            -webkit-text-fill-color: transparent;
        }}
        .subtitle {{ color: var(--dim); font-size: 1rem; }}
        .card {{
            background: var(--card);
            border: 1px solid var(--border);
            border-radius: 12px;
            padding: 1.5rem;
            margin-bottom: 1.5rem;
        }}
        .card-title {{ font-size: 1rem; font-weight: 600; margin-bottom: 1rem; color: var(--dim); }}

        /* Input */
        textarea {{
            width: 100%;
            min-height: 160px;
            background: var(--bg);
            color: var(--text);
            border: 1px solid var(--border);
            border-radius: 8px;
            padding: 1rem;
            font: inherit;
        }}
        .actions {{ display: flex; align-items: center; gap: 1rem; margin-top: 1rem; }}
        button {{
            background: var(--accent);
            color: #0d1117;
            border: none;
            border-radius: 8px;
            padding: 0.6rem 1.5rem;
            font-weight: 600;
            cursor: pointer;
        }}
        button:disabled {{ opacity: 0.5; cursor: wait; }}
        .busy {{ color: var(--dim); }}
        .notice {{
            border: 1px solid var(--danger);
            color: var(--danger);
            border-radius: 8px;
            padding: 0.75rem 1rem;
            margin-bottom: 1.5rem;
        }}
        .source {{ color: var(--dim); border-left: 3px solid var(--border); padding-left: 1rem; white-space: pre-wrap; }}

        /* Tabs */
        .tabs > input {{ display: none; }}
        .tabs > label {{
            display: inline-block;
            padding: 0.5rem 1rem;
            color: var(--dim);
            cursor: pointer;
            border-bottom: 2px solid transparent;
        }}
        .tabs > input:checked + label {{ color: var(--text); border-bottom-color: var(--accent); }}
        .panel {{ display: none; padding-top: 1.5rem; }}
        #tab-scores:checked ~ #panel-scores,
        #tab-emotions:checked ~ #panel-emotions,
        #tab-text:checked ~ #panel-text {{ display: block; }}

        /* Dials */
        .dials {{ display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; }}
        .dial {{ text-align: center; }}
        .dial svg {{ display: block; margin: 0 auto; }}
        .dial-value {{ font-size: 2.5rem; font-weight: 700; fill: var(--text); }}
        .dial-caption {{ color: var(--dim); margin-top: 0.75rem; font-size: 0.95rem; }}
        .dial-tier {{ font-size: 0.75rem; text-transform: uppercase; letter-spacing: 0.05em; font-weight: 600; }}
        .dial-fill {{ animation: dial-fill {duration_ms}ms linear both; }}
        @keyframes dial-fill {{ from {{ stroke-dashoffset: var(--arc); }} }}

        /* Sentiment */
        .bar-row {{ display: grid; grid-template-columns: 120px 1fr 70px; align-items: center; gap: 1rem; margin-bottom: 0.75rem; }}
        .bar-track {{ height: 10px; background: var(--border); border-radius: 5px; overflow: hidden; }}
        .bar-fill {{ height: 100%; background: var(--accent); border-radius: 5px; }}
        .mono {{ font-family: 'SF Mono', 'Fira Code', monospace; }}

        /* Emotions and keywords */
        .donut {{ display: flex; align-items: center; gap: 2rem; }}
        .legend-item {{ display: flex; align-items: center; gap: 0.5rem; font-size: 0.875rem; }}
        .legend-dot {{ width: 12px; height: 12px; border-radius: 50%; }}
        .keyword-total {{ font-size: 2rem; font-weight: 700; }}
        .category {{ display: flex; justify-content: space-between; border-bottom: 1px solid var(--border); padding: 0.25rem 0; }}
        .tags {{ display: flex; flex-wrap: wrap; gap: 0.5rem; margin-top: 1rem; }}
        .tag {{ background: rgba(163,113,247,0.15); color: #a371f7; border-radius: 20px; padding: 0.2rem 0.75rem; font-size: 0.85rem; }}
        .dim {{ color: var(--dim); }}

        /* Highlighted text */
        .highlighted {{ white-space: pre-wrap; line-height: 1.8; }}
        .highlight-persuasive {{ background: rgba(163,113,247,0.3); border-radius: 3px; padding: 0 2px; }}
        .highlight-joy {{ background: rgba(251,191,36,0.3); border-radius: 3px; padding: 0 2px; }}
        .highlight-fear {{ background: rgba(163,113,247,0.45); border-radius: 3px; padding: 0 2px; }}
        .highlight-anger {{ background: rgba(248,81,73,0.35); border-radius: 3px; padding: 0 2px; }}
        .highlight-trust {{ background: rgba(63,185,80,0.3); border-radius: 3px; padding: 0 2px; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <div class="logo">Persuasion Lens</div>
            <div class="subtitle">How hard is this text trying to move you?</div>
            {generated}
        </div>
        {notice}
        <div class="card">
            {form}
        </div>
        <main id="results"{results_hidden}>
            <div class="tabs">
                <input type="radio" name="tab" id="tab-scores" checked><label for="tab-scores">Scores</label>
                <input type="radio" name="tab" id="tab-emotions"><label for="tab-emotions">Emotions &amp; Keywords</label>
                <input type="radio" name="tab" id="tab-text"><label for="tab-text">Highlighted Text</label>

                <section class="panel" id="panel-scores">
                    <div class="dials">{dials}</div>
                    <div class="card">
                        <div class="card-title">Sentiment</div>
                        {sentiment}
                    </div>
                </section>

                <section class="panel" id="panel-emotions">
                    <div class="card">
                        <div class="card-title">Emotional Breakdown</div>
                        <div id="emotion-chart">{charts}</div>
                    </div>
                    <div class="card">
                        <div class="card-title">Persuasive Keywords</div>
                        {keywords}
                    </div>
                </section>

                <section class="panel" id="panel-text">
                    <div class="card">
                        <div class="card-title">Highlighted Text</div>
                        <div class="highlighted" id="highlighted-text">{highlighted}</div>
                    </div>
                </section>
            </div>
        </main>
    </div>
    <script>
    // Count each dial from 0 to its target: fixed increment per tick, snapping to the end
    document.querySelectorAll('.dial-value[data-target]').forEach(function (el) {{
        var end = parseFloat(el.dataset.target);
        var duration = parseFloat(el.dataset.duration);
        var tick = parseFloat(el.dataset.tick);
        var steps = duration / tick;
        var increment = isFinite(steps) && steps >= 1 ? end / steps : end;
        var current = 0;
        el.textContent = '0';
        var timer = setInterval(function () {{
            current += increment;
            if (increment >= 0 ? current >= end : current <= end) {{
                current = end;
                clearInterval(timer);
            }}
            el.textContent = Math.round(current);
        }}, tick);
    }});
    </script>
</body>
</html>
"#,
            duration_ms = self.animation.duration.as_millis(),
            generated = generated,
            notice = notice,
            form = form,
            results_hidden = if self.results_visible { "" } else { " hidden" },
            dials = dials,
            sentiment = sentiment,
            charts = charts,
            keywords = keywords,
            highlighted = highlighted,
        )?;

        Ok(())
    }

    fn form_html(&self) -> String {
        format!(
            r#"<form method="post" action="/" id="analyze-form">
                <div class="card-title">Paste text to analyze</div>
                <textarea name="text" placeholder="At least 10 characters...">{input}</textarea>
                <div class="actions">
                    <button type="submit" id="analyze"{disabled}>Analyze</button>
                    <span class="busy" id="busy"{busy_hidden}>Analyzing...</span>
                </div>
            </form>
            <script>
            document.getElementById('analyze-form').addEventListener('submit', function () {{
                document.getElementById('analyze').disabled = true;
                document.getElementById('busy').hidden = false;
            }});
            </script>"#,
            input = html_escape(&self.input),
            disabled = if self.trigger_enabled { "" } else { " disabled" },
            busy_hidden = if self.busy { "" } else { " hidden" },
        )
    }
}

impl Controls for HtmlPage {
    fn set_trigger_enabled(&mut self, enabled: bool) {
        self.trigger_enabled = enabled;
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    fn set_results_visible(&mut self, visible: bool) {
        self.results_visible = visible;
    }

    fn notify(&mut self, message: &str) {
        self.notice = Some(message.to_string());
    }
}

impl Surface for HtmlPage {
    type Chart = HtmlChart;

    fn draw_dial(&mut self, view: &DialView) {
        self.dials.retain(|(v, _)| v.dial != view.dial);
        self.dials.push((view.clone(), 0));
        self.dials.sort_by_key(|(v, _)| match v.dial {
            Dial::Persuasion => 0,
            Dial::Ethical => 1,
        });
    }

    fn set_dial_value(&mut self, dial: Dial, value: i64) {
        if let Some(entry) = self.dials.iter_mut().find(|(v, _)| v.dial == dial) {
            entry.1 = value;
        }
    }

    fn draw_sentiment(&mut self, bars: &SentimentBars) {
        self.sentiment = Some(bars.clone());
    }

    fn create_chart(&mut self, chart: &EmotionChart) -> HtmlChart {
        self.next_chart += 1;
        self.charts.push((self.next_chart, chart.clone()));
        HtmlChart(self.next_chart)
    }

    fn destroy_chart(&mut self, chart: HtmlChart) {
        self.charts.retain(|(id, _)| *id != chart.0);
    }

    fn draw_keywords(&mut self, panel: &KeywordPanel) {
        self.keywords = Some(panel.clone());
    }

    fn insert_highlighted(&mut self, markup: &str) {
        self.highlighted = Some(markup.to_string());
    }
}

fn dial_html(view: &DialView, value: i64, animation: &Animation) -> String {
    let r = view.arc.radius();
    let pad = DIAL_STROKE;
    let size = 2.0 * (r + pad);
    let (cx, cy) = (r + pad, r + pad);
    let length = view.arc.length();

    let (height, track, fill) = match view.dial {
        Dial::Persuasion => {
            let d = format!("M {:.2} {:.2} A {:.2} {:.2} 0 0 1 {:.2} {:.2}", cx - r, cy, r, r, cx + r, cy);
            (
                cy + pad,
                format!(r#"<path d="{}" fill="none" stroke="var(--border)" stroke-width="{}" stroke-linecap="round"/>"#, d, DIAL_STROKE),
                format!(
                    r#"<path class="dial-fill" d="{d}" fill="none" stroke="{color}" stroke-width="{w}" stroke-linecap="round" stroke-dasharray="{len:.2}" stroke-dashoffset="{off:.2}" style="--arc: {len:.2}"/>"#,
                    d = d,
                    color = view.swatch.hex,
                    w = DIAL_STROKE,
                    len = length,
                    off = view.dash_offset()
                ),
            )
        }
        Dial::Ethical => (
            size,
            format!(r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="none" stroke="var(--border)" stroke-width="{}"/>"#, cx, cy, r, DIAL_STROKE),
            format!(
                r#"<circle class="dial-fill" cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" fill="none" stroke="{color}" stroke-width="{w}" stroke-dasharray="{len:.2}" stroke-dashoffset="{off:.2}" transform="rotate(-90 {cx:.2} {cy:.2})" style="--arc: {len:.2}"/>"#,
                cx = cx,
                cy = cy,
                r = r,
                color = view.swatch.hex,
                w = DIAL_STROKE,
                len = length,
                off = view.dash_offset()
            ),
        ),
    };

    let text_y = match view.dial {
        Dial::Persuasion => cy - 10.0,
        Dial::Ethical => cy + 14.0,
    };

    format!(
        r#"<div class="card dial" id="dial-{id}">
            <div class="card-title">{title}</div>
            <svg width="{size:.0}" height="{height:.0}" viewBox="0 0 {size:.2} {height:.2}">
                {track}
                {fill}
                <text class="dial-value" x="{cx:.2}" y="{text_y:.2}" data-target="{target}" data-duration="{duration}" data-tick="{tick}" text-anchor="middle">{value}</text>
            </svg>
            <div class="dial-tier" style="color: {color}">{tier}</div>
            <div class="dial-caption">{caption}</div>
        </div>"#,
        id = match view.dial {
            Dial::Persuasion => "persuasion",
            Dial::Ethical => "ethical",
        },
        title = view.dial.title(),
        size = size,
        height = height,
        track = track,
        fill = fill,
        cx = cx,
        text_y = text_y,
        target = view.score,
        duration = animation.duration.as_millis(),
        tick = animation.tick.as_millis(),
        value = value,
        color = view.swatch.hex,
        tier = view.tier,
        caption = html_escape(&view.caption),
    )
}

fn sentiment_html(bars: &SentimentBars) -> String {
    format!(
        r#"<div class="bar-row">
            <div>Polarity</div>
            <div class="bar-track"><div class="bar-fill" id="polarity-bar" style="width: {pf:.1}%"></div></div>
            <div class="mono">{pt}</div>
        </div>
        <div class="bar-row">
            <div>Subjectivity</div>
            <div class="bar-track"><div class="bar-fill" id="subjectivity-bar" style="width: {sf:.1}%"></div></div>
            <div class="mono">{st}</div>
        </div>"#,
        pf = bars.polarity_fill,
        pt = bars.polarity_text(),
        sf = bars.subjectivity_fill,
        st = bars.subjectivity_text(),
    )
}

fn donut_html(chart: &EmotionChart) -> String {
    let size = 2.0 * (DONUT_RADIUS + DONUT_STROKE);
    let c = size / 2.0;
    let circumference = 2.0 * PI * DONUT_RADIUS;

    let mut arcs = String::new();
    let mut offset = 0.0;
    for (segment, share) in chart.segments.iter().zip(chart.proportions()) {
        let len = share * circumference;
        if len <= 0.0 {
            continue;
        }
        arcs.push_str(&format!(
            r#"<circle cx="{c:.2}" cy="{c:.2}" r="{r:.2}" fill="none" stroke="{color}" stroke-width="{w}" stroke-dasharray="{len:.2} {gap:.2}" stroke-dashoffset="{off:.2}" transform="rotate(-90 {c:.2} {c:.2})"><title>{tip}</title></circle>"#,
            c = c,
            r = DONUT_RADIUS,
            color = segment.color,
            w = DONUT_STROKE,
            len = len,
            gap = circumference - len,
            off = -offset,
            tip = html_escape(&segment.tooltip()),
        ));
        offset += len;
    }
    if chart.is_empty() {
        arcs.push_str(&format!(
            r#"<circle cx="{c:.2}" cy="{c:.2}" r="{r:.2}" fill="none" stroke="var(--border)" stroke-width="{w}"><title>No emotion data</title></circle>"#,
            c = c,
            r = DONUT_RADIUS,
            w = DONUT_STROKE,
        ));
    }

    let legend: String = chart
        .segments
        .iter()
        .map(|s| {
            format!(
                r#"<div class="legend-item" title="{tip}"><div class="legend-dot" style="background: {color}"></div>{tip}</div>"#,
                tip = html_escape(&s.tooltip()),
                color = s.color,
            )
        })
        .collect();

    format!(
        r#"<div class="donut"><svg width="{size:.0}" height="{size:.0}" viewBox="0 0 {size:.2} {size:.2}">{arcs}</svg><div class="legend">{legend}</div></div>"#,
        size = size,
        arcs = arcs,
        legend = legend,
    )
}

fn keywords_html(panel: &KeywordPanel) -> String {
    let rows: String = panel
        .rows
        .iter()
        .map(|row| {
            format!(
                r#"<div class="category"><span>{}</span><span class="mono">{}</span></div>"#,
                html_escape(&row.label),
                row.count
            )
        })
        .collect();

    let tags = match panel.placeholder() {
        Some(placeholder) => format!(r#"<p class="dim">{}</p>"#, placeholder),
        None => panel
            .tags
            .iter()
            .map(|t| format!(r#"<span class="tag">{}</span>"#, html_escape(t)))
            .collect(),
    };

    format!(
        r#"<div class="keyword-total" id="keyword-count">{count}</div>
        <div class="dim">persuasive keywords found</div>
        <div class="categories">{rows}</div>
        <div class="tags">{tags}</div>"#,
        count = panel.count,
        rows = rows,
        tags = tags,
    )
}

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
