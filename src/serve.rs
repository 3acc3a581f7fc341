//! HTTP server for interactive mode
//!
//! `persuasion-lens serve` → starts server, opens browser, shows the page
//!
//! The server holds a single page and a single orchestrator, like one open
//! browser tab: each form submission re-renders that page, so the chart
//! handle from the previous submission is disposed before the next one is
//! drawn. Requests are handled one at a time.

use crate::client::{AnalysisService, HttpAnalysisClient};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::orchestrator::RequestOrchestrator;
use crate::render::tween::Immediate;
use crate::render::ResultRenderer;
use crate::report::html::{HtmlChart, HtmlPage, PageMode};
use serde::Deserialize;
use std::io::Read;
use tiny_http::{Header, Method, Request, Response, Server};
use tracing::{debug, error, info};

#[derive(Deserialize, Debug, Default)]
pub struct FormInput {
    #[serde(default)]
    pub text: String,
}

/// What to send back for one request
#[derive(Debug, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    fn html(body: String) -> Self {
        Self { status: 200, content_type: "text/html; charset=utf-8", body }
    }

    fn text(status: u16, body: &str) -> Self {
        Self { status, content_type: "text/plain; charset=utf-8", body: body.to_string() }
    }
}

/// The single page and pipeline the server drives
pub struct Session<A: AnalysisService> {
    page: HtmlPage,
    orchestrator: RequestOrchestrator<A, HtmlChart>,
}

impl<A: AnalysisService> Session<A> {
    pub fn new(service: A, config: &Config) -> Self {
        let render = config.render();
        Self {
            page: HtmlPage::new(PageMode::Interactive, render.animation),
            orchestrator: RequestOrchestrator::new(service, ResultRenderer::new(render)),
        }
    }

    pub fn page(&self) -> &HtmlPage {
        &self.page
    }

    /// Route one request. Kept free of tiny_http types so it can be tested.
    pub fn route(&mut self, method: &Method, path: &str, body: &str) -> Reply {
        match (method, path) {
            (&Method::Get, "/") => {
                self.page.clear_notice();
                Reply::html(self.page.to_html())
            }

            (&Method::Post, "/") => {
                let form: FormInput = serde_urlencoded::from_str(body).unwrap_or_default();
                self.page.clear_notice();
                self.page.set_input(&form.text);

                // Errors are already on the page as a notice
                if let Err(e) = self.orchestrator.submit(&mut self.page, &mut Immediate, &form.text) {
                    debug!(error = %e, "submission did not render");
                }
                Reply::html(self.page.to_html())
            }

            (&Method::Get, "/health") => Reply::text(200, "ok"),

            _ => Reply::text(404, "Not found"),
        }
    }
}

/// Start server, open browser, serve the page
pub fn start(port: u16, config: &Config, open_browser: bool) -> Result<()> {
    let addr = format!("127.0.0.1:{}", port);
    let server = Server::http(&addr).map_err(|e| Error::Server(e.to_string()))?;

    let url = format!("http://localhost:{}", port);

    eprintln!("\n\x1b[1;35m◎ Persuasion Lens\x1b[0m");
    eprintln!("   {}", url);
    eprintln!("   Backend: {}\n", config.endpoint);
    info!(%url, endpoint = %config.endpoint, "serving");

    if open_browser {
        let _ = open::that(&url);
    }

    let client = HttpAnalysisClient::new(config.endpoint.clone())?;
    let mut session = Session::new(client, config);

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &mut session) {
            error!(error = %e, "failed to answer request");
        }
    }

    Ok(())
}

fn handle_request<A: AnalysisService>(mut request: Request, session: &mut Session<A>) -> Result<()> {
    let url = request.url().to_string();
    let path = url.split('?').next().unwrap_or("/").to_string();
    let method = request.method().clone();
    debug!(method = ?method, %path, "request");

    let mut body = String::new();
    if method == Method::Post {
        request.as_reader().read_to_string(&mut body)?;
    }

    let reply = session.route(&method, &path, &body);
    let header = Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes())
        .map_err(|_| Error::Server("invalid content type header".to_string()))?;
    let response = Response::from_string(reply.body)
        .with_status_code(reply.status)
        .with_header(header);
    request.respond(response)?;
    Ok(())
}
