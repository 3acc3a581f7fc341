//! Request lifecycle: validate, lock the trigger, call the service, render
//!
//! The disabled trigger is the only concurrency control. While a request is
//! outstanding further submissions are refused, and the trigger and busy
//! indicator are always restored afterwards whatever the outcome.
//!
//! Failures are logged, surfaced once as a blocking notice, and never
//! retried. The results area is hidden as soon as a request starts and only
//! revealed after a successful response, so a failed request never shows
//! stale or partial results.

use crate::client::AnalysisService;
use crate::error::{Error, Result};
use crate::model::AnalysisResult;
use crate::render::tween::Ticker;
use crate::render::ResultRenderer;
use crate::surface::{Controls, Surface};
use crate::validate::InputValidator;
use tracing::{error, info, warn};

pub struct RequestOrchestrator<A, C> {
    service: A,
    validator: InputValidator,
    renderer: ResultRenderer<C>,
    trigger_enabled: bool,
}

impl<A: AnalysisService, C> RequestOrchestrator<A, C> {
    pub fn new(service: A, renderer: ResultRenderer<C>) -> Self {
        Self {
            service,
            validator: InputValidator::new(),
            renderer,
            trigger_enabled: true,
        }
    }

    pub fn trigger_enabled(&self) -> bool {
        self.trigger_enabled
    }

    /// Handle one press of the analyze trigger.
    ///
    /// Every error is already shown to the user through `page.notify` by the
    /// time it is returned; callers only need it for exit codes and logging.
    pub fn submit<P, T>(&mut self, page: &mut P, ticker: &mut T, raw: &str) -> Result<AnalysisResult>
    where
        P: Controls + Surface<Chart = C> + ?Sized,
        T: Ticker + ?Sized,
    {
        if !self.trigger_enabled {
            warn!("submission ignored while a request is in flight");
            return Err(Error::Busy);
        }

        let text = match self.validator.validate(raw) {
            Ok(text) => text,
            Err(e) => {
                page.notify(&e.to_string());
                return Err(e.into());
            }
        };

        self.trigger_enabled = false;
        page.set_trigger_enabled(false);
        page.set_busy(true);
        page.set_results_visible(false);

        let outcome = match self.service.analyze(text) {
            Ok(result) => {
                page.set_busy(false);
                page.set_results_visible(true);
                self.renderer.render(page, ticker, &result);
                info!(
                    persuasion = result.persuasion_score,
                    ethical = result.ethical_score,
                    "results rendered"
                );
                Ok(result)
            }
            Err(e) => {
                error!(error = %e, "analysis request failed");
                page.notify(&e.notice());
                Err(e.into())
            }
        };

        page.set_busy(false);
        page.set_trigger_enabled(true);
        self.trigger_enabled = true;

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RequestError, ValidationError, GENERIC_FAILURE};
    use crate::model::fixtures::sample_result;
    use crate::render::gauge::Dial;
    use crate::render::tween::Immediate;
    use crate::render::RenderConfig;
    use crate::surface::testing::RecordingPage;
    use std::cell::{Cell, RefCell};

    // ==========================================================================
    // TEST DOUBLES
    // ==========================================================================
    //
    // The fake service replays queued responses and records every text it
    // receives, so tests can assert that validation failures never reach it.
    // ==========================================================================

    struct FakeService {
        responses: RefCell<Vec<std::result::Result<AnalysisResult, RequestError>>>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeService {
        fn new(responses: Vec<std::result::Result<AnalysisResult, RequestError>>) -> Self {
            Self {
                responses: RefCell::new(responses),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl AnalysisService for FakeService {
        fn analyze(&self, text: &str) -> std::result::Result<AnalysisResult, RequestError> {
            self.calls.borrow_mut().push(text.to_string());
            self.responses.borrow_mut().remove(0)
        }
    }

    fn orchestrator(service: &FakeService) -> RequestOrchestrator<&FakeService, u64> {
        RequestOrchestrator::new(service, ResultRenderer::new(RenderConfig::default()))
    }

    // ==========================================================================
    // VALIDATION
    // ==========================================================================

    #[test]
    fn test_short_input_blocks_without_network_call() {
        let service = FakeService::new(vec![]);
        let mut o = orchestrator(&service);
        let mut page = RecordingPage::new();

        for input in ["", "   ", "short", "  nine char ", "123456789"] {
            let err = o.submit(&mut page, &mut Immediate, input).unwrap_err();
            assert!(matches!(err, Error::Validation(ValidationError::TooShort { .. })));
        }

        assert!(service.calls.borrow().is_empty());
        assert_eq!(page.notices.len(), 5);
        assert_eq!(page.notices[0], "Please enter at least 10 characters of text to analyze.");
        // Trigger never touched
        assert!(page.control_log.is_empty());
        assert!(o.trigger_enabled());
    }

    #[test]
    fn test_trimmed_text_is_sent() {
        let service = FakeService::new(vec![Ok(sample_result())]);
        let mut o = orchestrator(&service);
        let mut page = RecordingPage::new();

        o.submit(&mut page, &mut Immediate, "   buy now, it is amazing   ").unwrap();
        assert_eq!(*service.calls.borrow(), vec!["buy now, it is amazing"]);
    }

    // ==========================================================================
    // SUCCESS PATH
    // ==========================================================================

    #[test]
    fn test_success_reveals_and_renders() {
        let service = FakeService::new(vec![Ok(sample_result())]);
        let mut o = orchestrator(&service);
        let mut page = RecordingPage::new();

        let result = o.submit(&mut page, &mut Immediate, "buy now, it is amazing").unwrap();
        assert_eq!(result, sample_result());

        assert!(page.results_visible);
        assert!(!page.busy);
        assert!(page.trigger_enabled);
        assert!(page.notices.is_empty());
        assert_eq!(page.final_value(Dial::Persuasion), Some(73));
        assert_eq!(page.live_charts.len(), 1);
        assert_eq!(
            page.control_log,
            vec!["trigger:false", "busy:true", "busy:false", "busy:false", "trigger:true"]
        );
    }

    #[test]
    fn test_repeated_success_keeps_single_chart() {
        let service = FakeService::new(vec![Ok(sample_result()), Ok(sample_result())]);
        let mut o = orchestrator(&service);
        let mut page = RecordingPage::new();

        o.submit(&mut page, &mut Immediate, "first submission text").unwrap();
        o.submit(&mut page, &mut Immediate, "second submission text").unwrap();

        assert_eq!(page.live_charts.len(), 1);
        assert_eq!(page.destroyed.len(), 1);
    }

    // ==========================================================================
    // FAILURE PATH
    // ==========================================================================

    #[test]
    fn test_rejected_request_shows_backend_message() {
        let service = FakeService::new(vec![Err(RequestError::Rejected {
            status: 400,
            message: "bad text".to_string(),
        })]);
        let mut o = orchestrator(&service);
        let mut page = RecordingPage::new();

        let err = o.submit(&mut page, &mut Immediate, "some perfectly long text").unwrap_err();
        assert!(matches!(err, Error::Request(RequestError::Rejected { status: 400, .. })));

        assert_eq!(page.notices, vec!["Error: bad text"]);
        assert!(page.trigger_enabled);
        assert!(!page.busy);
        assert!(!page.results_visible);
        assert!(page.live_charts.is_empty());
        assert!(o.trigger_enabled());
    }

    #[test]
    fn test_failure_after_success_hides_old_results() {
        let service = FakeService::new(vec![
            Ok(sample_result()),
            Err(RequestError::Rejected {
                status: 500,
                message: GENERIC_FAILURE.to_string(),
            }),
        ]);
        let mut o = orchestrator(&service);
        let mut page = RecordingPage::new();

        o.submit(&mut page, &mut Immediate, "first submission text").unwrap();
        assert!(page.results_visible);

        o.submit(&mut page, &mut Immediate, "second submission text").unwrap_err();
        assert!(!page.results_visible);
        assert_eq!(page.notices, vec!["Error: Analysis failed"]);
    }

    #[test]
    fn test_transport_failure_is_not_retried() {
        let service = FakeService::new(vec![Err(RequestError::Transport("connection refused".to_string()))]);
        let mut o = orchestrator(&service);
        let mut page = RecordingPage::new();

        o.submit(&mut page, &mut Immediate, "some perfectly long text").unwrap_err();
        assert_eq!(service.calls.borrow().len(), 1);
        assert_eq!(page.notices, vec!["Error: connection refused"]);
        assert!(page.trigger_enabled);
    }

    // ==========================================================================
    // IN-FLIGHT GUARD
    // ==========================================================================
    //
    // A service that re-enters the orchestrator would be a second click while
    // the first request is outstanding. Simulate that by checking the trigger
    // state from inside the service call.
    // ==========================================================================

    struct ObservingService<'a> {
        seen_enabled: &'a Cell<Option<bool>>,
        probe: &'a dyn Fn() -> bool,
    }

    impl AnalysisService for ObservingService<'_> {
        fn analyze(&self, _text: &str) -> std::result::Result<AnalysisResult, RequestError> {
            self.seen_enabled.set(Some((self.probe)()));
            Ok(sample_result())
        }
    }

    #[test]
    fn test_trigger_disabled_while_request_outstanding() {
        let page = RefCell::new(RecordingPage::new());
        let seen = Cell::new(None);
        let probe = || page.borrow().trigger_enabled;

        let service = ObservingService {
            seen_enabled: &seen,
            probe: &probe,
        };
        let mut o: RequestOrchestrator<_, u64> =
            RequestOrchestrator::new(service, ResultRenderer::new(RenderConfig::default()));

        // Drive the controls through a proxy so the probe can read them mid-request
        struct Proxy<'a>(&'a RefCell<RecordingPage>);
        impl Controls for Proxy<'_> {
            fn set_trigger_enabled(&mut self, enabled: bool) {
                self.0.borrow_mut().set_trigger_enabled(enabled);
            }
            fn set_busy(&mut self, busy: bool) {
                self.0.borrow_mut().set_busy(busy);
            }
            fn set_results_visible(&mut self, visible: bool) {
                self.0.borrow_mut().set_results_visible(visible);
            }
            fn notify(&mut self, message: &str) {
                self.0.borrow_mut().notify(message);
            }
        }
        impl Surface for Proxy<'_> {
            type Chart = u64;
            fn draw_dial(&mut self, view: &crate::render::gauge::DialView) {
                self.0.borrow_mut().draw_dial(view);
            }
            fn set_dial_value(&mut self, dial: Dial, value: i64) {
                self.0.borrow_mut().set_dial_value(dial, value);
            }
            fn draw_sentiment(&mut self, bars: &crate::render::sentiment::SentimentBars) {
                self.0.borrow_mut().draw_sentiment(bars);
            }
            fn create_chart(&mut self, chart: &crate::render::emotion::EmotionChart) -> u64 {
                self.0.borrow_mut().create_chart(chart)
            }
            fn destroy_chart(&mut self, chart: u64) {
                self.0.borrow_mut().destroy_chart(chart);
            }
            fn draw_keywords(&mut self, panel: &crate::render::keywords::KeywordPanel) {
                self.0.borrow_mut().draw_keywords(panel);
            }
            fn insert_highlighted(&mut self, markup: &str) {
                self.0.borrow_mut().insert_highlighted(markup);
            }
        }

        let mut proxy = Proxy(&page);
        o.submit(&mut proxy, &mut Immediate, "some perfectly long text").unwrap();

        assert_eq!(seen.get(), Some(false), "trigger must be disabled during the request");
        assert!(page.borrow().trigger_enabled);
    }
}
