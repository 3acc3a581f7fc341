//! Runtime configuration
//!
//! Built from command-line flags (and their environment variables) in
//! `main`. There is no config file.

use crate::client::DEFAULT_ENDPOINT;
use crate::render::gauge::DialGeometry;
use crate::render::tween::Animation;
use crate::render::RenderConfig;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Full URL of the analysis endpoint
    pub endpoint: String,
    pub animation: Animation,
    pub geometry: DialGeometry,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            animation: Animation::default(),
            geometry: DialGeometry::default(),
        }
    }
}

impl Config {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_animation(mut self, duration_ms: u64, tick_ms: u64) -> Self {
        self.animation = Animation {
            duration: Duration::from_millis(duration_ms),
            tick: Duration::from_millis(tick_ms),
        };
        self
    }

    pub fn render(&self) -> RenderConfig {
        RenderConfig {
            animation: self.animation,
            geometry: self.geometry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.endpoint, "http://127.0.0.1:5000/analyze");
        assert_eq!(config.animation.duration, Duration::from_millis(1500));
        assert_eq!(config.animation.tick, Duration::from_millis(20));
        assert_eq!(config.geometry.gauge_radius, 80.0);
    }

    #[test]
    fn test_builders() {
        let config = Config::default()
            .with_endpoint("http://analysis.local/analyze")
            .with_animation(600, 30);
        assert_eq!(config.endpoint, "http://analysis.local/analyze");
        assert_eq!(config.render().animation.tick, Duration::from_millis(30));
        assert_eq!(config.render().geometry, DialGeometry::default());
    }
}
