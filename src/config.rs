//! Runtime configuration from environment variables

use crate::session::{PauseBehavior, SessionContext, DEFAULT_SESSION_SECONDS};
use crate::wellness::DEFAULT_MOOD_CHANGE_PROBABILITY;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TwinConfig {
    pub session: SessionContext,
    /// Minimum simulated "thinking" time before a reply
    pub reply_delay: Duration,
    /// Extra random thinking time, up to this much
    pub reply_jitter: Duration,
    pub mood_change_probability: f64,
    pub username: String,
}

impl Default for TwinConfig {
    fn default() -> Self {
        Self {
            session: SessionContext::default(),
            reply_delay: Duration::from_millis(1500),
            reply_jitter: Duration::from_secs(1),
            mood_change_probability: DEFAULT_MOOD_CHANGE_PROBABILITY,
            username: "DemoUser".to_string(),
        }
    }
}

impl TwinConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Missing or unusable values keep their
    /// defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let session_seconds = parse_var(&lookup, "MINDFUL_SESSION_SECS")
            .filter(|secs: &u32| *secs > 0)
            .unwrap_or(DEFAULT_SESSION_SECONDS);
        let tick_interval = millis_var(&lookup, "MINDFUL_TICK_MS")
            .unwrap_or(defaults.session.tick_interval);
        let rotation_interval = millis_var(&lookup, "MINDFUL_ROTATION_MS")
            .unwrap_or(defaults.session.rotation_interval);

        let pause_behavior = match lookup("MINDFUL_LEGACY_PAUSE").as_deref() {
            Some("1" | "true" | "yes") => PauseBehavior::LegacyTickOnly,
            _ => PauseBehavior::SuspendAll,
        };

        let reply_delay = parse_var(&lookup, "MINDFUL_REPLY_DELAY_MS")
            .map_or(defaults.reply_delay, Duration::from_millis);
        let reply_jitter = parse_var(&lookup, "MINDFUL_REPLY_JITTER_MS")
            .map_or(defaults.reply_jitter, Duration::from_millis);

        let mood_change_probability = parse_var::<f64>(&lookup, "MINDFUL_MOOD_CHANCE")
            .filter(|p| p.is_finite())
            .map_or(defaults.mood_change_probability, |p| p.clamp(0.0, 1.0));

        let username = lookup("MINDFUL_USERNAME")
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or(defaults.username);

        Self {
            session: SessionContext {
                session_seconds,
                tick_interval,
                rotation_interval,
                pause_behavior,
            },
            reply_delay,
            reply_jitter,
            mood_change_probability,
            username,
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    raw.trim()
        .parse()
        .map_err(|_| tracing::warn!(key, value = %raw, "Ignoring unparsable configuration value"))
        .ok()
}

/// Interval in milliseconds; zero cannot be scheduled and is ignored
fn millis_var(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<Duration> {
    parse_var::<u64>(lookup, key)
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> TwinConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        TwinConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, TwinConfig::default());
        assert_eq!(config.session.session_seconds, 300);
        assert_eq!(config.session.pause_behavior, PauseBehavior::SuspendAll);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("MINDFUL_SESSION_SECS", "60"),
            ("MINDFUL_TICK_MS", "250"),
            ("MINDFUL_LEGACY_PAUSE", "true"),
            ("MINDFUL_MOOD_CHANCE", "0.5"),
            ("MINDFUL_USERNAME", " Robin "),
        ]);

        assert_eq!(config.session.session_seconds, 60);
        assert_eq!(config.session.tick_interval, Duration::from_millis(250));
        assert_eq!(config.session.pause_behavior, PauseBehavior::LegacyTickOnly);
        assert!((config.mood_change_probability - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.username, "Robin");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("MINDFUL_SESSION_SECS", "0"),
            ("MINDFUL_ROTATION_MS", "soon"),
            ("MINDFUL_TICK_MS", "0"),
            ("MINDFUL_MOOD_CHANCE", "7"),
            ("MINDFUL_USERNAME", "   "),
        ]);

        assert_eq!(config.session.session_seconds, 300);
        assert_eq!(config.session.rotation_interval, Duration::from_secs(10));
        assert_eq!(config.session.tick_interval, Duration::from_secs(1));
        assert!((config.mood_change_probability - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.username, "DemoUser");
    }
}
