//! Transient alerts shown above the search form

use std::time::{Duration, Instant};

pub const EMPTY_TERM_MESSAGE: &str = "Please input a search term";

/// Styling class of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Danger,
    Info,
}

impl AlertKind {
    pub fn class_name(self) -> &'static str {
        match self {
            AlertKind::Danger => "alert-danger",
            AlertKind::Info => "alert-info",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Alert {
    pub message: String,
    pub kind: AlertKind,
    expires_at: Instant,
}

impl Alert {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Alerts currently on screen, oldest first
#[derive(Debug, Clone)]
pub struct Alerts {
    ttl: Duration,
    items: Vec<Alert>,
}

impl Alerts {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            items: Vec::new(),
        }
    }

    /// Show `message`; it disappears once `ttl` has passed since `now`
    pub fn push(&mut self, message: impl Into<String>, kind: AlertKind, now: Instant) {
        let message = message.into();
        tracing::debug!(class = kind.class_name(), %message, "alert shown");
        self.items.push(Alert {
            message,
            kind,
            expires_at: now + self.ttl,
        });
    }

    /// Drop alerts whose lifetime has elapsed
    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|alert| !alert.is_expired(now));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Flag an empty term with a danger alert
///
/// Never blocks the caller; whether to search anyway is decided elsewhere.
pub fn notify_if_empty(term: &str, alerts: &mut Alerts, now: Instant) -> bool {
    if term.is_empty() {
        alerts.push(EMPTY_TERM_MESSAGE, AlertKind::Danger, now);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_term_adds_one_alert() {
        let now = Instant::now();
        let mut alerts = Alerts::new(Duration::from_secs(2));

        assert!(notify_if_empty("", &mut alerts, now));
        assert_eq!(alerts.len(), 1);

        let alert = alerts.iter().next().unwrap();
        assert_eq!(alert.message, EMPTY_TERM_MESSAGE);
        assert_eq!(alert.kind.class_name(), "alert-danger");
    }

    #[test]
    fn test_non_empty_term_adds_nothing() {
        let mut alerts = Alerts::new(Duration::from_secs(2));
        assert!(!notify_if_empty("rust", &mut alerts, Instant::now()));
        assert!(!notify_if_empty(" ", &mut alerts, Instant::now()));
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_alert_expires_after_ttl() {
        let now = Instant::now();
        let mut alerts = Alerts::new(Duration::from_secs(2));
        notify_if_empty("", &mut alerts, now);

        alerts.prune(now + Duration::from_millis(1999));
        assert_eq!(alerts.len(), 1);

        alerts.prune(now + Duration::from_secs(2));
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_alerts_expire_independently() {
        let now = Instant::now();
        let mut alerts = Alerts::new(Duration::from_secs(2));
        alerts.push("first", AlertKind::Danger, now);
        alerts.push("second", AlertKind::Info, now + Duration::from_secs(1));

        alerts.prune(now + Duration::from_millis(2500));
        let left: Vec<_> = alerts.iter().map(|a| a.message.as_str()).collect();
        assert_eq!(left, ["second"]);
    }
}
