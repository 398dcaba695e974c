//! Framework-agnostic state holders behind the toolkit pages.
//!
//! A controller owns its alerts and result panel, talks to one group of
//! endpoints through a [`Backend`](crate::api_client::Backend) and renders
//! its state as HTML fragments on demand.

use std::time::Duration;

use common::{api, consts::ALERT_AUTO_DISMISS_SECS};
use tokio::time::Instant;
use tracing::debug;

use crate::view::{self, Kind};

pub mod checksum;
pub mod password;

pub const ALERT_LIFETIME: Duration = Duration::from_secs(ALERT_AUTO_DISMISS_SECS);

#[derive(Debug, Clone)]
pub struct Alert {
    pub message: String,
    pub kind: Kind,
    pub auto_dismiss: bool,
    raised_at: Instant,
}

impl Alert {
    pub fn html(&self) -> view::Result<String> {
        view::alert(&self.message, self.kind, self.auto_dismiss)
    }

    fn expired(&self, now: Instant) -> bool {
        self.auto_dismiss && now.duration_since(self.raised_at) >= ALERT_LIFETIME
    }
}

/// One alert container.
#[derive(Debug, Clone, Default)]
pub struct Alerts(Vec<Alert>);

impl Alerts {
    pub fn push(&mut self, message: impl Into<String>, kind: Kind) {
        let message = message.into();
        debug!(%kind, "alert: {}", message);
        let now = Instant::now();
        self.0.retain(|a| !a.expired(now));
        self.0.push(Alert {
            message,
            kind,
            auto_dismiss: true,
            raised_at: now,
        });
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(message, Kind::Warning)
    }

    pub fn danger(&mut self, message: impl Into<String>) {
        self.push(message, Kind::Danger)
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    /// Alerts still on screen at `now`.
    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &Alert> {
        self.0.iter().filter(move |a| !a.expired(now))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn html(&self) -> view::Result<String> {
        let now = Instant::now();
        let mut out = String::new();
        for alert in self.visible(now) {
            out.push_str(&alert.html()?);
            out.push('\n');
        }
        Ok(out)
    }
}

/// Content of a result panel.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel<T> {
    Empty,
    Loading(&'static str),
    Ready(T),
}

impl<T> Default for Panel<T> {
    fn default() -> Self {
        Panel::Empty
    }
}

impl<T> Panel<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Panel::Ready(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Panel::Empty)
    }

    pub fn html(&self, render: impl FnOnce(&T) -> view::Result<String>) -> view::Result<String> {
        match self {
            Panel::Empty => Ok(String::new()),
            Panel::Loading(text) => view::loading(text),
            Panel::Ready(t) => render(t),
        }
    }
}

/// Raises the alert a failed call deserves: the server's own message when it
/// sent one, `fallback` for transport and decoding failures.
pub(crate) fn report_failure(alerts: &mut Alerts, err: &api::Error, fallback: &str) {
    match err {
        api::Error::ClientSideError(e) => {
            tracing::error!("{:#}", e);
            alerts.danger(fallback)
        }
        e => alerts.danger(e.to_string()),
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::{collections::VecDeque, sync::Mutex, time::Duration};

    use async_trait::async_trait;
    use common::api::{self, Endpoint, Reply};
    use serde_json::Value;

    use crate::api_client::Backend;

    /// Replays canned JSON replies, `None` standing for a network failure.
    #[derive(Default)]
    pub struct Fake {
        replies: Mutex<VecDeque<(Option<Value>, Duration)>>,
        calls: Mutex<Vec<String>>,
    }

    impl Fake {
        pub fn reply(self, json: Value) -> Self {
            self.reply_after(json, Duration::ZERO)
        }

        pub fn reply_after(self, json: Value, delay: Duration) -> Self {
            self.replies.lock().unwrap().push_back((Some(json), delay));
            self
        }

        pub fn fail(self) -> Self {
            self.replies.lock().unwrap().push_back((None, Duration::ZERO));
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Backend for Fake {
        async fn call<E: Endpoint>(&self, endpoint: E) -> api::Result<E::Ret> {
            let form = endpoint.into_form();
            let summary = form.texts().map(|(k, v)| format!("{}={}", k, v)).collect::<Vec<_>>().join("&");
            self.calls.lock().unwrap().push(format!("{} {}", E::PATH, summary));

            let (reply, delay) = self.replies.lock().unwrap().pop_front().expect("unexpected call");
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let json = reply.ok_or_else(|| api::Error::ClientSideError(eyre::eyre!("connection refused")))?;
            let reply: Reply<E::Ret> = serde_json::from_value(json).map_err(|e| api::Error::ClientSideError(e.into()))?;
            reply.into_result()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn alerts_auto_dismiss_after_five_seconds() {
        let mut alerts = Alerts::default();
        alerts.warning("Please select a file");
        assert_eq!(alerts.visible(Instant::now()).count(), 1);

        tokio::time::advance(Duration::from_secs(4)).await;
        alerts.danger("boom");
        assert_eq!(alerts.visible(Instant::now()).count(), 2);

        tokio::time::advance(Duration::from_secs(1)).await;
        let left: Vec<_> = alerts.visible(Instant::now()).map(|a| a.message.as_str()).collect();
        assert_eq!(left, ["boom"]);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_alerts_are_dropped_on_push() {
        let mut alerts = Alerts::default();
        alerts.warning("first");
        alerts.warning("second");
        tokio::time::advance(ALERT_LIFETIME).await;
        alerts.danger("third");
        assert_eq!(alerts.0.len(), 1);
        assert_eq!(alerts.0[0].message, "third");
    }

    #[test]
    fn panel_html() {
        let panel: Panel<String> = Panel::Loading("Calculating checksum...");
        assert!(panel.html(|s| Ok(s.clone())).unwrap().contains("Calculating checksum..."));
        assert_eq!(Panel::<String>::Empty.html(|s| Ok(s.clone())).unwrap(), "");
        assert_eq!(Panel::Ready("x".to_owned()).html(|s| Ok(s.clone())).unwrap(), "x");
    }
}
