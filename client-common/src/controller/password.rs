use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};
use std::time::Duration;

use common::{
    api::{AnalyzePassword, AnalyzePasswordRet},
    consts::{PASSWORD_DEBOUNCE_MS, PASSWORD_MIN_AUTO_ANALYZE_LEN},
    strength::{self, Strength},
};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use super::{report_failure, Alerts, Panel};
use crate::{api_client::Backend, view};

pub const DEBOUNCE: Duration = Duration::from_millis(PASSWORD_DEBOUNCE_MS);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrengthMeter {
    pub width: f64,
    pub class: String,
    pub label: String,
    pub label_class: String,
}

impl Default for StrengthMeter {
    fn default() -> Self {
        Self {
            width: 0.0,
            class: "progress-bar".to_owned(),
            label: "Not Analyzed".to_owned(),
            label_class: "badge bg-secondary".to_owned(),
        }
    }
}

impl StrengthMeter {
    pub fn update(&mut self, score: i64) {
        let color = strength::color(score);
        self.width = (score as f64 / Strength::MAX.score() as f64 * 100.0).clamp(0.0, 100.0);
        self.class = format!("progress-bar progress-bar-striped bg-{}", color);
        self.label = strength::label(score).to_owned();
        self.label_class = strength::text_class(score);
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Feedback {
    #[default]
    Placeholder,
    Items(Vec<String>),
}

#[derive(Debug, Default)]
pub struct PasswordState {
    pub input: String,
    pub visible: bool,
    pub meter: StrengthMeter,
    pub feedback: Feedback,
    pub panel: Panel<AnalyzePasswordRet>,
    pub alerts: Alerts,
}

fn lock(state: &Mutex<PasswordState>) -> MutexGuard<'_, PasswordState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Password strength page: a debounced input, a meter, a feedback list and a report.
///
/// Every request takes a generation number, replies from an older
/// generation than the latest request are dropped.
#[derive(derivative::Derivative)]
#[derivative(Debug)]
pub struct PasswordController<B: Backend> {
    #[derivative(Debug = "ignore")]
    backend: Arc<B>,
    state: Arc<Mutex<PasswordState>>,
    generation: Arc<AtomicU64>,
    #[derivative(Debug = "ignore")]
    pending: Option<JoinHandle<()>>,
}

impl<B: Backend> PasswordController<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            state: Default::default(),
            generation: Default::default(),
            pending: None,
        }
    }

    pub fn state(&self) -> MutexGuard<'_, PasswordState> {
        lock(&self.state)
    }

    pub fn on_input(&mut self, value: &str) {
        self.cancel_pending();
        let analyze = {
            let mut state = lock(&self.state);
            state.input = value.to_owned();
            // shorter inputs only reset the meter
            if value.chars().count() < PASSWORD_MIN_AUTO_ANALYZE_LEN {
                state.meter.update(0);
                false
            } else {
                true
            }
        };
        if analyze {
            let backend = self.backend.clone();
            let state = self.state.clone();
            let generation = self.generation.clone();
            self.pending = Some(tokio::spawn(async move {
                tokio::time::sleep(DEBOUNCE).await;
                run_analysis(backend, state, generation).await
            }));
        }
    }

    /// Analyzes the current input right away.
    pub async fn analyze(&self) {
        run_analysis(self.backend.clone(), self.state.clone(), self.generation.clone()).await
    }

    /// Waits for the debounced analysis, if one is scheduled.
    pub async fn settle(&mut self) {
        if let Some(handle) = self.pending.take() {
            if let Err(e) = handle.await {
                if e.is_panic() {
                    tracing::error!("password analysis panicked: {}", e);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.cancel_pending();
        self.generation.fetch_add(1, Ordering::SeqCst);
        let mut state = lock(&self.state);
        state.input.clear();
        state.meter = StrengthMeter::default();
        state.feedback = Feedback::Placeholder;
        state.panel = Panel::Empty;
        state.alerts.clear();
    }

    /// Returns whether the password is now shown in clear.
    pub fn toggle_visibility(&self) -> bool {
        let mut state = lock(&self.state);
        state.visible = !state.visible;
        state.visible
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn meter_html(&self) -> view::Result<String> {
        view::strength_meter(&self.state().meter)
    }

    pub fn feedback_html(&self) -> view::Result<String> {
        match &self.state().feedback {
            Feedback::Placeholder => view::feedback_list(None),
            Feedback::Items(items) => view::feedback_list(Some(items)),
        }
    }

    pub fn report_html(&self) -> view::Result<String> {
        let state = self.state();
        Ok(format!("{}{}", state.alerts.html()?, state.panel.html(view::password_report)?))
    }
}

impl<B: Backend> Drop for PasswordController<B> {
    fn drop(&mut self) {
        self.cancel_pending()
    }
}

async fn run_analysis<B: Backend>(backend: Arc<B>, state: Arc<Mutex<PasswordState>>, generation: Arc<AtomicU64>) {
    let (password, ticket) = {
        let mut state = lock(&state);
        if state.input.is_empty() {
            return state.alerts.warning("Please enter a password to analyze");
        }
        state.panel = Panel::Loading("Analyzing password strength...");
        let ticket = generation.fetch_add(1, Ordering::SeqCst) + 1;
        (state.input.clone(), ticket)
    };
    trace!(ticket, "analyzing password");

    let res = backend.call(AnalyzePassword { password }).await;

    let mut state = lock(&state);
    if generation.load(Ordering::SeqCst) != ticket {
        debug!(ticket, "dropping stale analysis");
        return;
    }
    match res {
        Ok(ret) => {
            state.meter.update(ret.strength);
            state.feedback = if ret.feedback.is_empty() {
                Feedback::Items(vec!["Password meets security criteria!".to_owned()])
            } else {
                Feedback::Items(ret.feedback.clone())
            };
            state.panel = Panel::Ready(ret);
        }
        Err(e) => {
            report_failure(&mut state.alerts, &e, "Error analyzing password. Please try again.");
            state.panel = Panel::Empty;
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use tokio::time::Instant;

    use super::*;
    use crate::controller::fake::Fake;

    fn report(strength: i64, feedback: &[&str]) -> Value {
        json!({
            "strength": strength,
            "rating": strength::label(strength),
            "length": 10,
            "has_lowercase": true,
            "has_uppercase": true,
            "has_digit": true,
            "has_special": false,
            "entropy": 59.5,
            "feedback": feedback,
        })
    }

    fn alert_messages<B: Backend>(ctl: &PasswordController<B>) -> Vec<String> {
        ctl.state().alerts.visible(Instant::now()).map(|a| a.message.clone()).collect()
    }

    #[tokio::test]
    async fn empty_password_makes_no_call() {
        let fake = Arc::new(Fake::default());
        let ctl = PasswordController::new(fake.clone());
        ctl.analyze().await;
        assert!(fake.calls().is_empty());
        assert_eq!(alert_messages(&ctl), ["Please enter a password to analyze"]);
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_coalesces_bursts() {
        let fake = Arc::new(Fake::default().reply(report(2, &["Add special characters"])));
        let mut ctl = PasswordController::new(fake.clone());
        for value in ["hunt", "hunte", "hunter", "hunter2"] {
            ctl.on_input(value);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(fake.calls().is_empty());
        ctl.settle().await;
        assert_eq!(fake.calls(), ["analyze-password password=hunter2"]);
        assert_eq!(ctl.state().feedback, Feedback::Items(vec!["Add special characters".to_owned()]));
    }

    #[tokio::test(start_paused = true)]
    async fn short_input_resets_meter_and_cancels() {
        let fake = Arc::new(Fake::default());
        let mut ctl = PasswordController::new(fake.clone());
        ctl.on_input("longenough");
        ctl.on_input("abc");
        ctl.settle().await;
        tokio::time::sleep(DEBOUNCE * 2).await;
        assert!(fake.calls().is_empty());

        let state = ctl.state();
        assert_eq!(state.meter.width, 0.0);
        assert_eq!(state.meter.class, "progress-bar progress-bar-striped bg-danger");
        assert_eq!(state.meter.label, "Very Weak");
        assert_eq!(state.meter.label_class, "text-danger");
    }

    #[tokio::test]
    async fn success_updates_meter_feedback_and_panel() {
        let fake = Arc::new(Fake::default().reply(report(3, &[])));
        let mut ctl = PasswordController::new(fake);
        ctl.on_input("Tr0ub4dor&3");
        ctl.analyze().await;

        {
            let state = ctl.state();
            assert_eq!(state.meter.width, 75.0);
            assert_eq!(state.meter.class, "progress-bar progress-bar-striped bg-primary");
            assert_eq!(state.meter.label, "Strong");
            assert_eq!(state.meter.label_class, "text-primary");
            assert_eq!(state.feedback, Feedback::Items(vec!["Password meets security criteria!".to_owned()]));
            assert_eq!(state.panel.ready().unwrap().entropy, 59.5);
        }
        assert!(ctl.meter_html().unwrap().contains("width: 75"));
        assert!(ctl.feedback_html().unwrap().contains("Password meets security criteria!"));
        assert!(ctl.report_html().unwrap().contains("Password Analysis Report"));
        ctl.clear();
    }

    #[tokio::test]
    async fn failures_clear_the_panel() {
        let fake = Arc::new(
            Fake::default()
                .reply(json!({"error": "No password provided", "strength": 0, "feedback": ["Please enter a password"]}))
                .fail(),
        );
        let mut ctl = PasswordController::new(fake);
        ctl.on_input("something");
        ctl.analyze().await;
        assert!(ctl.state().panel.is_empty());
        ctl.analyze().await;
        assert!(ctl.state().panel.is_empty());
        assert_eq!(
            alert_messages(&ctl),
            ["No password provided", "Error analyzing password. Please try again."]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn stale_reply_is_dropped() {
        let fake = Arc::new(
            Fake::default()
                .reply_after(report(1, &["slow"]), Duration::from_secs(1))
                .reply(report(4, &[])),
        );
        let mut ctl = PasswordController::new(fake.clone());
        ctl.on_input("first-pass");
        // the debounced request is now in flight
        tokio::time::sleep(DEBOUNCE + Duration::from_millis(100)).await;
        assert_eq!(fake.calls().len(), 1);

        ctl.analyze().await;
        assert_eq!(ctl.state().meter.label, "Very Strong");

        ctl.settle().await;
        assert_eq!(fake.calls().len(), 2);
        assert_eq!(ctl.state().meter.label, "Very Strong");
        assert_eq!(ctl.state().feedback, Feedback::Items(vec!["Password meets security criteria!".to_owned()]));
    }

    #[tokio::test]
    async fn clear_resets_everything() {
        let fake = Arc::new(Fake::default().reply(report(0, &["Too short"])));
        let mut ctl = PasswordController::new(fake);
        ctl.on_input("aaaaaa");
        ctl.analyze().await;
        ctl.clear();

        let state = ctl.state();
        assert_eq!(state.input, "");
        assert_eq!(state.meter, StrengthMeter::default());
        assert_eq!(state.meter.label, "Not Analyzed");
        assert_eq!(state.meter.label_class, "badge bg-secondary");
        assert_eq!(state.feedback, Feedback::Placeholder);
        assert!(state.panel.is_empty());
        assert!(state.alerts.is_empty());
    }

    #[test]
    fn visibility_toggles() {
        let ctl = PasswordController::new(Arc::new(Fake::default()));
        assert!(ctl.toggle_visibility());
        assert!(!ctl.toggle_visibility());
    }
}
