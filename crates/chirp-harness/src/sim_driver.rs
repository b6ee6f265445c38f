//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as `TerminalDriver` but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`chirp_app::Runtime`] orchestration code runs in both production and
//! simulation.
//!
//! Input is a script of [`SimStep`]s: events to deliver and clock advances.
//! An advance yields no event, so the runtime just ticks. Once the script
//! is exhausted the driver sends Esc, which ends [`chirp_app::Runtime::run`].

use std::{
    collections::VecDeque,
    convert::Infallible,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use chirp_app::{App, AppEvent, Driver, KeyInput};
use chirp_core::Environment;

use crate::{
    SimEnv,
    invariants::{AppSnapshot, InvariantRegistry},
};

/// One scripted driver step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimStep {
    /// Deliver an event to the App.
    Event(AppEvent),
    /// Advance the virtual clock, delivering nothing.
    Advance(Duration),
}

/// Shared state for event injection.
///
/// This allows injection and inspection from outside async contexts while
/// the runtime owns the driver.
#[derive(Default)]
struct SharedState {
    script: VecDeque<SimStep>,
    renders: usize,
    last_snapshot: Option<AppSnapshot>,
}

/// Simulation driver for deterministic testing.
///
/// Cloning yields a handle to the same script and counters.
#[derive(Clone)]
pub struct SimDriver {
    env: SimEnv,
    state: Arc<Mutex<SharedState>>,
    invariants: Option<Arc<InvariantRegistry>>,
}

impl SimDriver {
    /// Create a driver advancing `env`'s clock.
    pub fn new(env: SimEnv) -> Self {
        Self { env, state: Arc::new(Mutex::new(SharedState::default())), invariants: None }
    }

    /// Enable invariant checking on every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(Arc::new(registry));
        self
    }

    fn state(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue an `AppEvent`.
    pub fn inject_event(&self, event: AppEvent) {
        self.state().script.push_back(SimStep::Event(event));
    }

    /// Queue a key press.
    pub fn inject_key(&self, key: KeyInput) {
        self.inject_event(AppEvent::Key(key));
    }

    /// Queue typing `text` followed by Enter.
    pub fn inject_line(&self, text: &str) {
        let mut state = self.state();
        state.script.extend(text.chars().map(|c| SimStep::Event(AppEvent::Key(KeyInput::Char(c)))));
        state.script.push_back(SimStep::Event(AppEvent::Key(KeyInput::Enter)));
    }

    /// Queue a clock advance.
    pub fn inject_advance(&self, by: Duration) {
        self.state().script.push_back(SimStep::Advance(by));
    }

    /// Check if scripted steps remain.
    pub fn has_pending(&self) -> bool {
        !self.state().script.is_empty()
    }

    /// Number of frames rendered so far.
    pub fn renders(&self) -> usize {
        self.state().renders
    }

    /// State captured at the most recent render.
    pub fn last_snapshot(&self) -> Option<AppSnapshot> {
        self.state().last_snapshot.clone()
    }

    /// Check invariants against App state.
    pub fn check_invariants<E: Environment>(&self, app: &App<E>, context: &str) {
        if let Some(registry) = &self.invariants {
            registry.assert_all(&AppSnapshot::from_app(app), context);
        }
    }
}

impl Driver for SimDriver {
    type Error = Infallible;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        let step = self.state().script.pop_front();
        match step {
            Some(SimStep::Event(event)) => Ok(Some(event)),
            Some(SimStep::Advance(by)) => {
                self.env.advance(by);
                Ok(None)
            },
            None => {
                tracing::debug!("script exhausted, quitting");
                Ok(Some(AppEvent::Key(KeyInput::Esc)))
            },
        }
    }

    fn render<E: Environment>(&mut self, app: &App<E>) -> Result<(), Self::Error> {
        let snapshot = AppSnapshot::from_app(app);
        let render = {
            let mut state = self.state();
            state.renders += 1;
            state.last_snapshot = Some(snapshot.clone());
            state.renders
        };

        if let Some(registry) = &self.invariants {
            registry.assert_all(&snapshot, &format!("at render {render}"));
        }
        Ok(())
    }

    fn stop(&mut self) {}
}

#[cfg(test)]
mod tests {
    use chirp_core::{Contact, ContactId, Directory, ReplyConfig};

    use super::*;

    fn app(env: &SimEnv) -> App<SimEnv> {
        let directory = Directory::from_contacts(vec![Contact::new(1, "Ana")]).unwrap();
        App::new(env.clone(), directory, ReplyConfig::default())
    }

    #[test]
    fn inject_event_queues_step() {
        let driver = SimDriver::new(SimEnv::new());
        driver.inject_event(AppEvent::SelectContact { contact_id: ContactId(1) });

        assert!(driver.has_pending());
    }

    #[tokio::test]
    async fn advance_moves_clock_without_event() {
        let env = SimEnv::new();
        let mut driver = SimDriver::new(env.clone());
        driver.inject_advance(Duration::from_millis(700));

        assert_eq!(driver.poll_event().await, Ok(None));
        assert_eq!(env.elapsed(), Duration::from_millis(700));
    }

    #[tokio::test]
    async fn exhausted_script_sends_esc() {
        let mut driver = SimDriver::new(SimEnv::new());

        assert_eq!(driver.poll_event().await, Ok(Some(AppEvent::Key(KeyInput::Esc))));
    }

    #[test]
    fn render_counts_and_snapshots() {
        let env = SimEnv::new();
        let mut app = app(&env);
        let mut driver = SimDriver::new(env).with_invariants(InvariantRegistry::standard());
        let handle = driver.clone();

        let _ = app.handle(AppEvent::SelectContact { contact_id: ContactId(1) });
        driver.render(&app).unwrap();

        assert_eq!(handle.renders(), 1);
        assert_eq!(handle.last_snapshot().and_then(|s| s.active_contact), Some(ContactId(1)));
    }
}
