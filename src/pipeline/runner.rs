//! Agent loop: bootstrap, then poll → learn → act, forever.
//!
//! The loop is a single-threaded cooperative scheduler. [`AgentLoop::tick`]
//! does one bounded unit of work for a given instant; [`AgentLoop::run`]
//! calls it and sleeps between ticks until asked to stop.

use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::{Duration, Instant},
};

use tracing::warn;

use crate::{
    Error, Result,
    abstraction::StateAbstractor,
    pipeline::bootstrap::BootstrapSchedule,
    ports::{ExchangeChannel, Observer, StepReport, TableRepository},
    q_learning::{QLearningAgent, Transition},
    types::{Action, StateKey},
};

/// Timing and persistence settings for the loop.
#[derive(Debug, Clone)]
pub struct LoopSettings {
    /// Sleep between learning-phase polls
    pub poll_interval: Duration,
    /// Sleep between scripted bootstrap actions
    pub bootstrap_interval: Duration,
    /// Persist the table every this many learning steps
    pub save_every: u64,
    /// Stop after this many learning steps
    pub max_steps: Option<u64>,
    /// Where the table is persisted
    pub table_path: PathBuf,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(10),
            bootstrap_interval: Duration::from_millis(50),
            save_every: 1000,
            max_steps: None,
            table_path: PathBuf::from("q_table.json"),
        }
    }
}

/// Which part of its life the loop is in. Learning is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Bootstrap,
    Learning,
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Published a scripted action
    Bootstrap(Action),
    /// Bootstrap ended on this tick; the release action was published
    LearningStarted,
    /// Consumed an observation, learned and acted
    Stepped(StepReport),
    /// Nothing usable was available
    Idle,
}

/// Orchestrates the exchange channel, state abstraction and Q-learning agent.
pub struct AgentLoop<C: ExchangeChannel> {
    channel: C,
    abstractor: StateAbstractor,
    agent: QLearningAgent,
    bootstrap: BootstrapSchedule,
    repository: Arc<dyn TableRepository + Send + Sync>,
    settings: LoopSettings,
    observers: Vec<Box<dyn Observer>>,
    phase: Phase,
    started_at: Option<Instant>,
    previous: Option<(StateKey, Action)>,
    steps: u64,
}

impl<C: ExchangeChannel> AgentLoop<C> {
    pub fn new(
        channel: C,
        agent: QLearningAgent,
        abstractor: StateAbstractor,
        bootstrap: BootstrapSchedule,
        repository: Arc<dyn TableRepository + Send + Sync>,
        settings: LoopSettings,
    ) -> Self {
        Self {
            channel,
            abstractor,
            agent,
            bootstrap,
            repository,
            settings,
            observers: Vec::new(),
            phase: Phase::Bootstrap,
            started_at: None,
            previous: None,
            steps: 0,
        }
    }

    /// Add an observer
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Learning steps completed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn agent(&self) -> &QLearningAgent {
        &self.agent
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Run one scheduler tick at `now`.
    ///
    /// The bootstrap clock starts at the first tick. Errors are reported to
    /// observers and turn the tick into [`TickOutcome::Idle`]; they never
    /// escape.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        match self.phase {
            Phase::Bootstrap => self.bootstrap_tick(now),
            Phase::Learning => self.learning_tick(),
        }
    }

    fn bootstrap_tick(&mut self, now: Instant) -> TickOutcome {
        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started_at);

        match self.bootstrap.action_at(elapsed) {
            Some(action) => {
                self.publish(action);
                self.notify(|observer| observer.on_bootstrap_action(action));
                TickOutcome::Bootstrap(action)
            }
            None => {
                self.phase = Phase::Learning;
                self.publish(BootstrapSchedule::RELEASE_ACTION);
                self.notify(|observer| observer.on_learning_started());
                TickOutcome::LearningStarted
            }
        }
    }

    fn learning_tick(&mut self) -> TickOutcome {
        let observation = match self.channel.poll_observation() {
            Ok(observation) => observation,
            Err(error) => {
                self.report_failure(&error);
                return TickOutcome::Idle;
            }
        };
        let Some(state) = self.abstractor.abstract_state(observation.as_ref()) else {
            return TickOutcome::Idle;
        };
        let reward = observation.map_or(0.0, |obs| obs.reward());

        let updated_value = self.previous.take().map(|(previous_state, action)| {
            self.agent.learn(&Transition {
                state: previous_state,
                action,
                reward,
                next_state: state.clone(),
            })
        });

        let action = self.agent.select_action(&state);
        self.publish(action);
        self.previous = Some((state.clone(), action));
        self.steps += 1;

        let report = StepReport {
            step: self.steps,
            state,
            action,
            reward,
            epsilon: self.agent.epsilon(),
            updated_value,
        };
        self.notify(|observer| observer.on_step(&report));

        if self.settings.save_every > 0 && self.steps % self.settings.save_every == 0 {
            if let Err(error) = self.save() {
                self.report_failure(&error);
            }
        }

        TickOutcome::Stepped(report)
    }

    /// Persist the full table.
    pub fn save(&mut self) -> Result<()> {
        self.repository
            .save(self.agent.table(), &self.settings.table_path)?;
        let (steps, states) = (self.steps, self.agent.table().len());
        self.notify(|observer| observer.on_table_saved(steps, states));
        Ok(())
    }

    /// Tick until `stop` is set or `max_steps` is reached, then save.
    ///
    /// Sleeps the bootstrap interval after scripted actions and the poll
    /// interval otherwise, so no wait ever exceeds one interval. Observers
    /// get `on_stop` whether or not the final save succeeds.
    ///
    /// # Errors
    ///
    /// Only the final save can fail this call.
    pub fn run(&mut self, stop: &AtomicBool) -> Result<u64> {
        let states = self.agent.table().len();
        self.notify(|observer| observer.on_start(states));

        while !stop.load(Ordering::Relaxed) {
            if self
                .settings
                .max_steps
                .is_some_and(|max_steps| self.steps >= max_steps)
            {
                break;
            }
            let pause = match self.tick(Instant::now()) {
                TickOutcome::Bootstrap(_) => self.settings.bootstrap_interval,
                _ => self.settings.poll_interval,
            };
            thread::sleep(pause);
        }

        let saved = self.save();
        let steps = self.steps;
        self.notify(|observer| observer.on_stop(steps));
        saved.map(|()| steps)
    }

    fn publish(&mut self, action: Action) {
        if let Err(error) = self.channel.publish_action(action) {
            self.report_failure(&error);
        }
    }

    fn report_failure(&mut self, error: &Error) {
        self.notify(|observer| observer.on_tick_failed(error));
    }

    fn notify<F>(&mut self, mut event: F)
    where
        F: FnMut(&mut dyn Observer) -> Result<()>,
    {
        for observer in &mut self.observers {
            if let Err(error) = event(observer.as_mut()) {
                warn!(%error, "observer failed");
            }
        }
    }
}
