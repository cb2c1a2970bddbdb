//! Observer implementations for the agent loop
//!
//! Observers turn loop events into log lines, a live spinner, or counters,
//! without the loop knowing about any of them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    Error, Result,
    ports::{Observer, StepReport},
    types::Action,
};

/// Structured logging observer
///
/// Logs a progress line (step, exploration rate, last reward) every
/// `report_every` steps, plus lifecycle events and every recovered failure.
#[derive(Debug, Clone)]
pub struct LoggingObserver {
    report_every: u64,
}

impl LoggingObserver {
    pub fn new(report_every: u64) -> Self {
        Self { report_every }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Observer for LoggingObserver {
    fn on_start(&mut self, table_states: usize) -> Result<()> {
        info!(states = table_states, "agent running, starting bootstrap sequence");
        Ok(())
    }

    fn on_bootstrap_action(&mut self, action: Action) -> Result<()> {
        debug!(%action, "bootstrap action");
        Ok(())
    }

    fn on_learning_started(&mut self) -> Result<()> {
        info!("bootstrap sequence complete, learning started");
        Ok(())
    }

    fn on_step(&mut self, report: &StepReport) -> Result<()> {
        debug!(
            step = report.step,
            state = %report.state,
            action = %report.action,
            reward = report.reward,
            "step"
        );
        if self.report_every > 0 && report.step % self.report_every == 0 {
            info!(
                step = report.step,
                epsilon = format_args!("{:.4}", report.epsilon),
                last_reward = report.reward,
                "progress"
            );
        }
        Ok(())
    }

    fn on_table_saved(&mut self, steps: u64, states: usize) -> Result<()> {
        debug!(steps, states, "table persisted");
        Ok(())
    }

    fn on_tick_failed(&mut self, error: &Error) -> Result<()> {
        warn!(%error, "tick skipped");
        Ok(())
    }

    fn on_stop(&mut self, steps: u64) -> Result<()> {
        info!(steps, "agent stopped");
        Ok(())
    }
}

/// Spinner observer - live step / ε / reward readout on the terminal
pub struct ProgressObserver {
    spinner: Option<ProgressBar>,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self { spinner: None }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_start(&mut self, _table_states: usize) -> Result<()> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?,
        );
        spinner.set_message("bootstrap");
        self.spinner = Some(spinner);
        Ok(())
    }

    fn on_bootstrap_action(&mut self, action: Action) -> Result<()> {
        if let Some(spinner) = &self.spinner {
            spinner.set_message(format!("bootstrap {action}"));
        }
        Ok(())
    }

    fn on_step(&mut self, report: &StepReport) -> Result<()> {
        if let Some(spinner) = &self.spinner {
            spinner.set_message(format!(
                "step {} | ε {:.4} | reward {}",
                report.step, report.epsilon, report.reward
            ));
            spinner.tick();
        }
        Ok(())
    }

    fn on_stop(&mut self, steps: u64) -> Result<()> {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("stopped after {steps} steps"));
        }
        Ok(())
    }
}

/// Counters collected over a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoopMetrics {
    pub bootstrap_actions: usize,
    pub learning_started: bool,
    pub steps: u64,
    pub learned_transitions: u64,
    pub total_reward: f64,
    pub last_epsilon: Option<f64>,
    pub saves: usize,
    pub failures: usize,
    pub actions: Vec<Action>,
    /// Step count reported by `on_stop`, once the run has ended
    pub stopped_after: Option<u64>,
}

/// Metrics observer - tracks loop counters
///
/// Clones share the same counters, so one clone can be boxed into the loop
/// while another is kept for reading.
#[derive(Debug, Clone, Default)]
pub struct MetricsObserver {
    metrics: Arc<Mutex<LoopMetrics>>,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> LoopMetrics {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, LoopMetrics> {
        self.metrics.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Observer for MetricsObserver {
    fn on_bootstrap_action(&mut self, action: Action) -> Result<()> {
        let mut metrics = self.lock();
        metrics.bootstrap_actions += 1;
        metrics.actions.push(action);
        Ok(())
    }

    fn on_learning_started(&mut self) -> Result<()> {
        self.lock().learning_started = true;
        Ok(())
    }

    fn on_step(&mut self, report: &StepReport) -> Result<()> {
        let mut metrics = self.lock();
        metrics.steps = report.step;
        metrics.total_reward += report.reward;
        metrics.last_epsilon = Some(report.epsilon);
        metrics.actions.push(report.action);
        if report.updated_value.is_some() {
            metrics.learned_transitions += 1;
        }
        Ok(())
    }

    fn on_table_saved(&mut self, _steps: u64, _states: usize) -> Result<()> {
        self.lock().saves += 1;
        Ok(())
    }

    fn on_tick_failed(&mut self, _error: &Error) -> Result<()> {
        self.lock().failures += 1;
        Ok(())
    }

    fn on_stop(&mut self, steps: u64) -> Result<()> {
        self.lock().stopped_after = Some(steps);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StateKey;

    fn report(step: u64, updated_value: Option<f64>) -> StepReport {
        StepReport {
            step,
            state: StateKey::from("S"),
            action: Action::Jump,
            reward: 2.0,
            epsilon: 0.5,
            updated_value,
        }
    }

    #[test]
    fn test_metrics_clones_share_counters() {
        let metrics = MetricsObserver::new();
        let mut boxed: Box<dyn Observer> = Box::new(metrics.clone());

        boxed.on_bootstrap_action(Action::Left).unwrap();
        boxed.on_learning_started().unwrap();
        boxed.on_step(&report(1, None)).unwrap();
        boxed.on_step(&report(2, Some(0.2))).unwrap();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.bootstrap_actions, 1);
        assert!(snapshot.learning_started);
        assert_eq!(snapshot.steps, 2);
        assert_eq!(snapshot.learned_transitions, 1);
        assert_eq!(snapshot.total_reward, 4.0);
        assert_eq!(snapshot.actions, vec![Action::Left, Action::Jump, Action::Jump]);
    }

    #[test]
    fn test_logging_observer_never_fails() {
        let mut observer = LoggingObserver::new(1);
        observer.on_start(0).unwrap();
        observer.on_step(&report(1, None)).unwrap();
        observer
            .on_tick_failed(&Error::InvalidConfiguration {
                message: "x".to_string(),
            })
            .unwrap();
        observer.on_stop(1).unwrap();
    }
}
