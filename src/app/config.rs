//! Process parameters for the agent.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    abstraction::{self, AbstractionField, StateAbstractor},
    pipeline::{BootstrapSchedule, LoopSettings},
    q_learning::{ExplorationRate, QLearner},
};

/// Every parameter the agent reads at startup.
///
/// Fields missing from a JSON config file take their default values.
///
/// # Examples
///
/// ```
/// use arcade_brain::app::AgentConfig;
///
/// let config = AgentConfig::default()
///     .with_seed(42)
///     .with_learning_rate(0.2);
/// config.validate()?;
/// # Ok::<(), arcade_brain::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// Exploration rate at process start
    pub initial_epsilon: f64,
    /// Floor for the exploration rate
    pub min_epsilon: f64,
    /// Multiplicative decay applied once per decision
    pub epsilon_decay: f64,
    /// Sleep between polls of the inbound file
    pub poll_interval_ms: u64,
    /// Pause between seeing the inbound file and reading it
    pub settle_delay_ms: u64,
    /// Sleep between scripted bootstrap actions
    pub bootstrap_interval_ms: u64,
    /// Scripted actions run before learning
    pub bootstrap: BootstrapSchedule,
    /// Persist the table every this many steps
    pub save_every: u64,
    /// Log a progress line every this many steps
    pub report_every: u64,
    /// Observation fields that make up the state key
    pub abstraction_fields: Vec<AbstractionField>,
    pub state_file: PathBuf,
    pub action_file: PathBuf,
    pub table_file: PathBuf,
    /// RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Stop after this many learning steps
    pub max_steps: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.95,
            initial_epsilon: 1.0,
            min_epsilon: 0.01,
            epsilon_decay: 0.9999,
            poll_interval_ms: 10,
            settle_delay_ms: 10,
            bootstrap_interval_ms: 50,
            bootstrap: BootstrapSchedule::default(),
            save_every: 1000,
            report_every: 100,
            abstraction_fields: abstraction::default_fields(),
            state_file: PathBuf::from("state.txt"),
            action_file: PathBuf::from("action.txt"),
            table_file: PathBuf::from("q_table.json"),
            seed: None,
            max_steps: None,
        }
    }
}

impl AgentConfig {
    /// Load a config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// names an unknown parameter.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|source| Error::io(format!("read config {}", path.display()), source))?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_bootstrap(mut self, bootstrap: BootstrapSchedule) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Check every parameter is in range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first offending
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        fn check(ok: bool, message: impl FnOnce() -> String) -> Result<()> {
            if ok {
                Ok(())
            } else {
                Err(Error::InvalidConfiguration { message: message() })
            }
        }

        check(
            self.learning_rate > 0.0 && self.learning_rate <= 1.0,
            || format!("learning_rate must be in (0, 1], got {}", self.learning_rate),
        )?;
        check((0.0..=1.0).contains(&self.discount_factor), || {
            format!("discount_factor must be in [0, 1], got {}", self.discount_factor)
        })?;
        check((0.0..=1.0).contains(&self.initial_epsilon), || {
            format!("initial_epsilon must be in [0, 1], got {}", self.initial_epsilon)
        })?;
        check(
            (0.0..=self.initial_epsilon).contains(&self.min_epsilon),
            || {
                format!(
                    "min_epsilon must be in [0, initial_epsilon], got {}",
                    self.min_epsilon
                )
            },
        )?;
        check(self.epsilon_decay > 0.0 && self.epsilon_decay <= 1.0, || {
            format!("epsilon_decay must be in (0, 1], got {}", self.epsilon_decay)
        })?;
        check(self.poll_interval_ms > 0, || {
            "poll_interval_ms must be positive".to_string()
        })?;
        check(self.save_every > 0, || "save_every must be positive".to_string())?;
        check(!self.abstraction_fields.is_empty(), || {
            "at least one abstraction field is required".to_string()
        })?;

        let mut fields = HashSet::new();
        let mut labels = HashSet::new();
        for field in &self.abstraction_fields {
            check(fields.insert(field.field.as_str()), || {
                format!("abstraction field '{}' listed twice", field.field)
            })?;
            check(labels.insert(field.label.as_str()), || {
                format!("abstraction label '{}' listed twice", field.label)
            })?;
        }

        check(self.state_file != self.action_file, || {
            "state_file and action_file must differ".to_string()
        })?;
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn bootstrap_interval(&self) -> Duration {
        Duration::from_millis(self.bootstrap_interval_ms)
    }

    pub fn learner(&self) -> QLearner {
        QLearner::new(self.learning_rate, self.discount_factor)
    }

    pub fn exploration(&self) -> ExplorationRate {
        ExplorationRate::new(self.initial_epsilon, self.epsilon_decay, self.min_epsilon)
    }

    pub fn abstractor(&self) -> StateAbstractor {
        StateAbstractor::new(self.abstraction_fields.clone())
    }

    /// Loop settings with file paths resolved against `dir`.
    pub fn loop_settings(&self, dir: &Path) -> LoopSettings {
        LoopSettings {
            poll_interval: self.poll_interval(),
            bootstrap_interval: self.bootstrap_interval(),
            save_every: self.save_every,
            max_steps: self.max_steps,
            table_path: dir.join(&self.table_file),
        }
    }
}
