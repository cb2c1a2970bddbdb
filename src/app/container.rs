//! Dependency injection container for the agent.
//!
//! The container owns infrastructure dependencies (table storage) and wires
//! configuration, storage and channel into a ready-to-run [`AgentLoop`].

use std::{path::Path, sync::Arc};

use super::config::AgentConfig;
use crate::{
    Result,
    adapters::{FileChannel, JsonTableRepository},
    pipeline::AgentLoop,
    ports::{ExchangeChannel, TableRepository},
    q_learning::{QLearningAgent, ValueTable},
};

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```no_run
/// use arcade_brain::app::{AgentConfig, App};
/// use std::path::Path;
///
/// let app = App::new();
/// let config = AgentConfig::default();
/// let dir = Path::new(".");
/// let agent_loop = app.build_loop(&config, dir, app.file_channel(&config, dir))?;
/// # Ok::<(), arcade_brain::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use arcade_brain::app::App;
/// use arcade_brain::adapters::InMemoryRepository;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct App {
    /// Repository for value table persistence
    table_repository: Arc<dyn TableRepository + Send + Sync>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app with production defaults.
    ///
    /// Uses `JsonTableRepository` and an entropy-seeded RNG.
    pub fn new() -> Self {
        Self {
            table_repository: Arc::new(JsonTableRepository::new()),
            default_seed: None,
        }
    }

    /// Create a builder for constructing app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn table_repository(&self) -> Arc<dyn TableRepository + Send + Sync> {
        Arc::clone(&self.table_repository)
    }

    /// Load the table at `path`, or an empty one if nothing is stored there.
    pub fn load_table(&self, path: &Path) -> Result<ValueTable> {
        self.table_repository.load(path)
    }

    /// Build an agent from `config`, seeded with whatever table is stored in
    /// `dir`.
    pub fn load_agent(&self, config: &AgentConfig, dir: &Path) -> Result<QLearningAgent> {
        let table = self.load_table(&dir.join(&config.table_file))?;
        Ok(QLearningAgent::new(
            table,
            config.learner(),
            config.exploration(),
            config.seed.or(self.default_seed),
        ))
    }

    /// File channel for `config`, with paths resolved against `dir`.
    pub fn file_channel(&self, config: &AgentConfig, dir: &Path) -> FileChannel {
        FileChannel::new(dir.join(&config.state_file), dir.join(&config.action_file))
            .with_settle_delay(config.settle_delay())
    }

    /// Validate `config` and assemble an agent loop over `channel`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a stored table
    /// exists but cannot be loaded.
    pub fn build_loop<C: ExchangeChannel>(
        &self,
        config: &AgentConfig,
        dir: &Path,
        channel: C,
    ) -> Result<AgentLoop<C>> {
        config.validate()?;
        let agent = self.load_agent(config, dir)?;
        Ok(AgentLoop::new(
            channel,
            agent,
            config.abstractor(),
            config.bootstrap.clone(),
            self.table_repository(),
            config.loop_settings(dir),
        ))
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing app with custom dependencies.
pub struct AppBuilder {
    table_repository: Option<Arc<dyn TableRepository + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    fn new() -> Self {
        Self {
            table_repository: None,
            default_seed: None,
        }
    }

    /// Set a custom table repository.
    pub fn with_repository<R: TableRepository + Send + Sync + 'static>(
        mut self,
        repository: R,
    ) -> Self {
        self.table_repository = Some(Arc::new(repository));
        self
    }

    /// Seed used when the config does not name one.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app; unset dependencies fall back to production defaults.
    pub fn build(self) -> App {
        App {
            table_repository: self
                .table_repository
                .unwrap_or_else(|| Arc::new(JsonTableRepository::new())),
            default_seed: self.default_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::{
        adapters::{InMemoryRepository, ScriptedChannel},
        types::{Action, StateKey},
    };

    #[test]
    fn test_load_agent_uses_stored_table() {
        let mut table = ValueTable::new();
        table.row_mut(&StateKey::from("A")).set(Action::Up, 3.0);
        let repo = InMemoryRepository::with_table(PathBuf::from("dk/q_table.json"), table);
        let app = App::for_testing().with_repository(repo).build();

        let agent = app
            .load_agent(&AgentConfig::default(), Path::new("dk"))
            .unwrap();
        assert_eq!(agent.table().value(&StateKey::from("A"), Action::Up), 3.0);
    }

    #[test]
    fn test_build_loop_rejects_invalid_config() {
        let app = App::for_testing()
            .with_repository(InMemoryRepository::new())
            .build();
        let config = AgentConfig {
            save_every: 0,
            ..AgentConfig::default()
        };
        assert!(
            app.build_loop(&config, Path::new("."), ScriptedChannel::new())
                .is_err()
        );
    }

    #[test]
    fn test_file_channel_paths_resolved() {
        let app = App::new();
        let channel = app.file_channel(&AgentConfig::default(), Path::new("/tmp/dk"));
        assert_eq!(channel.state_path(), Path::new("/tmp/dk/state.txt"));
        assert_eq!(channel.action_path(), Path::new("/tmp/dk/action.txt"));
    }
}
