//! File-backed exchange channel.
//!
//! Inbound: the game process drops a complete `key:value` file at the state
//! path; the agent moves it aside, then reads and deletes it. Outbound: the
//! agent writes the action name to a temporary path and renames it into place.

use std::{
    fs, io,
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use tracing::debug;

use crate::{
    Error, Result,
    adapters::atomic_file::{publish, remove_if_exists, tmp_path_for},
    observation::Observation,
    ports::ExchangeChannel,
    types::Action,
};

/// Default inbound file name.
pub const STATE_FILE: &str = "state.txt";
/// Default outbound file name.
pub const ACTION_FILE: &str = "action.txt";
/// Default pause between seeing the inbound file and reading it.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(10);

/// Private name the inbound file is moved to while it is being consumed.
fn claimed_path_for(state_path: &Path) -> PathBuf {
    let mut name = state_path.as_os_str().to_os_string();
    name.push(".claimed");
    PathBuf::from(name)
}

/// Exchange channel over two files in a shared directory.
///
/// # Examples
///
/// ```no_run
/// use arcade_brain::adapters::FileChannel;
/// use arcade_brain::ports::ExchangeChannel;
/// use arcade_brain::types::Action;
/// use std::path::Path;
///
/// let mut channel = FileChannel::in_dir(Path::new("."));
/// if let Some(observation) = channel.poll_observation()? {
///     println!("reward {}", observation.reward());
///     channel.publish_action(Action::Jump)?;
/// }
/// # Ok::<(), arcade_brain::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileChannel {
    state_path: PathBuf,
    claimed_path: PathBuf,
    action_path: PathBuf,
    action_tmp_path: PathBuf,
    settle_delay: Duration,
}

impl FileChannel {
    pub fn new(state_path: impl Into<PathBuf>, action_path: impl Into<PathBuf>) -> Self {
        let state_path = state_path.into();
        let action_path = action_path.into();
        Self {
            claimed_path: claimed_path_for(&state_path),
            state_path,
            action_tmp_path: tmp_path_for(&action_path),
            action_path,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    /// Channel using the default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(STATE_FILE), dir.join(ACTION_FILE))
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    pub fn action_path(&self) -> &Path {
        &self.action_path
    }
}

impl ExchangeChannel for FileChannel {
    /// Claims, reads and deletes the inbound file.
    ///
    /// The file is renamed aside before it is read, so a newer observation
    /// dropped at the state path meanwhile is left for the next poll. The
    /// settle delay narrows, but cannot close, the window in which a writer
    /// that does not itself rename into place is caught mid-write. The
    /// claimed file is deleted before parsing so malformed content is never
    /// read twice.
    fn poll_observation(&mut self) -> Result<Option<Observation>> {
        if !self.state_path.exists() {
            return Ok(None);
        }
        if !self.settle_delay.is_zero() {
            thread::sleep(self.settle_delay);
        }

        match fs::rename(&self.state_path, &self.claimed_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(Error::io(
                    format!("claim {}", self.state_path.display()),
                    source,
                ));
            }
        }
        let bytes = fs::read(&self.claimed_path).map_err(|source| {
            Error::io(format!("read {}", self.claimed_path.display()), source)
        });
        remove_if_exists(&self.claimed_path)?;
        let bytes = bytes?;

        let contents = String::from_utf8(bytes).map_err(|e| Error::MalformedObservation {
            line: 0,
            content: String::new(),
            reason: format!("file is not valid UTF-8: {e}"),
        })?;
        let observation = Observation::parse(&contents)?;
        debug!(reward = observation.reward(), "consumed observation");
        Ok(Some(observation))
    }

    fn publish_action(&mut self, action: Action) -> Result<()> {
        publish(
            &self.action_path,
            &self.action_tmp_path,
            action.as_str().as_bytes(),
        )
    }
}
