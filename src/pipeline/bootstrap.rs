//! Scripted, non-learned action sequence run before learning begins.

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{Error, types::Action};

/// Hold `action` for `duration_ms` milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapSegment {
    pub action: Action,
    pub duration_ms: u64,
}

impl BootstrapSegment {
    pub fn new(action: Action, duration: Duration) -> Self {
        Self {
            action,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl FromStr for BootstrapSegment {
    type Err = Error;

    /// Parses `ACTION:millis`, e.g. `LEFT:2000`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: String| Error::InvalidConfiguration { message };
        let (action, millis) = s
            .split_once(':')
            .ok_or_else(|| invalid(format!("bootstrap segment '{s}' must be ACTION:millis")))?;
        let duration_ms = millis
            .trim()
            .parse::<u64>()
            .map_err(|e| invalid(format!("bootstrap segment '{s}' has a bad duration: {e}")))?;
        Ok(Self {
            action: action.parse()?,
            duration_ms,
        })
    }
}

impl fmt::Display for BootstrapSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.action, self.duration_ms)
    }
}

/// Timed sequence of scripted actions.
///
/// The default clears the opening of the level: LEFT for two seconds, then
/// RIGHT for two seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BootstrapSchedule {
    segments: Vec<BootstrapSegment>,
}

impl BootstrapSchedule {
    /// Published once when the sequence ends, releasing any held input.
    pub const RELEASE_ACTION: Action = Action::None;

    pub fn new(segments: Vec<BootstrapSegment>) -> Self {
        Self { segments }
    }

    /// Schedule with no segments; learning starts on the first tick.
    pub fn disabled() -> Self {
        Self::new(Vec::new())
    }

    pub fn segments(&self) -> &[BootstrapSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.total() == Duration::ZERO
    }

    /// Total scripted duration.
    pub fn total(&self) -> Duration {
        self.segments.iter().map(BootstrapSegment::duration).sum()
    }

    /// Scripted action at `elapsed` since the start, or `None` once the
    /// sequence is over.
    pub fn action_at(&self, elapsed: Duration) -> Option<Action> {
        let mut end = Duration::ZERO;
        for segment in &self.segments {
            end += segment.duration();
            if elapsed < end {
                return Some(segment.action);
            }
        }
        None
    }
}

impl Default for BootstrapSchedule {
    fn default() -> Self {
        Self::new(vec![
            BootstrapSegment::new(Action::Left, Duration::from_secs(2)),
            BootstrapSegment::new(Action::Right, Duration::from_secs(2)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule_phases() {
        let schedule = BootstrapSchedule::default();
        assert_eq!(schedule.action_at(Duration::ZERO), Some(Action::Left));
        assert_eq!(schedule.action_at(Duration::from_millis(1999)), Some(Action::Left));
        assert_eq!(schedule.action_at(Duration::from_millis(2000)), Some(Action::Right));
        assert_eq!(schedule.action_at(Duration::from_millis(3999)), Some(Action::Right));
        assert_eq!(schedule.action_at(Duration::from_millis(4000)), None);
        assert_eq!(schedule.total(), Duration::from_secs(4));
    }

    #[test]
    fn test_disabled_schedule_is_over_immediately() {
        let schedule = BootstrapSchedule::disabled();
        assert!(schedule.is_empty());
        assert_eq!(schedule.action_at(Duration::ZERO), None);
    }

    #[test]
    fn test_zero_length_segments_are_skipped() {
        let schedule = BootstrapSchedule::new(vec![
            BootstrapSegment::new(Action::Jump, Duration::ZERO),
            BootstrapSegment::new(Action::Up, Duration::from_millis(10)),
        ]);
        assert_eq!(schedule.action_at(Duration::ZERO), Some(Action::Up));
    }

    #[test]
    fn test_parse_segment() {
        let segment: BootstrapSegment = "right:1500".parse().unwrap();
        assert_eq!(segment.action, Action::Right);
        assert_eq!(segment.duration(), Duration::from_millis(1500));
        assert_eq!(segment.to_string(), "RIGHT:1500");
        assert!("RIGHT".parse::<BootstrapSegment>().is_err());
        assert!("FIRE:10".parse::<BootstrapSegment>().is_err());
        assert!("UP:soon".parse::<BootstrapSegment>().is_err());
    }
}
