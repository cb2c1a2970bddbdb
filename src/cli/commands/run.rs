//! Run command - drive a live game process

use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;

use crate::{
    abstraction::AbstractionField,
    app::{AgentConfig, App},
    cli::output::{format_number, print_kv, print_section},
    pipeline::{BootstrapSchedule, BootstrapSegment, LoggingObserver, ProgressObserver},
};

#[derive(Parser, Debug)]
#[command(about = "Run the agent against a live game process")]
pub struct RunArgs {
    /// Directory shared with the game process
    #[arg(long, short = 'd', default_value = ".")]
    pub dir: PathBuf,

    /// JSON config file; omitted parameters keep their defaults
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Learning rate α
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Discount factor γ
    #[arg(long)]
    pub discount_factor: Option<f64>,

    /// Initial exploration rate
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Exploration rate floor
    #[arg(long)]
    pub min_epsilon: Option<f64>,

    /// Exploration decay per decision
    #[arg(long)]
    pub epsilon_decay: Option<f64>,

    /// Milliseconds between polls of the state file
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// Milliseconds to wait before reading a freshly seen state file
    #[arg(long)]
    pub settle_delay_ms: Option<u64>,

    /// Save the table every N steps
    #[arg(long)]
    pub save_every: Option<u64>,

    /// Log progress every N steps
    #[arg(long)]
    pub report_every: Option<u64>,

    /// Replace the bootstrap sequence (repeatable)
    #[arg(long = "bootstrap", value_name = "ACTION:MILLIS")]
    pub bootstrap: Vec<BootstrapSegment>,

    /// Start learning immediately
    #[arg(long, conflicts_with = "bootstrap")]
    pub skip_bootstrap: bool,

    /// Replace the abstraction fields (repeatable)
    #[arg(long = "field", value_name = "FIELD[=LABEL]")]
    pub fields: Vec<AbstractionField>,

    /// Table file name, relative to --dir
    #[arg(long)]
    pub table: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after N learning steps
    #[arg(long)]
    pub max_steps: Option<u64>,

    /// Show a live spinner
    #[arg(long)]
    pub progress: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,
}

/// Merge defaults, the config file and command-line overrides.
pub fn resolve_config(args: &RunArgs) -> Result<AgentConfig> {
    let mut config = match &args.config {
        Some(path) => AgentConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => AgentConfig::default(),
    };

    if let Some(learning_rate) = args.learning_rate {
        config.learning_rate = learning_rate;
    }
    if let Some(discount_factor) = args.discount_factor {
        config.discount_factor = discount_factor;
    }
    if let Some(epsilon) = args.epsilon {
        config.initial_epsilon = epsilon;
    }
    if let Some(min_epsilon) = args.min_epsilon {
        config.min_epsilon = min_epsilon;
    }
    if let Some(epsilon_decay) = args.epsilon_decay {
        config.epsilon_decay = epsilon_decay;
    }
    if let Some(poll_interval_ms) = args.poll_interval_ms {
        config.poll_interval_ms = poll_interval_ms;
    }
    if let Some(settle_delay_ms) = args.settle_delay_ms {
        config.settle_delay_ms = settle_delay_ms;
    }
    if let Some(save_every) = args.save_every {
        config.save_every = save_every;
    }
    if let Some(report_every) = args.report_every {
        config.report_every = report_every;
    }
    if let Some(table) = &args.table {
        config.table_file = table.clone();
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.max_steps.is_some() {
        config.max_steps = args.max_steps;
    }
    if args.skip_bootstrap {
        config.bootstrap = BootstrapSchedule::disabled();
    } else if !args.bootstrap.is_empty() {
        config.bootstrap = BootstrapSchedule::new(args.bootstrap.clone());
    }
    if !args.fields.is_empty() {
        config.abstraction_fields = args.fields.clone();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

pub fn execute(args: RunArgs) -> Result<()> {
    let config = resolve_config(&args)?;

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let app = App::new();
    let channel = app.file_channel(&config, &args.dir);
    let mut agent_loop = app
        .build_loop(&config, &args.dir, channel)
        .with_context(|| format!("Failed to start agent in {}", args.dir.display()))?
        .with_observer(Box::new(LoggingObserver::new(config.report_every)));
    if args.progress {
        agent_loop = agent_loop.with_observer(Box::new(ProgressObserver::new()));
    }

    let stop = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&stop);
    if let Err(error) = ctrlc::set_handler(move || handler_flag.store(true, Ordering::Relaxed)) {
        warn!(%error, "could not install Ctrl-C handler; the table is only saved on cadence");
    }

    let steps = agent_loop.run(&stop).context("Failed to save table on shutdown")?;

    print_section("Run summary");
    let agent = agent_loop.agent();
    print_kv("Steps", &format_number(steps));
    print_kv("States", &format_number(agent.table().len() as u64));
    print_kv("Learning rate", &agent.learner().learning_rate().to_string());
    print_kv("Discount", &agent.learner().discount_factor().to_string());
    print_kv(
        "Exploration",
        &format!(
            "{:.4} (floor {})",
            agent.epsilon(),
            agent.exploration().min_epsilon()
        ),
    );
    print_kv(
        "Table",
        &args.dir.join(&config.table_file).display().to_string(),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fs, time::Duration};

    use tempfile::TempDir;

    use super::*;
    use crate::types::Action;

    fn parse(args: &[&str]) -> RunArgs {
        RunArgs::parse_from(std::iter::once("run").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = resolve_config(&parse(&[])).unwrap();
        assert_eq!(config, AgentConfig::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("brain.json");
        fs::write(&path, r#"{"learning_rate": 0.3, "save_every": 50}"#).unwrap();

        let config = resolve_config(&parse(&[
            "--config",
            path.to_str().unwrap(),
            "--learning-rate",
            "0.5",
            "--seed",
            "9",
        ]))
        .unwrap();
        assert_eq!(config.learning_rate, 0.5);
        assert_eq!(config.save_every, 50);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_bootstrap_and_fields_flags() {
        let config = resolve_config(&parse(&[
            "--bootstrap",
            "JUMP:300",
            "--bootstrap",
            "RIGHT:200",
            "--field",
            "screen_id=screen",
            "--field",
            "lives",
        ]))
        .unwrap();
        assert_eq!(config.bootstrap.total(), Duration::from_millis(500));
        assert_eq!(config.bootstrap.segments()[0].action, Action::Jump);
        assert_eq!(config.abstraction_fields.len(), 2);
        assert_eq!(config.abstraction_fields[1].label, "lives");
    }

    #[test]
    fn test_skip_bootstrap() {
        let config = resolve_config(&parse(&["--skip-bootstrap"])).unwrap();
        assert!(config.bootstrap.is_empty());
    }

    #[test]
    fn test_invalid_override_rejected() {
        assert!(resolve_config(&parse(&["--epsilon-decay", "1.5"])).is_err());
    }

    #[test]
    fn test_bad_bootstrap_segment_fails_to_parse() {
        assert!(RunArgs::try_parse_from(["run", "--bootstrap", "FIRE:10"]).is_err());
    }

    #[test]
    fn test_zero_steps_writes_empty_table() {
        let dir = TempDir::new().unwrap();
        execute(parse(&[
            "--dir",
            dir.path().to_str().unwrap(),
            "--skip-bootstrap",
            "--max-steps",
            "0",
        ]))
        .unwrap();
        let contents = fs::read_to_string(dir.path().join("q_table.json")).unwrap();
        assert_eq!(contents, "{}");
    }
}
