//! Runtime configuration for the terminal game.
//!
//! Values come from the environment first (`MERGE_SEED`, `MERGE_LOG_PATH`) and
//! are then overridden by command-line flags (`--seed N`, `--log PATH`).

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

pub const SEED_ENV: &str = "MERGE_SEED";
pub const LOG_PATH_ENV: &str = "MERGE_LOG_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: u32,
    /// Append-only JSONL event log; disabled when `None`.
    pub log_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = lookup(SEED_ENV).map(|s| s.trim().to_string()) {
            if !v.is_empty() {
                config.seed = parse_seed(&v).map_err(|_| anyhow!("invalid {SEED_ENV}: {v}"))?;
            }
        }

        config.log_path = lookup(LOG_PATH_ENV)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(config)
    }

    /// Apply command-line flags (program name excluded) on top of the current values.
    pub fn apply_args(&mut self, args: &[String]) -> Result<()> {
        let mut i = 0usize;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --seed"))?;
                    self.seed = parse_seed(v).map_err(|_| anyhow!("invalid --seed value: {v}"))?;
                }
                "--log" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --log"))?;
                    self.log_path = Some(v.clone());
                }
                other => {
                    return Err(anyhow!("unknown argument: {other}"));
                }
            }
            i += 1;
        }
        Ok(())
    }
}

fn parse_seed(s: &str) -> Result<u32, std::num::ParseIntError> {
    s.parse::<u32>()
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| (d.as_secs() as u32) ^ d.subsec_nanos())
        .unwrap_or(1)
}
