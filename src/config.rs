use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::{debug, info};

const CONFIG_ENV_VAR: &str = "TODOLIMIT_CONFIG";
const TIMEZONE_ENV_VAR: &str = "TODOLIMIT_TZ";
const DEFAULT_TICK_SECS: u64 = 30;

/// Settings read from `config.toml`.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// IANA timezone id used for local edit values, e.g. `Asia/Tokyo`.
    pub timezone: Option<String>,
    /// Refresh interval of the watch view, in seconds.
    pub tick_secs: Option<u64>,
}

/// Timezone the deadline conversions run in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Zone {
    /// Whatever the operating system reports.
    Local,
    Named(Tz),
}

/// Returns the path to the configuration file.
///
/// The path is determined in the following order:
/// 1. `TODOLIMIT_CONFIG` environment variable.
/// 2. `~/.config/todolimit/config.toml` (on Linux).
pub fn config_path() -> Option<PathBuf> {
    if let Ok(raw) = std::env::var(CONFIG_ENV_VAR) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::config_dir().map(|mut p| {
        p.push("todolimit");
        p.push("config.toml");
        p
    })
}

impl Config {
    /// Loads the configuration file, falling back to defaults when it is absent.
    pub fn load() -> anyhow::Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                debug!(file = %path.display(), "no config file; using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        info!(file = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Picks the timezone: command-line flag, then `TODOLIMIT_TZ`, then the
    /// config file, then the system timezone.
    pub fn resolve_zone(&self, cli_override: Option<&str>) -> anyhow::Result<Zone> {
        let env = std::env::var(TIMEZONE_ENV_VAR).ok();
        pick_zone(cli_override, env.as_deref(), self.timezone.as_deref())
    }

    pub fn tick_secs(&self) -> u64 {
        self.tick_secs.unwrap_or(DEFAULT_TICK_SECS).max(1)
    }
}

fn pick_zone(cli: Option<&str>, env: Option<&str>, file: Option<&str>) -> anyhow::Result<Zone> {
    let candidates = [("--tz", cli), (TIMEZONE_ENV_VAR, env), ("config file", file)];
    for (source, value) in candidates {
        let Some(raw) = value.map(str::trim).filter(|s| !s.is_empty()) else {
            continue;
        };
        let tz = parse_timezone(raw, source)?;
        info!(source, timezone = %tz, "using configured timezone");
        return Ok(Zone::Named(tz));
    }
    debug!("no timezone configured; using system local time");
    Ok(Zone::Local)
}

fn parse_timezone(raw: &str, source: &str) -> anyhow::Result<Tz> {
    raw.parse::<Tz>()
        .map_err(|err| anyhow!("invalid timezone '{raw}' from {source}: {err}"))
}
