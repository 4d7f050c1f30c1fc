use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::operator::Operator;

/// Simulated latency used when an operation time is unset or zero.
pub const DEFAULT_OPERATION_TIME_MS: u64 = 100;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u16(profile: &str, key: &str, default: u16) -> u16 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Zero and garbage both fall back to `default`.
fn profiled_env_nonzero_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .filter(|v| *v != 0)
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub operations: OperationTimes,
    pub agent: AgentConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `CALC_PROFILE` env var. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("CALC_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            server: ServerConfig::from_env_profiled(p),
            operations: OperationTimes::from_env_profiled(p),
            agent: AgentConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  server:      {}:{}", self.server.host, self.server.port);
        tracing::info!(
            "  operations:  +={}ms -={}ms *={}ms /={}ms",
            self.operations.addition_ms,
            self.operations.subtraction_ms,
            self.operations.multiplication_ms,
            self.operations.division_ms
        );
        tracing::info!(
            "  agent:       computing_power={}, orchestrator={}",
            self.agent.computing_power,
            self.agent.orchestrator_url
        );
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

impl ServerConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            host: profiled_env_or(p, "HOST", "0.0.0.0"),
            port: profiled_env_u16(p, "PORT", 8080),
            cors_origin: profiled_env_or(p, "CORS_ORIGIN", "*"),
        }
    }
}

// ── Operation latency table ───────────────────────────────────

/// Simulated compute cost per operator, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationTimes {
    pub addition_ms: u64,
    pub subtraction_ms: u64,
    pub multiplication_ms: u64,
    pub division_ms: u64,
}

impl Default for OperationTimes {
    fn default() -> Self {
        Self::uniform(DEFAULT_OPERATION_TIME_MS)
    }
}

impl OperationTimes {
    fn from_env_profiled(p: &str) -> Self {
        let d = DEFAULT_OPERATION_TIME_MS;
        Self {
            addition_ms: profiled_env_nonzero_u64(p, "TIME_ADDITION_MS", d),
            subtraction_ms: profiled_env_nonzero_u64(p, "TIME_SUBTRACTION_MS", d),
            multiplication_ms: profiled_env_nonzero_u64(p, "TIME_MULTIPLICATIONS_MS", d),
            division_ms: profiled_env_nonzero_u64(p, "TIME_DIVISIONS_MS", d),
        }
    }

    /// Same latency for every operator.
    pub fn uniform(ms: u64) -> Self {
        Self {
            addition_ms: ms,
            subtraction_ms: ms,
            multiplication_ms: ms,
            division_ms: ms,
        }
    }

    pub fn millis_for(&self, op: Operator) -> u64 {
        match op {
            Operator::Add => self.addition_ms,
            Operator::Sub => self.subtraction_ms,
            Operator::Mul => self.multiplication_ms,
            Operator::Div => self.division_ms,
        }
    }
}

// ── Agent (worker pool) ───────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Number of concurrent polling loops.
    pub computing_power: usize,
    pub orchestrator_url: String,
    /// Backoff between polls when no task is available or the orchestrator is unreachable.
    pub poll_interval_ms: u64,
}

impl AgentConfig {
    fn from_env_profiled(p: &str) -> Self {
        let computing_power = profiled_env_opt(p, "COMPUTING_POWER")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(1)
            .max(1);
        Self {
            computing_power,
            orchestrator_url: profiled_env_or(p, "ORCHESTRATOR_URL", "http://localhost:8080"),
            poll_interval_ms: profiled_env_nonzero_u64(p, "AGENT_POLL_INTERVAL_MS", 3000),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own profile prefix so parallel tests never share env keys.

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::for_profile("CFGTEST_EMPTY_UNUSED_PROFILE_A");
        assert_eq!(config.operations.millis_for(Operator::Add), DEFAULT_OPERATION_TIME_MS);
        assert!(config.agent.computing_power >= 1);
    }

    #[test]
    fn profiled_key_wins_over_plain_key() {
        env::set_var("CFGTEST_B_TIME_DIVISIONS_MS", "750");
        let times = OperationTimes::from_env_profiled("CFGTEST_B");
        assert_eq!(times.division_ms, 750);
        assert_eq!(times.millis_for(Operator::Div), 750);
    }

    #[test]
    fn plain_key_used_when_profiled_key_is_absent() {
        env::set_var("CFGTEST_F_ONLY_PLAIN", "plain");
        assert_eq!(
            profiled_env_opt("CFGTEST_F_PROFILE", "CFGTEST_F_ONLY_PLAIN").as_deref(),
            Some("plain")
        );
        assert_eq!(profiled_env_nonzero_u64("CFGTEST_F_PROFILE", "CFGTEST_F_ONLY_PLAIN", 7), 7);

        env::set_var("CFGTEST_F_ORCHESTRATOR", "http://orchestrator:9000");
        env::set_var("CFGTEST_F_PROFILE_CFGTEST_F_ORCHESTRATOR", "");
        assert_eq!(
            profiled_env_or("CFGTEST_F_PROFILE", "CFGTEST_F_ORCHESTRATOR", "unused"),
            "http://orchestrator:9000"
        );
    }

    #[test]
    fn zero_and_garbage_fall_back_to_default() {
        env::set_var("CFGTEST_C_TIME_ADDITION_MS", "0");
        env::set_var("CFGTEST_C_TIME_SUBTRACTION_MS", "fast");
        let times = OperationTimes::from_env_profiled("CFGTEST_C");
        assert_eq!(times.addition_ms, DEFAULT_OPERATION_TIME_MS);
        assert_eq!(times.subtraction_ms, DEFAULT_OPERATION_TIME_MS);
    }

    #[test]
    fn computing_power_is_at_least_one() {
        env::set_var("CFGTEST_D_COMPUTING_POWER", "0");
        let agent = AgentConfig::from_env_profiled("CFGTEST_D");
        assert_eq!(agent.computing_power, 1);

        env::set_var("CFGTEST_E_COMPUTING_POWER", "4");
        let agent = AgentConfig::from_env_profiled("CFGTEST_E");
        assert_eq!(agent.computing_power, 4);
    }

    #[test]
    fn profile_label_defaults() {
        let config = Config::for_profile("");
        assert_eq!(config.profile_label(), "default");
        let config = Config::for_profile("staging");
        assert_eq!(config.profile_label(), "STAGING");
    }
}
