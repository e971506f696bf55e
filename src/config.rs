//! Application configuration, loaded from environment variables and CLI flags.

use crate::stats::DEFAULT_BASE_URL;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind, e.g. 0.0.0.0 so the app is reachable on a VPS.
    pub host: String,
    pub port: u16,
    /// Directory holding the registration roll file.
    pub data_dir: PathBuf,
    /// Game API token; stats lookups fail without it.
    pub clash_api_key: Option<String>,
    pub clash_api_base_url: String,
    /// Roster sessions idle for this long are removed.
    pub roster_idle_timeout: Duration,
}

impl Config {
    /// Load configuration from the process environment and arguments.
    ///
    /// Environment variables:
    /// - `HOST` (default `0.0.0.0`), `PORT` (default 8080)
    /// - `DATA_DIR` (default `data`)
    /// - `CLASH_API_KEY`, falling back to `COC_API_KEY`
    /// - `CLASH_API_BASE_URL` (default the public API)
    /// - `ROSTER_IDLE_HOURS` (default 12)
    ///
    /// CLI flags:
    /// - `--port <PORT>` overrides `PORT`
    pub fn load() -> Self {
        let args: Vec<String> = std::env::args().collect();
        Self::from_lookup(&args, |k| std::env::var(k).ok())
    }

    fn from_lookup(args: &[String], env: impl Fn(&str) -> Option<String>) -> Self {
        let host = env("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = parse_cli_value(args, "--port")
            .and_then(|v| v.parse().ok())
            .or_else(|| env("PORT").and_then(|v| v.parse().ok()))
            .unwrap_or(8080);

        let data_dir = env("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data"));

        let clash_api_key = env("CLASH_API_KEY")
            .filter(|k| !k.is_empty())
            .or_else(|| env("COC_API_KEY").filter(|k| !k.is_empty()));

        let clash_api_base_url =
            env("CLASH_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let idle_hours: u64 = env("ROSTER_IDLE_HOURS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(12);

        Config {
            host,
            port,
            data_dir,
            clash_api_key,
            clash_api_base_url,
            roster_idle_timeout: Duration::from_secs(idle_hours.saturating_mul(3600)),
        }
    }
}

/// Parse a CLI flag value like `--port 8080`.
fn parse_cli_value(args: &[String], flag: &str) -> Option<String> {
    args.windows(2).find_map(|pair| {
        if pair[0] == flag {
            Some(pair[1].clone())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_with(args: &[&str], vars: &[(&str, &str)]) -> Config {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(&args, |k| vars.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let c = load_with(&["web"], &[]);
        assert_eq!(c.host, "0.0.0.0");
        assert_eq!(c.port, 8080);
        assert_eq!(c.data_dir, PathBuf::from("data"));
        assert!(c.clash_api_key.is_none());
        assert_eq!(c.clash_api_base_url, DEFAULT_BASE_URL);
        assert_eq!(c.roster_idle_timeout, Duration::from_secs(12 * 3600));
    }

    #[test]
    fn cli_port_beats_env() {
        let c = load_with(&["web", "--port", "9000"], &[("PORT", "7000")]);
        assert_eq!(c.port, 9000);
        let c = load_with(&["web"], &[("PORT", "7000")]);
        assert_eq!(c.port, 7000);
    }

    #[test]
    fn api_key_falls_back_to_coc_var() {
        let c = load_with(&["web"], &[("COC_API_KEY", "abc")]);
        assert_eq!(c.clash_api_key.as_deref(), Some("abc"));
        let c = load_with(&["web"], &[("CLASH_API_KEY", "x"), ("COC_API_KEY", "abc")]);
        assert_eq!(c.clash_api_key.as_deref(), Some("x"));
    }

    #[test]
    fn huge_idle_hours_saturates() {
        let c = load_with(&["web"], &[("ROSTER_IDLE_HOURS", "18446744073709551615")]);
        assert_eq!(c.roster_idle_timeout, Duration::from_secs(u64::MAX));
    }
}
