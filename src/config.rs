use std::{env, net::SocketAddr, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_PREFS_PATH: &str = "data/preferences.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub api_base_url: String,
    pub preferences_path: PathBuf,
}

impl AppConfig {
    /// Reads `PORT`, `SUBSAGE_API_URL` and `SUBSAGE_PREFS_PATH`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let api_base_url = lookup("SUBSAGE_API_URL")
            .filter(|value| !value.trim().is_empty())
            .map(|value| value.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let preferences_path = lookup("SUBSAGE_PREFS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PREFS_PATH));

        Self {
            port,
            api_base_url,
            preferences_path,
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_base_url, "http://127.0.0.1:5000");
        assert_eq!(config.preferences_path, PathBuf::from("data/preferences.json"));
    }

    #[test]
    fn overrides_and_trims_trailing_slash() {
        let config = config_from(&[
            ("PORT", "9001"),
            ("SUBSAGE_API_URL", "http://api.local:5000/"),
            ("SUBSAGE_PREFS_PATH", "/tmp/prefs.json"),
        ]);
        assert_eq!(config.port, 9001);
        assert_eq!(config.api_base_url, "http://api.local:5000");
        assert_eq!(config.preferences_path, PathBuf::from("/tmp/prefs.json"));
    }

    #[test]
    fn bad_port_falls_back() {
        assert_eq!(config_from(&[("PORT", "http")]).port, 8080);
    }
}
