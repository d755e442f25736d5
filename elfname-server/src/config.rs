use std::fs;
use std::path::Path;

use elfname_core::EngineConfig;
use serde::Deserialize;

/// Server settings read from a TOML file.
///
/// Missing keys fall back to their defaults, so an empty file is valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
	pub host: String,
	pub port: u16,
	/// Default `env_logger` filter when `RUST_LOG` is unset.
	pub log_level: String,
	/// Upper bound on `count` for one generate call.
	pub max_count: usize,
	pub engine: EngineConfig,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_owned(),
			port: 5000,
			log_level: "info".to_owned(),
			max_count: 100,
			engine: EngineConfig::default(),
		}
	}
}

impl ServerConfig {
	/// Reads and parses `path`.
	///
	/// # Errors
	/// Returns a printable reason when the file cannot be read or is not
	/// valid TOML for this structure.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
		let path = path.as_ref();
		let text = fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
		toml::from_str(&text).map_err(|e| format!("cannot parse {}: {e}", path.display()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_partial_file_keeps_defaults() {
		let config: ServerConfig = toml::from_str(
			r#"
			port = 8080

			[engine]
			oversample = 5

			[engine.quality]
			hard_share = 0.2
			"#,
		)
		.unwrap();
		assert_eq!(config.port, 8080);
		assert_eq!(config.host, "127.0.0.1");
		assert_eq!(config.engine.oversample, 5);
		assert_eq!(config.engine.given_attempts, 30);
		assert_eq!(config.engine.quality.hard_share, 0.2);
		assert_eq!(config.engine.quality.prefix_len, 4);
	}

	#[test]
	fn test_missing_file() {
		assert!(ServerConfig::load("/nonexistent/elfname.toml").is_err());
	}
}
