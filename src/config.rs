use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_FLY_MS: u64 = 1500;
const DEFAULT_POPUP_MS: u64 = 1500;
const DEFAULT_FLY_ZOOM: f64 = 2.0;

/// Runtime knobs, baked in at build time through `KNOWLEDGE_PATH_*` variables.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
	pub api_base_url: String,
	/// How long the camera takes to reach a clicked answer before it is submitted.
	pub fly_duration: Duration,
	pub popup_duration: Duration,
	pub fly_zoom: f64,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			api_base_url: DEFAULT_API_URL.into(),
			fly_duration: Duration::from_millis(DEFAULT_FLY_MS),
			popup_duration: Duration::from_millis(DEFAULT_POPUP_MS),
			fly_zoom: DEFAULT_FLY_ZOOM,
		}
	}
}

impl AppConfig {
	pub fn from_build_env() -> Self {
		Self::from_values(
			option_env!("KNOWLEDGE_PATH_API_URL"),
			option_env!("KNOWLEDGE_PATH_FLY_MS"),
			option_env!("KNOWLEDGE_PATH_POPUP_MS"),
		)
	}

	fn from_values(api_url: Option<&str>, fly_ms: Option<&str>, popup_ms: Option<&str>) -> Self {
		let api_base_url = api_url
			.map(str::trim)
			.filter(|url| !url.is_empty())
			.unwrap_or(DEFAULT_API_URL)
			.to_string();
		Self {
			api_base_url,
			fly_duration: parse_millis(fly_ms, DEFAULT_FLY_MS),
			popup_duration: parse_millis(popup_ms, DEFAULT_POPUP_MS),
			fly_zoom: DEFAULT_FLY_ZOOM,
		}
	}
}

fn parse_millis(raw: Option<&str>, default: u64) -> Duration {
	let millis = raw
		.and_then(|v| v.trim().parse::<u64>().ok())
		.unwrap_or(default);
	Duration::from_millis(millis)
}
