use thiserror::Error;

/// Failures talking to the quiz backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
	#[error("backend responded with status {0}")]
	Status(reqwest::StatusCode),
	#[error(transparent)]
	Http(#[from] reqwest::Error),
}
