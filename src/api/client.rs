use log::debug;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::config::AppConfig;
use crate::model::{KnowledgeGraph, Question, SessionId};

#[derive(Clone, Debug)]
pub struct ApiClient {
	client: Client,
	base_url: String,
}

impl ApiClient {
	pub fn new(config: &AppConfig) -> Self {
		Self {
			client: Client::new(),
			base_url: config.api_base_url.clone(),
		}
	}

	/// Open a new session. The returned question carries the session id.
	pub async fn start_session(&self) -> Result<Question, ApiError> {
		let response = self.client.get(self.url("/start")).send().await?;
		decode(response).await
	}

	/// Ask for the opening question of a topic the user picked.
	pub async fn first_question(
		&self,
		session: &SessionId,
		topic: &str,
	) -> Result<Question, ApiError> {
		let body = FirstQuestionRequest {
			session_id: session,
			topic,
		};
		self.post("/first_question", &body).await
	}

	pub async fn submit_answer(
		&self,
		session: &SessionId,
		question_text: &str,
		chosen_answer: &str,
	) -> Result<Question, ApiError> {
		let body = AnswerRequest {
			session_id: session,
			question_text,
			chosen_answer,
		};
		self.post("/answer", &body).await
	}

	pub async fn fetch_graph(&self, session: &SessionId) -> Result<KnowledgeGraph, ApiError> {
		let url = self.url(&format!("/graph/{session}"));
		debug!("GET {url}");
		let response = self.client.get(url).send().await?;
		decode(response).await
	}

	async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
	where
		B: Serialize + ?Sized,
		T: DeserializeOwned,
	{
		let url = self.url(path);
		debug!("POST {url}");
		let response = self.client.post(url).json(body).send().await?;
		decode(response).await
	}

	fn url(&self, path: &str) -> String {
		format!(
			"{}/{}",
			self.base_url.trim_end_matches('/'),
			path.trim_start_matches('/')
		)
	}
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
	if !response.status().is_success() {
		return Err(ApiError::Status(response.status()));
	}
	Ok(response.json().await?)
}

#[derive(Debug, Serialize)]
struct FirstQuestionRequest<'a> {
	session_id: &'a SessionId,
	topic: &'a str,
}

#[derive(Debug, Serialize)]
struct AnswerRequest<'a> {
	session_id: &'a SessionId,
	question_text: &'a str,
	chosen_answer: &'a str,
}

#[cfg(test)]
mod tests {
	use futures::executor::block_on;
	use rstest::rstest;
	use serde_json::json;

	use super::*;

	fn client(base: &str) -> ApiClient {
		ApiClient::new(&AppConfig {
			api_base_url: base.into(),
			..AppConfig::default()
		})
	}

	#[rstest]
	#[case("http://localhost:8000", "/start", "http://localhost:8000/start")]
	#[case("http://localhost:8000/", "/start", "http://localhost:8000/start")]
	#[case("https://quiz.example/api/", "graph/s1", "https://quiz.example/api/graph/s1")]
	fn joins_urls_with_single_slash(#[case] base: &str, #[case] path: &str, #[case] expected: &str) {
		assert_eq!(client(base).url(path), expected);
	}

	#[test]
	fn answer_body_uses_backend_field_names() {
		let session = SessionId::new("s1");
		let body = AnswerRequest {
			session_id: &session,
			question_text: "Who built the pyramids?",
			chosen_answer: "Egyptians",
		};
		assert_eq!(
			serde_json::to_value(&body).unwrap(),
			json!({
				"session_id": "s1",
				"question_text": "Who built the pyramids?",
				"chosen_answer": "Egyptians",
			})
		);
	}

	#[test]
	fn first_question_body_carries_topic() {
		let session = SessionId::new("s1");
		let body = FirstQuestionRequest {
			session_id: &session,
			topic: "History",
		};
		assert_eq!(
			serde_json::to_value(&body).unwrap(),
			json!({ "session_id": "s1", "topic": "History" })
		);
	}

	fn canned(status: u16, body: &str) -> Response {
		http::Response::builder()
			.status(status)
			.body(body.to_string())
			.unwrap()
			.into()
	}

	#[rstest]
	#[case(404)]
	#[case(500)]
	fn non_success_status_is_reported(#[case] status: u16) {
		let err = block_on(decode::<KnowledgeGraph>(canned(status, "oops"))).unwrap_err();
		assert!(matches!(err, ApiError::Status(s) if s.as_u16() == status));
	}

	#[test]
	fn success_body_is_decoded() {
		let body = r#"{"nodes":[{"id":"home","type":"home"}],"links":[]}"#;
		let graph = block_on(decode::<KnowledgeGraph>(canned(200, body))).unwrap();
		assert_eq!(graph.nodes.len(), 1);
		assert_eq!(graph.nodes[0].id, "home");
	}

	#[test]
	fn malformed_body_is_a_transport_error() {
		let err = block_on(decode::<KnowledgeGraph>(canned(200, "not json"))).unwrap_err();
		assert!(matches!(err, ApiError::Http(_)));
	}
}
