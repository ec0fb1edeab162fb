//! API-Gateway-style request handling: status mapping for projection results
//! and the GET handler used by the Lambda binary.

use crate::adapters::sinks::{json_object_key, no_data_message, render_json};
use crate::core::fetcher::PostsFetcher;
use crate::core::transform::project;
use crate::domain::model::{PostStats, ProjectionOutcome, ProjectionResult};
use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,
}

impl ApiRequest {
    pub fn get(user_id: &str) -> Self {
        Self {
            http_method: Some("GET".to_string()),
            path_parameters: Some(HashMap::from([("id".to_string(), user_id.to_string())])),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get("id"))
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    pub fn body_json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

pub fn build_response(status_code: u16, body: Value) -> ApiResponse {
    ApiResponse {
        status_code,
        headers: HashMap::from([("Content-Type".to_string(), "application/json".to_string())]),
        body: body.to_string(),
    }
}

pub fn message_response(status_code: u16, message: impl Into<String>) -> ApiResponse {
    build_response(status_code, json!({ "message": message.into() }))
}

/// Upstream problems map to 502, a missing id to 400, anything else to 500.
pub fn status_for(error: &EtlError) -> u16 {
    match error {
        EtlError::MissingUserId => 400,
        EtlError::Transport { .. } | EtlError::InvalidShape { .. } => 502,
        _ => 500,
    }
}

/// Maps a projection result straight to a response, without touching storage.
pub fn respond(user_id: &str, result: &ProjectionResult) -> ApiResponse {
    match result {
        Ok(ProjectionOutcome::Posts(posts)) => match columnar_body(posts) {
            Ok(body) => build_response(200, body),
            Err(e) => message_response(500, format!("Internal server error: {}", e)),
        },
        Ok(ProjectionOutcome::Empty) => message_response(404, no_data_message(user_id)),
        Err(e) => message_response(status_for(e), e.to_string()),
    }
}

fn columnar_body(posts: &[PostStats]) -> Result<Value> {
    Ok(serde_json::from_slice(&render_json(posts)?)?)
}

/// Stores the columnar document under the user's key and returns what the
/// storage hands back.
pub async fn store_document<S: Storage>(
    storage: &S,
    user_id: &str,
    posts: &[PostStats],
) -> Result<Value> {
    let key = json_object_key(user_id);
    storage.write_file(&key, &render_json(posts)?).await?;

    let stored = storage.read_file(&key).await?;
    Ok(serde_json::from_slice(&stored)?)
}

pub async fn handle_request<S: Storage>(
    request: &ApiRequest,
    fetcher: &PostsFetcher,
    storage: &S,
) -> ApiResponse {
    if !request
        .http_method
        .as_deref()
        .is_some_and(|method| method.eq_ignore_ascii_case("GET"))
    {
        return message_response(400, "Bad request: Only GET method is supported");
    }

    let Some(user_id) = request.user_id() else {
        return message_response(400, "Bad request: Missing user id");
    };

    let projection = project(fetcher.fetch(user_id).await);

    match &projection {
        Ok(ProjectionOutcome::Posts(posts)) => {
            match store_document(storage, user_id, posts).await {
                Ok(document) => {
                    tracing::info!("Served {} posts for user {}", posts.len(), user_id);
                    build_response(200, document)
                }
                Err(e) => {
                    tracing::error!("Error processing request: {}", e);
                    message_response(500, format!("Internal server error: {}", e))
                }
            }
        }
        _ => {
            if let Err(e) = &projection {
                tracing::warn!("Request for user {} failed: {}", user_id, e);
            }
            respond(user_id, &projection)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_respond_status_codes() {
        let ok = respond("5", &Ok(ProjectionOutcome::Posts(vec![PostStats::new(1, 2, 3)])));
        assert_eq!(ok.status_code, 200);
        assert_eq!(
            ok.body_json().unwrap(),
            json!({"Likes": [1], "Dislikes": [2], "Views": [3]})
        );

        let empty = respond("5", &Ok(ProjectionOutcome::Empty));
        assert_eq!(empty.status_code, 404);
        assert_eq!(
            empty.body_json().unwrap()["message"],
            "No data found for user 5"
        );

        assert_eq!(respond("", &Err(EtlError::MissingUserId)).status_code, 400);
        assert_eq!(respond("5", &Err(EtlError::transport("boom"))).status_code, 502);
        assert_eq!(
            respond("5", &Err(EtlError::invalid_shape("missing `posts` field"))).status_code,
            502
        );
        assert_eq!(
            respond(
                "5",
                &Err(EtlError::StorageError {
                    message: "denied".to_string()
                })
            )
            .status_code,
            500
        );
    }

    #[test]
    fn test_responses_are_json() {
        let response = message_response(400, "Bad request: Missing user id");
        assert_eq!(
            response.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(
            response.body,
            r#"{"message":"Bad request: Missing user id"}"#
        );
    }

    #[test]
    fn test_request_deserializes_api_gateway_event() {
        let request: ApiRequest = serde_json::from_value(json!({
            "httpMethod": "GET",
            "pathParameters": {"id": " 5 "},
            "headers": {"Accept": "*/*"}
        }))
        .unwrap();

        assert_eq!(request.http_method.as_deref(), Some("GET"));
        assert_eq!(request.user_id(), Some("5"));

        let no_params: ApiRequest = serde_json::from_value(json!({"httpMethod": "GET"})).unwrap();
        assert_eq!(no_params.user_id(), None);
    }

    #[test]
    fn test_response_serializes_status_code_key() {
        let value = serde_json::to_value(message_response(404, "x")).unwrap();
        assert_eq!(value["statusCode"], 404);
    }
}
