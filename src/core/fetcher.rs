use crate::domain::model::{FetchResult, RawDocument};
use crate::utils::error::EtlError;
use reqwest::Client;

pub const DEFAULT_ENDPOINT_TEMPLATE: &str = "https://dummyjson.com/posts/user/{id}";

const ID_PLACEHOLDER: &str = "{id}";

/// Substitutes `user_id` into `endpoint_template`.
///
/// Templates without an `{id}` placeholder are treated as a base path and get
/// `/<id>` appended.
pub fn build_url(endpoint_template: &str, user_id: &str) -> String {
    if endpoint_template.contains(ID_PLACEHOLDER) {
        endpoint_template.replace(ID_PLACEHOLDER, user_id)
    } else {
        format!("{}/{}", endpoint_template.trim_end_matches('/'), user_id)
    }
}

/// Fetches the posts document of one user.
///
/// Never fails past its boundary: transport errors, non-2xx statuses and
/// unparsable bodies all come back as [`EtlError::Transport`].
pub async fn fetch(client: &Client, endpoint_template: &str, user_id: &str) -> FetchResult {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(EtlError::MissingUserId);
    }

    let url = build_url(endpoint_template, user_id);
    tracing::debug!("Making API request to: {}", url);

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(EtlError::transport)?;

    tracing::debug!("API response status: {}", response.status());

    let response = response.error_for_status().map_err(EtlError::transport)?;
    response
        .json::<RawDocument>()
        .await
        .map_err(EtlError::transport)
}

#[derive(Debug, Clone)]
pub struct PostsFetcher {
    client: Client,
    endpoint_template: String,
}

impl PostsFetcher {
    pub fn new(endpoint_template: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint_template)
    }

    pub fn with_client(client: Client, endpoint_template: impl Into<String>) -> Self {
        Self {
            client,
            endpoint_template: endpoint_template.into(),
        }
    }

    pub async fn fetch(&self, user_id: &str) -> FetchResult {
        fetch(&self.client, &self.endpoint_template, user_id).await
    }
}

impl Default for PostsFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT_TEMPLATE)
    }
}
