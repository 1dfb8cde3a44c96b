use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::cli_utils;
use crate::commands::errors::{HttpOperationError, format_cli_error};
use crate::config::API_PREFIX;

/// HTTP client for a running digifarm daemon.
pub struct FarmClient {
    client: Client,
    base_url: String,
}

impl FarmClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Constructs a full API URL from a path
    pub fn api_url(&self, path: &str) -> String {
        let path = path.strip_prefix('/').unwrap_or(path);
        format!("{}{}/{}", self.base_url, API_PREFIX, path)
    }

    /// Makes a GET request and handles the response
    pub async fn get<T>(&self, path: &str) -> Result<T, HttpOperationError>
    where
        T: DeserializeOwned,
    {
        let url = self.api_url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| HttpOperationError::new(&format!("GET {}", url), &e.to_string()))?;
        Self::handle_response(response, &format!("GET {}", url)).await
    }

    /// Makes a POST request with JSON body and handles the response
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, HttpOperationError>
    where
        B: serde::Serialize,
        T: DeserializeOwned,
    {
        let url = self.api_url(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| HttpOperationError::new(&format!("POST {}", url), &e.to_string()))?;
        Self::handle_response(response, &format!("POST {}", url)).await
    }

    /// Handles HTTP response, deserializing success or returning error
    async fn handle_response<T>(response: Response, operation: &str) -> Result<T, HttpOperationError>
    where
        T: DeserializeOwned,
    {
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| HttpOperationError::new(operation, &e.to_string()))
        } else {
            Err(HttpOperationError::from_response(response, operation).await)
        }
    }
}

/// Execute an HTTP operation and exit on error with formatted message
pub async fn execute_or_exit<T, F, Fut>(operation: F, context: &str) -> T
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<T, HttpOperationError>>,
{
    match operation().await {
        Ok(result) => result,
        Err(e) => cli_utils::exit_with_message(&format!("{}\n{}", context, format_cli_error(&e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_joins_prefix() {
        let client = FarmClient::new("http://localhost:8080/".to_string());
        assert_eq!(
            client.api_url("/farms"),
            "http://localhost:8080/api/farms"
        );
        assert_eq!(
            client.api_url("sensors/abc/readings"),
            "http://localhost:8080/api/sensors/abc/readings"
        );
    }
}
