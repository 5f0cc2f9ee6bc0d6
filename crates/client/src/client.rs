//! HTTP client for the Mythos REST API.
//!
//! Thin wrapper over [`reqwest`] that joins paths onto the configured base
//! URL, sends JSON, and turns non-2xx responses into [`ApiError`]s carrying
//! the server's `detail` message.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{ApiError, ClientError, ResponseBody};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    default_headers: HeaderMap,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(http: reqwest::Client, config: &ClientConfig) -> Self {
        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    default_headers.insert(name, value);
                }
                _ => tracing::warn!(header = %name, "Ignoring invalid default header"),
            }
        }
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            default_headers,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path. A missing leading slash is added.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        let response = self.request(Method::GET, &url).send().await?;
        Self::parse_response(&url, response).await
    }

    /// `GET` with query parameters. `None` fields of `query` are skipped by
    /// their `skip_serializing_if` attributes.
    pub async fn get_with_query<Q, T>(&self, path: &str, query: &Q) -> Result<T, ClientError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .request(Method::GET, &self.url(path))
            .query(query)
            .build()
            .map_err(|e| ClientError::InvalidRequest(format!("could not encode query: {e}")))?;
        let url = request.url().to_string();
        let response = self.http.execute(request).await?;
        Self::parse_response(&url, response).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, path, body).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, path, body).await
    }

    /// `DELETE`, discarding whatever body comes back.
    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let url = self.url(path);
        let response = self.request(Method::DELETE, &url).send().await?;
        Self::ensure_success(&url, response).await?;
        Ok(())
    }

    /// `POST` a multipart form. `Content-Type` is left to reqwest so the
    /// boundary is set.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ClientError> {
        let url = self.url(path);
        let response = self
            .http
            .post(&url)
            .headers(self.default_headers.clone())
            .multipart(form)
            .send()
            .await?;
        Self::parse_response(&url, response).await
    }

    // ---- private helpers ----

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .headers(self.default_headers.clone())
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let payload = serde_json::to_vec(body).map_err(|e| {
            ClientError::InvalidRequest(format!("could not encode request body: {e}"))
        })?;
        let response = self.request(method, &url).body(payload).send().await?;
        Self::parse_response(&url, response).await
    }

    /// Read the body: JSON when the content type says so, text otherwise.
    /// Read and parse failures yield [`ResponseBody::Empty`].
    async fn read_body(response: Response) -> ResponseBody {
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"));

        let Ok(bytes) = response.bytes().await else {
            return ResponseBody::Empty;
        };
        if bytes.is_empty() {
            return ResponseBody::Empty;
        }
        if is_json {
            match serde_json::from_slice(&bytes) {
                Ok(value) => ResponseBody::Json(value),
                Err(_) => ResponseBody::Empty,
            }
        } else {
            ResponseBody::Text(String::from_utf8_lossy(&bytes).into_owned())
        }
    }

    /// Read the body, failing with [`ApiError`] on a non-2xx status.
    async fn ensure_success(url: &str, response: Response) -> Result<ResponseBody, ClientError> {
        let status = response.status();
        let body = Self::read_body(response).await;
        if !status.is_success() {
            let err = ApiError::new(status.as_u16(), url, body);
            tracing::debug!(status = err.status, url, message = %err.message, "API request failed");
            return Err(err.into());
        }
        Ok(body)
    }

    async fn parse_response<T: DeserializeOwned>(
        url: &str,
        response: Response,
    ) -> Result<T, ClientError> {
        let value = match Self::ensure_success(url, response).await? {
            ResponseBody::Json(value) => value,
            ResponseBody::Empty => serde_json::Value::Null,
            ResponseBody::Text(text) => serde_json::Value::String(text),
        };
        serde_json::from_value(value).map_err(|e| ClientError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joining() {
        let client = ApiClient::new(&ClientConfig::new("http://localhost:3000/api/v1/"));
        assert_eq!(client.base_url(), "http://localhost:3000/api/v1");
        assert_eq!(client.url("/users"), "http://localhost:3000/api/v1/users");
        assert_eq!(client.url("users/3"), "http://localhost:3000/api/v1/users/3");
    }

    #[test]
    fn invalid_default_header_is_skipped() {
        let config = ClientConfig::new("http://h")
            .with_header("x-trace", "abc")
            .with_header("bad header", "v");
        let client = ApiClient::new(&config);
        assert_eq!(client.default_headers.len(), 1);
        assert_eq!(client.default_headers["x-trace"], "abc");
    }
}
