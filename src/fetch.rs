//! HTTP request helper shared by every NexCRM endpoint

use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, Method, RequestBuilder, Response, StatusCode,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::Error;

/// Shape of the backend's error bodies
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Helper for building and executing HTTP requests
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: String,
    method: Method,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder
    pub fn new(client: &'a Client, url: &str, method: Method) -> Self {
        Self {
            client,
            url: url.to_string(),
            method,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, Error> {
        let json = serde_json::to_vec(body)?;
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Some(json);
        Ok(self)
    }

    fn build(&self) -> RequestBuilder {
        let mut req = self
            .client
            .request(self.method.clone(), self.url.as_str())
            .headers(self.headers.clone());

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        req
    }

    /// Execute the request and parse the response as JSON
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let response = self.execute_checked().await?;
        let result = response.json::<T>().await?;
        Ok(result)
    }

    /// Execute the request, turning non-success statuses into errors
    pub async fn execute_checked(&self) -> Result<Response, Error> {
        let response = self.execute_raw().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        tracing::warn!(method = %self.method, url = %self.url, %status, "request failed");
        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthenticated);
        }

        let text = response.text().await.unwrap_or_default();
        Err(Error::Api {
            status: status.as_u16(),
            message: error_message(status, &text),
        })
    }

    /// Execute the request and return the raw response
    pub async fn execute_raw(&self) -> Result<Response, Error> {
        tracing::debug!(method = %self.method, url = %self.url, "sending request");
        let response = self.build().send().await?;
        Ok(response)
    }
}

/// Pick the backend's `message` field when the body carries one
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP error {}", status.as_u16()))
}

/// Helper for creating HTTP requests
pub struct Fetch;

impl Fetch {
    /// Create a GET request
    pub fn get<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::GET)
    }

    /// Create a POST request
    pub fn post<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::POST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_from_body() {
        let msg = error_message(StatusCode::BAD_REQUEST, r#"{"message":"Segment name taken"}"#);
        assert_eq!(msg, "Segment name taken");
    }

    #[test]
    fn generic_message_otherwise() {
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
            "HTTP error 500"
        );
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, r#"{"message":""}"#),
            "HTTP error 404"
        );
    }
}
