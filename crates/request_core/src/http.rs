//! Requester adapter over a JSON HTTP endpoint.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    error::{ErrorBody, RequestFailure},
    protocol::ResponseEnvelope,
};

use crate::Requester;

/// Sends controller params to a fixed JSON endpoint: GET encodes them as a
/// query string, POST as a JSON body. Success bodies must parse as a
/// [`ResponseEnvelope`]; error bodies are parsed best-effort into an
/// [`ErrorBody`].
pub struct JsonRequester {
    http: Client,
    method: Method,
    url: String,
}

impl JsonRequester {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            method: Method::GET,
            url: url.into(),
        }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            method: Method::POST,
            url: url.into(),
        }
    }

    /// Reuses an existing client, e.g. one shared across controllers.
    pub fn with_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }
}

#[async_trait]
impl<P, T> Requester<P, T> for JsonRequester
where
    P: Serialize + Send + Sync + 'static,
    T: DeserializeOwned + Send + 'static,
{
    async fn send(&self, params: P) -> Result<ResponseEnvelope<T>, RequestFailure> {
        let request = if self.method == Method::GET {
            self.http.get(&self.url).query(&params)
        } else {
            self.http
                .request(self.method.clone(), &self.url)
                .json(&params)
        };

        let response = request
            .send()
            .await
            .map_err(|err| RequestFailure::transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ErrorBody>().await.unwrap_or_default();
            return Err(RequestFailure::api(status.as_u16(), body));
        }

        response
            .json::<ResponseEnvelope<T>>()
            .await
            .map_err(|err| RequestFailure::transport(err.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/http_tests.rs"]
mod tests;
