// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::time::Duration;

use reqwest::Client;
use reqwest::RequestBuilder;
use reqwest::header::ACCEPT;
use reqwest::header::AUTHORIZATION;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use slog::debug;

use super::*;

pub const DEFAULT_ENV: &str = "sandbox";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// The value a token holds when nobody has filled it in.
pub const TOKEN_PLACEHOLDER: &str = "<TOKEN>";

const ACCEPT_VALUE: &str = "text/plain, application/json";

/// `https://{env}.tflapis.com`
pub fn base_url_for_env(env: &str) -> String {
    format!("https://{}.tflapis.com", env.trim())
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn for_env(env: &str, token: String) -> Self {
        Self {
            base_url: base_url_for_env(env),
            token,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// The reqwest-backed transport. Every request carries the bearer token and
/// accepts both `text/plain` and `application/json`.
pub struct HttpClient {
    log: Logger,
    base_url: String,
    client: Client,
}

impl HttpClient {
    pub fn new(log: Logger, config: ClientConfig) -> Result<Self, Error> {
        let token = config.token.trim();

        if token.is_empty() || token == TOKEN_PLACEHOLDER {
            return Err(Error::Config(String::from(
                "Set TOKEN env var (export TOKEN=<TOKEN>)",
            )));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| Error::Config(format!("invalid bearer token: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                Error::Config(format!("building HTTP client failed: {e}"))
            })?;

        let base_url = config.base_url.trim_end_matches('/').to_string();

        debug!(log, "created client"; "base_url" => &base_url);

        Ok(Self { log, base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        method: &'static str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Value, Error> {
        let response = request.send().await?;
        let status = response.status();

        debug!(
            self.log,
            "response";
            "method" => method,
            "path" => path,
            "status" => status.as_u16()
        );

        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl ApiTransport for HttpClient {
    async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, Error> {
        let request = self.client.get(self.url(path)).query(query);
        self.send("GET", path, request).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, Error> {
        let request = self.client.post(self.url(path)).json(body);
        self.send("POST", path, request).await
    }
}
