/*
 * SPDX-FileCopyrightText: Copyright (c) 2023 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: MIT
 *
 * Permission is hereby granted, free of charge, to any person obtaining a
 * copy of this software and associated documentation files (the "Software"),
 * to deal in the Software without restriction, including without limitation
 * the rights to use, copy, modify, merge, publish, distribute, sublicense,
 * and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in
 * all copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL
 * THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
 * FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
 * DEALINGS IN THE SOFTWARE.
 */
use std::{cell::RefCell, fmt, time::Duration};

use reqwest::{
    blocking::Client as HttpClient, blocking::ClientBuilder as HttpClientBuilder,
    blocking::RequestBuilder, header::HeaderValue, header::ACCEPT, header::CONTENT_TYPE, Method,
    StatusCode,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

pub use crate::RedfishError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8182/api/redfish/v1";
pub const DEFAULT_AUTH_URL: &str = "http://localhost:8182/api/v1/authorize";
pub const DEFAULT_USERNAME: &str = "standalone";

/// How bearer tokens are obtained for each request
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CredentialPolicy {
    /// Log in again before every request. Nothing is kept between calls.
    #[default]
    PerRequest,
    /// Log in once and keep the token. A 401 drops it and the request is retried once.
    Reuse,
}

#[derive(Debug)]
pub struct RedfishClientBuilder {
    timeout: Option<Duration>,
    accept_invalid_certs: bool,
    credential_policy: CredentialPolicy,
}

impl RedfishClientBuilder {
    /// Prevents the client from accepting self signed certificates
    /// and other invalid certificates.
    ///
    /// By default self signed certificates will be accepted, since BMCs usually
    /// use those.
    pub fn reject_invalid_certs(mut self) -> RedfishClientBuilder {
        self.accept_invalid_certs = false;
        self
    }

    /// Applies a timeout to every request. Without it the HTTP client default is used.
    pub fn timeout(mut self, timeout: Duration) -> RedfishClientBuilder {
        self.timeout = Some(timeout);
        self
    }

    pub fn credential_policy(mut self, policy: CredentialPolicy) -> RedfishClientBuilder {
        self.credential_policy = policy;
        self
    }

    /// Builds a client for a single Redfish service
    pub fn build(self, endpoint: Endpoint) -> Result<RedfishHttpClient, RedfishError> {
        let mut builder =
            HttpClientBuilder::new().danger_accept_invalid_certs(self.accept_invalid_certs);
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        let http_client = builder.build().map_err(RedfishError::ClientBuild)?;
        Ok(RedfishHttpClient::new(
            http_client,
            endpoint,
            self.credential_policy,
        ))
    }
}

/// The service that the validator talks to
#[derive(Debug)]
pub struct Endpoint {
    /// Redfish root, e.g. http://localhost:8182/api/redfish/v1
    pub base_url: String,
    /// Login URL that hands out bearer tokens
    pub auth_url: String,
    pub user: String,
    pub password: SecretString,
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

/// Status and body of a request, uninterpreted
#[derive(Debug, Clone)]
pub struct RedfishResponse {
    pub url: String,
    pub status: StatusCode,
    pub body: String,
}

impl RedfishResponse {
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn json<T>(&self) -> Result<T, RedfishError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(&self.body).map_err(|e| RedfishError::JsonDeserializeError {
            url: self.url.clone(),
            body: self.body.clone(),
            source: e,
        })
    }
}

/// A HTTP client which targets a single Redfish service
pub struct RedfishHttpClient {
    endpoint: Endpoint,
    http_client: HttpClient,
    credential_policy: CredentialPolicy,
    token: RefCell<Option<SecretString>>,
}

impl RedfishHttpClient {
    pub fn builder() -> RedfishClientBuilder {
        RedfishClientBuilder {
            timeout: None,
            // BMCs often have a self-signed cert, so usually this has to be true
            accept_invalid_certs: true,
            credential_policy: CredentialPolicy::default(),
        }
    }

    pub fn new(
        http_client: HttpClient,
        endpoint: Endpoint,
        credential_policy: CredentialPolicy,
    ) -> Self {
        Self {
            endpoint,
            http_client,
            credential_policy,
            token: RefCell::new(None),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Logs in and returns a fresh bearer token.
    /// Anything other than 200 OK is an AuthenticationFailed error.
    pub fn authorize(&self) -> Result<SecretString, RedfishError> {
        let url = self.endpoint.auth_url.clone();
        let body = serde_json::to_string(&Credentials {
            username: &self.endpoint.user,
            password: self.endpoint.password.expose_secret(),
        })
        .map_err(|e| RedfishError::JsonSerializeError {
            url: url.clone(),
            object_debug: format!("credentials for {}", self.endpoint.user),
            source: e,
        })?;
        debug!("TX POST {} credentials for {}", url, self.endpoint.user);

        let response = self
            .http_client
            .post(&url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .send()
            .map_err(|e| RedfishError::NetworkError {
                url: url.clone(),
                source: e,
            })?;
        let status_code = response.status();
        debug!("RX {status_code}");
        if status_code != StatusCode::OK {
            return Err(RedfishError::AuthenticationFailed { url, status_code });
        }
        let response_body = response.text().map_err(|e| RedfishError::NetworkError {
            url: url.clone(),
            source: e,
        })?;
        let v: serde_json::Value = serde_json::from_str(&response_body).map_err(|e| {
            RedfishError::JsonDeserializeError {
                url: url.clone(),
                body: response_body.clone(),
                source: e,
            }
        })?;
        match v.get("token").and_then(|t| t.as_str()) {
            Some(token) => Ok(SecretString::from(token.to_string())),
            None => Err(RedfishError::MissingKey {
                key: "token".to_string(),
                url,
            }),
        }
    }

    pub fn get(&self, api: &str) -> Result<RedfishResponse, RedfishError> {
        self.req::<()>(Method::GET, api, None)
    }

    pub fn post<B>(&self, api: &str, data: B) -> Result<RedfishResponse, RedfishError>
    where
        B: Serialize + fmt::Debug,
    {
        self.req(Method::POST, api, Some(data))
    }

    // All the HTTP requests to the Redfish tree happen from here.
    // The status code is handed back as is; callers decide what it means.
    pub fn req<B>(
        &self,
        method: Method,
        api: &str,
        body: Option<B>,
    ) -> Result<RedfishResponse, RedfishError>
    where
        B: Serialize + fmt::Debug,
    {
        if method != Method::GET && method != Method::POST {
            return Err(RedfishError::UnsupportedMethod(method));
        }
        let url = format!("{}{}", self.endpoint.base_url.trim_end_matches('/'), api);
        let body_enc = match body {
            Some(b) => {
                let body_enc =
                    serde_json::to_string(&b).map_err(|e| RedfishError::JsonSerializeError {
                        url: url.clone(),
                        object_debug: format!("{b:?}"),
                        source: e,
                    })?;
                Some(body_enc)
            }
            None => None,
        };
        debug!(
            "TX {} {} {}",
            method,
            url,
            body_enc.as_deref().unwrap_or_default()
        );

        let (response, cached) = self.send(&method, &url, body_enc.as_deref())?;
        // A token fresh from login that gets a 401 would only be rejected again
        if response.status == StatusCode::UNAUTHORIZED && cached {
            warn!("Cached token rejected at {url}, logging in again");
            self.token.borrow_mut().take();
            let (response, _) = self.send(&method, &url, body_enc.as_deref())?;
            return Ok(response);
        }
        Ok(response)
    }

    fn send(
        &self,
        method: &Method,
        url: &str,
        body: Option<&str>,
    ) -> Result<(RedfishResponse, bool), RedfishError> {
        let (req_b, cached) = self.with_token(|token| {
            let mut req_b = if *method == Method::POST {
                self.http_client.post(url)
            } else {
                self.http_client.get(url)
            };
            req_b = req_b
                .bearer_auth(token)
                .header(ACCEPT, HeaderValue::from_static("application/json"))
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            if let Some(b) = body {
                req_b = req_b.body(b.to_string());
            }
            req_b
        })?;
        let response = req_b.send().map_err(|e| RedfishError::NetworkError {
            url: url.to_string(),
            source: e,
        })?;
        let status = response.status();
        // read the body even if not status 2XX, because servers give useful error messages as JSON
        let response_body = response.text().map_err(|e| RedfishError::NetworkError {
            url: url.to_string(),
            source: e,
        })?;
        if response_body.is_empty() {
            debug!("RX {status}");
        } else {
            debug!("RX {status} {response_body}");
        }
        let response = RedfishResponse {
            url: url.to_string(),
            status,
            body: response_body,
        };
        Ok((response, cached))
    }

    /// Builds the request with a bearer token. The flag tells whether the
    /// token came from the cache rather than a login made for this request.
    fn with_token<F>(&self, f: F) -> Result<(RequestBuilder, bool), RedfishError>
    where
        F: FnOnce(&str) -> RequestBuilder,
    {
        if self.credential_policy == CredentialPolicy::Reuse {
            if let Some(token) = self.token.borrow().as_ref() {
                return Ok((f(token.expose_secret()), true));
            }
        }
        let token = self.authorize()?;
        let req_b = f(token.expose_secret());
        if self.credential_policy == CredentialPolicy::Reuse {
            *self.token.borrow_mut() = Some(token);
        }
        Ok((req_b, false))
    }
}

#[cfg(test)]
mod test {
    use reqwest::Method;

    use super::{Endpoint, RedfishHttpClient};
    use crate::RedfishError;

    fn unreachable_client() -> RedfishHttpClient {
        let endpoint = Endpoint {
            base_url: "http://127.0.0.1:9/redfish/v1/".to_string(),
            auth_url: "http://127.0.0.1:9/authorize".to_string(),
            user: "admin".to_string(),
            password: "secret".to_string().into(),
        };
        RedfishHttpClient::builder().build(endpoint).unwrap()
    }

    #[test]
    fn test_unsupported_method() {
        let client = unreachable_client();
        for method in [Method::PUT, Method::PATCH, Method::DELETE] {
            let err = client
                .req::<()>(method.clone(), "/Systems", None)
                .unwrap_err();
            match err {
                RedfishError::UnsupportedMethod(m) => assert_eq!(m, method),
                other => panic!("unexpected error {other}"),
            }
        }
    }

    #[test]
    fn test_endpoint_debug_hides_password() {
        let client = unreachable_client();
        let debug = format!("{:?}", client.endpoint());
        assert!(debug.contains("admin"));
        assert!(!debug.contains("secret"));
    }
}
