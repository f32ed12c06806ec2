use reqwest::blocking::Client as HttpClient;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{BoxError, Error, Result};

/// Header carrying the caller's API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// A fully built request, ready for a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// First header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Sends one request and reads the whole response, whatever its status.
///
/// Only failures to obtain a response are errors here; status
/// classification happens in [`Client`].
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> std::result::Result<HttpResponse, BoxError>;
}

impl Transport for HttpClient {
    fn send(&self, request: &HttpRequest) -> std::result::Result<HttpResponse, BoxError> {
        let mut req = self.request(request.method.clone(), &request.url);
        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            req = req.body(body.clone());
        }

        let resp = req.send()?;
        let status = resp.status();
        let body = resp.bytes()?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest) -> std::result::Result<HttpResponse, BoxError> {
        (**self).send(request)
    }
}

/// Client for the catalog API.
///
/// Built once per command from [`Config`]; its base URL and key never change
/// afterwards.
#[derive(Debug, Clone)]
pub struct Client<T = HttpClient> {
    base_url: String,
    api_key: String,
    transport: T,
}

impl Client {
    /// Creates a client backed by a blocking reqwest client.
    ///
    /// No request timeout is set beyond reqwest's own default.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("naturedopes-cli/{}", env!("CARGO_PKG_VERSION")))
                .unwrap_or(HeaderValue::from_static("naturedopes-cli")),
        );

        let base_url = base_url.into();
        let http = HttpClient::builder()
            .default_headers(default_headers)
            .build()
            .map_err(|e| Error::Transport {
                url: base_url.clone(),
                source: Box::new(e),
            })?;

        Ok(Self::with_transport(base_url, api_key, http))
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::new(cfg.api_url.clone(), cfg.api_key.clone())
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        transport: T,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Sends `method` to `base_url + path` and returns the raw response body.
    ///
    /// `path` must already carry any query string. A non-empty `body` is sent
    /// as JSON. Statuses of 400 and above become [`Error::Api`].
    pub(crate) fn execute(&self, method: Method, path: &str, body: Option<&[u8]>) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);

        let mut headers = Vec::new();
        let body = body.filter(|b| !b.is_empty()).map(<[u8]>::to_vec);
        if body.is_some() {
            headers.push((CONTENT_TYPE.as_str().to_string(), "application/json".to_string()));
        }
        if self.has_api_key() {
            headers.push((API_KEY_HEADER.to_string(), self.api_key.clone()));
        }

        tracing::debug!(
            %method,
            %url,
            has_body = body.is_some(),
            authenticated = self.has_api_key(),
            "sending request"
        );

        let request = HttpRequest {
            method,
            url,
            headers,
            body,
        };
        let resp = self
            .transport
            .send(&request)
            .map_err(|source| Error::Transport {
                url: request.url.clone(),
                source,
            })?;

        tracing::debug!(status = %resp.status, bytes = resp.body.len(), "received response");

        if resp.status.as_u16() >= 400 {
            return Err(Error::Api {
                status: resp.status,
                body: String::from_utf8_lossy(&resp.body).into_owned(),
            });
        }
        Ok(resp.body)
    }

    /// [`Client::execute`] followed by decoding the body as JSON.
    pub(crate) fn execute_json<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&[u8]>,
        what: &str,
    ) -> Result<R> {
        let bytes = self.execute(method, path, body)?;
        serde_json::from_slice(&bytes).map_err(|e| Error::decode(what, e))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Records every request and replays queued responses in order.
    #[derive(Default)]
    pub(crate) struct StubTransport {
        pub(crate) requests: RefCell<Vec<HttpRequest>>,
        responses: RefCell<VecDeque<std::result::Result<HttpResponse, String>>>,
    }

    impl StubTransport {
        pub(crate) fn respond(self, status: u16, body: &str) -> Self {
            self.responses.borrow_mut().push_back(Ok(HttpResponse {
                status: StatusCode::from_u16(status).unwrap(),
                body: body.as_bytes().to_vec(),
            }));
            self
        }

        pub(crate) fn fail(self, message: &str) -> Self {
            self.responses
                .borrow_mut()
                .push_back(Err(message.to_string()));
            self
        }

        pub(crate) fn last_request(&self) -> HttpRequest {
            self.requests
                .borrow()
                .last()
                .cloned()
                .expect("no request was sent")
        }
    }

    impl Transport for StubTransport {
        fn send(&self, request: &HttpRequest) -> std::result::Result<HttpResponse, BoxError> {
            self.requests.borrow_mut().push(request.clone());
            match self.responses.borrow_mut().pop_front() {
                Some(Ok(resp)) => Ok(resp),
                Some(Err(msg)) => Err(msg.into()),
                None => Err("stub has no response queued".into()),
            }
        }
    }
}
