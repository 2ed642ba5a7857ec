//! HTTP transport seam and its reqwest-backed implementation.

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use shared::protocol::{FormBody, HttpRequest, HttpResponse, Method};
use tracing::{debug, warn};
use url::Url;

use crate::error::TransportError;

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait HttpTransport {
    /// Issues `request` and resolves once the response has been read.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;

    /// Issues `request` in the background and returns immediately.
    /// Failures are logged and otherwise unobservable.
    fn dispatch(&self, request: HttpRequest);
}

pub struct ReqwestTransport {
    http: Client,
    base_url: Url,
    #[cfg(not(target_arch = "wasm32"))]
    background: std::sync::Mutex<tokio::task::JoinSet<()>>,
}

impl ReqwestTransport {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, TransportError> {
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            #[cfg(not(target_arch = "wasm32"))]
            background: std::sync::Mutex::new(tokio::task::JoinSet::new()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Waits for every request handed to `dispatch` so far.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn flush(&self) {
        let mut pending = {
            let mut guard = self
                .background
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            std::mem::take(&mut *guard)
        };
        while let Some(joined) = pending.join_next().await {
            if let Err(err) = joined {
                warn!("background request task failed: {err}");
            }
        }
    }

    async fn execute(
        http: Client,
        base_url: Url,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        let HttpRequest { method, path, body } = request;
        let url = base_url.join(&path)?;
        let mut builder = match method {
            Method::Get => http.get(url),
            Method::Post => http.post(url),
        };
        if let Some(body) = body {
            builder = builder
                .header(CONTENT_TYPE, FormBody::CONTENT_TYPE)
                .body(body.into_string());
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                path,
            });
        }
        let body = response.text().await?;
        debug!(%method, path = %path, status = status.as_u16(), "request completed");
        Ok(HttpResponse {
            status: status.as_u16(),
            body,
        })
    }

    fn background_request(
        &self,
        request: HttpRequest,
    ) -> impl std::future::Future<Output = ()> + 'static {
        let http = self.http.clone();
        let base_url = self.base_url.clone();
        async move {
            let label = request.to_string();
            if let Err(err) = Self::execute(http, base_url, request).await {
                warn!(request = %label, "background request failed: {err}");
            }
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Self::execute(self.http.clone(), self.base_url.clone(), request).await
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn dispatch(&self, request: HttpRequest) {
        let task = self.background_request(request);
        self.background
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .spawn(task);
    }

    #[cfg(target_arch = "wasm32")]
    fn dispatch(&self, request: HttpRequest) {
        wasm_bindgen_futures::spawn_local(self.background_request(request));
    }
}
