use crate::browser::BrowserLauncher;
use crate::config::{ApiConfig, AUTHORIZE_READ_TIMEOUT, AUTHORIZE_TIMEOUT};
use crate::error::ApiError;
use crate::sparse::to_sparse_value;
use reqwest::header::{LOCATION, USER_AGENT};
use reqwest::{multipart, redirect, Client, RequestBuilder, Response};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const AUTHORIZE_ENDPOINT: &str = "/live/auth0/authorize";
pub const AUTHORIZE_READ_ENDPOINT: &str = "/live/auth0/read";

/// Form fields plus one binary attachment.
#[derive(Debug, Clone)]
pub struct MultipartUpload {
    pub fields: Vec<(String, String)>,
    pub file_field: String,
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Signs and sends API requests.
///
/// Each call builds its own `reqwest::Client` with pooling disabled, so no
/// connection outlives the call that opened it.
#[derive(Clone)]
pub struct ApiClient {
    config: Arc<ApiConfig>,
}

impl ApiClient {
    pub fn new(config: Arc<ApiConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub async fn post<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: Option<&T>,
    ) -> Result<Value, ApiError> {
        self.post_with_timeout(endpoint, payload, self.config.timeout)
            .await
    }

    /// Posts `{}`.
    pub async fn post_empty(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.post::<Value>(endpoint, None).await
    }

    pub async fn post_with_timeout<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: Option<&T>,
        timeout: Duration,
    ) -> Result<Value, ApiError> {
        let body = encode_body(payload)?;
        let client = build_client(timeout, redirect::Policy::default())?;
        let request = self.signed(client.post(self.config.url(endpoint))).json(&body);

        let response = send(request, endpoint, timeout).await?;
        read_json(endpoint, timeout, response).await
    }

    pub async fn post_multipart(
        &self,
        endpoint: &str,
        upload: MultipartUpload,
    ) -> Result<Value, ApiError> {
        let timeout = self.config.timeout;

        let mut form = multipart::Form::new();
        for (name, value) in upload.fields {
            form = form.text(name, value);
        }
        let part = multipart::Part::bytes(upload.data).file_name(upload.file_name);
        form = form.part(upload.file_field, part);

        let client = build_client(timeout, redirect::Policy::default())?;
        let request = self
            .signed(client.post(self.config.url(endpoint)))
            .multipart(form);

        let response = send(request, endpoint, timeout).await?;
        read_json(endpoint, timeout, response).await
    }

    /// Posts without following redirects and returns the `Location` target.
    pub async fn authorize_redirect<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &T,
        timeout: Duration,
    ) -> Result<String, ApiError> {
        let body = encode_body(Some(payload))?;
        let client = build_client(timeout, redirect::Policy::none())?;
        let request = self.signed(client.post(self.config.url(endpoint))).json(&body);

        let response = send(request, endpoint, timeout).await?;
        let response = check_status(endpoint, response).await?;

        response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| ApiError::MissingRedirect(endpoint.to_string()))
    }

    /// Brokerage / data-provider authorization.
    ///
    /// The user completes the flow in a browser, so the redirect target is
    /// handed to `browser` and a second, long-running read waits for the
    /// outcome.
    pub async fn authorize_external_connection<T: Serialize + ?Sized>(
        &self,
        payload: &T,
        browser: &dyn BrowserLauncher,
    ) -> Result<Value, ApiError> {
        let redirect_url = self
            .authorize_redirect(AUTHORIZE_ENDPOINT, payload, AUTHORIZE_TIMEOUT)
            .await?;

        info!(url = %redirect_url, "Opening browser to authorize external connection");
        if let Err(e) = browser.open(&redirect_url) {
            warn!(
                "Failed to open browser: {}. Visit {} to continue",
                e, redirect_url
            );
        }

        self.post_with_timeout(
            AUTHORIZE_READ_ENDPOINT,
            Some(payload),
            AUTHORIZE_READ_TIMEOUT,
        )
        .await
    }

    /// Unsigned GET against a third-party URL.
    pub async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, ApiError> {
        let timeout = self.config.timeout;
        let client = build_client(timeout, redirect::Policy::default())?;
        let request = client
            .get(url)
            .query(query)
            .header(USER_AGENT, self.config.user_agent.as_str());

        let response = send(request, url, timeout).await?;
        read_json(url, timeout, response).await
    }

    fn signed(&self, request: RequestBuilder) -> RequestBuilder {
        let headers = self.config.signer().sign();
        headers
            .pairs()
            .into_iter()
            .fold(request, |request, (name, value)| request.header(name, value))
    }
}

fn encode_body<T: Serialize + ?Sized>(payload: Option<&T>) -> Result<Value, ApiError> {
    let Some(payload) = payload else {
        return Ok(json!({}));
    };

    match to_sparse_value(payload) {
        Ok(Value::Null) => Ok(json!({})),
        Ok(body) => Ok(body),
        Err(e) => Err(ApiError::InvalidPayload(e.to_string())),
    }
}

fn build_client(timeout: Duration, redirect: redirect::Policy) -> Result<Client, ApiError> {
    Client::builder()
        .timeout(timeout)
        .redirect(redirect)
        .pool_max_idle_per_host(0)
        .build()
        .map_err(|e| ApiError::Request(e.to_string()))
}

async fn send(
    request: RequestBuilder,
    endpoint: &str,
    timeout: Duration,
) -> Result<Response, ApiError> {
    request
        .send()
        .await
        .map_err(|e| transport_error(endpoint, timeout, e))
}

fn transport_error(endpoint: &str, timeout: Duration, err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout {
            endpoint: endpoint.to_string(),
            timeout,
        }
    } else {
        ApiError::Request(err.to_string())
    }
}

async fn check_status(endpoint: &str, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    debug!(endpoint, status = status.as_u16(), "API response");

    if status.is_client_error() || status.is_server_error() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    Ok(response)
}

async fn read_json(endpoint: &str, timeout: Duration, response: Response) -> Result<Value, ApiError> {
    let response = check_status(endpoint, response).await?;
    response.json::<Value>().await.map_err(|e| {
        if e.is_timeout() {
            transport_error(endpoint, timeout, e)
        } else {
            ApiError::Decode(e.to_string())
        }
    })
}
