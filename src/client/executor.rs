//! Request execution: encode, send, classify, decode.

use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::FirecrawlClient;
use crate::error::{FirecrawlError, classify};
use crate::transport::{HttpClient, HttpRequest};
use crate::types::DataEnvelope;

impl<H: HttpClient, S> FirecrawlClient<H, S> {
    /// Sends one authenticated request and decodes a 2xx body as `T`.
    ///
    /// The body, if any, is encoded before any I/O happens. Non-2xx
    /// responses are mapped through [`classify`]. Nothing is retried.
    ///
    /// # Errors
    ///
    /// - [`FirecrawlError::Encode`] if `body` cannot be serialized
    /// - [`FirecrawlError::Network`] for transport failures, including an
    ///   oversized response body
    /// - The classified error for non-2xx statuses
    /// - [`FirecrawlError::Decode`] if a 2xx body is not a valid `T`
    ///
    /// An empty 2xx body, such as a `204 No Content`, is decoded as `{}`.
    pub async fn execute<B, T>(
        &self,
        method: http::Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T, FirecrawlError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let mut request = HttpRequest::new(method, url).with_timeout(self.timeout);
        request.headers.clone_from(&self.headers);
        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(FirecrawlError::Encode)?;
            request = request.with_body(bytes);
        }

        let method = request.method.clone();
        let path = request.url.path().to_string();
        tracing::debug!(%method, path = %path, "Sending request");

        let response = self.http.request(request).await?;

        let status = response.status.as_u16();
        tracing::debug!(%method, path = %path, status, "Received response");

        if !response.is_success() {
            return Err(classify(response.status, &response.body));
        }

        let body: &[u8] = if response.body.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &response.body
        };
        serde_json::from_slice(body).map_err(FirecrawlError::Decode)
    }

    /// Like [`execute`](Self::execute), for endpoints that wrap their
    /// payload in `{success, data}`.
    ///
    /// # Errors
    ///
    /// Everything [`execute`](Self::execute) returns, plus
    /// [`FirecrawlError::InvalidResponse`] when the envelope reports
    /// `success: false` or carries no `data`.
    pub async fn execute_data<B, T>(
        &self,
        method: http::Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T, FirecrawlError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let envelope: DataEnvelope<T> = self.execute(method, url, body).await?;

        if !envelope.success {
            let reason = envelope
                .error
                .unwrap_or_else(|| "response reported success: false".to_string());
            return Err(FirecrawlError::InvalidResponse(reason));
        }
        if let Some(warning) = &envelope.warning {
            tracing::warn!(%warning, "Server returned a warning");
        }

        envelope
            .data
            .ok_or_else(|| FirecrawlError::InvalidResponse("response has no data".to_string()))
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, FirecrawlError> {
        self.execute::<(), T>(http::Method::GET, url, None).await
    }

    pub(crate) async fn post<B, T>(&self, url: Url, body: &B) -> Result<T, FirecrawlError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.execute(http::Method::POST, url, Some(body)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, url: Url) -> Result<T, FirecrawlError> {
        self.execute::<(), T>(http::Method::DELETE, url, None).await
    }
}
