//! Shared transport for whitelisted method calls.

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::envelope::decode_envelope;
use crate::error::PimApiError;
use crate::retry::Backoff;

/// HTTP client plus site root, shared by every sub-client.
#[derive(Debug, Clone)]
pub(crate) struct RpcTransport {
    http: reqwest::Client,
    base_url: Url,
    backoff: Backoff,
}

impl RpcTransport {
    pub(crate) fn new(http: reqwest::Client, base_url: Url, backoff: Backoff) -> Self {
        Self {
            http,
            base_url,
            backoff,
        }
    }

    pub(crate) fn method_url(&self, method: &str) -> String {
        format!(
            "{}/api/method/{method}",
            self.base_url.as_str().trim_end_matches('/')
        )
    }

    /// Call `POST {base}/api/method/{method}` with a JSON body.
    pub(crate) async fn call<P, T>(&self, method: &str, params: &P) -> Result<T, PimApiError>
    where
        P: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.method_url(method);
        tracing::debug!(method, "calling PIM API");

        let resp = self
            .backoff
            .send(method, || self.http.post(&url).json(params).send())
            .await
            .map_err(|e| PimApiError::Http {
                method: method.into(),
                source: e,
            })?;

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| PimApiError::Http {
            method: method.into(),
            source: e,
        })?;

        decode_envelope(method, status, &body).map_err(|e| {
            tracing::warn!(method, status, error = %e, "PIM API call failed");
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_url_handles_trailing_slash_and_subpath() {
        let t = RpcTransport::new(
            reqwest::Client::new(),
            Url::parse("http://127.0.0.1:8000").unwrap(),
            Backoff::default(),
        );
        assert_eq!(
            t.method_url("imperium_pim.api.ping"),
            "http://127.0.0.1:8000/api/method/imperium_pim.api.ping"
        );

        let t = RpcTransport::new(
            reqwest::Client::new(),
            Url::parse("https://host.example/pim/").unwrap(),
            Backoff::default(),
        );
        assert_eq!(t.method_url("x.y"), "https://host.example/pim/api/method/x.y");
    }
}
