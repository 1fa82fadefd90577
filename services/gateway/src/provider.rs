//! Upstream number provider
//!
//! The provider is the only I/O the request path performs. It is called
//! before any window lock is taken, and every failure comes back as a typed
//! `ProviderError` instead of an empty list.

use async_trait::async_trait;
use numbers_types::category::CategoryKey;
use numbers_types::errors::ProviderError;
use numbers_types::wire::ProviderPayload;
use reqwest::Client;
use std::collections::BTreeMap;
use std::time::Duration;

#[async_trait]
pub trait NumberProvider: Send + Sync {
    /// Retrieve the next batch of numbers for `category`.
    async fn fetch(&self, category: &CategoryKey) -> Result<Vec<i64>, ProviderError>;
}

/// Provider backed by per-category HTTP endpoints returning `{"numbers": [...]}`.
pub struct HttpNumberProvider {
    http_client: Client,
    endpoints: BTreeMap<CategoryKey, String>,
    token: Option<String>,
    timeout: Duration,
}

impl HttpNumberProvider {
    pub fn new(
        endpoints: BTreeMap<CategoryKey, String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            endpoints,
            token,
            timeout,
        })
    }

    fn map_transport_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            ProviderError::Unavailable {
                reason: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl NumberProvider for HttpNumberProvider {
    async fn fetch(&self, category: &CategoryKey) -> Result<Vec<i64>, ProviderError> {
        let url = self
            .endpoints
            .get(category)
            .ok_or_else(|| ProviderError::UnknownCategory {
                category: category.to_string(),
            })?;

        let mut request = self.http_client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let res = request
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = res.status();
        if !status.is_success() {
            tracing::warn!(%category, %url, status = status.as_u16(), "Provider rejected request");
            return Err(ProviderError::Status {
                status: status.as_u16(),
            });
        }

        let payload = res.json::<ProviderPayload>().await.map_err(|e| {
            // A malformed body is not a transport failure
            if e.is_decode() {
                ProviderError::Decode {
                    reason: e.to_string(),
                }
            } else {
                self.map_transport_error(e)
            }
        })?;

        tracing::debug!(%category, count = payload.numbers.len(), "Fetched numbers");
        Ok(payload.numbers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode, http::HeaderMap, routing::get};
    use tokio::net::TcpListener;

    fn key(k: &str) -> CategoryKey {
        CategoryKey::try_new(k).unwrap()
    }

    /// Serve a stub provider on an ephemeral port and return its base URL.
    async fn spawn_upstream() -> String {
        let app = Router::new()
            .route("/primes", get(|| async { r#"{"numbers":[2,3,5,7,11]}"# }))
            .route(
                "/secure",
                get(|headers: HeaderMap| async move {
                    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
                        Some("Bearer s3cr3t") => (StatusCode::OK, r#"{"numbers":[42]}"#),
                        _ => (
                            StatusCode::UNAUTHORIZED,
                            r#"{"message":"Invalid authorization token"}"#,
                        ),
                    }
                }),
            )
            .route("/garbage", get(|| async { "not json" }))
            .route(
                "/rejected",
                get(|| async { r#"{"message":"Invalid authorization token"}"# }),
            )
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(2)).await;
                    r#"{"numbers":[1]}"#
                }),
            );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn provider(base: &str, token: Option<&str>, timeout: Duration) -> HttpNumberProvider {
        let endpoints = ["primes", "secure", "garbage", "rejected", "slow"]
            .into_iter()
            .map(|path| (key(path), format!("{base}/{path}")))
            .chain([(key("down"), "http://127.0.0.1:1/down".to_string())])
            .collect();
        HttpNumberProvider::new(endpoints, token.map(str::to_string), timeout).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_decodes_numbers() {
        let base = spawn_upstream().await;
        let p = provider(&base, None, Duration::from_secs(1));
        assert_eq!(p.fetch(&key("primes")).await.unwrap(), vec![2, 3, 5, 7, 11]);
    }

    #[tokio::test]
    async fn test_fetch_sends_bearer_token() {
        let base = spawn_upstream().await;

        let p = provider(&base, Some("s3cr3t"), Duration::from_secs(1));
        assert_eq!(p.fetch(&key("secure")).await.unwrap(), vec![42]);

        let p = provider(&base, None, Duration::from_secs(1));
        assert_eq!(
            p.fetch(&key("secure")).await,
            Err(ProviderError::Status { status: 401 })
        );
    }

    #[tokio::test]
    async fn test_fetch_reports_decode_error() {
        let base = spawn_upstream().await;
        let p = provider(&base, None, Duration::from_secs(1));
        assert!(matches!(
            p.fetch(&key("garbage")).await,
            Err(ProviderError::Decode { .. })
        ));

        // Valid JSON without a `numbers` field is still a decode failure
        assert!(matches!(
            p.fetch(&key("rejected")).await,
            Err(ProviderError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let base = spawn_upstream().await;
        let p = provider(&base, None, Duration::from_millis(100));
        assert_eq!(
            p.fetch(&key("slow")).await,
            Err(ProviderError::Timeout { timeout_ms: 100 })
        );
    }

    #[tokio::test]
    async fn test_fetch_reports_unreachable_provider() {
        let base = spawn_upstream().await;
        let p = provider(&base, None, Duration::from_secs(1));
        assert!(matches!(
            p.fetch(&key("down")).await,
            Err(ProviderError::Unavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_unknown_category() {
        let base = spawn_upstream().await;
        let p = provider(&base, None, Duration::from_secs(1));
        assert_eq!(
            p.fetch(&key("z")).await,
            Err(ProviderError::UnknownCategory {
                category: "z".to_string()
            })
        );
    }
}
