use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::config::AppConfig;
use crate::session::SessionStore;

/// The one failure shape every view handles: a non-success status or a
/// transport error. No retries, no timeout policy; originating view state is
/// left for the caller to preserve.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{}", request_failed_display(.status, .message))]
    RequestFailed { status: u16, message: Option<String> },
}

fn request_failed_display(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => format!("request failed with status {status}: {message}"),
        None => format!("request failed with status {status}"),
    }
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport(_) => None,
            ApiError::RequestFailed { status, .. } => Some(*status),
        }
    }
}

/// Thin client over the remote API. Attaches the session's bearer credential
/// to every request; the sole network boundary of the app.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: &AppConfig, session: SessionStore) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut req = self.http.request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn check(res: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let message = res.text().await.ok().filter(|body| !body.is_empty());
        warn!(status = status.as_u16(), "api request failed");
        Err(ApiError::RequestFailed {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let res = self.request(Method::GET, path).send().await?;
        Ok(Self::check(res).await?.json().await?)
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let res = self.request(Method::POST, path).json(body).send().await?;
        Self::check(res).await?;
        Ok(())
    }

    /// POST where the decoded response matters (login is the one caller).
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let res = self.request(Method::POST, path).json(body).send().await?;
        Ok(Self::check(res).await?.json().await?)
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let res = self.request(Method::PUT, path).json(body).send().await?;
        Self::check(res).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let res = self.request(Method::DELETE, path).send().await?;
        Self::check(res).await?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::session::test_support::{sample_user, unauthenticated_store};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Accepts one connection, answers `{}`, and reports the request's
    /// Authorization header, if any.
    async fn serve_one(listener: &TcpListener) -> Option<String> {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            request.extend_from_slice(&chunk[..n]);
            if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\n\
                  content-type: application/json\r\n\
                  content-length: 2\r\n\
                  connection: close\r\n\r\n{}",
            )
            .await
            .unwrap();

        String::from_utf8_lossy(&request).lines().find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("authorization")
                .then(|| value.trim().to_string())
        })
    }

    #[tokio::test]
    async fn bearer_credential_is_attached_exactly_when_signed_in() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let session = unauthenticated_store();
        let api = client_for(&format!("http://{addr}"), session.clone());

        let server = tokio::spawn(async move {
            let anonymous = serve_one(&listener).await;
            let signed_in = serve_one(&listener).await;
            (anonymous, signed_in)
        });

        let _: serde_json::Value = api.get("/products").await.unwrap();
        session.login("token-abc".into(), sample_user("customer"));
        let _: serde_json::Value = api.get("/products").await.unwrap();

        let (anonymous, signed_in) = server.await.unwrap();
        assert_eq!(anonymous, None);
        assert_eq!(signed_in.as_deref(), Some("Bearer token-abc"));
    }

    #[test]
    fn request_failed_display_includes_status_and_message() {
        let err = ApiError::RequestFailed {
            status: 409,
            message: Some("insufficient stock".into()),
        };
        assert_eq!(
            err.to_string(),
            "request failed with status 409: insufficient stock"
        );
        assert_eq!(err.status(), Some(409));

        let bare = ApiError::RequestFailed {
            status: 500,
            message: None,
        };
        assert_eq!(bare.to_string(), "request failed with status 500");
    }

    #[tokio::test]
    async fn transport_failure_maps_to_api_error_without_status() {
        let api = anonymous_unreachable_client();
        let err = api.get::<serde_json::Value>("/products").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(err.status(), None);
    }
}
