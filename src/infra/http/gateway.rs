use std::time::Duration;

use async_trait::async_trait;
use noticeboard_api_types::{CreatePostRequest, LoginRequest, MessageBody};
use reqwest::{
    Client, Method, RequestBuilder, StatusCode, Url,
    header::{ACCEPT, AUTHORIZATION},
};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::application::gateway::{Gateway, GatewayError, LoginGrant};
use crate::domain::posts::{Post, PostDraft};
use crate::domain::role::PostFeed;
use crate::domain::session::{BearerToken, Credentials};
use crate::infra::error::InfraError;

const LOGIN_PATH: &str = "api/login";
const CREATE_POST_PATH: &str = "api/teacher/create_post";
const DELETE_POST_PATH: &str = "api/admin/delete_post";

/// reqwest-backed [`Gateway`]. Endpoint paths are joined onto `base`, which
/// must end with `/` for a path prefix to be kept.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: Client,
    base: Url,
}

impl HttpGateway {
    pub fn new(base: Url, timeout: Option<Duration>) -> Result<Self, InfraError> {
        let mut builder = Client::builder().user_agent(Self::user_agent());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| InfraError::http_client(err.to_string()))?;
        Ok(Self { client, base })
    }

    pub fn user_agent() -> &'static str {
        concat!("noticeboard/", env!("CARGO_PKG_VERSION"))
    }

    fn url(&self, path: &str) -> Result<Url, GatewayError> {
        self.base
            .join(path)
            .map_err(|err| GatewayError::transport(format!("invalid endpoint `{path}`: {err}")))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, GatewayError> {
        let url = self.url(path)?;
        Ok(self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json"))
    }

    fn authorized(
        &self,
        method: Method,
        path: &str,
        token: &BearerToken,
    ) -> Result<RequestBuilder, GatewayError> {
        Ok(self
            .request(method, path)?
            .header(AUTHORIZATION, token.header_value()))
    }

    /// Send and return the body of a 2xx response. Non-2xx answers become
    /// [`GatewayError::Rejected`]; anything that stops a response arriving is
    /// [`GatewayError::Transport`].
    async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, GatewayError> {
        let response = request
            .send()
            .await
            .map_err(|err| GatewayError::transport(err.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| GatewayError::transport(err.to_string()))?;

        debug!(
            target = "noticeboard::http",
            status = status.as_u16(),
            body_len = bytes.len(),
            "response received"
        );

        if !status.is_success() {
            return Err(rejection(status, &bytes));
        }
        Ok(bytes.to_vec())
    }
}

fn rejection(status: StatusCode, body: &[u8]) -> GatewayError {
    let message = serde_json::from_slice::<MessageBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));
    GatewayError::rejected(status.as_u16(), message)
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, GatewayError> {
    serde_json::from_slice(bytes).map_err(|err| GatewayError::decode(err.to_string()))
}

#[async_trait]
impl Gateway for HttpGateway {
    #[instrument(skip_all, fields(email = %credentials.email))]
    async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, GatewayError> {
        let payload = LoginRequest {
            email: credentials.email.clone(),
            password: credentials.password.clone(),
        };
        let request = self.request(Method::POST, LOGIN_PATH)?.json(&payload);
        let body = self.execute(request).await?;
        decode(&body)
    }

    #[instrument(skip_all, fields(class_id = draft.class_id))]
    async fn create_post(
        &self,
        token: &BearerToken,
        draft: &PostDraft,
    ) -> Result<(), GatewayError> {
        let payload = CreatePostRequest {
            title: draft.title.clone(),
            content: draft.content.clone(),
            class_id: draft.class_id,
        };
        let request = self
            .authorized(Method::POST, CREATE_POST_PATH, token)?
            .json(&payload);
        self.execute(request).await?;
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn delete_post(&self, token: &BearerToken, post_id: i64) -> Result<(), GatewayError> {
        let path = format!("{DELETE_POST_PATH}/{post_id}");
        let request = self.authorized(Method::DELETE, &path, token)?;
        self.execute(request).await?;
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn fetch_posts(
        &self,
        token: &BearerToken,
        feed: PostFeed,
    ) -> Result<Vec<Post>, GatewayError> {
        let request = self.authorized(Method::GET, feed.path(), token)?;
        let body = self.execute(request).await?;
        decode(&body)
    }
}
