use async_trait::async_trait;
use historian_core::RequestContext;
use historian_protocol::frame::Frame;
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use crate::query::HistoryQuery;

/// Boundary to the historian query engine.
///
/// Implementations execute the query and hand back the raw frame. They must
/// not retry; the handler surfaces any error straight to the caller.
#[async_trait]
pub trait Historian: Send + Sync {
    async fn query(&self, ctx: &RequestContext, query: &HistoryQuery)
        -> Result<Frame, EngineError>;
}

/// Errors raised while talking to the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid engine url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("engine request failed: {0}")]
    Http(String),
    #[error("engine responded with status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
    #[error("failed to decode engine response: {0}")]
    Decode(String),
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// Engine reached over HTTP.
#[derive(Clone)]
pub struct RemoteHistorian {
    http: reqwest::Client,
    base_url: Url,
}

impl RemoteHistorian {
    /// Creates a new client bound to the provided base URL.
    pub fn new(base_url: &str) -> Result<Self, EngineError> {
        let mut url = Url::parse(base_url).map_err(|err| EngineError::InvalidUrl {
            url: base_url.to_string(),
            source: err,
        })?;

        if !url.path().ends_with('/') {
            let mut path = url.path().trim_end_matches('/').to_string();
            path.push('/');
            url.set_path(&path);
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn query_url(&self, org_id: i64) -> Result<Url, EngineError> {
        let path = format!("api/v1/orgs/{}/alert-state-history/query", org_id);
        self.base_url
            .join(&path)
            .map_err(|err| EngineError::InvalidUrl {
                url: format!("{}{}", self.base_url, path),
                source: err,
            })
    }
}

#[async_trait]
impl Historian for RemoteHistorian {
    async fn query(
        &self,
        _ctx: &RequestContext,
        query: &HistoryQuery,
    ) -> Result<Frame, EngineError> {
        let url = self.query_url(query.org_id)?;

        let response = self
            .http
            .post(url)
            .json(query)
            .send()
            .await
            .map_err(|err| EngineError::Http(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::UnexpectedStatus { status, body });
        }

        response
            .json::<Frame>()
            .await
            .map_err(|err| EngineError::Decode(err.to_string()))
    }
}
