use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::models::{GraphQlResponse, MediaData, PageData};
use super::queries::{
    detail_query, page_query, trending_query, DetailVariables, GraphQlRequest, MediaSort,
    PageVariables, TrendingVariables,
};
use crate::domain::{CatalogItem, MediaDetail, MediaId, Result, YamiyumeError};
use crate::source::{MediaSource, PageRequest, PageResult};

/// Public AniList GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://graphql.anilist.co";

const USER_AGENT: &str = concat!("yamiyume/", env!("CARGO_PKG_VERSION"));

/// [`MediaSource`] backed by the AniList GraphQL API.
#[derive(Debug, Clone)]
pub struct AniListClient {
    client: Client,
    endpoint: String,
    sort: MediaSort,
}

impl AniListClient {
    /// Creates a client with its own connection pool and request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).timeout(timeout).build()?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Creates a client on top of an existing reqwest `Client`.
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            sort: MediaSort::default(),
        }
    }

    /// Sets the catalog listing order.
    #[must_use]
    pub fn with_sort(mut self, sort: MediaSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post<V: Serialize + Send, T: DeserializeOwned + Send>(&self, query: &str, variables: V) -> Result<T> {
        let body = GraphQlRequest { query, variables };
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;
        let envelope: GraphQlResponse<T> = self.handle_response(response).await?;
        unwrap_envelope(envelope)
    }

    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(YamiyumeError::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }
        let deserializer = &mut serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(deserializer).map_err(|e| YamiyumeError::Json {
            path: e.path().to_string(),
            source: e.into_inner(),
        })
    }
}

/// Splits a GraphQL envelope into data or an error.
///
/// Errors win over partial data. An error entry carrying a server or
/// rate-limit status is reported as [`YamiyumeError::Api`] so the retry
/// policy treats it as transient.
fn unwrap_envelope<T>(envelope: GraphQlResponse<T>) -> Result<T> {
    if let Some(first) = envelope.errors.first() {
        let message = envelope
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(match first.status {
            Some(code) if code >= 500 || code == 429 => YamiyumeError::Api { status_code: code, message },
            _ => YamiyumeError::GraphQl(message),
        });
    }
    envelope
        .data
        .ok_or_else(|| YamiyumeError::GraphQl("response carried neither data nor errors".to_string()))
}

#[async_trait]
impl MediaSource for AniListClient {
    #[tracing::instrument(skip(self), fields(page = request.page, search = ?request.search, genre = ?request.genre))]
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult> {
        let variables = PageVariables {
            page: request.page,
            per_page: request.per_page,
            search: request.search.as_deref(),
            genre: request.genre.as_deref(),
            sort: [self.sort],
        };
        let data: PageData = self.post(&page_query(), variables).await?;
        let result = data.page.into_result(request.page);
        tracing::debug!(
            items = result.items.len(),
            last_page = result.page_info.last_page,
            total = result.page_info.total,
            "page fetched"
        );
        Ok(result)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_trending(&self, limit: u32) -> Result<Vec<CatalogItem>> {
        let data: PageData = self.post(&trending_query(), TrendingVariables { per_page: limit }).await?;
        Ok(data.page.media.iter().map(super::models::Media::to_item).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_detail(&self, id: MediaId) -> Result<Option<MediaDetail>> {
        let result: Result<MediaData> = self.post(&detail_query(), DetailVariables { id }).await;
        match result {
            Ok(data) => Ok(data.media.map(super::models::Media::into_detail)),
            // AniList answers an unknown id with HTTP 404
            Err(YamiyumeError::Api { status_code: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn name(&self) -> &'static str {
        "anilist"
    }
}
