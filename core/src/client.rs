//! Stateless HTTP request builder and response parser for the catalog API.
//!
//! # Design
//! `MarvelClient` holds the base URL, the key pair and a timestamp source,
//! and carries no mutable state between calls. Each operation is split into a
//! `build_*` method that produces a signed `HttpRequest` and a `parse_*`
//! method that consumes an `HttpResponse`. The caller (or a
//! [`Transport`](crate::Transport)) executes the HTTP round-trip in between.

use crate::auth::Credentials;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::Query;
use crate::response::decode_response;
use crate::types::{MarvelPage, MarvelResponse, Resource};

/// Produces the `ts` value signed into each request.
pub type TimestampSource = fn() -> String;

fn unix_millis() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}

/// Synchronous, stateless client for the catalog API.
#[derive(Debug, Clone)]
pub struct MarvelClient {
    base_url: String,
    credentials: Credentials,
    timestamp: TimestampSource,
}

impl MarvelClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials: config.credentials,
            timestamp: unix_millis,
        }
    }

    /// Replace the clock used for signing, e.g. with a fixed value in tests.
    pub fn with_timestamp_source(mut self, timestamp: TimestampSource) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /{resource}` filtered by `query`.
    pub fn build_list<R: Resource>(&self, query: &Query) -> HttpRequest {
        self.signed_get(format!("{}/{}", self.base_url, R::PATH), query.to_parameters())
    }

    /// `GET /{resource}?offset=..&limit=..`. Fails before building anything
    /// when `limit` is zero.
    pub fn build_page<R: Resource>(&self, offset: u32, limit: u32) -> Result<HttpRequest, ApiError> {
        let query = Query::page(offset, limit)?;
        Ok(self.build_list::<R>(&query))
    }

    /// `GET /{resource}/{id}`. The gateway answers with a one-item page.
    pub fn build_get<R: Resource>(&self, id: &str) -> HttpRequest {
        self.signed_get(format!("{}/{}/{id}", self.base_url, R::PATH), Vec::new())
    }

    /// `GET /{owner}/{id}/{resource}`, e.g. the comics a character appears in.
    pub fn build_related<O: Resource, R: Resource>(&self, owner_id: &str, query: &Query) -> HttpRequest {
        self.signed_get(
            format!("{}/{}/{owner_id}/{}", self.base_url, O::PATH, R::PATH),
            query.to_parameters(),
        )
    }

    pub fn parse_list<R: Resource>(
        &self,
        response: HttpResponse,
    ) -> Result<MarvelResponse<MarvelPage<R>>, ApiError> {
        decode_response(&response)
    }

    fn signed_get(&self, path: String, mut query: Vec<(String, String)>) -> HttpRequest {
        let timestamp = (self.timestamp)();
        query.extend(self.credentials.sign(&timestamp));
        tracing::debug!(path = %path, params = query.len(), "built request");
        HttpRequest {
            method: HttpMethod::Get,
            path,
            query,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }
}
