//! Synchronous client core for a key-authenticated comics catalog API.
//!
//! # Overview
//! Builds signed `HttpRequest` values from typed queries and decodes
//! `HttpResponse` values into typed envelopes, without touching the network
//! (host-does-IO pattern). A [`Transport`] performs the round-trip; the
//! optional `ureq` feature provides a blocking one.
//!
//! # Design
//! - `Query` is validated once, at `build()`, and renders to an ordered
//!   parameter list whose key names and value formats match the gateway.
//! - `decode_response` is the single decoder for every payload shape and maps
//!   gateway error bodies to [`MarvelApiError`].
//! - `MarvelClient` and every DTO are plain owned values; nothing is shared or
//!   mutated between calls.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod response;
pub mod transport;
pub mod types;

pub use api::{Endpoint, MarvelApi};
pub use auth::Credentials;
pub use client::MarvelClient;
pub use config::ClientConfig;
pub use error::{ApiError, MarvelApiError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::{OrderBy, Ordering, Query, QueryBuilder};
pub use response::decode_response;
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{
    CharacterDto, CharactersDto, ComicDto, ComicResource, ComicsDto, CreatorDto, CreatorResource,
    CreatorsDto, EventDto, EventResource, EventsDto, MarvelImage, MarvelPage, MarvelResources,
    MarvelResponse, MarvelUrl, Resource, ResourceItem, SeriesDto, SeriesListDto, SeriesResource,
    StoriesDto, StoryDto, StoryResource,
};
