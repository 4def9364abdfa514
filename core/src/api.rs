//! Endpoint façade wiring `MarvelClient` to a `Transport`.

use std::marker::PhantomData;

use crate::client::MarvelClient;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::query::Query;
use crate::transport::Transport;
use crate::types::{
    CharacterDto, ComicDto, CreatorDto, EventDto, MarvelPage, MarvelResponse, Resource, SeriesDto,
    StoryDto,
};

/// A client bound to a transport. Holds no mutable state, so it can be
/// shared across threads when the transport allows it.
#[derive(Clone)]
pub struct MarvelApi<T> {
    client: MarvelClient,
    transport: T,
}

impl<T: Transport> MarvelApi<T> {
    pub fn new(client: MarvelClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &MarvelClient {
        &self.client
    }

    pub fn endpoint<R: Resource>(&self) -> Endpoint<'_, T, R> {
        Endpoint {
            api: self,
            _resource: PhantomData,
        }
    }

    pub fn characters(&self) -> Endpoint<'_, T, CharacterDto> {
        self.endpoint()
    }

    pub fn comics(&self) -> Endpoint<'_, T, ComicDto> {
        self.endpoint()
    }

    pub fn series(&self) -> Endpoint<'_, T, SeriesDto> {
        self.endpoint()
    }

    pub fn stories(&self) -> Endpoint<'_, T, StoryDto> {
        self.endpoint()
    }

    pub fn events(&self) -> Endpoint<'_, T, EventDto> {
        self.endpoint()
    }

    pub fn creators(&self) -> Endpoint<'_, T, CreatorDto> {
        self.endpoint()
    }

    fn send<R: Resource>(
        &self,
        request: HttpRequest,
    ) -> Result<MarvelResponse<MarvelPage<R>>, ApiError> {
        let response = self.transport.execute(&request)?;
        self.client.parse_list(response)
    }
}

/// Operations on one resource collection.
pub struct Endpoint<'a, T, R> {
    api: &'a MarvelApi<T>,
    _resource: PhantomData<fn() -> R>,
}

impl<T: Transport, R: Resource> Endpoint<'_, T, R> {
    /// One page of the collection. A zero `limit` fails before any request
    /// reaches the transport.
    pub fn get_all(&self, offset: u32, limit: u32) -> Result<MarvelResponse<MarvelPage<R>>, ApiError> {
        let request = self.api.client.build_page::<R>(offset, limit)?;
        self.api.send(request)
    }

    pub fn get_all_with(&self, query: &Query) -> Result<MarvelResponse<MarvelPage<R>>, ApiError> {
        self.api.send(self.api.client.build_list::<R>(query))
    }

    pub fn get(&self, id: &str) -> Result<MarvelResponse<MarvelPage<R>>, ApiError> {
        self.api.send(self.api.client.build_get::<R>(id))
    }

    /// Entities of kind `S` linked to entity `id`, e.g. a character's comics.
    pub fn related<S: Resource>(
        &self,
        id: &str,
        query: &Query,
    ) -> Result<MarvelResponse<MarvelPage<S>>, ApiError> {
        self.api.send(self.api.client.build_related::<R, S>(id, query))
    }
}
