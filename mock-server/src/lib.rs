use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use md5::{Digest, Md5};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const DEFAULT_PUBLIC_KEY: &str = "1234";
pub const DEFAULT_PRIVATE_KEY: &str = "abcd";

const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 100;
const COPYRIGHT: &str = "© 2015 MARVEL";
const ATTRIBUTION_TEXT: &str = "Data provided by Marvel. © 2015 MARVEL";
const ATTRIBUTION_HTML: &str = "<a href=\"http://marvel.com\">Data provided by Marvel. © 2015 MARVEL</a>";
const COLLECTIONS: [&str; 5] = ["comics", "series", "stories", "events", "creators"];

/// Read-only state behind the fake gateway.
pub struct Catalog {
    public_key: String,
    private_key: String,
    characters: Vec<Value>,
}

impl Catalog {
    /// Catalog seeded with the recorded character list.
    pub fn seeded(public_key: &str, private_key: &str) -> Self {
        let fixture: Value =
            serde_json::from_str(include_str!("../../fixtures/get_characters.json")).unwrap_or(Value::Null);
        let characters = fixture["data"]["results"].as_array().cloned().unwrap_or_default();
        Self {
            public_key: public_key.to_string(),
            private_key: private_key.to_string(),
            characters,
        }
    }
}

pub type SharedCatalog = Arc<Catalog>;

type Params = HashMap<String, String>;

pub fn hash(ts: &str, private_key: &str, public_key: &str) -> String {
    format!("{:x}", Md5::digest(format!("{ts}{private_key}{public_key}")))
}

pub fn app() -> Router {
    app_with_keys(DEFAULT_PUBLIC_KEY, DEFAULT_PRIVATE_KEY)
}

pub fn app_with_keys(public_key: &str, private_key: &str) -> Router {
    let catalog: SharedCatalog = Arc::new(Catalog::seeded(public_key, private_key));
    Router::new()
        .route("/characters", get(list_characters))
        .route("/characters/{id}", get(get_character))
        .route("/characters/{id}/{collection}", get(character_collection))
        .route("/{collection}", get(list_collection))
        .with_state(catalog)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_app(listener, app()).await
}

pub async fn run_app(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app).await
}

fn marvel_error(status: StatusCode, code: &str, message: &str) -> Response {
    (status, Json(json!({ "code": code, "message": message }))).into_response()
}

fn status_error(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "code": status.as_u16(), "status": text }))).into_response()
}

fn authorize(catalog: &Catalog, params: &Params) -> Result<(), Response> {
    let missing = |what: &str| {
        marvel_error(
            StatusCode::CONFLICT,
            "MissingParameter",
            &format!("You must provide a {what}."),
        )
    };
    let apikey = params.get("apikey").ok_or_else(|| missing("user key"))?;
    let ts = params.get("ts").ok_or_else(|| missing("timestamp"))?;
    let given = params.get("hash").ok_or_else(|| missing("hash"))?;

    if *apikey != catalog.public_key {
        return Err(marvel_error(
            StatusCode::UNAUTHORIZED,
            "InvalidCredentials",
            "The passed API key is invalid.",
        ));
    }
    if *given != hash(ts, &catalog.private_key, &catalog.public_key) {
        tracing::debug!(ts = %ts, "rejected hash");
        return Err(marvel_error(
            StatusCode::UNAUTHORIZED,
            "InvalidCredentials",
            "That hash, timestamp and key combination is invalid.",
        ));
    }
    Ok(())
}

/// `(offset, limit)` from the query string, validated like the real gateway.
fn paging(params: &Params) -> Result<(usize, usize), Response> {
    let limit = match params.get("limit") {
        None => DEFAULT_LIMIT,
        Some(raw) => match raw.parse::<usize>() {
            Ok(0) | Err(_) => {
                return Err(status_error(
                    StatusCode::CONFLICT,
                    "You must pass an integer limit greater than 0.",
                ))
            }
            Ok(limit) if limit > MAX_LIMIT => {
                return Err(status_error(
                    StatusCode::CONFLICT,
                    "You may not request more than 100 items.",
                ))
            }
            Ok(limit) => limit,
        },
    };
    let offset = match params.get("offset") {
        None => 0,
        Some(raw) => raw.parse::<usize>().map_err(|_| {
            status_error(StatusCode::CONFLICT, "You must pass a non-negative integer offset.")
        })?,
    };
    Ok((offset, limit))
}

fn envelope(matching: &[Value], offset: usize, limit: usize) -> Response {
    let results: Vec<Value> = matching.iter().skip(offset).take(limit).cloned().collect();
    let data = json!({
        "offset": offset,
        "limit": limit,
        "total": matching.len(),
        "count": results.len(),
        "results": results,
    });
    let etag = format!("{:x}", Md5::digest(data.to_string()));
    Json(json!({
        "code": 200,
        "status": "Ok",
        "copyright": COPYRIGHT,
        "attributionText": ATTRIBUTION_TEXT,
        "attributionHTML": ATTRIBUTION_HTML,
        "etag": etag,
        "data": data,
    }))
    .into_response()
}

fn name_of(character: &Value) -> String {
    character["name"].as_str().unwrap_or_default().to_lowercase()
}

async fn list_characters(State(catalog): State<SharedCatalog>, Query(params): Query<Params>) -> Response {
    if let Err(response) = authorize(&catalog, &params) {
        return response;
    }
    let (offset, limit) = match paging(&params) {
        Ok(paging) => paging,
        Err(response) => return response,
    };
    let name = params.get("name").map(|n| n.to_lowercase());
    let prefix = params.get("nameStartsWith").map(|p| p.to_lowercase());

    let matching: Vec<Value> = catalog
        .characters
        .iter()
        .filter(|c| name.as_ref().map_or(true, |n| name_of(c) == *n))
        .filter(|c| prefix.as_ref().map_or(true, |p| name_of(c).starts_with(p.as_str())))
        .cloned()
        .collect();
    tracing::debug!(matching = matching.len(), offset, limit, "listing characters");
    envelope(&matching, offset, limit)
}

async fn get_character(
    State(catalog): State<SharedCatalog>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> Response {
    if let Err(response) = authorize(&catalog, &params) {
        return response;
    }
    let found: Vec<Value> = catalog
        .characters
        .iter()
        .filter(|c| c["id"].to_string() == id)
        .cloned()
        .collect();
    if found.is_empty() {
        return status_error(StatusCode::NOT_FOUND, "We couldn't find that character");
    }
    envelope(&found, 0, DEFAULT_LIMIT)
}

async fn character_collection(
    State(catalog): State<SharedCatalog>,
    Path((id, collection)): Path<(String, String)>,
    Query(params): Query<Params>,
) -> Response {
    if let Err(response) = authorize(&catalog, &params) {
        return response;
    }
    if !COLLECTIONS.contains(&collection.as_str()) {
        return StatusCode::NOT_FOUND.into_response();
    }
    if !catalog.characters.iter().any(|c| c["id"].to_string() == id) {
        return status_error(StatusCode::NOT_FOUND, "We couldn't find that character");
    }
    match paging(&params) {
        Ok((offset, limit)) => envelope(&[], offset, limit),
        Err(response) => response,
    }
}

async fn list_collection(
    State(catalog): State<SharedCatalog>,
    Path(collection): Path<String>,
    Query(params): Query<Params>,
) -> Response {
    if !COLLECTIONS.contains(&collection.as_str()) {
        return StatusCode::NOT_FOUND.into_response();
    }
    if let Err(response) = authorize(&catalog, &params) {
        return response;
    }
    match paging(&params) {
        Ok((offset, limit)) => envelope(&[], offset, limit),
        Err(response) => response,
    }
}
