//! Verify query rendering and response decoding against JSON vectors stored in
//! `test-vectors/` and the recorded character list in `fixtures/`.
//!
//! Parameter lists are compared as ordered pairs, so any drift in key names,
//! value formats or emission order shows up as a failure.

use marvel_core::{
    decode_response, ApiError, CharacterDto, CharactersDto, ClientConfig, HttpResponse,
    MarvelClient, OrderBy, Query,
};
use serde_json::Value;

const BASE_URL: &str = "http://fake.marvel.com";

fn client() -> MarvelClient {
    MarvelClient::new(ClientConfig::new("1234", "abcd").with_base_url(BASE_URL))
        .with_timestamp_source(|| "1".to_string())
}

/// Parse the order field string from test vectors into `OrderBy`.
fn parse_order_by(s: &str) -> OrderBy {
    match s {
        "name" => OrderBy::Name,
        "modified" => OrderBy::Modified,
        other => panic!("unknown order field: {other}"),
    }
}

fn ids(value: &Value) -> Vec<u32> {
    value
        .as_array()
        .map(|ids| ids.iter().map(|id| id.as_u64().unwrap() as u32).collect())
        .unwrap_or_default()
}

/// Replay a vector's input through the builder.
fn build_query(input: &Value) -> Result<Query, ApiError> {
    let mut builder = Query::builder();
    if let Some(offset) = input["offset"].as_u64() {
        builder = builder.with_offset(offset as u32);
    }
    if let Some(limit) = input["limit"].as_u64() {
        builder = builder.with_limit(limit as u32);
    }
    if let Some(name) = input["name"].as_str() {
        builder = builder.with_name(name);
    }
    if let Some(prefix) = input["nameStartsWith"].as_str() {
        builder = builder.with_name_starts_with(prefix);
    }
    if let Some(date) = input["modifiedSince"].as_str() {
        builder = builder.with_modified_since(chrono::DateTime::parse_from_rfc3339(date).unwrap());
    }
    if let Some(order) = input.get("orderBy") {
        builder = builder.with_order_by(
            parse_order_by(order["field"].as_str().unwrap()),
            order["ascending"].as_bool().unwrap(),
        );
    }
    for id in ids(&input["comics"]) {
        builder = builder.add_comic(id);
    }
    builder = builder
        .add_events(ids(&input["events"]))
        .add_series_ids(ids(&input["series"]))
        .add_stories(ids(&input["stories"]));
    builder.build()
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[test]
fn query_test_vectors() {
    let raw = include_str!("../../test-vectors/queries.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let result = build_query(&case["input"]);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "InvalidQuery" => assert!(matches!(err, ApiError::InvalidQuery(_)), "{name}: expected InvalidQuery"),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
            continue;
        }

        let query = result.unwrap();
        let expected: Vec<(String, String)> = serde_json::from_value(case["expected_params"].clone()).unwrap();
        assert_eq!(query.to_parameters(), expected, "{name}: params");
        assert_eq!(query.to_parameters(), query.to_parameters(), "{name}: idempotent");

        let req = c.build_list::<CharacterDto>(&query);
        assert_eq!(req.path, format!("{BASE_URL}{}", case["expected_path"].as_str().unwrap()), "{name}: path");
        assert_eq!(&req.query[..expected.len()], &expected[..], "{name}: query prefix");
        let auth: Vec<&str> = req.query[expected.len()..].iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(auth, ["ts", "apikey", "hash"], "{name}: auth params");

        let url = req.url();
        for (key, value) in &expected {
            assert!(url.contains(&format!("{key}={value}")), "{name}: {url} lacks {key}={value}");
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn error_test_vectors() {
    let raw = include_str!("../../test-vectors/errors.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: sim["body"].as_str().unwrap().to_string(),
        };
        let err = c.parse_list::<CharacterDto>(response).unwrap_err();

        let expected = &case["expected_error"];
        match expected["kind"].as_str().unwrap() {
            "Marvel" => {
                let marvel = err.as_marvel().unwrap_or_else(|| panic!("{name}: expected Marvel, got {err:?}"));
                assert_eq!(marvel.code(), expected["code"].as_str().unwrap(), "{name}: code");
                assert_eq!(marvel.message(), expected["message"].as_str().unwrap(), "{name}: message");
            }
            "HttpError" => assert!(matches!(err, ApiError::HttpError { .. }), "{name}: expected HttpError"),
            "DeserializationError" => {
                assert!(matches!(err, ApiError::DeserializationError(_)), "{name}: expected DeserializationError")
            }
            other => panic!("{name}: unknown expected_error kind: {other}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Character list fixture
// ---------------------------------------------------------------------------

fn characters_fixture() -> HttpResponse {
    HttpResponse {
        status: 200,
        headers: Vec::new(),
        body: include_str!("../../fixtures/get_characters.json").to_string(),
    }
}

#[test]
fn character_list_decodes_every_field() {
    let characters = decode_response::<CharactersDto>(&characters_fixture()).unwrap();

    assert_eq!(characters.code, 200);
    assert_eq!(characters.status, "Ok");
    assert_eq!(characters.copyright, "© 2015 MARVEL");
    assert_eq!(characters.attribution_text, "Data provided by Marvel. © 2015 MARVEL");
    assert_eq!(
        characters.attribution_html,
        "<a href=\"http://marvel.com\">Data provided by Marvel. © 2015 MARVEL</a>"
    );

    let page = &characters.data;
    assert_eq!(page.count, 10);
    assert_eq!(page.limit, 10);
    assert_eq!(page.offset, 0);
    assert_eq!(page.total, 1485);
    assert_eq!(page.results.len(), 10);

    let first = &page.results[0];
    assert_eq!(first.id, "1011334");
    assert_eq!(first.name, "3-D Man");
    assert_eq!(first.description, "3-D man is a 3d superhero");
    assert_eq!(first.modified, "2014-04-29T14:18:17-0400");
    assert_eq!(first.resource_uri, "http://gateway.marvel.com/v1/public/characters/1011334");

    let thumbnail = first.thumbnail.as_ref().unwrap();
    assert_eq!(thumbnail.path, "http://i.annihil.us/u/prod/marvel/i/mg/c/e0/535fecbbb9784");
    assert_eq!(thumbnail.extension, "jpg");

    assert_eq!(first.urls.len(), 3);
    assert_eq!(first.urls[0].kind, "detail");
    assert_eq!(
        first.urls[0].url,
        "http://marvel.com/characters/74/3-d_man?utm_campaign=apiRef&utm_source=838a08a2f4c39fa3fd218b1b2d43f19a"
    );

    let comics = &first.comics;
    assert_eq!(comics.available, 11);
    assert_eq!(comics.returned, 11);
    assert_eq!(comics.collection_uri, "http://gateway.marvel.com/v1/public/characters/1011334/comics");
    assert_eq!(comics.items.len(), 11);
    assert_eq!(comics.items[0].name, "Avengers: The Initiative (2007) #14");
    assert_eq!(comics.items[0].resource_uri, "http://gateway.marvel.com/v1/public/comics/21366");

    let stories = &first.stories;
    assert_eq!(stories.available, 17);
    assert_eq!(stories.returned, 17);
    assert_eq!(stories.collection_uri, "http://gateway.marvel.com/v1/public/characters/1011334/stories");
    assert_eq!(stories.items.len(), 17);
    assert_eq!(stories.items[0].name, "Cover #19947");
    assert_eq!(stories.items[0].resource_uri, "http://gateway.marvel.com/v1/public/stories/19947");
    assert_eq!(stories.items[0].kind.as_deref(), Some("cover"));
}

#[test]
fn character_without_urls_decodes_to_empty_list() {
    let characters = decode_response::<CharactersDto>(&characters_fixture()).unwrap();
    let aaron = &characters.data.results[3];
    assert_eq!(aaron.name, "Aaron Stack");
    assert!(aaron.urls.is_empty());
    assert_eq!(aaron.comics.available, 0);

    let ultimate = &characters.data.results[5];
    assert_eq!(ultimate.name, "Abomination (Ultimate)");
    assert_eq!(ultimate.description, "");
}
