//! Resource DTOs for the catalog API.
//!
//! # Design
//! Every entity kind reuses the same envelope (`MarvelResponse`), page
//! (`MarvelPage`) and nested reference list (`MarvelResources`). Nested list
//! items share one structural shape, `ResourceItem`; only story references
//! carry a `type` and only creator references carry a `role`.
//!
//! The gateway omits collections and sends `null` text fields freely, so
//! collections default to empty and nullable text decodes to `""`.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Outer envelope wrapping every successful response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarvelResponse<T> {
    pub code: i32,
    pub status: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub copyright: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub attribution_text: String,
    #[serde(rename = "attributionHTML", default, deserialize_with = "de::nullable_string")]
    pub attribution_html: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    pub data: T,
}

impl<T: fmt::Debug> fmt::Display for MarvelResponse<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MarvelResponse{{code={}, status='{}', copyright='{}', attributionText='{}', attributionHtml='{}', response={:?}}}",
            self.code, self.status, self.copyright, self.attribution_text, self.attribution_html, self.data
        )
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarvelPage<T> {
    pub offset: u32,
    pub limit: u32,
    pub total: u32,
    pub count: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

pub type CharactersDto = MarvelPage<CharacterDto>;
pub type ComicsDto = MarvelPage<ComicDto>;
pub type SeriesListDto = MarvelPage<SeriesDto>;
pub type StoriesDto = MarvelPage<StoryDto>;
pub type EventsDto = MarvelPage<EventDto>;
pub type CreatorsDto = MarvelPage<CreatorDto>;

/// A reference list nested inside an entity, pointing at related entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarvelResources<T> {
    #[serde(default)]
    pub available: u32,
    #[serde(default)]
    pub returned: u32,
    #[serde(rename = "collectionURI", default)]
    pub collection_uri: String,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Default for MarvelResources<T> {
    fn default() -> Self {
        Self {
            available: 0,
            returned: 0,
            collection_uri: String::new(),
            items: Vec::new(),
        }
    }
}

/// A lightweight reference to another entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceItem {
    #[serde(rename = "resourceURI", default)]
    pub resource_uri: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

pub type ComicResource = ResourceItem;
pub type StoryResource = ResourceItem;
pub type SeriesResource = ResourceItem;
pub type EventResource = ResourceItem;
pub type CharacterResource = ResourceItem;
pub type CreatorResource = ResourceItem;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarvelImage {
    pub path: String,
    pub extension: String,
}

impl MarvelImage {
    /// Full-size image URL.
    pub fn url(&self) -> String {
        format!("{}.{}", self.path, self.extension)
    }

    /// URL of a sized rendition such as `portrait_xlarge` or `standard_medium`.
    pub fn url_with_variant(&self, variant: &str) -> String {
        format!("{}/{variant}.{}", self.path, self.extension)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarvelUrl {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDto {
    #[serde(deserialize_with = "de::id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub description: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub modified: String,
    #[serde(rename = "resourceURI", default)]
    pub resource_uri: String,
    #[serde(default)]
    pub thumbnail: Option<MarvelImage>,
    #[serde(default)]
    pub urls: Vec<MarvelUrl>,
    #[serde(default)]
    pub comics: MarvelResources<ComicResource>,
    #[serde(default)]
    pub series: MarvelResources<SeriesResource>,
    #[serde(default)]
    pub stories: MarvelResources<StoryResource>,
    #[serde(default)]
    pub events: MarvelResources<EventResource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComicDate {
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComicPrice {
    #[serde(rename = "type")]
    pub kind: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicDto {
    #[serde(deserialize_with = "de::id_string")]
    pub id: String,
    #[serde(default)]
    pub digital_id: u64,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub title: String,
    #[serde(default)]
    pub issue_number: f64,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub variant_description: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub description: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub modified: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub isbn: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub upc: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub diamond_code: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub format: String,
    #[serde(default)]
    pub page_count: u32,
    #[serde(rename = "resourceURI", default)]
    pub resource_uri: String,
    #[serde(default)]
    pub urls: Vec<MarvelUrl>,
    #[serde(default)]
    pub series: Option<SeriesResource>,
    #[serde(default)]
    pub variants: Vec<ComicResource>,
    #[serde(default)]
    pub dates: Vec<ComicDate>,
    #[serde(default)]
    pub prices: Vec<ComicPrice>,
    #[serde(default)]
    pub thumbnail: Option<MarvelImage>,
    #[serde(default)]
    pub images: Vec<MarvelImage>,
    #[serde(default)]
    pub creators: MarvelResources<CreatorResource>,
    #[serde(default)]
    pub characters: MarvelResources<CharacterResource>,
    #[serde(default)]
    pub stories: MarvelResources<StoryResource>,
    #[serde(default)]
    pub events: MarvelResources<EventResource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDto {
    #[serde(deserialize_with = "de::id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub description: String,
    #[serde(rename = "resourceURI", default)]
    pub resource_uri: String,
    #[serde(default)]
    pub urls: Vec<MarvelUrl>,
    #[serde(default)]
    pub start_year: i32,
    #[serde(default)]
    pub end_year: i32,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub rating: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub modified: String,
    #[serde(default)]
    pub thumbnail: Option<MarvelImage>,
    #[serde(default)]
    pub comics: MarvelResources<ComicResource>,
    #[serde(default)]
    pub stories: MarvelResources<StoryResource>,
    #[serde(default)]
    pub events: MarvelResources<EventResource>,
    #[serde(default)]
    pub characters: MarvelResources<CharacterResource>,
    #[serde(default)]
    pub creators: MarvelResources<CreatorResource>,
    #[serde(default)]
    pub next: Option<SeriesResource>,
    #[serde(default)]
    pub previous: Option<SeriesResource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryDto {
    #[serde(deserialize_with = "de::id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub description: String,
    #[serde(rename = "resourceURI", default)]
    pub resource_uri: String,
    #[serde(rename = "type", default, deserialize_with = "de::nullable_string")]
    pub kind: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub modified: String,
    #[serde(default)]
    pub thumbnail: Option<MarvelImage>,
    #[serde(default)]
    pub comics: MarvelResources<ComicResource>,
    #[serde(default)]
    pub series: MarvelResources<SeriesResource>,
    #[serde(default)]
    pub events: MarvelResources<EventResource>,
    #[serde(default)]
    pub characters: MarvelResources<CharacterResource>,
    #[serde(default)]
    pub creators: MarvelResources<CreatorResource>,
    #[serde(default)]
    pub original_issue: Option<ComicResource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    #[serde(deserialize_with = "de::id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub description: String,
    #[serde(rename = "resourceURI", default)]
    pub resource_uri: String,
    #[serde(default)]
    pub urls: Vec<MarvelUrl>,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub modified: String,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<MarvelImage>,
    #[serde(default)]
    pub comics: MarvelResources<ComicResource>,
    #[serde(default)]
    pub stories: MarvelResources<StoryResource>,
    #[serde(default)]
    pub series: MarvelResources<SeriesResource>,
    #[serde(default)]
    pub characters: MarvelResources<CharacterResource>,
    #[serde(default)]
    pub creators: MarvelResources<CreatorResource>,
    #[serde(default)]
    pub next: Option<EventResource>,
    #[serde(default)]
    pub previous: Option<EventResource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorDto {
    #[serde(deserialize_with = "de::id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub first_name: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub middle_name: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub last_name: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub suffix: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub full_name: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub modified: String,
    #[serde(rename = "resourceURI", default)]
    pub resource_uri: String,
    #[serde(default)]
    pub urls: Vec<MarvelUrl>,
    #[serde(default)]
    pub thumbnail: Option<MarvelImage>,
    #[serde(default)]
    pub series: MarvelResources<SeriesResource>,
    #[serde(default)]
    pub stories: MarvelResources<StoryResource>,
    #[serde(default)]
    pub comics: MarvelResources<ComicResource>,
    #[serde(default)]
    pub events: MarvelResources<EventResource>,
}

/// An entity kind served from its own top-level collection.
pub trait Resource: for<'de> Deserialize<'de> {
    /// Collection path segment, e.g. `characters`.
    const PATH: &'static str;

    fn id(&self) -> &str;

    fn modified(&self) -> &str;

    /// Parsed `modified` timestamp. `None` for the gateway's placeholder
    /// dates such as `-0001-11-30T00:00:00-0500`.
    fn modified_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_str(self.modified(), "%Y-%m-%dT%H:%M:%S%z")
            .ok()
            .filter(|date| date.timestamp() > 0)
    }
}

macro_rules! impl_resource {
    ($($ty:ty => $path:literal),* $(,)?) => {
        $(
            impl Resource for $ty {
                const PATH: &'static str = $path;

                fn id(&self) -> &str {
                    &self.id
                }

                fn modified(&self) -> &str {
                    &self.modified
                }
            }
        )*
    };
}

impl_resource! {
    CharacterDto => "characters",
    ComicDto => "comics",
    SeriesDto => "series",
    StoryDto => "stories",
    EventDto => "events",
    CreatorDto => "creators",
}

mod de {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    /// Entity ids are numbers on the wire but exposed as strings.
    pub fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(id) => id.to_string(),
            RawId::Text(id) => id,
        })
    }

    pub fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }
}
