//! Filter, sort and paging parameters for list endpoints.
//!
//! # Design
//! `QueryBuilder` accumulates criteria by value (each `with_*`/`add_*` call
//! consumes and returns the builder). Scalars are last-write-wins, id lists
//! append. `build()` is the only place validation happens, so an invalid
//! limit is rejected before any request exists. The resulting `Query` is
//! immutable and renders to the same ordered parameter list every time.

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};

use crate::error::ApiError;

/// Offset every `modifiedSince` value is rendered in, in seconds west of UTC.
pub const MODIFIED_SINCE_OFFSET_WEST_SECS: i32 = 8 * 3600;

const MODIFIED_SINCE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Sortable fields accepted by the `orderBy` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderBy {
    Name,
    Modified,
    Title,
    IssueNumber,
    OnsaleDate,
    FocDate,
    StartDate,
    StartYear,
    FirstName,
    LastName,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::Name => "name",
            OrderBy::Modified => "modified",
            OrderBy::Title => "title",
            OrderBy::IssueNumber => "issueNumber",
            OrderBy::OnsaleDate => "onsaleDate",
            OrderBy::FocDate => "focDate",
            OrderBy::StartDate => "startDate",
            OrderBy::StartYear => "startYear",
            OrderBy::FirstName => "firstName",
            OrderBy::LastName => "lastName",
        }
    }
}

/// A sort field paired with its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering {
    pub field: OrderBy,
    pub ascending: bool,
}

impl Ordering {
    /// Wire form: the field name, prefixed with `-` when descending.
    pub fn render(&self) -> String {
        if self.ascending {
            self.field.as_str().to_string()
        } else {
            format!("-{}", self.field.as_str())
        }
    }
}

fn reference_offset() -> FixedOffset {
    FixedOffset::west_opt(MODIFIED_SINCE_OFFSET_WEST_SECS).unwrap_or_else(|| Utc.fix())
}

/// Render a timestamp the way the gateway expects `modifiedSince`.
pub fn format_modified_since<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    date.with_timezone(&reference_offset())
        .format(MODIFIED_SINCE_FORMAT)
        .to_string()
}

fn join_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// An immutable, validated set of list-endpoint parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    offset: Option<u32>,
    limit: u32,
    name: Option<String>,
    name_starts_with: Option<String>,
    modified_since: Option<DateTime<FixedOffset>>,
    order_by: Option<Ordering>,
    comics: Vec<u32>,
    events: Vec<u32>,
    series: Vec<u32>,
    stories: Vec<u32>,
    creators: Vec<u32>,
    characters: Vec<u32>,
}

impl Query {
    pub fn builder() -> QueryBuilder {
        QueryBuilder::default()
    }

    /// Shortcut for a query carrying only paging parameters.
    pub fn page(offset: u32, limit: u32) -> Result<Query, ApiError> {
        Query::builder().with_offset(offset).with_limit(limit).build()
    }

    pub fn offset(&self) -> Option<u32> {
        self.offset
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn name_starts_with(&self) -> Option<&str> {
        self.name_starts_with.as_deref()
    }

    pub fn modified_since(&self) -> Option<&DateTime<FixedOffset>> {
        self.modified_since.as_ref()
    }

    pub fn order_by(&self) -> Option<Ordering> {
        self.order_by
    }

    pub fn comics(&self) -> &[u32] {
        &self.comics
    }

    pub fn events(&self) -> &[u32] {
        &self.events
    }

    pub fn series(&self) -> &[u32] {
        &self.series
    }

    pub fn stories(&self) -> &[u32] {
        &self.stories
    }

    pub fn creators(&self) -> &[u32] {
        &self.creators
    }

    pub fn characters(&self) -> &[u32] {
        &self.characters
    }

    /// Render to the ordered parameter list appended to the request URL.
    ///
    /// Only present fields are emitted; empty id lists are omitted.
    pub fn to_parameters(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        let mut push = |key: &str, value: String| params.push((key.to_string(), value));

        if let Some(offset) = self.offset {
            push("offset", offset.to_string());
        }
        push("limit", self.limit.to_string());
        if let Some(name) = &self.name {
            push("name", name.clone());
        }
        if let Some(prefix) = &self.name_starts_with {
            push("nameStartsWith", prefix.clone());
        }
        if let Some(date) = &self.modified_since {
            push("modifiedSince", format_modified_since(date));
        }
        if let Some(ordering) = &self.order_by {
            push("orderBy", ordering.render());
        }
        for (key, ids) in [
            ("comics", &self.comics),
            ("events", &self.events),
            ("series", &self.series),
            ("stories", &self.stories),
            ("creators", &self.creators),
            ("characters", &self.characters),
        ] {
            if !ids.is_empty() {
                push(key, join_ids(ids));
            }
        }
        params
    }
}

/// Accumulates criteria for a [`Query`].
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    offset: Option<u32>,
    limit: Option<u32>,
    name: Option<String>,
    name_starts_with: Option<String>,
    modified_since: Option<DateTime<FixedOffset>>,
    order_by: Option<Ordering>,
    comics: Vec<u32>,
    events: Vec<u32>,
    series: Vec<u32>,
    stories: Vec<u32>,
    creators: Vec<u32>,
    characters: Vec<u32>,
}

impl QueryBuilder {
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_name_starts_with(mut self, prefix: impl Into<String>) -> Self {
        self.name_starts_with = Some(prefix.into());
        self
    }

    pub fn with_modified_since<Tz: TimeZone>(mut self, date: DateTime<Tz>) -> Self {
        self.modified_since = Some(date.with_timezone(&reference_offset()));
        self
    }

    pub fn with_order_by(mut self, field: OrderBy, ascending: bool) -> Self {
        self.order_by = Some(Ordering { field, ascending });
        self
    }

    pub fn add_comic(mut self, id: u32) -> Self {
        self.comics.push(id);
        self
    }

    pub fn add_comics(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.comics.extend(ids);
        self
    }

    pub fn add_event(mut self, id: u32) -> Self {
        self.events.push(id);
        self
    }

    pub fn add_events(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.events.extend(ids);
        self
    }

    pub fn add_series(mut self, id: u32) -> Self {
        self.series.push(id);
        self
    }

    pub fn add_series_ids(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.series.extend(ids);
        self
    }

    pub fn add_story(mut self, id: u32) -> Self {
        self.stories.push(id);
        self
    }

    pub fn add_stories(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.stories.extend(ids);
        self
    }

    pub fn add_creator(mut self, id: u32) -> Self {
        self.creators.push(id);
        self
    }

    pub fn add_character(mut self, id: u32) -> Self {
        self.characters.push(id);
        self
    }

    /// Validate and freeze the accumulated criteria.
    ///
    /// Fails when no limit was set or the limit is zero.
    pub fn build(self) -> Result<Query, ApiError> {
        let limit = match self.limit {
            Some(limit) if limit > 0 => limit,
            Some(_) => {
                return Err(ApiError::InvalidQuery(
                    "limit must be greater than 0".to_string(),
                ))
            }
            None => return Err(ApiError::InvalidQuery("limit is required".to_string())),
        };
        Ok(Query {
            offset: self.offset,
            limit,
            name: self.name,
            name_starts_with: self.name_starts_with,
            modified_since: self.modified_since,
            order_by: self.order_by,
            comics: self.comics,
            events: self.events,
            series: self.series,
            stories: self.stories,
            creators: self.creators,
            characters: self.characters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(query: &Query) -> Vec<(String, String)> {
        query.to_parameters()
    }

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    fn any_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, 1, 10, 6, 10, 45).unwrap()
    }

    #[test]
    fn page_renders_offset_and_limit_only() {
        let query = Query::page(1, 10).unwrap();
        assert_eq!(params(&query), vec![pair("offset", "1"), pair("limit", "10")]);
    }

    #[test]
    fn zero_limit_is_rejected() {
        let err = Query::page(1, 0).unwrap_err();
        assert!(matches!(err, ApiError::InvalidQuery(_)));
    }

    #[test]
    fn missing_limit_is_rejected() {
        let err = Query::builder().with_offset(3).build().unwrap_err();
        assert!(matches!(err, ApiError::InvalidQuery(_)));
    }

    #[test]
    fn fully_populated_query_renders_every_key_in_order() {
        let query = Query::builder()
            .with_name("Spider-man")
            .with_name_starts_with("Spider")
            .with_limit(10)
            .with_offset(1)
            .with_modified_since(any_date())
            .with_order_by(OrderBy::Name, false)
            .add_comic(1)
            .add_comic(2)
            .add_events(vec![1, 2])
            .add_series(1)
            .add_story(1)
            .build()
            .unwrap();

        assert_eq!(
            params(&query),
            vec![
                pair("offset", "1"),
                pair("limit", "10"),
                pair("name", "Spider-man"),
                pair("nameStartsWith", "Spider"),
                pair("modifiedSince", "2015-01-09T22:10:45-0800"),
                pair("orderBy", "-name"),
                pair("comics", "1,2"),
                pair("events", "1,2"),
                pair("series", "1"),
                pair("stories", "1"),
            ]
        );
    }

    #[test]
    fn modified_since_ignores_caller_offset() {
        let paris = FixedOffset::east_opt(3600).unwrap();
        let local = paris.with_ymd_and_hms(2015, 1, 10, 7, 10, 45).unwrap();
        assert_eq!(format_modified_since(&local), "2015-01-09T22:10:45-0800");
        assert_eq!(format_modified_since(&any_date()), "2015-01-09T22:10:45-0800");
    }

    #[test]
    fn scalars_are_last_write_wins() {
        let query = Query::builder()
            .with_limit(5)
            .with_limit(20)
            .with_name("Hulk")
            .with_name("Thor")
            .with_order_by(OrderBy::Name, false)
            .with_order_by(OrderBy::Modified, true)
            .build()
            .unwrap();
        assert_eq!(query.limit(), 20);
        assert_eq!(query.name(), Some("Thor"));
        assert_eq!(query.order_by().map(|o| o.render()), Some("modified".to_string()));
    }

    #[test]
    fn id_lists_accumulate_and_keep_insertion_order() {
        let query = Query::builder()
            .with_limit(1)
            .add_comic(7)
            .add_comics([3, 7])
            .add_stories([9, 1])
            .add_story(4)
            .build()
            .unwrap();
        assert_eq!(query.comics(), &[7, 3, 7]);
        assert_eq!(query.stories(), &[9, 1, 4]);
    }

    #[test]
    fn unrelated_lists_do_not_affect_each_other() {
        let comics_first = Query::builder()
            .with_limit(10)
            .add_comic(1)
            .add_comic(2)
            .add_series(5)
            .build()
            .unwrap();
        let series_first = Query::builder()
            .with_limit(10)
            .add_series(5)
            .add_comic(1)
            .add_comic(2)
            .build()
            .unwrap();
        assert_eq!(params(&comics_first), params(&series_first));
    }

    #[test]
    fn rendering_twice_is_identical() {
        let query = Query::builder()
            .with_limit(10)
            .with_modified_since(any_date())
            .add_creator(30)
            .add_character(1011334)
            .build()
            .unwrap();
        assert_eq!(params(&query), params(&query));
        assert_eq!(
            params(&query)[2..],
            [pair("creators", "30"), pair("characters", "1011334")]
        );
    }

    #[test]
    fn ascending_order_has_no_prefix() {
        let ordering = Ordering { field: OrderBy::IssueNumber, ascending: true };
        assert_eq!(ordering.render(), "issueNumber");
    }
}
