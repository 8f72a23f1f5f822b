// Wire model: typed shapes for the Notion page and database-query endpoints.
// Property values are nested inside the envelope Notion's property model
// requires (`{"title": [{"text": {"content": ..}}]}` and friends), so every
// level gets its own struct instead of a free-form map.

use serde::{Deserialize, Serialize};

/// Name of the title property holding the record's link text.
pub const URL_PROPERTY: &str = "URL";
/// Name of the rich-text property holding the record's title.
pub const TITLE_PROPERTY: &str = "Title";
/// Name of the date property holding the publication date.
pub const PUBLISHED_PROPERTY: &str = "Published";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TextContent {
    pub content: String,
}

/// One rich-text segment. Only `text` segments are written; segments of
/// other kinds (mentions, equations) come back with `plain_text` only.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RichText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,
}

impl RichText {
    pub fn plain(content: impl Into<String>) -> Self {
        RichText {
            text: Some(TextContent {
                content: content.into(),
            }),
            plain_text: None,
        }
    }

    fn as_str(&self) -> &str {
        match (&self.text, &self.plain_text) {
            (Some(t), _) => &t.content,
            (None, Some(p)) => p,
            (None, None) => "",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TitleProperty {
    pub title: Vec<RichText>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RichTextProperty {
    pub rich_text: Vec<RichText>,
}

/// `end` is always sent, as `null` when absent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DateValue {
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DateProperty {
    pub date: Option<DateValue>,
}

impl DateProperty {
    pub fn starting(start: impl Into<String>) -> Self {
        DateProperty {
            date: Some(DateValue {
                start: start.into(),
                end: None,
            }),
        }
    }
}

/// Property set written when a record is created.
///
/// The description goes into the `URL` title property and the title into
/// the `Title` rich-text property. Existing databases are laid out this way,
/// so the mapping is kept as is.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewRecordProperties {
    #[serde(rename = "URL")]
    pub url: TitleProperty,
    #[serde(rename = "Title")]
    pub title: RichTextProperty,
    #[serde(rename = "Published")]
    pub published: DateProperty,
}

impl NewRecordProperties {
    pub fn new(title: &str, description: &str, published: impl Into<String>) -> Self {
        NewRecordProperties {
            url: TitleProperty {
                title: vec![RichText::plain(description)],
            },
            title: RichTextProperty {
                rich_text: vec![RichText::plain(title)],
            },
            published: DateProperty::starting(published),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Parent<'a> {
    pub database_id: &'a str,
}

/// Body of `POST /pages`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CreatePageRequest<'a> {
    pub parent: Parent<'a>,
    pub properties: NewRecordProperties,
}

/// The only property an update touches.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PublishedPatch {
    #[serde(rename = "Published")]
    pub published: DateProperty,
}

/// Body of `PATCH /pages/{id}` for a date update.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UpdatePageRequest {
    pub properties: PublishedPatch,
}

impl UpdatePageRequest {
    pub fn published(new_date: impl Into<String>) -> Self {
        UpdatePageRequest {
            properties: PublishedPatch {
                published: DateProperty::starting(new_date),
            },
        }
    }
}

/// Body of `PATCH /pages/{id}` for an archive.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ArchiveRequest {
    pub archived: bool,
}

/// Body of `POST /databases/{id}/query`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QueryRequest<'a> {
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<&'a str>,
}

/// One page of query results.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct QueryResponse {
    pub results: Vec<Page>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// The properties this client reads back. Records written by other tools
/// may lack any of them.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PageProperties {
    #[serde(rename = "URL", default)]
    pub url: Option<TitleProperty>,
    #[serde(rename = "Title", default)]
    pub title: Option<RichTextProperty>,
    #[serde(rename = "Published", default)]
    pub published: Option<DateProperty>,
}

/// A database record as returned by a query.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub properties: PageProperties,
}

impl Page {
    /// Text of the first segment of the `URL` property.
    pub fn url_text(&self) -> &str {
        self.properties
            .url
            .as_ref()
            .and_then(|p| p.title.first())
            .map(RichText::as_str)
            .unwrap_or("")
    }

    /// Text of the first segment of the `Title` property.
    pub fn title_text(&self) -> &str {
        self.properties
            .title
            .as_ref()
            .and_then(|p| p.rich_text.first())
            .map(RichText::as_str)
            .unwrap_or("")
    }

    /// Start of the `Published` date, as the service sent it.
    pub fn published_start(&self) -> &str {
        self.properties
            .published
            .as_ref()
            .and_then(|p| p.date.as_ref())
            .map(|d| d.start.as_str())
            .unwrap_or("")
    }
}
