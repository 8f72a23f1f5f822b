// API client module: a small blocking HTTP client for one Notion database.
// Each operation is a single synchronous request, except listing, which
// walks the query cursor one page at a time.

use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::model::{
    ArchiveRequest, CreatePageRequest, NewRecordProperties, Page, Parent, QueryRequest,
    QueryResponse, UpdatePageRequest,
};

/// Page size used when every record is requested.
pub const FULL_PAGE_SIZE: u32 = 100;

const NOTION_VERSION: &str = "notion-version";

/// Simple API client that holds a reqwest blocking client (with the auth,
/// content-type and version headers preset) and the database it targets.
pub struct ApiClient {
    client: Client,
    base_url: String,
    database_id: String,
}

/// Status and JSON body of a response, passed back untouched whether or
/// not the call succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Value,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn read(res: Response) -> Result<Self> {
        let status = res.status().as_u16();
        let text = res.text().context("Failed to read response body")?;
        // Proxies and gateways can answer with an empty or HTML body.
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Ok(RawResponse { status, body })
    }
}

impl ApiClient {
    /// Create an ApiClient from an explicit configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("notion-automation/", env!("CARGO_PKG_VERSION")))
            .default_headers(default_headers(config)?)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: config.base_url.clone(),
            database_id: config.database_id.clone(),
        })
    }

    /// Create a record. The description lands in the `URL` property and the
    /// title in `Title`; `Published` is set to now (UTC).
    #[instrument(skip(self))]
    pub fn create(&self, title: &str, description: &str) -> Result<RawResponse> {
        let url = format!("{}/pages", self.base_url);
        let payload = CreatePageRequest {
            parent: Parent {
                database_id: &self.database_id,
            },
            properties: NewRecordProperties::new(title, description, Utc::now().to_rfc3339()),
        };
        debug!(%url, "creating page");
        let res = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .context("Failed to send create request")?;
        log_outcome("create", RawResponse::read(res))
    }

    /// Fetch records from the database. `None` fetches everything, 100 per
    /// page; `Some(n)` fetches a single page of `n` records.
    pub fn list(&self, count: Option<u32>) -> Result<Vec<Page>> {
        self.query_pages(count, |_| {})
    }

    /// Same as [`ApiClient::list`], calling `on_page` after every page
    /// received with the number of records collected so far.
    #[instrument(skip(self, on_page))]
    pub fn query_pages<F>(&self, count: Option<u32>, mut on_page: F) -> Result<Vec<Page>>
    where
        F: FnMut(usize),
    {
        let url = format!("{}/databases/{}/query", self.base_url, self.database_id);
        let get_all = count.is_none();
        let page_size = count.unwrap_or(FULL_PAGE_SIZE);

        let mut data = self.query(&url, page_size, None)?;
        let mut results = std::mem::take(&mut data.results);
        on_page(results.len());

        while get_all && data.has_more {
            let Some(cursor) = data.next_cursor.take() else {
                warn!("query reported more results without a cursor, stopping");
                break;
            };
            data = self.query(&url, page_size, Some(&cursor))?;
            results.append(&mut data.results);
            on_page(results.len());
        }

        info!(records = results.len(), "query finished");
        Ok(results)
    }

    fn query(&self, url: &str, page_size: u32, start_cursor: Option<&str>) -> Result<QueryResponse> {
        let payload = QueryRequest {
            page_size,
            start_cursor,
        };
        debug!(page_size, ?start_cursor, "querying database");
        let res = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .context("Failed to send query request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Query failed: {} - {}", status, txt);
        }
        res.json().context("Parsing query response json")
    }

    /// Set the `Published` date of a record. The date string is passed
    /// through unchecked.
    #[instrument(skip(self))]
    pub fn update(&self, page_id: &str, new_date: &str) -> Result<RawResponse> {
        self.patch_page("update", page_id, &UpdatePageRequest::published(new_date))
    }

    /// Archive (soft-delete) a record.
    #[instrument(skip(self))]
    pub fn archive(&self, page_id: &str) -> Result<RawResponse> {
        self.patch_page("archive", page_id, &ArchiveRequest { archived: true })
    }

    fn patch_page<B: Serialize>(&self, op: &str, page_id: &str, body: &B) -> Result<RawResponse> {
        let url = format!("{}/pages/{}", self.base_url, page_id);
        debug!(%url, op, "patching page");
        let res = self
            .client
            .patch(&url)
            .json(body)
            .send()
            .with_context(|| format!("Failed to send {} request", op))?;
        log_outcome(op, RawResponse::read(res))
    }
}

fn default_headers(config: &Config) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
        .context("Token contains characters not allowed in a header")?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        HeaderName::from_static(NOTION_VERSION),
        HeaderValue::from_str(&config.notion_version).context("Invalid Notion-Version value")?,
    );
    Ok(headers)
}

fn log_outcome(op: &str, res: Result<RawResponse>) -> Result<RawResponse> {
    if let Ok(raw) = &res {
        if raw.is_success() {
            info!(op, status = raw.status, "request succeeded");
        } else {
            warn!(op, status = raw.status, "service rejected request");
        }
    }
    res
}
