//! Page resolution against the MediaWiki action API.

use std::future::Future;
use std::time::Duration;

use indexmap::IndexMap;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://de.wiktionary.org/w/api.php";
pub const DEFAULT_USER_AGENT: &str = concat!("dewikt/", env!("CARGO_PKG_VERSION"));
pub const INFLECTION_PREFIX: &str = "Flexion:";

/// Identification and timing for every outbound request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    pub user_agent: String,
    pub accept_header: String,
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_header: "application/json".to_string(),
            timeout_ms: 10_000,
        }
    }
}

/// One search candidate, as the search endpoint returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRef {
    pub pageid: u64,
    #[serde(default)]
    pub ns: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

/// Rendered markup of one section of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSection {
    pub page_id: u64,
    pub title: String,
    pub markup: String,
}

impl PageSection {
    /// Stand-in for a page the API did not return. Assembles to an entry with
    /// no sections.
    pub fn placeholder(page_id: u64) -> Self {
        Self {
            page_id,
            title: String::new(),
            markup: String::new(),
        }
    }
}

/// Where pages come from. Implemented over HTTP by [`WikiClient`] and by
/// in-memory stubs in tests.
pub trait PageSource: Send + Sync {
    /// Candidate pages whose title starts with `query`, in relevance order.
    fn find_candidate_pages(&self, query: &str) -> impl Future<Output = Result<Vec<PageRef>>> + Send;

    fn fetch_page_section(&self, page_id: u64, section: u32) -> impl Future<Output = Result<PageSection>> + Send;

    fn inflection_prefix(&self) -> &str {
        INFLECTION_PREFIX
    }

    /// The `Flexion:<word>` page, if one exists with exactly that title.
    fn find_inflection_page(
        &self,
        word: &str,
        section: u32,
    ) -> impl Future<Output = Result<Option<PageSection>>> + Send {
        let wanted = format!("{}{}", self.inflection_prefix(), word.trim());
        async move {
            let candidates = self.find_candidate_pages(&wanted).await?;
            let Some(page) = candidates.into_iter().find(|p| p.title.trim() == wanted) else {
                debug!("No inflection page for {:?}", wanted);
                return Ok(None);
            };
            let fetched = self.fetch_page_section(page.pageid, section).await?;
            Ok(Some(fetched))
        }
    }
}

pub struct WikiClient {
    http: reqwest::Client,
    api_url: String,
    search_limit: u32,
    inflection_prefix: String,
}

impl WikiClient {
    pub fn new(api_url: &str, search_limit: u32, inflection_prefix: &str, client: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value("user agent", &client.user_agent)?);
        headers.insert(ACCEPT, header_value("accept header", &client.accept_header)?);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(client.timeout_ms))
            .build()
            .map_err(|e| Error::Config(config::ConfigError::Message(format!("http client: {}", e))))?;

        info!("Upstream {} (timeout {}ms)", api_url, client.timeout_ms);
        Ok(Self {
            http,
            api_url: api_url.to_string(),
            search_limit,
            inflection_prefix: inflection_prefix.to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, params: &[(&str, String)]) -> Result<T> {
        debug!("GET {} {:?}", self.api_url, params);
        let response = self.http.get(&self.api_url).query(params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Upstream {
                message: format!("upstream answered {}", status),
                status: Some(status.as_u16()),
                status_text: status.canonical_reason().map(str::to_string),
                source: None,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| Error::Config(config::ConfigError::Message(format!("invalid {} {:?}: {}", name, value, e))))
}

impl PageSource for WikiClient {
    async fn find_candidate_pages(&self, query: &str) -> Result<Vec<PageRef>> {
        let params = [
            ("action", "query".to_string()),
            ("format", "json".to_string()),
            ("generator", "prefixsearch".to_string()),
            ("gpslimit", self.search_limit.to_string()),
            ("gpssearch", query.to_string()),
        ];
        let response: SearchResponse = self.get_json(&params).await?;
        let pages = search_pages(response);
        debug!("Search {:?}: {} candidate(s)", query, pages.len());
        Ok(pages)
    }

    async fn fetch_page_section(&self, page_id: u64, section: u32) -> Result<PageSection> {
        let params = [
            ("action", "parse".to_string()),
            ("format", "json".to_string()),
            ("pageid", page_id.to_string()),
            ("section", section.to_string()),
        ];
        let response: ParseResponse = self.get_json(&params).await?;
        Ok(page_section(response, page_id))
    }

    fn inflection_prefix(&self) -> &str {
        &self.inflection_prefix
    }
}

// ── Response shapes ──

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    pages: IndexMap<String, PageRef>,
}

#[derive(Debug, Default, Deserialize)]
struct ParseResponse {
    #[serde(default)]
    parse: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ParseBody {
    title: String,
    pageid: u64,
    text: ParseText,
}

/// `formatversion=1` wraps the html in `{"*": …}`, `formatversion=2` does not.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ParseText {
    Wrapped {
        #[serde(rename = "*")]
        html: String,
    },
    Plain(String),
}

/// Pages keyed by id come back unordered; the search rank is in `index`.
fn search_pages(response: SearchResponse) -> Vec<PageRef> {
    let mut pages: Vec<PageRef> = response
        .query
        .map(|q| q.pages.into_values().collect())
        .unwrap_or_default();
    pages.sort_by_key(|p| p.index.unwrap_or(u32::MAX));
    pages
}

fn page_section(response: ParseResponse, page_id: u64) -> PageSection {
    let body = response
        .parse
        .and_then(|value| serde_json::from_value::<ParseBody>(value).ok());
    match body {
        Some(body) => PageSection {
            page_id: body.pageid,
            title: body.title,
            markup: match body.text {
                ParseText::Wrapped { html } | ParseText::Plain(html) => html,
            },
        },
        None => {
            warn!("No parse result for page {}", page_id);
            PageSection::placeholder(page_id)
        }
    }
}

// ── Tests ──
