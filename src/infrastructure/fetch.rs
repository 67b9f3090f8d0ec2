//! Fetching raw category tree data from a MediaWiki API.
//!
//! The walk follows subcategories breadth-limited from the language's root
//! category, recording page counts from `categoryinfo`. A visited set keeps
//! the category graph a tree: a subcategory reachable twice is attached at
//! its first occurrence only, so construction downstream never sees a
//! duplicate id.

use std::collections::HashSet;

use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument, warn};

use crate::config::FetchConfig;
use crate::domain::{CategoryNode, NodeId, RawTreeData};
use crate::infrastructure::error::{InfraError, InfraResult};

/// Produces the raw tree snapshot for one language.
///
/// Trait seam so the pipeline can run against a stub in tests.
pub trait Fetcher {
    fn fetch(&self, language: &str) -> InfraResult<RawTreeData>;
}

/// Fetcher backed by a live MediaWiki API.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    root_category: String,
    max_fetch_depth: usize,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());

        Self {
            client,
            root_category: config.root_category.clone(),
            max_fetch_depth: config.max_fetch_depth,
        }
    }

    fn api_url(language: &str) -> String {
        format!("https://{}.wikipedia.org/w/api.php", language)
    }

    /// Page id and direct page count of a category, None if the category
    /// page does not exist (broken or redirected reference).
    fn category_info(&self, api: &str, title: &str) -> InfraResult<Option<(u64, u64)>> {
        let response: ApiResponse = self
            .client
            .get(api)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("prop", "categoryinfo"),
                ("titles", title),
            ])
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| InfraError::http(format!("categoryinfo for {}", title), e))?
            .json()
            .map_err(|e| InfraError::http(format!("decode categoryinfo for {}", title), e))?;

        let pages = response
            .query
            .ok_or_else(|| InfraError::ApiResponse(format!("no query block for {}", title)))?
            .pages
            .unwrap_or_default();

        let info = pages.into_values().next().and_then(|page| {
            let pageid = page.pageid?;
            let count = page.categoryinfo.map(|i| i.pages).unwrap_or(0);
            Some((pageid, count))
        });
        Ok(info)
    }

    /// Titles of direct subcategories, following API continuation.
    fn subcategories(&self, api: &str, title: &str) -> InfraResult<Vec<String>> {
        let mut titles = Vec::new();
        let mut cmcontinue: Option<String> = None;

        loop {
            let mut query = vec![
                ("action", "query".to_string()),
                ("format", "json".to_string()),
                ("list", "categorymembers".to_string()),
                ("cmtitle", title.to_string()),
                ("cmtype", "subcat".to_string()),
                ("cmlimit", "500".to_string()),
            ];
            if let Some(cont) = &cmcontinue {
                query.push(("cmcontinue", cont.clone()));
            }

            let response: ApiResponse = self
                .client
                .get(api)
                .query(&query)
                .send()
                .and_then(|r| r.error_for_status())
                .map_err(|e| InfraError::http(format!("categorymembers for {}", title), e))?
                .json()
                .map_err(|e| InfraError::http(format!("decode categorymembers for {}", title), e))?;

            if let Some(query_body) = response.query {
                for member in query_body.categorymembers.unwrap_or_default() {
                    titles.push(member.title);
                }
            }

            match response.cont.and_then(|c| c.cmcontinue) {
                Some(cont) => cmcontinue = Some(cont),
                None => break,
            }
        }
        Ok(titles)
    }

    fn fetch_node(
        &self,
        api: &str,
        title: &str,
        depth: usize,
        visited: &mut HashSet<String>,
    ) -> InfraResult<CategoryNode> {
        let name = title
            .split_once(':')
            .map(|(_, rest)| rest.to_string())
            .unwrap_or_else(|| title.to_string());

        let (id, name, page_count) = match self.category_info(api, title)? {
            Some((pageid, count)) => (NodeId::Int(pageid), Some(name), count),
            None => {
                warn!(title, "category did not resolve");
                (NodeId::Str(title.to_string()), None, 0)
            }
        };

        let mut children = Vec::new();
        if depth < self.max_fetch_depth {
            for child_title in self.subcategories(api, title)? {
                if !visited.insert(child_title.clone()) {
                    continue;
                }
                children.push(self.fetch_node(api, &child_title, depth + 1, visited)?);
            }
        }

        Ok(CategoryNode {
            id,
            name,
            page_count,
            children,
        })
    }
}

impl Fetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    fn fetch(&self, language: &str) -> InfraResult<RawTreeData> {
        let api = Self::api_url(language);
        let root_title = format!("Category:{}", self.root_category);

        let mut visited = HashSet::new();
        visited.insert(root_title.clone());
        let root = self.fetch_node(&api, &root_title, 0, &mut visited)?;
        debug!(language, nodes = visited.len(), "fetched category tree");

        let mut meta = serde_json::Map::new();
        meta.insert("language".into(), json!(language));
        meta.insert("root_category".into(), json!(self.root_category));
        meta.insert("fetched".into(), json!(Utc::now().to_rfc3339()));
        meta.insert("node_count".into(), json!(visited.len()));

        Ok(RawTreeData { meta, root })
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(rename = "continue")]
    cont: Option<Continuation>,
    query: Option<QueryBody>,
}

#[derive(Debug, Deserialize)]
struct Continuation {
    cmcontinue: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    pages: Option<std::collections::HashMap<String, PageEntry>>,
    categorymembers: Option<Vec<Member>>,
}

#[derive(Debug, Deserialize)]
struct PageEntry {
    pageid: Option<u64>,
    categoryinfo: Option<CategoryInfo>,
}

#[derive(Debug, Deserialize)]
struct CategoryInfo {
    pages: u64,
}

#[derive(Debug, Deserialize)]
struct Member {
    title: String,
}
