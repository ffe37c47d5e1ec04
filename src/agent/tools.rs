//! Local toolset exposed to the model.
//!
//! Four tools back the agent runtime:
//!
//! - `directory_read` - recursive file listing
//! - `file_read` - UTF-8 file contents
//! - `web_search` - DuckDuckGo instant-answer search (no key required)
//! - `website_fetch` - page fetch reduced to readable text
//!
//! Every tool output is capped by [`ToolSettings`] so a large file or page
//! cannot blow up the transcript. Invocation failures are returned as `Err`
//! and reported back to the model as tool output by the runtime.

use crate::config::ToolSettings;
use anyhow::{Context, Result, anyhow};
use regex::Regex;
use reqwest::blocking::Client as HttpClient;
use serde_json::{Value, json};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b.*?</script>").expect("Invalid script regex"));
static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b.*?</style>").expect("Invalid style regex"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("Invalid tag regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// The toolset handed to the agent runtime.
pub struct ToolKit {
    settings: ToolSettings,
    http_client: HttpClient,
}

impl ToolKit {
    pub fn new(settings: &ToolSettings) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(settings.http_timeout_seconds))
            .user_agent(concat!("dtwin/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build tool HTTP client")?;
        Ok(Self {
            settings: settings.clone(),
            http_client,
        })
    }

    /// OpenAI function definitions for every tool.
    pub fn definitions(&self) -> Vec<Value> {
        vec![
            json!({
                "type": "function",
                "function": {
                    "name": "directory_read",
                    "description": "Recursively list the files under a local directory.",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "path": {
                                "type": "string",
                                "description": "Directory to list."
                            }
                        },
                        "required": ["path"]
                    }
                }
            }),
            json!({
                "type": "function",
                "function": {
                    "name": "file_read",
                    "description": "Read the contents of a local UTF-8 text file.",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "path": {
                                "type": "string",
                                "description": "File to read."
                            }
                        },
                        "required": ["path"]
                    }
                }
            }),
            json!({
                "type": "function",
                "function": {
                    "name": "web_search",
                    "description": "Search the web and return short result summaries.",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "query": {
                                "type": "string",
                                "description": "Search query."
                            }
                        },
                        "required": ["query"]
                    }
                }
            }),
            json!({
                "type": "function",
                "function": {
                    "name": "website_fetch",
                    "description": "Fetch a web page and return its readable text.",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "url": {
                                "type": "string",
                                "description": "URL to fetch, including the scheme."
                            }
                        },
                        "required": ["url"]
                    }
                }
            }),
        ]
    }

    /// Invoke a tool by name with the given argument object.
    pub fn invoke(&self, name: &str, arguments: &Value) -> Result<String> {
        match name {
            "directory_read" => self.directory_read(required_str(arguments, "path")?),
            "file_read" => self.file_read(required_str(arguments, "path")?),
            "web_search" => self.web_search(required_str(arguments, "query")?),
            "website_fetch" => self.website_fetch(required_str(arguments, "url")?),
            other => Err(anyhow!("unknown tool '{other}'")),
        }
    }

    fn directory_read(&self, path: &str) -> Result<String> {
        let root = Path::new(path);
        if !root.is_dir() {
            return Err(anyhow!("'{path}' is not a directory"));
        }

        let cap = self.settings.max_directory_entries;
        let mut entries = Vec::new();
        let complete = collect_files(root, root, cap, &mut entries)?;
        entries.sort();

        if entries.is_empty() {
            return Ok(format!("(no files under '{path}')"));
        }

        let mut listing = entries.join("\n");
        if !complete {
            listing.push_str("\n... more entries omitted");
        }
        Ok(listing)
    }

    fn file_read(&self, path: &str) -> Result<String> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("read file '{path}'"))?;
        Ok(truncate_text(&content, self.settings.max_file_bytes))
    }

    fn web_search(&self, query: &str) -> Result<String> {
        // DuckDuckGo instant answer API, no key required
        let url = format!(
            "https://api.duckduckgo.com/?q={}&format=json&no_html=1&skip_disambig=1",
            urlencoding::encode(query)
        );
        let response = self
            .http_client
            .get(&url)
            .send()
            .context("send search request")?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("search request failed with status {status}"));
        }
        let payload: Value = response.json().context("parse search response")?;

        let results = extract_search_results(&payload, self.settings.max_search_results);
        if results.is_empty() {
            return Ok(format!("No instant-answer results for '{query}'."));
        }
        Ok(results.join("\n\n"))
    }

    fn website_fetch(&self, url: &str) -> Result<String> {
        let response = self
            .http_client
            .get(url)
            .send()
            .with_context(|| format!("fetch '{url}'"))?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("fetch of '{url}' failed with status {status}"));
        }
        let body = response.text().context("read page body")?;

        let text = html_to_text(&body);
        if text.is_empty() {
            return Ok(format!("(no readable text at '{url}')"));
        }
        Ok(truncate_text(&text, self.settings.max_page_bytes))
    }
}

/// Recursively collect regular files under `dir`, relative to `root`,
/// stopping once `cap` entries are collected. Hidden entries (leading dot)
/// and symlinks are skipped. Returns whether the walk saw everything.
fn collect_files(root: &Path, dir: &Path, cap: usize, out: &mut Vec<String>) -> Result<bool> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read directory '{}'", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("read directory '{}'", dir.display()))?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        // file_type() does not follow symlinks
        let file_type = entry
            .file_type()
            .with_context(|| format!("read directory '{}'", dir.display()))?;
        let path = entry.path();
        if file_type.is_dir() {
            if !collect_files(root, &path, cap, out)? {
                return Ok(false);
            }
        } else if file_type.is_file() {
            if out.len() >= cap {
                return Ok(false);
            }
            let rel = path.strip_prefix(root).unwrap_or(&path);
            out.push(rel.to_string_lossy().to_string());
        }
    }
    Ok(true)
}

/// Cap `text` at `max_bytes`, cutting on a char boundary and marking the cut.
fn truncate_text(text: &str, max_bytes: usize) -> String {
    if text.len() <= max_bytes {
        return text.to_string();
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}\n... (truncated)", &text[..end])
}

/// Pull the abstract and related-topic texts out of a DuckDuckGo
/// instant-answer payload.
fn extract_search_results(payload: &Value, limit: usize) -> Vec<String> {
    let mut results = Vec::new();

    if let Some(abstract_text) = payload["AbstractText"].as_str()
        && !abstract_text.is_empty()
    {
        results.push(abstract_text.to_string());
    }

    if let Some(related) = payload["RelatedTopics"].as_array() {
        for item in related {
            if results.len() >= limit {
                break;
            }
            if let Some(text) = item["Text"].as_str()
                && !text.is_empty()
            {
                results.push(text.to_string());
            }
        }
    }

    results.truncate(limit);
    results
}

/// Reduce an HTML document to readable text: scripts, styles, and tags
/// stripped, common entities decoded, whitespace collapsed.
fn html_to_text(html: &str) -> String {
    let without_scripts = SCRIPT_RE.replace_all(html, " ");
    let without_styles = STYLE_RE.replace_all(&without_scripts, " ");
    let without_tags = TAG_RE.replace_all(&without_styles, " ");
    let decoded = decode_entities(&without_tags);
    WHITESPACE_RE.replace_all(decoded.trim(), " ").to_string()
}

/// Decode the handful of entities that dominate page text. `&amp;` goes
/// last so double-encoded input stays encoded once.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Extract a required non-blank string field from a tool argument object.
fn required_str<'a>(arguments: &'a Value, key: &str) -> Result<&'a str> {
    arguments
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| anyhow!("tool arguments missing required string field '{key}'"))
}
