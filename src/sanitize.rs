//! Normalization and validation of submitted tool fields.

use crate::db::NewTool;
use crate::error::ValidationError;
use serde::Deserialize;
use url::Url;

pub const TOOL_NAME_MAX_CHARS: usize = 120;
pub const DESCRIPTION_MAX_CHARS: usize = 600;

/// Collapses whitespace runs into single spaces, trims, and bounds the result to
/// `max_chars` characters.
pub fn clean_text(value: &str, max_chars: usize) -> String {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    let truncated: String = collapsed.chars().take(max_chars).collect();
    truncated.trim_end().to_string()
}

/// Syntactic check for an absolute `http`/`https` URL with a host.
pub fn is_valid_link(link: &str) -> bool {
    let Ok(url) = Url::parse(link) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    // The parser accepts `http:example.com` and `http:///example.com`, lifting the
    // first path segment into the host; require a non-empty authority after `://`.
    let has_authority = link.split_once("://").is_some_and(|(scheme, rest)| {
        scheme.eq_ignore_ascii_case(url.scheme())
            && rest.starts_with(|c: char| c != '/' && c != '\\')
    });

    has_authority && url.host_str().is_some_and(|host| !host.is_empty())
}

/// Raw `POST /add` form. Missing fields decode as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolForm {
    #[serde(default)]
    pub tool_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
}

impl ToolForm {
    /// Sanitizes the fields and checks them in order: presence, then link syntax.
    pub fn validate(self) -> Result<NewTool, ValidationError> {
        let tool_name = clean_text(&self.tool_name, TOOL_NAME_MAX_CHARS);
        let description = clean_text(&self.description, DESCRIPTION_MAX_CHARS);
        let link = self.link.trim().to_string();

        if tool_name.is_empty() || description.is_empty() || link.is_empty() {
            return Err(ValidationError::MissingField);
        }
        if !is_valid_link(&link) {
            return Err(ValidationError::InvalidLink);
        }

        Ok(NewTool {
            tool_name,
            description,
            link,
        })
    }
}
