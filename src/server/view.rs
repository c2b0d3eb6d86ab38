use crate::db::Tool;
use crate::error::ToolboardError;
use crate::sanitize::{DESCRIPTION_MAX_CHARS, TOOL_NAME_MAX_CHARS};
use crate::server::notice::Notice;
use handlebars::{Handlebars, RenderError};
use serde::Serialize;
use serde_json::json;

const INDEX_TEMPLATE: &str = "index";

/// Server-side HTML rendering.
pub struct View {
    registry: Handlebars<'static>,
}

#[derive(Serialize)]
struct ToolView<'a> {
    id: i64,
    tool_name: &'a str,
    description: &'a str,
    link: &'a str,
    created_at: String,
    created_at_iso: String,
}

impl<'a> From<&'a Tool> for ToolView<'a> {
    fn from(tool: &'a Tool) -> Self {
        Self {
            id: tool.id,
            tool_name: &tool.tool_name,
            description: &tool.description,
            link: &tool.link,
            created_at: tool.created_at.format("%Y-%m-%d %H:%M").to_string(),
            created_at_iso: tool.created_at.and_utc().to_rfc3339(),
        }
    }
}

impl View {
    pub fn new() -> Result<Self, ToolboardError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true); // fail if a variable is missing
        registry.register_template_string(
            INDEX_TEMPLATE,
            include_str!("../../templates/index.hbs"),
        )?;
        Ok(Self { registry })
    }

    /// Renders the list page. Text is HTML-escaped by the engine.
    pub fn render_index(&self, tools: &[Tool], notices: &[Notice]) -> Result<String, RenderError> {
        let tools: Vec<ToolView<'_>> = tools.iter().map(ToolView::from).collect();
        self.registry.render(
            INDEX_TEMPLATE,
            &json!({
                "tools": tools,
                "notices": notices,
                "tool_name_max": TOOL_NAME_MAX_CHARS,
                "description_max": DESCRIPTION_MAX_CHARS,
            }),
        )
    }
}
