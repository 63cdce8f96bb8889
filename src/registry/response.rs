use serde::Serialize;
use serde_json::Value;

/// Value returned by a command handler, rendered by the UI per kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum CommandResponse {
    /// Nothing to show.
    Empty,
    /// Plain text.
    Text(String),
    /// Structured data.
    Json(Value),
    /// Rows under column headers.
    Table {
        /// Column headers.
        headers: Vec<String>,
        /// Row cells, one vector per row.
        rows: Vec<Vec<String>>,
    },
    /// An image reference.
    Image {
        /// URL or file path.
        source: String,
        /// Alternative text.
        alt: String,
    },
    /// Rendered markup such as Markdown.
    Markup(String),
    /// A kind the core does not know; renderers fall back for it.
    Custom {
        /// Kind name.
        kind: String,
        /// Payload.
        data: Value,
    },
}

/// Discriminant of a [`CommandResponse`], used to pick a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKind {
    /// [`CommandResponse::Empty`]
    Empty,
    /// [`CommandResponse::Text`]
    Text,
    /// [`CommandResponse::Json`]
    Json,
    /// [`CommandResponse::Table`]
    Table,
    /// [`CommandResponse::Image`]
    Image,
    /// [`CommandResponse::Markup`]
    Markup,
    /// [`CommandResponse::Custom`]
    Custom,
}

impl CommandResponse {
    /// Plain text response.
    pub fn text(text: impl Into<String>) -> Self {
        CommandResponse::Text(text.into())
    }

    /// Structured response.
    pub fn json(value: Value) -> Self {
        CommandResponse::Json(value)
    }

    /// The response's kind.
    pub fn kind(&self) -> ResponseKind {
        match self {
            CommandResponse::Empty => ResponseKind::Empty,
            CommandResponse::Text(_) => ResponseKind::Text,
            CommandResponse::Json(_) => ResponseKind::Json,
            CommandResponse::Table { .. } => ResponseKind::Table,
            CommandResponse::Image { .. } => ResponseKind::Image,
            CommandResponse::Markup(_) => ResponseKind::Markup,
            CommandResponse::Custom { .. } => ResponseKind::Custom,
        }
    }
}
