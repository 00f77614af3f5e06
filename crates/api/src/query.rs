//! Query-string and form types shared by the list page handlers.

use serde::{Deserialize, Serialize};
use stock_core::types::ArticleId;

use crate::error::AppError;

/// `editor` query value that opens the modal in create mode.
pub const EDITOR_NEW: &str = "new";

/// List page parameters (`?q=&editor=`).
///
/// `q` is the search text; `editor` is [`EDITOR_NEW`] or an article id and
/// opens the modal.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListParams {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub q: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
}

/// What the `editor` parameter asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorTarget {
    New,
    Edit(ArticleId),
}

impl ListParams {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            editor: None,
        }
    }

    pub fn with_editor(mut self, target: EditorTarget) -> Self {
        self.editor = Some(match target {
            EditorTarget::New => EDITOR_NEW.to_string(),
            EditorTarget::Edit(id) => id.to_string(),
        });
        self
    }

    pub fn editor_target(&self) -> Result<Option<EditorTarget>, AppError> {
        match self.editor.as_deref() {
            None | Some("") => Ok(None),
            Some(EDITOR_NEW) => Ok(Some(EditorTarget::New)),
            Some(raw) => raw
                .parse()
                .map(|id| Some(EditorTarget::Edit(id)))
                .map_err(|_| AppError::BadRequest(format!("invalid editor target: {raw}"))),
        }
    }

    /// Relative URL of the list page for these parameters.
    pub fn to_url(&self) -> String {
        match serde_urlencoded::to_string(self) {
            Ok(qs) if !qs.is_empty() => format!("/?{qs}"),
            _ => "/".to_string(),
        }
    }
}

/// List page URL for a search text, with the modal closed.
pub fn list_url(q: &str) -> String {
    ListParams::new(q).to_url()
}

/// Editor form submission. Every field arrives as raw text and is converted
/// through `DraftField::parse` so bad input becomes an inline message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub depot: String,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default)]
    pub quantity: String,
    /// Search text to return to.
    #[serde(default)]
    pub q: String,
}

impl ArticleForm {
    /// `(field name, raw value)` pairs in form order.
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("name", self.name.as_str()),
            ("expiry_date", self.expiry_date.as_str()),
            ("quantity", self.quantity.as_str()),
            ("depot", self.depot.as_str()),
        ]
    }
}

/// Increment/decrement button submission.
#[derive(Debug, Clone, Deserialize)]
pub struct QuantityForm {
    pub delta: i64,
    #[serde(default)]
    pub q: String,
}

/// Delete button submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReturnForm {
    #[serde(default)]
    pub q: String,
}
