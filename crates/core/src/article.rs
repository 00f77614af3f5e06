//! Article records and the depot enum.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::CoreError;
use crate::types::ArticleId;

// ---------------------------------------------------------------------------
// Depot
// ---------------------------------------------------------------------------

/// Storage location of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Depot {
    #[default]
    #[serde(rename = "BLOC CENTRAL")]
    BlocCentral,
    #[serde(rename = "URGENCE")]
    Urgence,
}

impl Depot {
    /// Every depot, in display order. The first entry is the editor default.
    pub const ALL: [Depot; 2] = [Depot::BlocCentral, Depot::Urgence];

    /// Label shown in the table and the editor's select box.
    pub fn label(self) -> &'static str {
        match self {
            Self::BlocCentral => "BLOC CENTRAL",
            Self::Urgence => "URGENCE",
        }
    }
}

impl fmt::Display for Depot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Depot {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|depot| depot.label() == s)
            .ok_or_else(|| CoreError::Validation(format!("Dépôt inconnu : {s}")))
    }
}

// ---------------------------------------------------------------------------
// Article
// ---------------------------------------------------------------------------

/// A stock article as listed in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub id: ArticleId,
    pub name: String,
    pub depot: Depot,
    pub expiry_date: NaiveDate,
    pub quantity: u32,
}

/// The mutable part of an [`Article`], already validated.
///
/// Produced by [`EditorDraft::to_fields`](crate::editor::EditorDraft::to_fields)
/// and consumed by [`ArticleStore::upsert`](crate::store::ArticleStore::upsert).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFields {
    pub name: String,
    pub depot: Depot,
    pub expiry_date: NaiveDate,
    pub quantity: u32,
}

impl Article {
    pub(crate) fn from_fields(id: ArticleId, fields: ArticleFields) -> Self {
        Self {
            id,
            name: fields.name,
            depot: fields.depot,
            expiry_date: fields.expiry_date,
            quantity: fields.quantity,
        }
    }

    /// Copy of the mutable fields.
    pub fn fields(&self) -> ArticleFields {
        ArticleFields {
            name: self.name.clone(),
            depot: self.depot,
            expiry_date: self.expiry_date,
            quantity: self.quantity,
        }
    }

    /// Replace every mutable field; `id` is left alone.
    pub(crate) fn apply(&mut self, fields: ArticleFields) {
        self.name = fields.name;
        self.depot = fields.depot;
        self.expiry_date = fields.expiry_date;
        self.quantity = fields.quantity;
    }

    /// Add `delta` to the quantity, clamped to `0..=u32::MAX`.
    pub(crate) fn adjust_quantity(&mut self, delta: i64) {
        let next = i64::from(self.quantity)
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX));
        self.quantity = u32::try_from(next).unwrap_or(u32::MAX);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
