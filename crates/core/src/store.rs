//! In-memory, ordered article collection.
//!
//! The store is the single owner of the article list. Every operation is
//! synchronous; the API layer serializes callers with a lock.

use chrono::NaiveDate;

use crate::article::{Article, ArticleFields, Depot};
use crate::error::CoreError;
use crate::types::ArticleId;

/// Entity name reported in [`CoreError::NotFound`].
const ENTITY: &str = "Article";

/// Ordered collection of articles plus the id sequence.
#[derive(Debug, Clone)]
pub struct ArticleStore {
    articles: Vec<Article>,
    /// Next id to hand out. Only ever grows, so deleted ids are not reused.
    next_id: ArticleId,
}

impl Default for ArticleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleStore {
    /// An empty store whose first id is 1.
    pub fn new() -> Self {
        Self {
            articles: Vec::new(),
            next_id: 1,
        }
    }

    /// The startup collection: two articles with ids 1 and 2.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        for fields in seed_fields() {
            store.insert(fields);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Article> {
        self.articles.iter()
    }

    pub fn get(&self, id: ArticleId) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    /// Articles whose name contains `query`, ignoring case, in store order.
    ///
    /// An empty query matches everything. The result is recomputed on every
    /// call.
    pub fn filter(&self, query: &str) -> Vec<&Article> {
        let needle = query.to_lowercase();
        self.articles
            .iter()
            .filter(|a| needle.is_empty() || a.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Set the quantity of `id` to `max(0, quantity + delta)`.
    ///
    /// Returns [`CoreError::NotFound`] without touching the collection when
    /// the id is absent.
    pub fn adjust_quantity(&mut self, id: ArticleId, delta: i64) -> Result<&Article, CoreError> {
        let article = self.find_mut(id)?;
        article.adjust_quantity(delta);
        Ok(&*article)
    }

    /// Remove and return the article with `id`.
    pub fn remove(&mut self, id: ArticleId) -> Result<Article, CoreError> {
        let index = self
            .articles
            .iter()
            .position(|a| a.id == id)
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
        Ok(self.articles.remove(index))
    }

    /// Update-or-insert.
    ///
    /// With `existing_id`, the fields of that article are replaced in place
    /// (id and position kept); an unknown id is [`CoreError::NotFound`] and
    /// nothing is appended. Without it, a new article is appended under a
    /// fresh id.
    pub fn upsert(
        &mut self,
        fields: ArticleFields,
        existing_id: Option<ArticleId>,
    ) -> Result<&Article, CoreError> {
        match existing_id {
            Some(id) => {
                let article = self.find_mut(id)?;
                article.apply(fields);
                Ok(&*article)
            }
            None => Ok(self.insert(fields)),
        }
    }

    fn insert(&mut self, fields: ArticleFields) -> &Article {
        let id = self.next_id;
        self.next_id += 1;
        let index = self.articles.len();
        self.articles.push(Article::from_fields(id, fields));
        &self.articles[index]
    }

    fn find_mut(&mut self, id: ArticleId) -> Result<&mut Article, CoreError> {
        self.articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(CoreError::NotFound { entity: ENTITY, id })
    }
}

fn seed_fields() -> [ArticleFields; 2] {
    [
        ArticleFields {
            name: "DOLIPRANE 1000 mg".into(),
            depot: Depot::BlocCentral,
            expiry_date: NaiveDate::from_ymd_opt(2024, 12, 29).unwrap_or_default(),
            quantity: 4,
        },
        ArticleFields {
            name: "DOLVEN 400 mg".into(),
            depot: Depot::Urgence,
            expiry_date: NaiveDate::from_ymd_opt(2024, 12, 30).unwrap_or_default(),
            quantity: 2,
        },
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
