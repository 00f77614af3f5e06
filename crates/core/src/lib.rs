//! Stock list domain: articles, the in-memory article store, the list view
//! state and the article editor.
//!
//! This crate has no I/O. The API layer owns a shared [`store::ArticleStore`]
//! and drives it through the operations defined here.

pub mod article;
pub mod date;
pub mod editor;
pub mod error;
pub mod list_view;
pub mod store;
pub mod types;

#[cfg(test)]
mod proptests;
