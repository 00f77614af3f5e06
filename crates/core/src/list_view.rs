//! State behind the article list page: the search text and the editor modal.

use crate::article::Article;
use crate::editor::EditorState;
use crate::store::ArticleStore;

/// Search text plus editor state. The rows themselves are derived from the
/// store on every render and never cached here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleListView {
    search_text: String,
    editor: EditorState,
}

impl ArticleListView {
    pub fn new(search_text: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            editor: EditorState::Closed,
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorState {
        &mut self.editor
    }

    /// Rows to display for the current search text.
    pub fn visible_rows<'s>(&self, store: &'s ArticleStore) -> Vec<&'s Article> {
        store.filter(&self.search_text)
    }

    /// Open the modal: `None` creates, `Some` edits a copy of the article.
    pub fn open_editor(&mut self, article: Option<&Article>) {
        self.editor = match article {
            Some(article) => EditorState::open_edit(article),
            None => EditorState::open_create(),
        };
    }

    pub fn close_editor(&mut self) {
        self.editor.close();
    }

    /// One click on an add/edit/close control: open when closed, close when
    /// open.
    pub fn toggle_editor(&mut self, article: Option<&Article>) {
        if self.editor.is_open() {
            self.close_editor();
        } else {
            self.open_editor(article);
        }
    }
}
