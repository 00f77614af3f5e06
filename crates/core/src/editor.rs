//! Article editor: the draft being edited and the modal's open/closed state.
//!
//! The editor works on an [`EditorDraft`], a detached copy of an article's
//! fields. Nothing reaches the store until [`EditorState::submit`] validates
//! the draft and applies [`ArticleStore::upsert`]. Closing without
//! submitting drops the draft.

use chrono::NaiveDate;
use validator::Validate;

use crate::article::{Article, ArticleFields, Depot};
use crate::date::parse_form_date;
use crate::error::CoreError;
use crate::store::ArticleStore;
use crate::types::ArticleId;

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// Fields checked by the validator, in the order messages are reported.
const VALIDATED_FIELDS: [&str; 3] = ["name", "expiry_date", "quantity"];

/// Editor-local copy of an article's fields.
///
/// `quantity` is signed so that a negative entry can be reported instead of
/// silently clamped. `Default` is the blank draft used when creating.
#[derive(Debug, Clone, PartialEq, Eq, Default, Validate)]
pub struct EditorDraft {
    #[validate(length(min = 1, message = "Le nom est obligatoire."))]
    pub name: String,
    pub depot: Depot,
    #[validate(required(message = "La date de péremption est obligatoire."))]
    pub expiry_date: Option<NaiveDate>,
    #[validate(range(min = 0, message = "La quantité doit être positive ou nulle."))]
    pub quantity: i64,
}

/// One typed field update. The variants are exactly the draft's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftField {
    Name(String),
    Depot(Depot),
    ExpiryDate(Option<NaiveDate>),
    Quantity(i64),
}

impl DraftField {
    /// Convert a raw form value for the field called `field`.
    pub fn parse(field: &str, raw: &str) -> Result<Self, CoreError> {
        match field {
            "name" => Ok(Self::Name(raw.to_string())),
            "depot" => raw.parse().map(Self::Depot),
            "expiry_date" => parse_form_date(raw).map(Self::ExpiryDate),
            "quantity" => raw.trim().parse().map(Self::Quantity).map_err(|_| {
                CoreError::Validation("La quantité doit être un nombre entier.".into())
            }),
            other => Err(CoreError::Validation(format!("Champ inconnu : {other}"))),
        }
    }
}

impl EditorDraft {
    /// Draft initialised from an existing article.
    pub fn from_article(article: &Article) -> Self {
        Self {
            name: article.name.clone(),
            depot: article.depot,
            expiry_date: Some(article.expiry_date),
            quantity: i64::from(article.quantity),
        }
    }

    /// Apply one field update. A new date replaces the old one wholesale.
    pub fn set_field(&mut self, field: DraftField) {
        match field {
            DraftField::Name(name) => self.name = name.trim().to_string(),
            DraftField::Depot(depot) => self.depot = depot,
            DraftField::ExpiryDate(date) => self.expiry_date = date,
            DraftField::Quantity(quantity) => self.quantity = quantity,
        }
    }

    /// Every problem that blocks submission, empty when the draft is valid.
    pub fn validation_messages(&self) -> Vec<String> {
        self.field_messages()
            .into_iter()
            .map(|(_, message)| message)
            .collect()
    }

    /// Like [`validation_messages`](Self::validation_messages), each message
    /// paired with the name of the field it is about.
    pub fn field_messages(&self) -> Vec<(&'static str, String)> {
        let mut messages = Vec::new();

        if let Err(errors) = Validate::validate(self) {
            let by_field = errors.field_errors();
            for field in VALIDATED_FIELDS {
                let Some(list) = by_field.get(field) else {
                    continue;
                };
                messages.extend(list.iter().map(|e| {
                    let message = match &e.message {
                        Some(message) => message.to_string(),
                        None => format!("{field}: {}", e.code),
                    };
                    (field, message)
                }));
            }
        }

        if self.quantity > i64::from(u32::MAX) {
            messages.push(("quantity", "La quantité est trop grande.".into()));
        }

        messages
    }

    /// Validated field set, or every failure joined into one
    /// [`CoreError::Validation`].
    pub fn to_fields(&self) -> Result<ArticleFields, CoreError> {
        let messages = self.validation_messages();
        if !messages.is_empty() {
            return Err(CoreError::Validation(messages.join(" ")));
        }

        let (Some(expiry_date), Ok(quantity)) = (self.expiry_date, u32::try_from(self.quantity))
        else {
            return Err(CoreError::Validation("Formulaire incomplet.".into()));
        };

        Ok(ArticleFields {
            name: self.name.clone(),
            depot: self.depot,
            expiry_date,
            quantity,
        })
    }
}

// ---------------------------------------------------------------------------
// Editor state machine
// ---------------------------------------------------------------------------

/// Modal state: closed, creating a new article, or editing `target`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorState {
    #[default]
    Closed,
    OpenCreate {
        draft: EditorDraft,
    },
    OpenEdit {
        target: ArticleId,
        draft: EditorDraft,
    },
}

impl EditorState {
    /// Open with a blank draft.
    pub fn open_create() -> Self {
        Self::OpenCreate {
            draft: EditorDraft::default(),
        }
    }

    /// Open on a copy of `article`.
    pub fn open_edit(article: &Article) -> Self {
        Self::OpenEdit {
            target: article.id,
            draft: EditorDraft::from_article(article),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Id of the article being edited; `None` when closed or creating.
    pub fn target(&self) -> Option<ArticleId> {
        match self {
            Self::OpenEdit { target, .. } => Some(*target),
            _ => None,
        }
    }

    pub fn draft(&self) -> Option<&EditorDraft> {
        match self {
            Self::Closed => None,
            Self::OpenCreate { draft } | Self::OpenEdit { draft, .. } => Some(draft),
        }
    }

    /// Update one field of the open draft.
    pub fn set_field(&mut self, field: DraftField) -> Result<(), CoreError> {
        match self {
            Self::Closed => Err(closed_error()),
            Self::OpenCreate { draft } | Self::OpenEdit { draft, .. } => {
                draft.set_field(field);
                Ok(())
            }
        }
    }

    /// Discard the draft.
    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// Validate the draft, upsert it and close.
    ///
    /// On error the state and the store are left untouched so the user can
    /// correct the form.
    pub fn submit(&mut self, store: &mut ArticleStore) -> Result<ArticleId, CoreError> {
        let (draft, target) = match self {
            Self::Closed => return Err(closed_error()),
            Self::OpenCreate { draft } => (draft, None),
            Self::OpenEdit { target, draft } => (draft, Some(*target)),
        };

        let fields = draft.to_fields()?;
        let id = store.upsert(fields, target)?.id;
        self.close();
        Ok(id)
    }
}

fn closed_error() -> CoreError {
    CoreError::Validation("Aucun formulaire n'est ouvert.".into())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_draft() -> EditorDraft {
        EditorDraft {
            name: "SPASFON".into(),
            depot: Depot::Urgence,
            expiry_date: Some(date(2025, 3, 1)),
            quantity: 12,
        }
    }

    // -- draft ---------------------------------------------------------------

    #[test]
    fn blank_draft_defaults() {
        let draft = EditorDraft::default();
        assert_eq!(draft.name, "");
        assert_eq!(draft.depot, Depot::BlocCentral);
        assert_eq!(draft.expiry_date, None);
        assert_eq!(draft.quantity, 0);
    }

    #[test]
    fn draft_copies_article() {
        let store = ArticleStore::seeded();
        let draft = EditorDraft::from_article(store.get(2).unwrap());
        assert_eq!(draft.name, "DOLVEN 400 mg");
        assert_eq!(draft.depot, Depot::Urgence);
        assert_eq!(draft.expiry_date, Some(date(2024, 12, 30)));
        assert_eq!(draft.quantity, 2);
    }

    #[test]
    fn parse_known_fields() {
        assert_eq!(
            DraftField::parse("name", "DOLIPRANE").unwrap(),
            DraftField::Name("DOLIPRANE".into())
        );
        assert_eq!(
            DraftField::parse("depot", "URGENCE").unwrap(),
            DraftField::Depot(Depot::Urgence)
        );
        assert_eq!(
            DraftField::parse("expiry_date", "2025-01-05").unwrap(),
            DraftField::ExpiryDate(Some(date(2025, 1, 5)))
        );
        assert_eq!(
            DraftField::parse("expiry_date", "").unwrap(),
            DraftField::ExpiryDate(None)
        );
        assert_eq!(
            DraftField::parse("quantity", "-3").unwrap(),
            DraftField::Quantity(-3)
        );
    }

    #[test]
    fn parse_rejects_unknown_field_and_bad_values() {
        assert_matches!(DraftField::parse("id", "4"), Err(CoreError::Validation(_)));
        assert_matches!(DraftField::parse("quantity", "abc"), Err(CoreError::Validation(_)));
        assert_matches!(DraftField::parse("quantity", ""), Err(CoreError::Validation(_)));
        assert_matches!(DraftField::parse("depot", "CAVE"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn set_field_trims_name_and_replaces_date() {
        let mut draft = valid_draft();
        draft.set_field(DraftField::Name("  SPASFON LYOC  ".into()));
        draft.set_field(DraftField::ExpiryDate(Some(date(2026, 6, 1))));
        assert_eq!(draft.name, "SPASFON LYOC");
        assert_eq!(draft.expiry_date, Some(date(2026, 6, 1)));
    }

    #[test]
    fn valid_draft_has_no_messages() {
        assert!(valid_draft().validation_messages().is_empty());
        let fields = valid_draft().to_fields().unwrap();
        assert_eq!(fields.quantity, 12);
        assert_eq!(fields.expiry_date, date(2025, 3, 1));
    }

    #[test]
    fn blank_draft_reports_name_and_date() {
        let messages = EditorDraft::default().validation_messages();
        assert_eq!(
            messages,
            [
                "Le nom est obligatoire.",
                "La date de péremption est obligatoire."
            ]
        );
    }

    #[test]
    fn whitespace_name_is_empty() {
        let mut draft = valid_draft();
        draft.set_field(DraftField::Name("   ".into()));
        assert_matches!(draft.to_fields(), Err(CoreError::Validation(msg)) if msg.contains("nom"));
    }

    #[test]
    fn field_messages_name_their_field() {
        let mut draft = EditorDraft::default();
        draft.set_field(DraftField::Quantity(-2));
        let fields: Vec<_> = draft
            .field_messages()
            .into_iter()
            .map(|(field, _)| field)
            .collect();
        assert_eq!(fields, ["name", "expiry_date", "quantity"]);
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let mut draft = valid_draft();
        draft.set_field(DraftField::Quantity(-1));
        assert_eq!(
            draft.validation_messages(),
            ["La quantité doit être positive ou nulle."]
        );
    }

    #[test]
    fn oversized_quantity_is_rejected() {
        let mut draft = valid_draft();
        draft.set_field(DraftField::Quantity(i64::from(u32::MAX) + 1));
        assert_matches!(draft.to_fields(), Err(CoreError::Validation(_)));
    }

    // -- state machine -------------------------------------------------------

    #[test]
    fn transitions() {
        let store = ArticleStore::seeded();

        let mut state = EditorState::default();
        assert!(!state.is_open());

        state = EditorState::open_create();
        assert!(state.is_open());
        assert_eq!(state.target(), None);
        assert_eq!(state.draft(), Some(&EditorDraft::default()));

        state.close();
        assert_eq!(state, EditorState::Closed);

        state = EditorState::open_edit(store.get(1).unwrap());
        assert_eq!(state.target(), Some(1));
        assert_eq!(state.draft().unwrap().name, "DOLIPRANE 1000 mg");
    }

    #[test]
    fn submit_edit_updates_in_place_and_closes() {
        let mut store = ArticleStore::seeded();
        let mut state = EditorState::open_edit(store.get(1).unwrap());
        state.set_field(DraftField::Quantity(10)).unwrap();

        let id = state.submit(&mut store).unwrap();

        assert_eq!(id, 1);
        assert_eq!(state, EditorState::Closed);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).unwrap().quantity, 10);
        assert_eq!(store.get(1).unwrap().name, "DOLIPRANE 1000 mg");
    }

    #[test]
    fn submit_create_appends() {
        let mut store = ArticleStore::seeded();
        let mut state = EditorState::open_create();
        state.set_field(DraftField::Name("SPASFON".into())).unwrap();
        state.set_field(DraftField::Depot(Depot::Urgence)).unwrap();
        state
            .set_field(DraftField::ExpiryDate(Some(date(2025, 3, 1))))
            .unwrap();
        state.set_field(DraftField::Quantity(5)).unwrap();

        let id = state.submit(&mut store).unwrap();

        assert_eq!(id, 3);
        assert_eq!(store.len(), 3);
        let created = store.get(3).unwrap();
        assert_eq!(created.name, "SPASFON");
        assert_eq!(created.depot, Depot::Urgence);
        assert_eq!(created.quantity, 5);
    }

    #[test]
    fn failed_submit_stays_open_and_leaves_store_alone() {
        let mut store = ArticleStore::seeded();
        let mut state = EditorState::open_create();
        state.set_field(DraftField::Quantity(3)).unwrap();

        assert_matches!(state.submit(&mut store), Err(CoreError::Validation(_)));
        assert!(state.is_open());
        assert_eq!(state.draft().unwrap().quantity, 3);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn submit_for_vanished_target_is_not_found() {
        let mut store = ArticleStore::seeded();
        let mut state = EditorState::open_edit(store.get(2).unwrap());
        store.remove(2).unwrap();

        assert_matches!(state.submit(&mut store), Err(CoreError::NotFound { id: 2, .. }));
        assert_eq!(store.len(), 1);
        assert!(state.is_open());
    }

    #[test]
    fn closing_without_submit_leaves_store_alone() {
        let mut store = ArticleStore::seeded();
        let before: Vec<_> = store.iter().cloned().collect();

        let mut state = EditorState::open_edit(store.get(1).unwrap());
        state.set_field(DraftField::Quantity(99)).unwrap();
        state.close();

        assert_matches!(state.submit(&mut store), Err(CoreError::Validation(_)));
        assert_eq!(store.iter().cloned().collect::<Vec<_>>(), before);
    }

    #[test]
    fn set_field_on_closed_editor_fails() {
        let mut state = EditorState::Closed;
        assert_matches!(
            state.set_field(DraftField::Quantity(1)),
            Err(CoreError::Validation(_))
        );
    }
}
