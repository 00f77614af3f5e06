//! Handlers for the stock list page and its forms.
//!
//! Every mutation takes the store's write lock for its whole
//! read-modify-write, publishes a [`StockEvent`] on success and answers
//! with a 303 back to the list so a reload never resubmits. Editor
//! validation failures re-render the page with the modal still open.
//! Malformed paths, queries and form bodies become [`AppError::BadRequest`].

use axum::extract::rejection::{FormRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use stock_core::editor::DraftField;
use stock_core::error::CoreError;
use stock_core::list_view::ArticleListView;
use stock_core::types::ArticleId;
use stock_events::bus::{
    ARTICLE_CREATED, ARTICLE_DELETED, ARTICLE_QUANTITY_CHANGED, ARTICLE_UPDATED,
};
use stock_events::StockEvent;

use crate::error::{AppError, AppResult};
use crate::query::{list_url, ArticleForm, EditorTarget, ListParams, QuantityForm, ReturnForm};
use crate::state::AppState;
use crate::views;
use crate::views::editor::FormFeedback;

fn not_found(id: ArticleId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Article",
        id,
    })
}

// ---------------------------------------------------------------------------
// List page
// ---------------------------------------------------------------------------

/// GET /?q=&editor=
///
/// Render the filtered table, with the editor open when `editor` is `new`
/// or the id of an existing article.
pub async fn list_page(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> AppResult<Html<String>> {
    let Query(params) = params?;
    let store = state.store.read().await;
    let mut view = ArticleListView::new(params.q.as_str());

    match params.editor_target()? {
        None => {}
        Some(EditorTarget::New) => view.open_editor(None),
        Some(EditorTarget::Edit(id)) => {
            let article = store.get(id).ok_or_else(|| not_found(id))?;
            view.open_editor(Some(article));
        }
    }

    Ok(Html(views::list::render_page(&view, &store, &FormFeedback::default())))
}

// ---------------------------------------------------------------------------
// Editor submissions
// ---------------------------------------------------------------------------

/// POST /articles
pub async fn create_article(
    State(state): State<AppState>,
    form: Result<Form<ArticleForm>, FormRejection>,
) -> AppResult<Response> {
    let Form(form) = form?;
    submit_editor(&state, None, form).await
}

/// POST /articles/{id}
pub async fn update_article(
    State(state): State<AppState>,
    article_id: Result<Path<ArticleId>, PathRejection>,
    form: Result<Form<ArticleForm>, FormRejection>,
) -> AppResult<Response> {
    let Path(article_id) = article_id?;
    let Form(form) = form?;
    submit_editor(&state, Some(article_id), form).await
}

/// Replay the submitted form through the editor and submit it.
///
/// Every problem is reported at once. A field whose text does not parse
/// keeps that text in the re-rendered form and is not also reported by
/// the draft's own checks.
async fn submit_editor(
    state: &AppState,
    target: Option<ArticleId>,
    form: ArticleForm,
) -> AppResult<Response> {
    let mut store = state.store.write().await;
    let mut view = ArticleListView::new(form.q.as_str());

    match target {
        Some(id) => {
            let article = store.get(id).ok_or_else(|| not_found(id))?;
            view.open_editor(Some(article));
        }
        None => view.open_editor(None),
    }

    let mut feedback = FormFeedback::default();
    for (field, raw) in form.fields() {
        match DraftField::parse(field, raw) {
            Ok(value) => view.editor_mut().set_field(value)?,
            Err(CoreError::Validation(msg)) => feedback.reject(field, raw, msg),
            Err(e) => return Err(e.into()),
        }
    }

    if feedback.is_empty() {
        match view.editor_mut().submit(&mut store) {
            Ok(id) => {
                let event_type = if target.is_some() {
                    ARTICLE_UPDATED
                } else {
                    ARTICLE_CREATED
                };
                if let Some(article) = store.get(id) {
                    state
                        .event_bus
                        .publish(StockEvent::for_article(event_type, article));
                }
                tracing::info!(article_id = id, event_type, "Article saved");

                return Ok(Redirect::to(&list_url(&form.q)).into_response());
            }
            Err(CoreError::Validation(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(draft) = view.editor().draft() {
        for (field, message) in draft.field_messages() {
            if feedback.raw_value(field).is_none() {
                feedback.errors.push(message);
            }
        }
    }
    tracing::debug!(?target, errors = feedback.errors.len(), "Article form rejected");

    let html = views::list::render_page(&view, &store, &feedback);
    Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
}

// ---------------------------------------------------------------------------
// Row actions
// ---------------------------------------------------------------------------

/// POST /articles/{id}/quantity
///
/// Apply the `+`/`-` button's delta. The quantity floors at zero; a press
/// that changes nothing publishes nothing. An unknown id is ignored.
pub async fn adjust_quantity(
    State(state): State<AppState>,
    article_id: Result<Path<ArticleId>, PathRejection>,
    form: Result<Form<QuantityForm>, FormRejection>,
) -> AppResult<Redirect> {
    let Path(article_id) = article_id?;
    let Form(form) = form?;
    let mut store = state.store.write().await;
    let before = store.get(article_id).map(|a| a.quantity);

    match store.adjust_quantity(article_id, form.delta) {
        Ok(article) if Some(article.quantity) != before => {
            tracing::info!(
                article_id,
                delta = form.delta,
                quantity = article.quantity,
                "Article quantity changed"
            );
            state
                .event_bus
                .publish(StockEvent::for_article(ARTICLE_QUANTITY_CHANGED, article));
        }
        Ok(_) => {}
        Err(CoreError::NotFound { .. }) => {
            tracing::warn!(article_id, "Quantity change for unknown article ignored");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Redirect::to(&list_url(&form.q)))
}

/// POST /articles/{id}/delete
///
/// Remove the article. An unknown id is ignored.
pub async fn delete_article(
    State(state): State<AppState>,
    article_id: Result<Path<ArticleId>, PathRejection>,
    form: Result<Form<ReturnForm>, FormRejection>,
) -> AppResult<Redirect> {
    let Path(article_id) = article_id?;
    let Form(form) = form?;
    let removed = state.store.write().await.remove(article_id);

    match removed {
        Ok(article) => {
            tracing::info!(article_id, name = %article.name, "Article deleted");
            state
                .event_bus
                .publish(StockEvent::for_article(ARTICLE_DELETED, &article));
        }
        Err(CoreError::NotFound { .. }) => {
            tracing::warn!(article_id, "Delete of unknown article ignored");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Redirect::to(&list_url(&form.q)))
}
