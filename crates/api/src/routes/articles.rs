use axum::routing::{get, post};
use axum::Router;

use crate::handlers::articles;
use crate::state::AppState;

/// List page and its form targets.
///
/// ```text
/// GET    /                         -> list_page
/// POST   /articles                 -> create_article
/// POST   /articles/{id}            -> update_article
/// POST   /articles/{id}/quantity   -> adjust_quantity
/// POST   /articles/{id}/delete     -> delete_article
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(articles::list_page))
        .route("/articles", post(articles::create_article))
        .route("/articles/{id}", post(articles::update_article))
        .route("/articles/{id}/quantity", post(articles::adjust_quantity))
        .route("/articles/{id}/delete", post(articles::delete_article))
}
