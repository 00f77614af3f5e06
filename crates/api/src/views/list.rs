//! The article table page.

use std::fmt::Write;

use stock_core::article::Article;
use stock_core::date::format_french_date;
use stock_core::list_view::ArticleListView;
use stock_core::store::ArticleStore;

use super::editor::{self, FormFeedback};
use super::{escape, layout};
use crate::query::{EditorTarget, ListParams};

const TITLE: &str = "Liste de stock";

/// Full list page: toolbar, filtered table and, when open, the editor modal
/// with `feedback` shown inline.
pub fn render_page(
    view: &ArticleListView,
    store: &ArticleStore,
    feedback: &FormFeedback,
) -> String {
    let q = view.search_text();
    let mut body = String::new();

    body.push_str("<main class=\"stock\">\n");
    render_toolbar(&mut body, q);
    render_table(&mut body, &view.visible_rows(store), q);
    body.push_str("</main>\n");

    if view.editor().is_open() {
        body.push_str(&editor::render_modal(view.editor(), q, feedback));
    }

    layout::page(TITLE, &body)
}

fn render_toolbar(out: &mut String, q: &str) {
    let add_url = ListParams::new(q).with_editor(EditorTarget::New).to_url();
    let _ = write!(
        out,
        "<header class=\"toolbar\">\n<h1>{TITLE}</h1>\n\
         <form class=\"search\" method=\"get\" action=\"/\" role=\"search\">\n\
         <label for=\"table-search\" class=\"sr-only\">Rechercher</label>\n\
         <input type=\"text\" id=\"table-search\" name=\"q\" value=\"{q}\" \
         placeholder=\"Rechercher un Article\" autocomplete=\"off\">\n\
         </form>\n\
         <a class=\"button primary\" href=\"{add_url}\">Ajouter un Article</a>\n\
         </header>\n",
        q = escape(q),
        add_url = escape(&add_url),
    );
}

fn render_table(out: &mut String, rows: &[&Article], q: &str) {
    out.push_str(
        "<div class=\"table-wrap\">\n<table>\n<thead>\n<tr>\
         <th scope=\"col\">Article</th>\
         <th scope=\"col\" class=\"center\">Quantite</th>\
         <th scope=\"col\" class=\"center\">Depot</th>\
         <th scope=\"col\" class=\"center\">Date Peremption</th>\
         <th scope=\"col\" class=\"center\">Action</th>\
         </tr>\n</thead>\n<tbody>\n",
    );

    if rows.is_empty() {
        out.push_str("<tr><td colspan=\"5\" class=\"empty\">Aucun article</td></tr>\n");
    }
    for article in rows {
        render_row(out, article, q);
    }

    out.push_str("</tbody>\n</table>\n</div>\n");
}

fn render_row(out: &mut String, article: &Article, q: &str) {
    let id = article.id;
    let q_html = escape(q);
    let edit_url = ListParams::new(q).with_editor(EditorTarget::Edit(id)).to_url();

    let _ = write!(
        out,
        "<tr data-article-id=\"{id}\">\n\
         <td class=\"name\">{name}</td>\n\
         <td class=\"center\">\
         <form class=\"quantity-form\" method=\"post\" action=\"/articles/{id}/quantity\">\
         <input type=\"hidden\" name=\"q\" value=\"{q_html}\">\
         <button class=\"round\" type=\"submit\" name=\"delta\" value=\"-1\">\
         <span class=\"sr-only\">Diminuer la quantité</span>−</button>\
         <output class=\"quantity-value\">{quantity}</output>\
         <button class=\"round\" type=\"submit\" name=\"delta\" value=\"1\">\
         <span class=\"sr-only\">Augmenter la quantité</span>+</button>\
         </form></td>\n\
         <td class=\"depot center\">{depot}</td>\n\
         <td class=\"center\"><span class=\"expiry\">{expiry}</span></td>\n\
         <td><div class=\"actions\">\
         <a class=\"link edit\" href=\"{edit_url}\">Modifier</a>\
         <form method=\"post\" action=\"/articles/{id}/delete\">\
         <input type=\"hidden\" name=\"q\" value=\"{q_html}\">\
         <button class=\"link delete\" type=\"submit\">Effacer</button>\
         </form></div></td>\n\
         </tr>\n",
        name = escape(&article.name),
        quantity = article.quantity,
        depot = escape(article.depot.label()),
        expiry = escape(&format_french_date(article.expiry_date)),
        edit_url = escape(&edit_url),
    );
}
