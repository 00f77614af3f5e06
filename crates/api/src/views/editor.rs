//! Add/edit modal.

use std::collections::HashMap;
use std::fmt::Write;

use stock_core::article::Depot;
use stock_core::date::{format_form_date, format_french_date};
use stock_core::editor::{EditorDraft, EditorState};

use super::escape;
use crate::query::list_url;

/// What a rejected submission hands back to the modal.
#[derive(Debug, Default)]
pub struct FormFeedback {
    /// Messages listed above the fields, in report order.
    pub errors: Vec<String>,
    /// Submitted text of fields that could not be parsed, re-shown as typed.
    raw_values: HashMap<&'static str, String>,
}

impl FormFeedback {
    /// Record a field whose submitted text failed to parse.
    pub fn reject(&mut self, field: &'static str, raw: &str, message: String) {
        self.raw_values.insert(field, raw.to_string());
        self.errors.push(message);
    }

    pub fn raw_value(&self, field: &str) -> Option<&str> {
        self.raw_values.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Modal for an open editor, or an empty string when `state` is closed.
///
/// `q` is carried through the form so the list comes back with the same
/// search. Fields in `feedback` that failed to parse show the submitted
/// text instead of the draft's value.
pub fn render_modal(state: &EditorState, q: &str, feedback: &FormFeedback) -> String {
    let Some(draft) = state.draft() else {
        return String::new();
    };

    let (title, action, submit) = match state.target() {
        Some(id) => ("Modifier un Article", format!("/articles/{id}"), "Modifier"),
        None => (
            "Ajouter un Nouveau Article",
            "/articles".to_string(),
            "Ajouter",
        ),
    };

    let mut out = String::new();
    let _ = write!(
        out,
        "<div class=\"modal-backdrop\">\n\
         <section class=\"modal\" role=\"dialog\" aria-modal=\"true\" aria-labelledby=\"editor-title\">\n\
         <header><h3 id=\"editor-title\">{title}</h3>\
         <a class=\"close\" href=\"{close}\" aria-label=\"Fermer\">×</a></header>\n",
        close = escape(&list_url(q)),
    );

    render_errors(&mut out, &feedback.errors);

    let _ = write!(
        out,
        "<form method=\"post\" action=\"{action}\">\n\
         <input type=\"hidden\" name=\"q\" value=\"{q}\">\n\
         <div class=\"grid\">\n",
        q = escape(q),
    );
    render_fields(&mut out, draft, feedback);
    let _ = write!(
        out,
        "</div>\n<footer><button class=\"button primary\" type=\"submit\">{submit}</button></footer>\n\
         </form>\n</section>\n</div>\n"
    );

    out
}

fn render_errors(out: &mut String, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    out.push_str("<ul class=\"errors\" role=\"alert\">\n");
    for error in errors {
        let _ = writeln!(out, "<li>{}</li>", escape(error));
    }
    out.push_str("</ul>\n");
}

fn render_fields(out: &mut String, draft: &EditorDraft, feedback: &FormFeedback) {
    let name = feedback.raw_value("name").unwrap_or(draft.name.as_str());
    let (date_value, date_label) = match feedback.raw_value("expiry_date") {
        Some(raw) => (raw.to_string(), String::new()),
        None => (
            draft.expiry_date.map(format_form_date).unwrap_or_default(),
            draft.expiry_date.map(format_french_date).unwrap_or_default(),
        ),
    };
    let quantity = match feedback.raw_value("quantity") {
        Some(raw) => raw.to_string(),
        None => draft.quantity.to_string(),
    };

    let _ = write!(
        out,
        "<div><label for=\"name\">Nom</label>\
         <input type=\"text\" id=\"name\" name=\"name\" value=\"{name}\" \
         placeholder=\"Nom de l'article\" required></div>\n\
         <div><label for=\"expiry_date\">Date Péremption</label>\
         <input type=\"date\" id=\"expiry_date\" name=\"expiry_date\" value=\"{date_value}\" required>\
         <span id=\"expiry_date_label\" class=\"date-label\">{date_label}</span></div>\n\
         <div><label for=\"quantity\">Quantité</label>\
         <input type=\"number\" id=\"quantity\" name=\"quantity\" value=\"{quantity}\" \
         min=\"0\" step=\"1\" required></div>\n\
         <div><label for=\"depot\">Dépôt</label><select id=\"depot\" name=\"depot\">",
        name = escape(name),
        date_value = escape(&date_value),
        date_label = escape(&date_label),
        quantity = escape(&quantity),
    );

    // An unknown depot stays selected so the user sees what was rejected.
    let raw_depot = feedback.raw_value("depot");
    if let Some(raw) = raw_depot {
        let _ = write!(
            out,
            "<option value=\"{raw}\" selected>{raw}</option>",
            raw = escape(raw),
        );
    }
    for depot in Depot::ALL {
        let selected = if raw_depot.is_none() && depot == draft.depot {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            out,
            "<option value=\"{label}\"{selected}>{label}</option>",
            label = escape(depot.label()),
        );
    }
    out.push_str("</select></div>\n");
}
