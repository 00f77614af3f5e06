//! Page shell, shared styles and the client script.

use axum::http::StatusCode;

use super::escape;

const STYLE: &str = r#"
*, *::before, *::after { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; font-size: 14px; color: #111827; background: #f9fafb; }
.stock { width: 70%; margin: 2rem auto; }
.toolbar { display: flex; align-items: center; justify-content: space-between; gap: 1rem; padding-bottom: 1rem; }
.toolbar h1 { margin: 0; font-size: 1.25rem; font-weight: 600; }
.search { flex: 1; max-width: 700px; margin: 0 1rem; }
.search input { width: 100%; padding: .5rem .75rem; border: 1px solid #d1d5db; border-radius: .5rem; background: #f9fafb; }
.button { display: inline-block; padding: .375rem .75rem; border: 0; border-radius: .5rem; font-weight: 500; text-decoration: none; cursor: pointer; }
.button.primary { background: #3b82f6; color: #fff; }
.table-wrap { overflow-x: auto; box-shadow: 0 1px 3px rgba(0, 0, 0, .1); border-radius: .5rem; }
table { width: 100%; border-collapse: collapse; background: #fff; }
th { padding: .75rem 1.5rem; font-size: .75rem; text-transform: uppercase; text-align: left; color: #374151; background: #f9fafb; }
td { padding: 1rem 1.5rem; border-bottom: 1px solid #e5e7eb; }
th.center, td.center { text-align: center; }
td.name, td.depot { font-weight: 600; }
td.empty { text-align: center; color: #6b7280; }
.quantity-form { display: inline-flex; align-items: center; gap: .75rem; }
.round { width: 1.5rem; height: 1.5rem; border: 1px solid #d1d5db; border-radius: 9999px; background: #fff; cursor: pointer; }
.quantity-value { display: inline-block; min-width: 3.5rem; padding: .25rem .625rem; border: 1px solid #d1d5db; border-radius: .5rem; background: #f9fafb; }
.expiry { display: inline-block; padding: .25rem .625rem; border: 1px solid #d1d5db; border-radius: .5rem; background: #f9fafb; color: #6b7280; }
.actions { display: flex; justify-content: center; gap: 1rem; }
.actions form { display: inline; }
.link { padding: 0; border: 0; background: none; font: inherit; font-weight: 500; cursor: pointer; text-decoration: none; }
.link.edit { color: #ea580c; }
.link.delete { color: #dc2626; }
.link:hover { text-decoration: underline; }
.modal-backdrop { position: fixed; inset: 0; z-index: 50; display: flex; align-items: center; justify-content: center; background: rgba(17, 24, 39, .4); }
.modal { width: 100%; max-width: 28rem; border-radius: .5rem; background: #fff; box-shadow: 0 10px 25px rgba(0, 0, 0, .2); }
.modal header { display: flex; align-items: center; justify-content: space-between; padding: 1rem 1.25rem; border-bottom: 1px solid #e5e7eb; }
.modal h3 { margin: 0; font-size: 1.125rem; font-weight: 600; }
.modal .close { color: #9ca3af; font-size: 1.25rem; text-decoration: none; }
.modal form { padding: 1rem 1.25rem; }
.modal .grid { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; margin-bottom: 1rem; }
.modal label { display: block; margin-bottom: .5rem; font-weight: 500; }
.modal input, .modal select { width: 100%; padding: .625rem; border: 1px solid #d1d5db; border-radius: .5rem; background: #f9fafb; }
.modal .date-label { display: block; margin-top: .25rem; color: #6b7280; font-size: .75rem; }
.modal footer { display: flex; justify-content: flex-end; padding-top: 15px; border-top: 1px solid #e5e7eb; }
.errors { margin: 1rem 1.25rem 0; padding: .75rem 1rem .75rem 2rem; border-radius: .5rem; background: #fef2f2; color: #b91c1c; }
.sr-only { position: absolute; width: 1px; height: 1px; overflow: hidden; clip: rect(0, 0, 0, 0); white-space: nowrap; }
.error-page { max-width: 32rem; margin: 4rem auto; padding: 1.5rem; border-radius: .5rem; background: #fff; }
"#;

/// Live search, the French date hint next to the date control, and
/// reload-on-change over the `/ws` channel while no modal is open.
const SCRIPT: &str = r#"
(() => {
  const search = document.getElementById('table-search');
  if (search) {
    let timer;
    search.addEventListener('input', () => {
      clearTimeout(timer);
      timer = setTimeout(() => search.form.requestSubmit(), 250);
    });
    if (search.value) {
      search.focus();
      search.setSelectionRange(search.value.length, search.value.length);
    }
  }

  const date = document.getElementById('expiry_date');
  const label = document.getElementById('expiry_date_label');
  if (date && label) {
    const fmt = new Intl.DateTimeFormat('fr-FR', { day: '2-digit', month: 'long', year: 'numeric', timeZone: 'UTC' });
    date.addEventListener('change', () => {
      label.textContent = date.valueAsDate ? fmt.format(date.valueAsDate) : '';
    });
  }

  const scheme = location.protocol === 'https:' ? 'wss' : 'ws';
  const socket = new WebSocket(`${scheme}://${location.host}/ws`);
  socket.addEventListener('message', () => {
    if (!document.querySelector('.modal')) {
      location.reload();
    }
  });
})();
"#;

/// Wrap `body` in a complete French-language HTML document.
pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"fr\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n\
         <script>{SCRIPT}</script>\n</body>\n</html>\n",
        title = escape(title),
    )
}

/// Standalone page for an [`AppError`](crate::error::AppError).
pub fn error_page(status: StatusCode, code: &str, message: &str) -> String {
    let body = format!(
        "<main class=\"error-page\" data-error-code=\"{code}\">\n\
         <h1>{status}</h1>\n<p>{message}</p>\n\
         <p><a href=\"/\">Retour à la liste de stock</a></p>\n</main>",
        code = escape(code),
        status = escape(&status.to_string()),
        message = escape(message),
    );
    page("Erreur", &body)
}
