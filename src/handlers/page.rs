// GET / - the server-rendered index page.
//
// Anonymous visitors get the Google Sign-In widget; authenticated users get
// their dataset rendered as a table. The render always succeeds: a missing
// or unreachable dataset degrades to an empty state, never an error page.

use axum::{
    http::header,
    response::{Html, IntoResponse},
    Extension,
};
use serde_json::json;

use crate::config;
use crate::dataset;
use crate::middleware::SessionContext;
use crate::sheets::Table;
use crate::types::Identity;

const APP_JS: &str = include_str!("../../assets/app.js");

/// GET / - render the portal page for the current session.
pub async fn index(Extension(context): Extension<SessionContext>) -> Html<String> {
    let dataset = dataset::load_user_data(context.session.as_ref()).await;
    Html(render_page(context.identity(), dataset.as_ref()))
}

/// GET /assets/app.js - client store and sign-in glue.
pub async fn app_js() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript")], APP_JS)
}

fn render_page(user: Option<&Identity>, dataset: Option<&Table>) -> String {
    let client_id = &config::config().google.client_id;

    // Page data consumed by the client store on load. The `</` replacement
    // keeps a hostile profile field from closing the script tag early.
    let page_data = json!({ "user": user }).to_string().replace("</", "<\\/");

    let body = match user {
        Some(user) => render_signed_in(user, dataset),
        None => render_sign_in(client_id),
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>Sheetgate</title>\n\
         <script>window.__PAGE_DATA__ = {page_data};</script>\n\
         <script src=\"https://accounts.google.com/gsi/client\" async></script>\n\
         <script src=\"/assets/app.js\" defer></script>\n\
         </head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

fn render_sign_in(client_id: &str) -> String {
    format!(
        "<main>\n<h1>Sheetgate</h1>\n<p>Sign in with your Google account to view your data.</p>\n\
         <div id=\"g_id_onload\" data-client_id=\"{}\" data-callback=\"onGoogleCredential\"></div>\n\
         <div class=\"g_id_signin\" data-type=\"standard\"></div>\n\
         <p id=\"auth-error\" hidden></p>\n</main>",
        escape_html(client_id)
    )
}

fn render_signed_in(user: &Identity, dataset: Option<&Table>) -> String {
    let avatar = if user.picture.is_empty() {
        String::new()
    } else {
        format!(
            "<img src=\"{}\" alt=\"avatar\" width=\"32\" height=\"32\">",
            escape_html(&user.picture)
        )
    };

    let table = match dataset {
        Some(table) if !table.is_empty() => render_table(table),
        Some(_) => "<p>Your dataset is empty.</p>".to_string(),
        None => "<p>No data available for your account.</p>".to_string(),
    };

    format!(
        "<main>\n<header>{}<span id=\"user-name\">{}</span> \
         <span id=\"user-email\">{}</span></header>\n{}\n</main>",
        avatar,
        escape_html(&user.name),
        escape_html(&user.email),
        table
    )
}

fn render_table(table: &Table) -> String {
    let mut html = String::from("<table>\n<thead><tr>");
    for column in &table.columns {
        html.push_str("<th>");
        html.push_str(&escape_html(column));
        html.push_str("</th>");
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str("<td>");
            html.push_str(&escape_html(cell));
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>");
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
