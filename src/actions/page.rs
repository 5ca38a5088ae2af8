//! Human-facing `/tip` page with link-preview metadata.

use axum::{extract::State, response::Html};

use crate::actions::AppState;
use crate::config::Settings;

pub async fn tip_page(State(state): State<AppState>) -> Html<String> {
    Html(render(&state.settings))
}

pub fn render(settings: &Settings) -> String {
    let page_title = escape(&settings.page_title);
    let description = escape(&settings.description);
    let icon = escape(&settings.icon);

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{page_title}</title>
<meta name="description" content="{description}">
<meta property="og:title" content="{page_title}">
<meta property="og:description" content="{description}">
<meta property="og:image" content="{icon}">
<meta name="twitter:card" content="summary_large_image">
<meta name="twitter:title" content="{page_title}">
<meta name="twitter:description" content="{description}">
<meta name="twitter:image" content="{icon}">
</head>
<body style="display:flex;min-height:100vh;align-items:center;justify-content:center;font-family:sans-serif">
<main style="text-align:center">
<h1>Tip Jar</h1>
<p>{description}</p>
<img src="{icon}" alt="Tip Jar" width="128" height="128">
</main>
</body>
</html>
"#
    )
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
