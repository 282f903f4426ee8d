use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// `GET /` — the prediction form. Compiled in so the page is available
/// even when the static directory is missing.
pub async fn page() -> Html<&'static str> {
    Html(INDEX_HTML)
}
