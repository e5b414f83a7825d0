use axum::extract::State;
use axum::response::Html;

use crate::transport::state::AppState;

const CABLE_PATH_SLOT: &str = "{{cable_path}}";

pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}

/// The chat page, pointed at the configured cable mount.
pub async fn chat(State(state): State<AppState>) -> Html<String> {
    let page = include_str!("../../assets/chat.html");
    Html(page.replace(CABLE_PATH_SLOT, &state.settings.cable.mount_path))
}

pub async fn sse() -> Html<&'static str> {
    Html(include_str!("../../assets/sse.html"))
}
