use axum::{extract::State, routing::get, Router};

use crate::state::ApiState;

pub fn app() -> Router<ApiState> {
    Router::<ApiState>::new().route("/metrics", get(render_metrics))
}

/// Prometheus text exposition of the process-wide registry.
pub async fn render_metrics(State(state): State<ApiState>) -> String {
    state.metrics().render()
}
