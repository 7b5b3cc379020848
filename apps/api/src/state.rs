use crate::config::Config;

/// Shared application state injected into route handlers via Axum extractors.
///
/// Planning is stateless; case-study registries live for a single request.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}
