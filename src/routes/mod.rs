pub mod admin;
pub mod health;
pub mod test_records;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{middleware, AppState};

pub const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Full application router: REST API, audio upload, admin surface and the
/// media directory.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/tests/",
            get(test_records::list_tests).post(test_records::create_test),
        )
        .route(
            "/tests/:id/",
            get(test_records::get_test)
                .put(test_records::update_test)
                .patch(test_records::update_test)
                .delete(test_records::delete_test),
        )
        .route("/tests/:id/result/", get(test_records::get_test_result))
        .route("/audio-upload/", post(upload::upload_audio));

    let admin = Router::new()
        .route("/admin/tests/", get(admin::list_rows).post(admin::add_test))
        .route("/admin/tests/:id/", get(admin::edit_form).post(admin::save_test))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_admin,
        ));

    let media = ServeDir::new(state.config.media_root.clone());
    let media_path = state.config.media_mount_path().to_string();
    let cors = middleware::cors::cors_layer(&state.config.cors_allowed_origins);

    Router::new()
        .route("/health", get(health::health))
        .merge(api)
        .merge(admin)
        .nest_service(&media_path, media)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
