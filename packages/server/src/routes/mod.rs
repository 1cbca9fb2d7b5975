use axum::routing::post;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/courses", course_routes(config))
        .nest("/uploads", upload_alias_routes(config))
        .nest("/user/dashboard", dashboard_routes())
        .nest("/ai", ai_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
}

fn course_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    let crud = OpenApiRouter::new()
        .routes(routes!(
            handlers::course::list_courses,
            handlers::course::create_course
        ))
        .routes(routes!(handlers::course::get_course))
        .routes(routes!(handlers::course::process_transcript))
        .routes(routes!(handlers::media::stream_media))
        .routes(routes!(handlers::media::download_media))
        .routes(routes!(handlers::enrollment::enroll))
        .routes(routes!(handlers::enrollment::update_progress));

    let upload = OpenApiRouter::new()
        .routes(routes!(handlers::media::upload_media))
        .layer(handlers::media::media_upload_body_limit(config));

    crud.merge(upload)
}

/// `POST /uploads/courses/{id}`: same handler as `POST /courses/{id}/upload`,
/// left out of the OpenAPI document.
fn upload_alias_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .route("/courses/{id}", post(handlers::media::upload_media))
        .layer(handlers::media::media_upload_body_limit(config))
}

fn dashboard_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::enrollment::enrolled_courses))
        .routes(routes!(handlers::enrollment::dashboard_stats))
}

fn ai_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::ai::summary))
        .routes(routes!(handlers::ai::quiz))
}
