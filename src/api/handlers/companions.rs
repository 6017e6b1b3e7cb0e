use actix_web::{get, web, HttpResponse, Responder};

use crate::{
    api::handlers::error_response,
    models::{
        companion::{CompanionEntry, CompatibilityMatrix},
        request::ErrorResponse,
    },
    storage::AppState,
};

/// GET /api/companions/{plantId}
/// Returns the curated companion edges of a plant, each with the other
/// plant's catalog entry.
#[utoipa::path(
    get,
    path = "/api/companions/{plantId}",
    tag = "companions",
    params(("plantId" = u32, Path, description = "Catalog plant id")),
    responses(
        (status = 200, description = "Companion relationships", body = [CompanionEntry]),
        (status = 404, description = "Unknown plant id", body = ErrorResponse),
    )
)]
#[get("/companions/{plantId}")]
pub async fn get_companions(state: web::Data<AppState>, path: web::Path<u32>) -> impl Responder {
    let storage = state.storage.read().await;
    match storage.companions_of(path.into_inner()) {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(e) => error_response(e),
    }
}

/// GET /api/compatibility
/// Good / fair / poor chart over the whole catalog.
#[utoipa::path(
    get,
    path = "/api/compatibility",
    tag = "companions",
    responses((status = 200, description = "Catalog compatibility chart", body = CompatibilityMatrix))
)]
#[get("/compatibility")]
pub async fn get_compatibility(state: web::Data<AppState>) -> impl Responder {
    let storage = state.storage.read().await;
    HttpResponse::Ok().json(storage.compatibility_matrix())
}
