use actix_web::{get, web, HttpResponse, Responder};

use crate::{
    api::handlers::error_response,
    models::{plant::Plant, request::ErrorResponse},
    storage::AppState,
};

/// GET /api/plants
/// Returns the whole plant catalog, ordered by id.
#[utoipa::path(
    get,
    path = "/api/plants",
    tag = "plants",
    responses((status = 200, description = "Plant catalog", body = [Plant]))
)]
#[get("/plants")]
pub async fn list_plants(state: web::Data<AppState>) -> impl Responder {
    let storage = state.storage.read().await;
    HttpResponse::Ok().json(storage.all_plants())
}

/// GET /api/plants/{id}
#[utoipa::path(
    get,
    path = "/api/plants/{id}",
    tag = "plants",
    params(("id" = u32, Path, description = "Catalog plant id")),
    responses(
        (status = 200, description = "Plant found", body = Plant),
        (status = 404, description = "Unknown plant id", body = ErrorResponse),
    )
)]
#[get("/plants/{id}")]
pub async fn get_plant(state: web::Data<AppState>, path: web::Path<u32>) -> impl Responder {
    let storage = state.storage.read().await;
    match storage.plant(path.into_inner()) {
        Ok(plant) => HttpResponse::Ok().json(plant),
        Err(e) => error_response(e),
    }
}
