use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use log::info;

use crate::{
    api::handlers::error_response,
    models::{
        layout::{GardenLayout, LayoutPatch, LayoutPayload},
        request::ErrorResponse,
    },
    storage::AppState,
};

/// GET /api/garden-layouts
#[utoipa::path(
    get,
    path = "/api/garden-layouts",
    tag = "layouts",
    responses((status = 200, description = "Every saved layout, oldest first", body = [GardenLayout]))
)]
#[get("/garden-layouts")]
pub async fn list_layouts(state: web::Data<AppState>) -> impl Responder {
    let storage = state.storage.read().await;
    HttpResponse::Ok().json(storage.all_layouts())
}

/// GET /api/garden-layouts/{id}
#[utoipa::path(
    get,
    path = "/api/garden-layouts/{id}",
    tag = "layouts",
    params(("id" = u64, Path, description = "Layout id")),
    responses(
        (status = 200, description = "Layout found", body = GardenLayout),
        (status = 404, description = "Unknown layout id", body = ErrorResponse),
    )
)]
#[get("/garden-layouts/{id}")]
pub async fn get_layout(state: web::Data<AppState>, path: web::Path<u64>) -> impl Responder {
    let storage = state.storage.read().await;
    match storage.layout(path.into_inner()) {
        Ok(layout) => HttpResponse::Ok().json(layout),
        Err(e) => error_response(e),
    }
}

/// POST /api/garden-layouts
/// Saves a new layout. Plants pointing at beds that are not in the payload
/// are stored without a bed.
#[utoipa::path(
    post,
    path = "/api/garden-layouts",
    tag = "layouts",
    request_body = LayoutPayload,
    responses(
        (status = 201, description = "Layout created", body = GardenLayout),
        (status = 400, description = "Validation failed", body = ErrorResponse),
    )
)]
#[post("/garden-layouts")]
pub async fn create_layout(state: web::Data<AppState>, body: web::Json<LayoutPayload>) -> impl Responder {
    let mut storage = state.storage.write().await;
    match storage.create_layout(body.into_inner()) {
        Ok(layout) => {
            info!("Saved garden layout {} '{}'", layout.id, layout.name);
            HttpResponse::Created().json(layout)
        }
        Err(e) => error_response(e),
    }
}

/// PUT /api/garden-layouts/{id}
/// Replaces the fields present in the body and keeps the others.
#[utoipa::path(
    put,
    path = "/api/garden-layouts/{id}",
    tag = "layouts",
    params(("id" = u64, Path, description = "Layout id")),
    request_body = LayoutPatch,
    responses(
        (status = 200, description = "Layout updated", body = GardenLayout),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Unknown layout id", body = ErrorResponse),
    )
)]
#[put("/garden-layouts/{id}")]
pub async fn update_layout(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    body: web::Json<LayoutPatch>,
) -> impl Responder {
    let mut storage = state.storage.write().await;
    match storage.update_layout(path.into_inner(), body.into_inner()) {
        Ok(layout) => HttpResponse::Ok().json(layout),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/garden-layouts/{id}
#[utoipa::path(
    delete,
    path = "/api/garden-layouts/{id}",
    tag = "layouts",
    params(("id" = u64, Path, description = "Layout id")),
    responses(
        (status = 204, description = "Layout deleted"),
        (status = 404, description = "Unknown layout id", body = ErrorResponse),
    )
)]
#[delete("/garden-layouts/{id}")]
pub async fn delete_layout(state: web::Data<AppState>, path: web::Path<u64>) -> impl Responder {
    let mut storage = state.storage.write().await;
    match storage.delete_layout(path.into_inner()) {
        Ok(layout) => {
            info!("Deleted garden layout {}", layout.id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => error_response(e),
    }
}
