pub mod companions;
pub mod layouts;
pub mod plants;

pub use companions::{get_companions, get_compatibility};
pub use layouts::{create_layout, delete_layout, get_layout, list_layouts, update_layout};
pub use plants::{get_plant, list_plants};

use actix_web::HttpResponse;
use log::debug;

use crate::error::StoreError;
use crate::models::request::ErrorResponse;

/// Maps a storage failure onto the API's error body.
pub(crate) fn error_response(err: StoreError) -> HttpResponse {
    debug!("Request failed: {err}");
    match err {
        StoreError::Invalid(errors) => HttpResponse::BadRequest()
            .json(ErrorResponse::with_errors("Invalid garden layout.", errors)),
        not_found => HttpResponse::NotFound().json(ErrorResponse::new(not_found.to_string())),
    }
}
