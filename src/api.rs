pub mod handlers;
pub mod openapi;
pub mod routes;

use actix_web::{error::InternalError, web, HttpResponse};

use crate::models::request::ErrorResponse;

/// JSON extractor settings shared by the server and the tests: bodies over
/// `limit` bytes or that fail to deserialize become `400 {"error": ...}`.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default().limit(limit).error_handler(|err, _req| {
        let message = format!("JSON deserialization error: {err}");
        InternalError::from_response(err, HttpResponse::BadRequest().json(ErrorResponse::new(message)))
            .into()
    })
}
