use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    handlers::{
        create_layout, delete_layout, get_companions, get_compatibility, get_layout, get_plant,
        list_layouts, list_plants, update_layout,
    },
    openapi::ApiDoc,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(list_plants)
            .service(get_plant)
            .service(get_companions)
            .service(get_compatibility)
            .service(list_layouts)
            .service(get_layout)
            .service(create_layout)
            .service(update_layout)
            .service(delete_layout),
    )
    .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));
}
