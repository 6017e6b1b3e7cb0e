use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpServer};
use log::info;

use garden_canvas::{
    api::{json_config, routes::configure},
    config::ServerConfig,
    storage::{AppState, MemStorage},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env();
    let storage = if config.seed_catalog { MemStorage::seeded() } else { MemStorage::new() };
    let state = web::Data::new(AppState::new(storage));
    let json_limit = config.json_limit;
    let cors_origin = config.cors_origin.clone();

    info!("🌱 Garden layout API started at http://{}", config.bind_addr);
    info!("   GET    /api/plants, /api/plants/{{id}}");
    info!("   GET    /api/companions/{{plantId}}, /api/compatibility");
    info!("   GET    /api/garden-layouts, POST /api/garden-layouts");
    info!("   GET    PUT DELETE /api/garden-layouts/{{id}}");
    info!("   📖 Swagger UI → http://{}/swagger-ui/", config.bind_addr);
    info!("   📌 OpenAPI spec → http://{}/api-docs/openapi.json", config.bind_addr);

    HttpServer::new(move || {
        let cors = match &cors_origin {
            Some(origin) => Cors::default().allowed_origin(origin),
            None => Cors::default().allow_any_origin(),
        }
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .app_data(json_config(json_limit))
            .configure(configure)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
