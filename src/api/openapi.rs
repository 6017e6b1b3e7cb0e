use utoipa::OpenApi;

use crate::models::{
    bed::{GardenBed, Shape},
    companion::{CompanionEntry, CompanionRelationship, Compatibility, CompatibilityMatrix, Relationship},
    layout::{GardenLayout, LayoutPatch, LayoutPayload},
    plant::{Category, PlacedPlant, Plant},
    request::ErrorResponse,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Garden Layout API",
        description = "Plant catalog, curated companion planting data and persistence of garden layouts drawn on the planning canvas.",
        version = "1.0.0",
        license(name = "MIT"),
    ),
    paths(
        crate::api::handlers::plants::list_plants,
        crate::api::handlers::plants::get_plant,
        crate::api::handlers::companions::get_companions,
        crate::api::handlers::companions::get_compatibility,
        crate::api::handlers::layouts::list_layouts,
        crate::api::handlers::layouts::get_layout,
        crate::api::handlers::layouts::create_layout,
        crate::api::handlers::layouts::update_layout,
        crate::api::handlers::layouts::delete_layout,
    ),
    components(
        schemas(
            // Catalog
            Category, Plant,
            // Companions
            Relationship, CompanionRelationship, CompanionEntry, Compatibility, CompatibilityMatrix,
            // Layouts
            Shape, GardenBed, PlacedPlant, GardenLayout, LayoutPayload, LayoutPatch,
            // Shared
            ErrorResponse,
        )
    ),
    tags(
        (name = "plants",    description = "Plant catalog"),
        (name = "companions", description = "Curated companion relationships and the compatibility chart"),
        (name = "layouts",   description = "Saved garden layouts"),
    )
)]
pub struct ApiDoc;
