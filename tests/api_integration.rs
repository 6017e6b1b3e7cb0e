use actix_web::{test, web, App};
use garden_canvas::api::{json_config, routes::configure};
use garden_canvas::config::DEFAULT_JSON_LIMIT;
use garden_canvas::storage::AppState;
use serde_json::json;

fn build_app() -> actix_web::App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(AppState::seeded()))
        .app_data(json_config(DEFAULT_JSON_LIMIT))
        .configure(configure)
}

fn layout_body(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "beds": [
            { "id": "bed-a", "shape": "rectangle", "x": 0, "y": 0, "width": 200, "height": 100,
              "fill": "#3E2723", "stroke": "#4CAF50", "name": "Veggies" },
            { "id": "bed-b", "shape": "circle", "x": 400, "y": 100, "radius": 60,
              "fill": "#3E2723", "stroke": "#4CAF50" },
            { "id": "bed-c", "shape": "polygon", "points": [500, 0, 600, 0, 550, 80],
              "fill": "#3E2723", "stroke": "#4CAF50" }
        ],
        "plants": [
            { "id": "p-1", "plantId": 1, "x": 50, "y": 50, "bedId": "bed-a" },
            { "id": "p-2", "plantId": 7, "x": 100, "y": 50, "bedId": "bed-a" },
            { "id": "p-3", "plantId": 2, "x": 700, "y": 300 }
        ]
    })
}

// ---------------------------------------------------------------------------
// GET /api/plants
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_get_plants_returns_200() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::get().uri("/api/plants").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_get_plants_items_have_required_fields() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::get().uri("/api/plants").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let plants = body.as_array().expect("Response must be a JSON array");
    assert!(!plants.is_empty(), "Catalog must be seeded");
    for item in plants {
        assert!(item.get("id").is_some(), "Each plant must have an 'id' field");
        assert!(item.get("name").is_some(), "Each plant must have a 'name' field");
        assert!(item.get("goodCompanions").is_some(), "Each plant must have 'goodCompanions'");
        assert!(item.get("badCompanions").is_some(), "Each plant must have 'badCompanions'");
    }
}

#[actix_web::test]
async fn test_get_plant_by_id() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::get().uri("/api/plants/1").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Tomato");
}

#[actix_web::test]
async fn test_get_plant_unknown_id_returns_404() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::get().uri("/api/plants/999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("999"));
}

// ---------------------------------------------------------------------------
// GET /api/companions/{plantId} and /api/compatibility
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_get_companions_resolves_companion_plant() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::get().uri("/api/companions/1").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let entries = body.as_array().unwrap();
    let basil = entries
        .iter()
        .find(|e| e["plant"]["name"] == "Basil")
        .expect("Tomato must list Basil");
    assert_eq!(basil["plantId"], 1);
    assert_eq!(basil["compatibility"], "good");
    assert!(entries.iter().any(|e| e["plant"]["name"] == "Cucumber" && e["compatibility"] == "bad"));
}

#[actix_web::test]
async fn test_get_companions_unknown_plant_returns_404() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::get().uri("/api/companions/999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_get_compatibility_is_square() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::get().uri("/api/compatibility").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let names = body["plants"].as_array().unwrap();
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(names.len(), rows.len());
    assert!(rows.iter().all(|r| r.as_array().unwrap().len() == names.len()));
}

// ---------------------------------------------------------------------------
// POST /api/garden-layouts
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_post_layout_returns_201_with_id() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::post()
        .uri("/api/garden-layouts")
        .set_json(layout_body("Backyard"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Backyard");
    assert!(body.get("createdAt").is_some());
}

#[actix_web::test]
async fn test_post_layout_validation_errors_return_400() {
    let app = test::init_service(build_app()).await;
    let mut payload = layout_body("");
    payload["beds"][1]["radius"] = json!(-5);
    payload["plants"][2]["plantId"] = json!(999);
    let req = test::TestRequest::post()
        .uri("/api/garden-layouts")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body.get("error").is_some(), "Error response must have 'error' field");
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 3, "{errors:?}");
}

#[actix_web::test]
async fn test_post_layout_clears_dangling_bed_id() {
    let app = test::init_service(build_app()).await;
    let mut payload = layout_body("Backyard");
    payload["plants"][0]["bedId"] = json!("no-such-bed");
    let req = test::TestRequest::post()
        .uri("/api/garden-layouts")
        .set_json(&payload)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["plants"][0].get("bedId").is_none());
}

#[actix_web::test]
async fn test_post_layout_malformed_json_returns_400() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::post()
        .uri("/api/garden-layouts")
        .insert_header(("content-type", "application/json"))
        .set_payload("{invalid json}")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

// ---------------------------------------------------------------------------
// Save / load round trip
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_saved_layout_loads_back_unchanged() {
    let app = test::init_service(build_app()).await;
    let sent = layout_body("Round trip");
    let req = test::TestRequest::post()
        .uri("/api/garden-layouts")
        .set_json(&sent)
        .to_request();
    let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_u64().unwrap();

    let req = test::TestRequest::get().uri(&format!("/api/garden-layouts/{id}")).to_request();
    let loaded: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(loaded["beds"].as_array().unwrap().len(), 3);
    for (sent_bed, loaded_bed) in sent["beds"].as_array().unwrap().iter().zip(loaded["beds"].as_array().unwrap()) {
        assert_eq!(sent_bed["id"], loaded_bed["id"]);
        assert_eq!(sent_bed["shape"], loaded_bed["shape"]);
        assert_eq!(sent_bed["x"].as_f64(), loaded_bed["x"].as_f64());
    }
    assert_eq!(loaded["plants"][0]["bedId"], "bed-a");
    assert_eq!(loaded["beds"][2]["points"].as_array().unwrap().len(), 6);

    let req = test::TestRequest::get().uri("/api/garden-layouts").to_request();
    let all: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// PUT /api/garden-layouts/{id}
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_put_layout_merges_partial_body() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::post()
        .uri("/api/garden-layouts")
        .set_json(layout_body("Before"))
        .to_request();
    let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_u64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/garden-layouts/{id}"))
        .set_json(json!({ "name": "After" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "After");
    assert_eq!(body["beds"], created["beds"]);
}

#[actix_web::test]
async fn test_put_unknown_layout_returns_404() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::put()
        .uri("/api/garden-layouts/42")
        .set_json(json!({ "name": "Nowhere" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_put_invalid_layout_returns_400() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::post()
        .uri("/api/garden-layouts")
        .set_json(layout_body("Valid"))
        .to_request();
    let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_u64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/garden-layouts/{id}"))
        .set_json(json!({ "beds": [created["beds"][0], created["beds"][0]] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

// ---------------------------------------------------------------------------
// DELETE /api/garden-layouts/{id}
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_delete_layout_returns_204_then_404() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::post()
        .uri("/api/garden-layouts")
        .set_json(layout_body("Short lived"))
        .to_request();
    let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let uri = format!("/api/garden-layouts/{}", created["id"]);

    let resp = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), 204);
    let resp = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), 404);
    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), 404);
}
