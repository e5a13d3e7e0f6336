use axum::{
    body::Bytes,
    http::{HeaderValue, Method, StatusCode, header},
};
use axum_test::TestServer;
use products_axum::{config::AxumConfig, router};
use products_core::{
    models::Product,
    validation::{FieldError, ValidationReport},
};
use rstest::*;
use serde_json::{Value, json};

mod app;
use app::TestApp;

const FRONTEND: &str = "http://localhost:5173";

async fn serve() -> (TestServer, TestApp) {
    let app = TestApp::open().await;
    let config = AxumConfig {
        allowed_origin: Some(FRONTEND.to_string()),
        ..Default::default()
    };
    let (router, _) = router(app.clone(), &config).unwrap();
    (TestServer::new(router).unwrap(), app)
}

async fn create(server: &TestServer, body: Value) -> Product {
    let response = server.post("/api/products").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json()
}

fn messages_for<'a>(report: &'a ValidationReport, field: &str) -> Vec<&'a str> {
    report
        .errors
        .iter()
        .filter(|error| error.field == field)
        .map(|error| error.message.as_str())
        .collect()
}

#[test_log::test(tokio::test)]
async fn test_create_then_read_round_trip() {
    let (server, _) = serve().await;

    let created = create(&server, json!({ "name": "Monitor", "price": 300 })).await;
    assert_eq!(created.name, "Monitor");
    assert_eq!(created.price, 300.0);
    assert!(created.availability);

    let fetched: Product = server
        .get(&format!("/api/products/{}", created.id))
        .await
        .json();
    assert_eq!(fetched, created);

    let listed: Vec<Product> = server.get("/api/products").await.json();
    assert_eq!(listed, vec![created]);
}

#[test_log::test(tokio::test)]
async fn test_create_trims_name_and_ignores_availability() {
    let (server, _) = serve().await;

    let created = create(
        &server,
        json!({ "name": "  Keyboard ", "price": "49.5", "availability": false }),
    )
    .await;
    assert_eq!(created.name, "Keyboard");
    assert_eq!(created.price, 49.5);
    assert!(created.availability);
}

#[test_log::test(tokio::test)]
async fn test_invalid_create_never_reaches_the_store() {
    let (server, app) = serve().await;

    let response = server.post("/api/products").json(&json!({})).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let report: ValidationReport = response.json();
    assert_eq!(
        report.errors,
        vec![
            FieldError {
                field: "name".to_string(),
                message: "name is required".to_string(),
            },
            FieldError {
                field: "price".to_string(),
                message: "price is required".to_string(),
            },
        ]
    );
    assert_eq!(app.store_calls(), 0);
}

#[rstest]
#[case(json!({ "name": "Monitor" }), "price is required")]
#[case(json!({ "name": "Monitor", "price": "abc" }), "not a number")]
#[case(json!({ "name": "Monitor", "price": -5 }), "price must be a positive value")]
#[case(json!({ "name": "Monitor", "price": 0 }), "price must be a positive value")]
#[test_log::test(tokio::test)]
async fn test_price_reports_one_message(#[case] body: Value, #[case] message: &str) {
    let (server, app) = serve().await;

    let response = server.post("/api/products").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let report: ValidationReport = response.json();
    assert_eq!(report.errors.len(), 1);
    assert_eq!(messages_for(&report, "price"), vec![message]);
    assert_eq!(app.store_calls(), 0);
}

#[rstest]
#[case::get("GET")]
#[case::patch("PATCH")]
#[case::delete("DELETE")]
#[test_log::test(tokio::test)]
async fn test_non_integer_id_is_rejected(#[case] method: &str) {
    let (server, app) = serve().await;

    let response = match method {
        "GET" => server.get("/api/products/abc").await,
        "PATCH" => server.patch("/api/products/abc").await,
        _ => server.delete("/api/products/abc").await,
    };
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let report: ValidationReport = response.json();
    assert_eq!(messages_for(&report, "id"), vec!["invalid id"]);
    assert_eq!(app.store_calls(), 0);
}

#[rstest]
#[case::get("GET")]
#[case::patch("PATCH")]
#[case::delete("DELETE")]
#[test_log::test(tokio::test)]
async fn test_missing_product_is_not_found(#[case] method: &str) {
    let (server, _) = serve().await;

    let response = match method {
        "GET" => server.get("/api/products/5").await,
        "PATCH" => server.patch("/api/products/5").await,
        _ => server.delete("/api/products/5").await,
    };
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "unknown product 5");
}

#[test_log::test(tokio::test)]
async fn test_update_validates_every_field() {
    let (server, app) = serve().await;

    let response = server
        .put("/api/products/abc")
        .json(&json!({ "name": " ", "price": "x", "availability": "maybe" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let report: ValidationReport = response.json();
    let fields: Vec<_> = report.errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, ["id", "name", "price", "availability"]);
    assert_eq!(messages_for(&report, "availability"), vec!["invalid availability value"]);
    assert_eq!(app.store_calls(), 0);
}

#[test_log::test(tokio::test)]
async fn test_update_replaces_fields() {
    let (server, _) = serve().await;
    let created = create(&server, json!({ "name": "Monitor", "price": 300 })).await;

    let response = server
        .put(&format!("/api/products/{}", created.id))
        .json(&json!({ "name": "Curved monitor", "price": 350.5, "availability": false }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let updated: Product = response.json();
    assert_eq!(
        updated,
        Product {
            id: created.id,
            name: "Curved monitor".to_string(),
            price: 350.5,
            availability: false,
        }
    );

    let missing = server
        .put("/api/products/9000")
        .json(&json!({ "name": "Ghost", "price": 1, "availability": true }))
        .await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_patch_toggles_availability_only() {
    let (server, _) = serve().await;
    let created = create(&server, json!({ "name": "Monitor", "price": 300 })).await;
    let path = format!("/api/products/{}", created.id);

    let toggled: Product = server.patch(&path).await.json();
    assert!(!toggled.availability);
    assert_eq!(toggled.name, created.name);
    assert_eq!(toggled.price, created.price);

    let toggled: Product = server.patch(&path).await.json();
    assert_eq!(toggled, created);
}

#[test_log::test(tokio::test)]
async fn test_delete_removes_product() {
    let (server, _) = serve().await;
    let created = create(&server, json!({ "name": "Monitor", "price": 300 })).await;
    let path = format!("/api/products/{}", created.id);

    let response = server.delete(&path).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<String>(), "Product deleted");

    assert_eq!(server.get(&path).await.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(server.delete(&path).await.status_code(), StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_malformed_json_is_a_validation_failure() {
    let (server, app) = serve().await;

    let response = server
        .post("/api/products")
        .bytes(Bytes::from_static(b"{\"name\": "))
        .content_type("application/json")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let report: ValidationReport = response.json();
    assert_eq!(messages_for(&report, "body"), vec!["malformed JSON body"]);
    assert_eq!(app.store_calls(), 0);
}

#[test_log::test(tokio::test)]
async fn test_duplicate_fields_are_read_once() {
    let (server, app) = serve().await;

    let response = server
        .post("/api/products")
        .bytes(Bytes::from_static(br#"{"name":"a","name":"b","price":1}"#))
        .content_type("application/json")
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let created: Product = response.json();
    assert_eq!(created.name, "b");
    assert_eq!(app.store_calls(), 1);
}

#[test_log::test(tokio::test)]
async fn test_duplicate_fields_are_validated_as_forwarded() {
    let (server, app) = serve().await;

    let response = server
        .post("/api/products")
        .bytes(Bytes::from_static(br#"{"name":"a","price":1,"price":-1}"#))
        .content_type("application/json")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let report: ValidationReport = response.json();
    assert_eq!(messages_for(&report, "price"), vec!["price must be a positive value"]);
    assert_eq!(app.store_calls(), 0);
}

#[test_log::test(tokio::test)]
async fn test_head_request_is_validated() {
    let (server, app) = serve().await;

    let response = server.method(Method::HEAD, "/api/products/abc").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(app.store_calls(), 0);

    let product = create(&server, json!({ "name": "Monitor", "price": 300 })).await;
    let response = server
        .method(Method::HEAD, &format!("/api/products/{}", product.id))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[test_log::test(tokio::test)]
async fn test_non_json_body_has_no_fields() {
    let (server, _) = serve().await;

    let response = server
        .post("/api/products")
        .text(r#"{"name": "Monitor", "price": 300}"#)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let report: ValidationReport = response.json();
    assert_eq!(messages_for(&report, "name"), vec!["name is required"]);
    assert_eq!(messages_for(&report, "price"), vec!["price is required"]);
}

#[test_log::test(tokio::test)]
async fn test_oversized_body_is_refused() {
    let app = TestApp::open().await;
    let config = AxumConfig {
        body_limit: 64,
        ..Default::default()
    };
    let (router, _) = router(app.clone(), &config).unwrap();
    let server = TestServer::new(router).unwrap();

    let name = "x".repeat(128);
    let response = server
        .post("/api/products")
        .json(&json!({ "name": name, "price": 1 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(app.store_calls(), 0);
}

#[test_log::test(tokio::test)]
async fn test_allowed_origin_is_admitted() {
    let (server, _) = serve().await;

    let response = server
        .get("/api/products")
        .add_header(header::ORIGIN, HeaderValue::from_static(FRONTEND))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        HeaderValue::from_static(FRONTEND)
    );
}

#[test_log::test(tokio::test)]
async fn test_request_without_origin_is_admitted() {
    let (server, _) = serve().await;
    let response = server.get("/api/products").await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[test_log::test(tokio::test)]
async fn test_foreign_origin_is_refused_before_routing() {
    let (server, app) = serve().await;

    let response = server
        .post("/api/products")
        .add_header(header::ORIGIN, HeaderValue::from_static("http://evil.example"))
        .json(&json!({ "name": "Monitor", "price": 300 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(
        response.text(),
        "CORS error: origin http://evil.example is not allowed"
    );
    assert_eq!(app.store_calls(), 0);

    let listed: Vec<Product> = server.get("/api/products").await.json();
    assert!(listed.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_documentation_describes_every_route() {
    let (server, _) = serve().await;

    let docs: Value = server.get("/docs/api.json").await.json();
    assert_eq!(docs["info"]["title"], "Products REST API");
    assert_eq!(docs["info"]["version"], "1.0.0");

    let product = &docs["components"]["schemas"]["Product"];
    let properties = product["properties"].as_object().unwrap();
    let names: Vec<_> = properties.keys().map(String::as_str).collect();
    assert_eq!(names, ["id", "name", "price", "availability"]);
    assert_eq!(
        properties["name"]["examples"],
        json!(["Monitor curvo de 32 pulgadas"])
    );

    let expected = [
        ("/api/products", "get", &["200"][..]),
        ("/api/products", "post", &["201", "400"][..]),
        ("/api/products/{id}", "get", &["200", "400", "404"][..]),
        ("/api/products/{id}", "put", &["200", "400", "404"][..]),
        ("/api/products/{id}", "patch", &["200", "400", "404"][..]),
        ("/api/products/{id}", "delete", &["200", "400", "404"][..]),
    ];
    for (path, method, codes) in expected {
        let operation = &docs["paths"][path][method];
        assert_eq!(operation["tags"], json!(["Products"]), "{method} {path}");
        assert!(operation["summary"].is_string(), "{method} {path}");
        for code in codes {
            assert!(
                operation["responses"][*code].is_object(),
                "{method} {path} documents {code}"
            );
        }
    }

    let parameters = docs["paths"]["/api/products/{id}"]["get"]["parameters"]
        .as_array()
        .unwrap();
    assert!(parameters.iter().any(|p| p["name"] == "id" && p["in"] == "path"));
}

#[test_log::test(tokio::test)]
async fn test_documentation_viewer_is_served() {
    let (server, _) = serve().await;

    let response = server.get("/docs").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("/docs/api.json"));
}

#[test_log::test(tokio::test)]
async fn test_router_refuses_invalid_origin() {
    let app = TestApp::open().await;
    let config = AxumConfig {
        allowed_origin: Some("http://bad\norigin".to_string()),
        ..Default::default()
    };
    assert!(router(app, &config).is_err());
}

#[test_log::test(tokio::test)]
async fn test_default_config_documents_every_operation() {
    let app = TestApp::open().await;
    let built = router(app, &AxumConfig::default());
    assert!(built.is_ok());
    let (router, _) = built.unwrap();
    let server = TestServer::new(router).unwrap();

    let docs: Value = server.get("/docs/api.json").await.json();
    let operations: usize = docs["paths"]
        .as_object()
        .unwrap()
        .values()
        .map(|item| item.as_object().unwrap().len())
        .sum();
    assert_eq!(operations, 6);

    let responses = &docs["paths"]["/api/products/{id}"]["get"]["responses"];
    assert_eq!(responses["200"]["description"], "Successful response");
    assert_eq!(responses["404"]["description"], "Not found");
    assert_eq!(
        docs["paths"]["/api/products"]["get"]["responses"]["200"]["description"],
        "Successful response"
    );
}
