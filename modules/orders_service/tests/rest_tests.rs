//! REST surface tests driven through `tower::ServiceExt::oneshot`

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use orders_service::api::rest::register_routes;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

mod common;
use common::{create_test_service, date, order_input, print_test_header, seed_catalogs};

async fn seeded_router() -> Router {
    let (service, _db) = create_test_service();
    seed_catalogs(&service).await;
    service
        .create_order(&order_input("A", date(2024, 4, 1), 1, 1, 10.0))
        .await
        .unwrap();
    service
        .create_order(&order_input("B", date(2024, 5, 2), 2, 1, 5.0))
        .await
        .unwrap();
    register_routes(Router::new(), Arc::new(service))
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn parse(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}

#[tokio::test]
async fn test_company_endpoints() {
    let router = seeded_router().await;

    print_test_header(
        "test_company_endpoints",
        &["Verify company CRUD over HTTP with PascalCase payloads."],
    );

    let (status, body) = send(&router, Method::GET, "/companies", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        parse(&body),
        json!([{"Id": 1, "Name": "Acme"}, {"Id": 2, "Name": "Globex"}])
    );

    let (status, body) = send(
        &router,
        Method::POST,
        "/companies",
        Some(json!({"Id": "3", "Name": "Initech"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(parse(&body), json!({"Id": 3, "Name": "Initech"}));

    let (status, body) = send(
        &router,
        Method::PUT,
        "/companies/3",
        Some(json!({"Name": "Initrode"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["Name"], "Initrode");

    let (status, body) = send(&router, Method::DELETE, "/companies/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body), json!({"Id": 3}));

    let (status, _) = send(&router, Method::GET, "/companies/3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_errors_are_problem_details() {
    let router = seeded_router().await;

    print_test_header(
        "test_errors_are_problem_details",
        &["Verify validation, not-found and conflict map to 400, 404 and 500."],
    );

    let (status, body) = send(
        &router,
        Method::POST,
        "/order-types",
        Some(json!({"Id": -1, "Name": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let problem = parse(&body);
    assert_eq!(problem["status"], 400);
    assert_eq!(problem["fields"], json!(["Id", "Name"]));

    let (status, body) = send(&router, Method::DELETE, "/orders/NOPE", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(parse(&body)["detail"], "No order found with Id: NOPE");

    let (status, _) = send(
        &router,
        Method::POST,
        "/companies",
        Some(json!({"Id": 1, "Name": "Again"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(&router, Method::GET, "/companies/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_order_endpoints() {
    let router = seeded_router().await;

    print_test_header(
        "test_order_endpoints",
        &["Verify order create and update accept form-style scalars."],
    );

    let (status, body) = send(
        &router,
        Method::POST,
        "/orders",
        Some(json!({
            "Id": "C",
            "Date": "2024/06/01",
            "Type": "2",
            "Company": 2,
            "Price": "12.5",
            "Observation": "rush"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(
        parse(&body),
        json!({
            "Id": "C",
            "Date": "2024-06-01",
            "Type": "Install",
            "Price": 12.5,
            "Company": "Globex",
            "Observation": "rush"
        })
    );

    let (status, body) = send(
        &router,
        Method::PUT,
        "/orders/C",
        Some(json!({"Date": "2024-06-02", "Type": 1, "Company": 1, "Price": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let updated = parse(&body);
    assert_eq!(updated["Type"], "Repair");
    assert!(updated.get("Observation").is_none());

    let (status, body) = send(&router, Method::GET, "/api", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["companies"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_report_endpoints() {
    let router = seeded_router().await;

    print_test_header(
        "test_report_endpoints",
        &["Verify monthly counts, range listing and the CSV invoice."],
    );

    let (status, body) = send(
        &router,
        Method::GET,
        "/orders/counts-by-month?startDate=2024-01-01&endDate=2024-12-31",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(
        parse(&body),
        json!([
            {"Date": "2024/04", "install": 0, "repair": 1},
            {"Date": "2024/05", "install": 1, "repair": 0}
        ])
    );

    let (status, body) = send(
        &router,
        Method::GET,
        "/orders/range?company=1&startDate=2024-04-01&endDate=2024-04-30",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body).as_array().map(Vec::len), Some(1));

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/orders/invoice.csv?company=1&startDate=2024-01-01&endDate=2024-12-31")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    let csv = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&csv).ends_with("Total,,,15\n"));

    let (status, body) = send(
        &router,
        Method::GET,
        "/orders/range?company=1&startDate=2024-05-01&endDate=2024-04-01",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse(&body)["fields"], json!(["EndDate"]));
}
