use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::startup::build_app;

struct Reply {
    status: StatusCode,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl Reply {
    fn json(&self) -> anyhow::Result<Value> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> anyhow::Result<Reply> {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(body.map(|b| Body::from(b.to_owned())).unwrap_or_else(Body::empty))?;
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = to_bytes(resp.into_body(), usize::MAX).await?.to_vec();
    Ok(Reply { status, content_type, body })
}

#[tokio::test]
async fn widget_lifecycle() -> anyhow::Result<()> {
    let app = build_app();
    let widget = r#"{"id":"1","name":"Widget","price":9.99}"#;

    let res = send(&app, "POST", "/items", Some(widget)).await?;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.content_type.as_deref(), Some("application/json"));
    assert_eq!(res.json()?, json!({"id": "1", "name": "Widget", "price": 9.99}));

    let res = send(&app, "POST", "/items", Some(widget)).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.text(), "Item already exists");

    let res = send(&app, "GET", "/items/1", None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()?, json!({"id": "1", "name": "Widget", "price": 9.99}));

    let res = send(&app, "PUT", "/items/1", Some(r#"{"id":"ignored","name":"Widget2","price":5.0}"#)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()?, json!({"id": "1", "name": "Widget2", "price": 5.0}));

    let res = send(&app, "DELETE", "/items/1", None).await?;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert!(res.body.is_empty());

    let res = send(&app, "GET", "/items/1", None).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.text(), "Item not found");
    Ok(())
}

#[tokio::test]
async fn list_starts_empty_and_tracks_contents() -> anyhow::Result<()> {
    let app = build_app();

    let res = send(&app, "GET", "/items", None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()?, json!([]));

    for (id, name) in [("a", "Apple"), ("b", "Banana"), ("c", "Cherry")] {
        let body = json!({"id": id, "name": name, "price": 1.5}).to_string();
        let res = send(&app, "POST", "/items", Some(&body)).await?;
        assert_eq!(res.status, StatusCode::CREATED);
    }
    send(&app, "DELETE", "/items/b", None).await?;

    let res = send(&app, "GET", "/items", None).await?;
    let mut ids: Vec<String> = res
        .json()?
        .as_array()
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| v["id"].as_str().map(str::to_owned))
        .collect();
    ids.sort();
    assert_eq!(ids, ["a", "c"]);
    Ok(())
}

#[tokio::test]
async fn malformed_create_is_invalid_input() -> anyhow::Result<()> {
    let app = build_app();
    for body in ["", "{", "[1,2]", r#"{"id":"1","price":"free"}"#] {
        let res = send(&app, "POST", "/items", Some(body)).await?;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "body {body:?}");
        assert_eq!(res.text(), "Invalid input");
    }
    let res = send(&app, "GET", "/items", None).await?;
    assert_eq!(res.json()?, json!([]));
    Ok(())
}

#[tokio::test]
async fn create_without_content_type_and_with_partial_fields() -> anyhow::Result<()> {
    let app = build_app();
    let res = send(&app, "POST", "/items", Some(r#"{"id":"p","extra":true}"#)).await?;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.json()?, json!({"id": "p", "name": "", "price": 0.0}));
    Ok(())
}

#[tokio::test]
async fn create_decodes_bodies_leniently() -> anyhow::Result<()> {
    let app = build_app();

    let res = send(&app, "POST", "/items", Some(r#"{"ID":"x","Name":"Widget","Price":1}"#)).await?;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.json()?, json!({"id": "x", "name": "Widget", "price": 1.0}));

    let res = send(&app, "POST", "/items", Some("{\"id\":\"t\"}\n{\"id\":\"u\"}")).await?;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.json()?, json!({"id": "t", "name": "", "price": 0.0}));

    let res = send(&app, "POST", "/items", Some(r#"{"id":"n","name":null,"price":2}"#)).await?;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.json()?, json!({"id": "n", "name": "", "price": 2.0}));

    let res = send(&app, "POST", "/items", Some("null")).await?;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.json()?, json!({"id": "", "name": "", "price": 0.0}));

    let res = send(&app, "GET", "/items/x", None).await?;
    assert_eq!(res.json()?, json!({"id": "x", "name": "Widget", "price": 1.0}));
    let res = send(&app, "GET", "/items/u", None).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn absent_ids_are_not_found_and_change_nothing() -> anyhow::Result<()> {
    let app = build_app();
    send(&app, "POST", "/items", Some(r#"{"id":"1","name":"Widget","price":9.99}"#)).await?;

    for (method, body) in [("GET", None), ("PUT", Some(r#"{"name":"x","price":1}"#)), ("DELETE", None)] {
        let res = send(&app, method, "/items/nope", body).await?;
        assert_eq!(res.status, StatusCode::NOT_FOUND, "{method}");
        assert_eq!(res.text(), "Item not found");
    }

    let res = send(&app, "GET", "/items", None).await?;
    assert_eq!(res.json()?, json!([{"id": "1", "name": "Widget", "price": 9.99}]));
    Ok(())
}

#[tokio::test]
async fn update_checks_existence_before_body() -> anyhow::Result<()> {
    let app = build_app();

    let res = send(&app, "PUT", "/items/ghost", Some("not json")).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.text(), "Item not found");

    send(&app, "POST", "/items", Some(r#"{"id":"ghost","name":"Boo","price":1}"#)).await?;
    let res = send(&app, "PUT", "/items/ghost", Some("not json")).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.text(), "Invalid input");

    let res = send(&app, "GET", "/items/ghost", None).await?;
    assert_eq!(res.json()?, json!({"id": "ghost", "name": "Boo", "price": 1.0}));
    Ok(())
}

#[tokio::test]
async fn update_without_body_id_keeps_path_id() -> anyhow::Result<()> {
    let app = build_app();
    send(&app, "POST", "/items", Some(r#"{"id":"k","name":"Key","price":2}"#)).await?;

    let res = send(&app, "PUT", "/items/k", Some(r#"{"name":"Lock"}"#)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()?, json!({"id": "k", "name": "Lock", "price": 0.0}));
    Ok(())
}

#[tokio::test]
async fn unsupported_methods_and_paths() -> anyhow::Result<()> {
    let app = build_app();
    let res = send(&app, "PATCH", "/items/1", Some("{}")).await?;
    assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);
    let res = send(&app, "POST", "/items/1", Some("{}")).await?;
    assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);
    let res = send(&app, "GET", "/widgets", None).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn operational_endpoints() -> anyhow::Result<()> {
    let app = build_app();

    let res = send(&app, "GET", "/health", None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()?, json!({"status": "ok"}));

    send(&app, "POST", "/items", Some(r#"{"id":"m","name":"Metric","price":3}"#)).await?;
    let res = send(&app, "GET", "/metrics", None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.text().contains("item_store_requests_total"));

    let res = send(&app, "GET", "/api-docs/openapi.json", None).await?;
    assert_eq!(res.status, StatusCode::OK);
    let doc = res.json()?;
    assert!(doc["paths"]["/items/{id}"].is_object());
    Ok(())
}
