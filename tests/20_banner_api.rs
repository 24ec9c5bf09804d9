mod common;

use std::sync::Arc;

use anyhow::Result;
use reqwest::{header::LOCATION, StatusCode};
use serde_json::{json, Value};

#[tokio::test]
async fn list_with_nothing_available_is_not_found() -> Result<()> {
    let (server, _) = common::spawn_with(vec![
        common::banner("hidden", Some(false)),
        common::banner("unset", None),
    ])
    .await?;

    let res = reqwest::get(server.url("/banner")).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "No available banners found.");
    Ok(())
}

#[tokio::test]
async fn list_returns_only_available_banners() -> Result<()> {
    let (server, _) = common::spawn_with(vec![
        common::banner("a", Some(true)),
        common::banner("b", Some(false)),
        common::banner("c", None),
        common::banner("d", Some(true)),
    ])
    .await?;

    let res = reqwest::get(server.url("/banner")).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Vec<Value>>().await?;
    let ids: Vec<&str> = body.iter().filter_map(|b| b["banner_id"].as_str()).collect();
    assert_eq!(ids, vec!["a", "d"]);
    Ok(())
}

#[tokio::test]
async fn admin_creates_and_user_reads_back() -> Result<()> {
    let (server, _) = common::spawn_with(vec![]).await?;
    let client = reqwest::Client::new();
    let payload = json!({
        "banner_id": "b1",
        "image": "x.png",
        "resource": 1,
        "urllink": "http://x",
        "is_available": true
    });

    let created = client
        .post(server.url("/banner"))
        .bearer_auth(server.admin_token())
        .json(&payload)
        .send()
        .await?;
    assert_eq!(created.status(), StatusCode::CREATED);
    assert_eq!(
        created.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
        Some("/banner/b1")
    );
    assert_eq!(created.json::<Value>().await?, payload);

    let fetched = client
        .get(server.url("/banner/b1"))
        .bearer_auth(server.user_token())
        .send()
        .await?;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(fetched.json::<Value>().await?, payload);
    Ok(())
}

#[tokio::test]
async fn creating_an_existing_id_conflicts() -> Result<()> {
    let (server, repository) = common::spawn_with(vec![common::banner("b1", Some(true))]).await?;

    let res = reqwest::Client::new()
        .post(server.url("/banner"))
        .bearer_auth(server.admin_token())
        .json(&json!({ "banner_id": "b1", "image": "other.png" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(repository.snapshot().await, vec![common::banner("b1", Some(true))]);
    Ok(())
}

#[tokio::test]
async fn null_payloads_are_bad_requests() -> Result<()> {
    let (server, _) = common::spawn_with(vec![]).await?;
    let client = reqwest::Client::new();

    let create = client
        .post(server.url("/banner"))
        .bearer_auth(server.admin_token())
        .json(&Value::Null)
        .send()
        .await?;
    assert_eq!(create.status(), StatusCode::BAD_REQUEST);
    assert_eq!(create.json::<Value>().await?["message"], "Banner data is required.");

    let update = client
        .put(server.url("/banner"))
        .bearer_auth(server.admin_token())
        .json(&Value::Null)
        .send()
        .await?;
    assert_eq!(update.status(), StatusCode::BAD_REQUEST);
    assert_eq!(update.json::<Value>().await?["message"], "Banner ID is required for updating.");
    Ok(())
}

#[tokio::test]
async fn missing_body_is_a_bad_request() -> Result<()> {
    let (server, _) = common::spawn_with(vec![]).await?;

    let res = reqwest::Client::new()
        .post(server.url("/banner"))
        .bearer_auth(server.admin_token())
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn update_unknown_id_is_not_found_and_changes_nothing() -> Result<()> {
    let (server, repository) = common::spawn_with(vec![common::banner("b1", Some(true))]).await?;
    let before = repository.snapshot().await;

    let res = reqwest::Client::new()
        .put(server.url("/banner"))
        .bearer_auth(server.admin_token())
        .json(&json!({ "banner_id": "zzz", "image": "z.png", "is_available": true }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["message"], "Banner with ID zzz not found.");
    assert_eq!(repository.snapshot().await, before);
    Ok(())
}

#[tokio::test]
async fn update_overwrites_every_field() -> Result<()> {
    let (server, repository) = common::spawn_with(vec![common::banner("b1", Some(true))]).await?;

    let res = reqwest::Client::new()
        .put(server.url("/banner"))
        .bearer_auth(server.admin_token())
        .json(&json!({ "banner_id": "b1", "image": "new.png" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let stored = repository.snapshot().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].image.as_deref(), Some("new.png"));
    assert_eq!(stored[0].resource, None);
    assert_eq!(stored[0].link, None);
    assert_eq!(stored[0].is_available, None);
    Ok(())
}

#[tokio::test]
async fn delete_is_idempotent_for_missing_ids() -> Result<()> {
    let (server, repository) = common::spawn_with(vec![common::banner("b1", Some(true))]).await?;
    let client = reqwest::Client::new();
    let token = server.admin_token();

    let removed = client
        .delete(server.url("/banner/b1"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);
    assert!(repository.snapshot().await.is_empty());

    for _ in 0..2 {
        let again = client
            .delete(server.url("/banner/b1"))
            .bearer_auth(&token)
            .send()
            .await?;
        assert_eq!(again.status(), StatusCode::NOT_FOUND);
    }
    Ok(())
}

#[tokio::test]
async fn get_unknown_id_is_not_found() -> Result<()> {
    let (server, _) = common::spawn_with(vec![]).await?;

    let res = reqwest::Client::new()
        .get(server.url("/banner/missing"))
        .bearer_auth(server.user_token())
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["message"], "Banner with ID missing not found.");
    Ok(())
}

#[tokio::test]
async fn store_failures_surface_as_opaque_internal_errors() -> Result<()> {
    let server = common::TestServer::spawn(Arc::new(common::UnavailableRepository)).await?;
    let client = reqwest::Client::new();

    let list = client.get(server.url("/banner")).send().await?;
    assert_eq!(list.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = list.json::<Value>().await?;
    assert_eq!(body["message"], "An error occurred while retrieving the banners.");
    assert!(!body.to_string().contains("connection refused"));

    let delete = client
        .delete(server.url("/banner/b1"))
        .bearer_auth(server.admin_token())
        .send()
        .await?;
    assert_eq!(delete.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let health = client.get(server.url("/health")).send().await?;
    assert_eq!(health.status(), StatusCode::SERVICE_UNAVAILABLE);
    Ok(())
}

#[tokio::test]
async fn location_resolves_for_ids_with_reserved_characters() -> Result<()> {
    let (server, _) = common::spawn_with(vec![]).await?;
    let client = reqwest::Client::new();

    for (id, expected_location) in [
        ("a?b", "/banner/a%3Fb"),
        ("x/y", "/banner/x%2Fy"),
        ("bannér", "/banner/bann%C3%A9r"),
    ] {
        let payload = json!({ "banner_id": id, "is_available": true });
        let created = client
            .post(server.url("/banner"))
            .bearer_auth(server.admin_token())
            .json(&payload)
            .send()
            .await?;
        assert_eq!(created.status(), StatusCode::CREATED, "create {id:?}");

        let location = created
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        assert_eq!(location.as_deref(), Some(expected_location));

        let fetched = client
            .get(server.url(expected_location))
            .bearer_auth(server.user_token())
            .send()
            .await?;
        assert_eq!(fetched.status(), StatusCode::OK, "follow location for {id:?}");
        assert_eq!(fetched.json::<Value>().await?["banner_id"], id);
    }
    Ok(())
}
