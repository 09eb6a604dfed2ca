#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Comment endpoint tests against the seeded in-memory store.

use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

mod common;
use common::{TestApp, msg};

fn comment_ids(body: &Value) -> Vec<i64> {
    body["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["comment_id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn comments_are_newest_first_and_paginated() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/articles/1/comments").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(comment_ids(&body), vec![5, 2, 18, 13, 7, 8, 6, 12, 3, 4]);
    assert!(body.get("msg").is_none());

    let (_, body) = app.get("/api/articles/1/comments?p=2").await;
    assert_eq!(comment_ids(&body), vec![9]);

    let (_, body) = app.get("/api/articles/1/comments?limit=3&p=2").await;
    assert_eq!(comment_ids(&body), vec![13, 7, 8]);
}

#[tokio::test]
async fn comment_rows_have_every_field() {
    let app = TestApp::new();
    let (_, body) = app.get("/api/articles/9/comments").await;

    let first = &body["comments"][0];
    for field in ["comment_id", "body", "article_id", "author", "votes", "created_at"] {
        assert!(first.get(field).is_some(), "missing {field}");
    }
    assert_eq!(first["article_id"], 9);
}

#[tokio::test]
async fn article_without_comments_explains_itself() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/articles/2/comments").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comments"], json!([]));
    assert_eq!(msg(&body), "No comments found for article");
}

#[tokio::test]
async fn page_beyond_range_is_plain_empty() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/articles/1/comments?p=5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comments"], json!([]));
    assert!(body.get("msg").is_none());
}

#[tokio::test]
async fn largest_page_window_is_plain_empty() {
    let app = TestApp::new();
    let (status, body) = app
        .get("/api/articles/1/comments?limit=4294967295&p=4294967295")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comments"], json!([]));
}

#[tokio::test]
async fn listing_comments_errors() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/articles/999/comments").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(msg(&body), "article_id 999 not found");

    let (status, body) = app.get("/api/articles/banana/comments").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(msg(&body), "Bad Request");

    let (status, body) = app.get("/api/articles/1/comments?limit=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(msg(&body), "Invalid Query Passed");
}

#[tokio::test]
async fn post_comment_returns_created_row() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::POST,
            "/api/articles/2/comments",
            json!({"username": "lurker", "body": "First!"}),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let comment = &body["comment"];
    assert_eq!(comment["comment_id"], 19);
    assert_eq!(comment["article_id"], 2);
    assert_eq!(comment["author"], "lurker");
    assert_eq!(comment["body"], "First!");
    assert_eq!(comment["votes"], 0);

    let (_, body) = app.get("/api/articles/2").await;
    assert_eq!(body["article"]["comment_count"], 1);
}

#[tokio::test]
async fn post_comment_ignores_extra_fields() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::POST,
            "/api/articles/2/comments",
            json!({"username": "lurker", "body": "hi", "votes": 9000}),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["comment"]["votes"], 0);
}

#[tokio::test]
async fn post_comment_errors() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            Method::POST,
            "/api/articles/1/comments",
            json!({"username": "lurker"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(msg(&body), "Required information is missing");

    let (status, body) = app
        .send(
            Method::POST,
            "/api/articles/999/comments",
            json!({"username": "lurker", "body": "hi"}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(msg(&body), "article_id 999 not found");

    let (status, body) = app
        .send(
            Method::POST,
            "/api/articles/banana/comments",
            json!({"username": "lurker", "body": "hi"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(msg(&body), "Bad Request");
}

#[tokio::test]
async fn patch_comment_votes() {
    let app = TestApp::new();

    let (status, body) = app
        .send(Method::PATCH, "/api/comments/1", json!({"inc_votes": -20}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comment"]["comment_id"], 1);
    assert_eq!(body["comment"]["votes"], -4);

    let (status, body) = app
        .send(Method::PATCH, "/api/comments/999", json!({"inc_votes": 1}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(msg(&body), "comment_id 999 not found");

    let (status, body) = app
        .send(Method::PATCH, "/api/comments/1", json!({"inc_votes": true}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(msg(&body), "Bad Request");

    let (status, body) = app.send(Method::PATCH, "/api/comments/1", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(msg(&body), "Required information is missing");
}

#[tokio::test]
async fn delete_comment_errors() {
    let app = TestApp::new();

    let (status, bytes) = app.delete("/api/comments/banana").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(msg(&body), "Bad Request");

    let (status, bytes) = app.delete("/api/comments/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(msg(&body), "comment_id 999 not found");
}
