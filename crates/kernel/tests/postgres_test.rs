#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Tests against a live PostgreSQL database.
//!
//! ## Running Tests
//!
//! ```bash
//! DATABASE_URL=postgres://localhost/gazette_test \
//!     cargo test --test postgres_test -- --ignored --test-threads=1
//! ```
//!
//! Every test truncates and reseeds the schema, so point `DATABASE_URL` at
//! a throwaway database.

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::json;
use sqlx::PgPool;

use gazette_kernel::config::Config;
use gazette_kernel::db;
use gazette_kernel::store::{PgStore, Reference, Store, StoreError};
use gazette_test_utils::seed;

mod common;
use common::{TestApp, msg};

async fn seeded_pool() -> PgPool {
    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("DATABASE_URL must be set");
    let pool = db::create_pool(&config).await.unwrap();
    db::run_migrations(&pool).await.unwrap();

    sqlx::query("TRUNCATE comments, articles, users, topics RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await
        .unwrap();

    let data = seed();
    for topic in &data.topics {
        sqlx::query("INSERT INTO topics (slug, description) VALUES ($1, $2)")
            .bind(&topic.slug)
            .bind(&topic.description)
            .execute(&pool)
            .await
            .unwrap();
    }
    for user in &data.users {
        sqlx::query("INSERT INTO users (username, name, avatar_url) VALUES ($1, $2, $3)")
            .bind(&user.username)
            .bind(&user.name)
            .bind(&user.avatar_url)
            .execute(&pool)
            .await
            .unwrap();
    }
    for a in &data.articles {
        sqlx::query(
            "INSERT INTO articles \
             (article_id, title, topic, author, body, created_at, votes, article_img_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(a.article_id)
        .bind(&a.title)
        .bind(&a.topic)
        .bind(&a.author)
        .bind(&a.body)
        .bind(a.created_at)
        .bind(a.votes)
        .bind(&a.article_img_url)
        .execute(&pool)
        .await
        .unwrap();
    }
    for c in &data.comments {
        sqlx::query(
            "INSERT INTO comments (comment_id, body, article_id, author, votes, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(c.comment_id)
        .bind(&c.body)
        .bind(c.article_id)
        .bind(&c.author)
        .bind(c.votes)
        .bind(c.created_at)
        .execute(&pool)
        .await
        .unwrap();
    }

    for (table, column) in [("articles", "article_id"), ("comments", "comment_id")] {
        sqlx::query(&format!(
            "SELECT setval(pg_get_serial_sequence('{table}', '{column}'), \
             (SELECT MAX({column}) FROM {table}))"
        ))
        .execute(&pool)
        .await
        .unwrap();
    }

    pool
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at a disposable PostgreSQL database"]
async fn listing_matches_in_memory_behavior() {
    let app = TestApp::with_store(Arc::new(PgStore::new(seeded_pool().await)));

    let (status, body) = app.get("/api/articles").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body["articles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["article_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 6, 2, 13, 12, 5, 1, 9, 10, 4]);
    assert_eq!(body["count"]["total_count"], 13);

    let (_, body) = app.get("/api/articles?topic=cats").await;
    assert_eq!(body["count"]["total_count"], 1);

    let (_, body) = app.get("/api/articles/1").await;
    assert_eq!(body["article"]["comment_count"], 11);

    let (status, body) = app
        .get("/api/articles?limit=4294967295&p=4294967295")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["articles"], serde_json::json!([]));

    let (status, body) = app
        .get("/api/articles/1/comments?limit=4294967295&p=4294967295")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comments"], serde_json::json!([]));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at a disposable PostgreSQL database"]
async fn mutations_round_trip_through_postgres() {
    let app = TestApp::with_store(Arc::new(PgStore::new(seeded_pool().await)));

    let (status, body) = app
        .send(
            Method::POST,
            "/api/articles/2/comments",
            json!({"username": "lurker", "body": "hello"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["comment"]["comment_id"], 19);

    let (status, body) = app
        .send(Method::PATCH, "/api/comments/1", json!({"inc_votes": 4}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comment"]["votes"], 20);

    let (status, body) = app
        .send(Method::POST, "/api/topics", json!({"slug": "mitch"}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(msg(&body), "Topic already exists");

    let (status, _) = app
        .send(Method::PATCH, "/api/articles/1", json!({"inc_votes": i32::MAX}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.delete("/api/articles/1").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, body) = app.get("/api/articles/1/comments").await;
    assert_eq!(msg(&body), "article_id 1 not found");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at a disposable PostgreSQL database"]
async fn store_classifies_constraint_failures() {
    let store = PgStore::new(seeded_pool().await);

    assert!(store.exists(&Reference::topic("mitch")).await.unwrap());
    assert!(!store.exists(&Reference::Article(999)).await.unwrap());

    let err = store
        .insert_comment(&gazette_kernel::models::NewComment {
            article_id: 999,
            author: "lurker".to_string(),
            body: "orphan".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::ForeignKeyViolation { .. }));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at a disposable PostgreSQL database"]
async fn author_sort_is_bytewise_like_the_memory_store() {
    let pool = seeded_pool().await;
    sqlx::query("INSERT INTO users (username, name, avatar_url) VALUES ('Zed', 'zed', '')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO articles (title, topic, author, body, article_img_url) \
         VALUES ('Upper', 'mitch', 'Zed', 'b', '')",
    )
    .execute(&pool)
    .await
    .unwrap();
    let app = TestApp::with_store(Arc::new(PgStore::new(pool)));

    let (status, body) = app.get("/api/articles?sort_by=author&order=asc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["articles"][0]["author"], "Zed");
}
