//! PostgreSQL-backed store.

use anyhow::anyhow;
use async_trait::async_trait;
use sea_query::{Value, Values};
use sqlx::postgres::PgArguments;
use sqlx::{Arguments, PgPool};
use tracing::debug;

use super::{Reference, Store, StoreError, StoreResult};
use crate::db;
use crate::models::{Article, ArticleSummary, Comment, NewArticle, NewComment, NewTopic, Topic, User};
use crate::query::{ArticleListParams, ArticleListing, Pagination, composer};

/// Store implementation over a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        let classified = match &err {
            sqlx::Error::PoolTimedOut => Some(StoreError::Timeout),
            sqlx::Error::Database(db_err) => {
                let constraint = db_err.constraint().map(str::to_string);
                match db_err.code().as_deref() {
                    Some("23505") => Some(StoreError::UniqueViolation { constraint }),
                    Some("23503") => Some(StoreError::ForeignKeyViolation { constraint }),
                    Some("22P02") => Some(StoreError::InvalidRepresentation),
                    Some("23502") => Some(StoreError::NotNullViolation),
                    Some("22003") => Some(StoreError::OutOfRange),
                    // query_canceled, raised when statement_timeout fires
                    Some("57014") => Some(StoreError::Timeout),
                    _ => None,
                }
            }
            _ => None,
        };

        classified.unwrap_or_else(|| StoreError::Backend(anyhow::Error::new(err)))
    }
}

/// Convert SeaQuery bind values into PostgreSQL arguments.
fn bind_values(values: Values) -> StoreResult<PgArguments> {
    let mut args = PgArguments::default();
    for value in values.0 {
        let added = match value {
            Value::Bool(v) => args.add(v),
            Value::Int(v) => args.add(v),
            Value::BigInt(v) => args.add(v),
            Value::Unsigned(v) => args.add(v.map(i64::from)),
            Value::BigUnsigned(v) => {
                let v = v
                    .map(i64::try_from)
                    .transpose()
                    .map_err(|_| StoreError::OutOfRange)?;
                args.add(v)
            }
            Value::String(v) => args.add(v.map(|s| s.to_string())),
            other => {
                return Err(StoreError::Backend(anyhow!(
                    "unsupported bind value: {other:?}"
                )));
            }
        };
        added.map_err(|e| StoreError::Backend(anyhow!("failed to bind query argument: {e}")))?;
    }
    Ok(args)
}

fn page_bounds(page: &Pagination) -> StoreResult<(i64, i64)> {
    let offset = i64::try_from(page.offset()).map_err(|_| StoreError::OutOfRange)?;
    Ok((i64::from(page.limit()), offset))
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> bool {
        db::check_health(&self.pool).await
    }

    async fn exists(&self, reference: &Reference) -> StoreResult<bool> {
        let (sql, values) = composer::exists(reference);
        let found: bool = sqlx::query_scalar_with(&sql, bind_values(values)?)
            .fetch_one(&self.pool)
            .await?;

        debug!(%reference, found, "existence check");
        Ok(found)
    }

    async fn list_articles(&self, params: &ArticleListParams) -> StoreResult<Vec<ArticleSummary>> {
        let (sql, values) = ArticleListing::new(params).build();
        let articles = sqlx::query_as_with::<_, ArticleSummary, _>(&sql, bind_values(values)?)
            .fetch_all(&self.pool)
            .await?;

        Ok(articles)
    }

    async fn count_articles(&self, params: &ArticleListParams) -> StoreResult<i64> {
        let (sql, values) = ArticleListing::new(params).build_count();
        let total: i64 = sqlx::query_scalar_with(&sql, bind_values(values)?)
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn find_article(&self, article_id: i32) -> StoreResult<Option<Article>> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            SELECT a.article_id, a.author, a.title, a.body, a.topic, a.created_at, a.votes,
                   a.article_img_url, COUNT(c.comment_id) AS comment_count
            FROM articles a
            LEFT JOIN comments c ON c.article_id = a.article_id
            WHERE a.article_id = $1
            GROUP BY a.article_id
            "#,
        )
        .bind(article_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(article)
    }

    async fn insert_article(&self, article: &NewArticle) -> StoreResult<i32> {
        let article_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO articles (author, title, body, topic, article_img_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING article_id
            "#,
        )
        .bind(&article.author)
        .bind(&article.title)
        .bind(&article.body)
        .bind(&article.topic)
        .bind(&article.article_img_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(article_id)
    }

    async fn add_article_votes(&self, article_id: i32, delta: i32) -> StoreResult<bool> {
        let result = sqlx::query("UPDATE articles SET votes = votes + $1 WHERE article_id = $2")
            .bind(delta)
            .bind(article_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_article(&self, article_id: i32) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM articles WHERE article_id = $1")
            .bind(article_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_comments(
        &self,
        article_id: i32,
        page: &Pagination,
    ) -> StoreResult<Vec<Comment>> {
        let (limit, offset) = page_bounds(page)?;
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT comment_id, body, article_id, author, votes, created_at
            FROM comments
            WHERE article_id = $1
            ORDER BY created_at DESC, comment_id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(article_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn count_comments(&self, article_id: i32) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE article_id = $1")
            .bind(article_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn insert_comment(&self, comment: &NewComment) -> StoreResult<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (body, article_id, author)
            VALUES ($1, $2, $3)
            RETURNING comment_id, body, article_id, author, votes, created_at
            "#,
        )
        .bind(&comment.body)
        .bind(comment.article_id)
        .bind(&comment.author)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn add_comment_votes(&self, comment_id: i32, delta: i32) -> StoreResult<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            UPDATE comments
            SET votes = votes + $1
            WHERE comment_id = $2
            RETURNING comment_id, body, article_id, author, votes, created_at
            "#,
        )
        .bind(delta)
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn delete_comment(&self, comment_id: i32) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_topics(&self) -> StoreResult<Vec<Topic>> {
        let topics =
            sqlx::query_as::<_, Topic>("SELECT slug, description FROM topics ORDER BY slug")
                .fetch_all(&self.pool)
                .await?;

        Ok(topics)
    }

    async fn insert_topic(&self, topic: &NewTopic) -> StoreResult<Topic> {
        let topic = sqlx::query_as::<_, Topic>(
            "INSERT INTO topics (slug, description) VALUES ($1, $2) RETURNING slug, description",
        )
        .bind(&topic.slug)
        .bind(&topic.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(topic)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT username, name, avatar_url FROM users ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find_user(&self, username: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT username, name, avatar_url FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_values_bind_cleanly() {
        let params = ArticleListParams {
            topic: Some("cats".to_string()),
            ..ArticleListParams::default()
        };
        let (_, values) = ArticleListing::new(&params).build();

        assert!(bind_values(values).is_ok());
    }

    #[test]
    fn existence_values_bind_cleanly() {
        let (_, values) = composer::exists(&Reference::Comment(1));
        assert!(bind_values(values).is_ok());
    }

    #[test]
    fn oversized_unsigned_is_out_of_range() {
        let values = Values(vec![Value::BigUnsigned(Some(u64::MAX))]);
        assert!(matches!(bind_values(values), Err(StoreError::OutOfRange)));
    }

    #[test]
    fn unsupported_value_is_rejected() {
        let values = Values(vec![Value::Double(Some(1.5))]);
        assert!(matches!(bind_values(values), Err(StoreError::Backend(_))));
    }

    #[test]
    fn page_bounds_convert_to_signed() {
        let page = Pagination::new(5, 3).unwrap_or_default();
        assert!(matches!(page_bounds(&page), Ok((5, 10))));
    }

    #[test]
    fn largest_page_window_still_binds() {
        let pagination = Pagination::from_raw(Some("4294967295"), Some("4294967295"))
            .unwrap_or_default();
        assert!(matches!(
            page_bounds(&pagination),
            Ok((4_294_967_295, i64::MAX))
        ));

        let params = ArticleListParams {
            pagination,
            ..ArticleListParams::default()
        };
        let (_, values) = ArticleListing::new(&params).build();
        assert!(bind_values(values).is_ok());
    }

    #[test]
    fn pool_timeout_is_classified() {
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolTimedOut),
            StoreError::Timeout
        ));
        assert!(matches!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::Backend(_)
        ));
    }
}
