//! In-memory store.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use gazette_kernel::models::{
    Article, ArticleSummary, Comment, NewArticle, NewComment, NewTopic, Topic, User,
};
use gazette_kernel::query::{ArticleListParams, Pagination, SortColumn, SortOrder};
use gazette_kernel::store::{Reference, Store, StoreError, StoreResult};

use crate::fixture::SeedData;

/// Stored article row, without the derived comment count.
#[derive(Debug, Clone)]
struct ArticleRow {
    article_id: i32,
    author: String,
    title: String,
    body: String,
    topic: String,
    created_at: DateTime<Utc>,
    votes: i32,
    article_img_url: String,
}

#[derive(Debug, Default)]
struct Tables {
    topics: Vec<Topic>,
    users: Vec<User>,
    articles: Vec<ArticleRow>,
    comments: Vec<Comment>,
    next_article_id: i32,
    next_comment_id: i32,
}

impl Tables {
    fn comment_count(&self, article_id: i32) -> i64 {
        self.comments
            .iter()
            .filter(|c| c.article_id == article_id)
            .count() as i64
    }

    fn article(&self, row: &ArticleRow) -> Article {
        Article {
            article_id: row.article_id,
            author: row.author.clone(),
            title: row.title.clone(),
            body: row.body.clone(),
            topic: row.topic.clone(),
            created_at: row.created_at,
            votes: row.votes,
            article_img_url: row.article_img_url.clone(),
            comment_count: self.comment_count(row.article_id),
        }
    }

    fn has_user(&self, username: &str) -> bool {
        self.users.iter().any(|u| u.username == username)
    }

    fn has_topic(&self, slug: &str) -> bool {
        self.topics.iter().any(|t| t.slug == slug)
    }

    fn has_article(&self, article_id: i32) -> bool {
        self.articles.iter().any(|a| a.article_id == article_id)
    }

    fn matching(&self, params: &ArticleListParams) -> impl Iterator<Item = &ArticleRow> {
        self.articles
            .iter()
            .filter(move |a| params.topic.as_deref().is_none_or(|t| a.topic == t))
    }
}

/// Store backed by plain vectors behind a mutex.
///
/// Mirrors the PostgreSQL store: listings sort with an `article_id`
/// tie-break, text sort keys compare bytewise (the listing query orders
/// them `COLLATE "C"`), slugs are unique, foreign keys are enforced, deleting an
/// article removes its comments, and vote arithmetic that overflows `i32`
/// fails with [`StoreError::OutOfRange`].
#[derive(Debug)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    offline: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl MemoryStore {
    /// A store with no rows.
    pub fn empty() -> Self {
        Self {
            tables: Mutex::new(Tables {
                next_article_id: 1,
                next_comment_id: 1,
                ..Tables::default()
            }),
            offline: AtomicBool::new(false),
        }
    }

    /// A store holding the standard fixture.
    pub fn seeded() -> Self {
        Self::with_data(crate::seed())
    }

    /// A store holding `data`. Ids continue after the highest seeded id.
    pub fn with_data(data: SeedData) -> Self {
        let articles: Vec<ArticleRow> = data
            .articles
            .into_iter()
            .map(|a| ArticleRow {
                article_id: a.article_id,
                author: a.author,
                title: a.title,
                body: a.body,
                topic: a.topic,
                created_at: a.created_at,
                votes: a.votes,
                article_img_url: a.article_img_url,
            })
            .collect();

        let next_article_id = articles.iter().map(|a| a.article_id).max().unwrap_or(0) + 1;
        let next_comment_id = data
            .comments
            .iter()
            .map(|c| c.comment_id)
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            tables: Mutex::new(Tables {
                topics: data.topics,
                users: data.users,
                articles,
                comments: data.comments,
                next_article_id,
                next_comment_id,
            }),
            offline: AtomicBool::new(false),
        }
    }

    /// Simulate losing the backend: pings fail and every call errors.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, AtomicOrdering::SeqCst);
    }

    /// Number of stored comments, across all articles.
    pub fn comment_total(&self) -> usize {
        self.tables.lock().comments.len()
    }

    /// Number of stored articles.
    pub fn article_total(&self) -> usize {
        self.tables.lock().articles.len()
    }

    fn online(&self) -> StoreResult<()> {
        if self.offline.load(AtomicOrdering::SeqCst) {
            Err(StoreError::Backend(anyhow::anyhow!(
                "connection refused: memory store offline"
            )))
        } else {
            Ok(())
        }
    }
}

fn compare(a: &ArticleRow, b: &ArticleRow, column: SortColumn) -> Ordering {
    let primary = match column {
        SortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
        SortColumn::ArticleId => Ordering::Equal,
        SortColumn::Author => a.author.cmp(&b.author),
        SortColumn::Topic => a.topic.cmp(&b.topic),
    };
    primary.then(a.article_id.cmp(&b.article_id))
}

fn window<T>(rows: Vec<T>, page: &Pagination) -> Vec<T> {
    let Ok(offset) = usize::try_from(page.offset()) else {
        return Vec::new();
    };
    rows.into_iter()
        .skip(offset)
        .take(page.limit() as usize)
        .collect()
}

fn foreign_key(constraint: &str) -> StoreError {
    StoreError::ForeignKeyViolation {
        constraint: Some(constraint.to_string()),
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> bool {
        self.online().is_ok()
    }

    async fn exists(&self, reference: &Reference) -> StoreResult<bool> {
        self.online()?;
        let tables = self.tables.lock();
        let found = match reference {
            Reference::Article(id) => tables.has_article(*id),
            Reference::Comment(id) => tables.comments.iter().any(|c| c.comment_id == *id),
            Reference::User(username) => tables.has_user(username),
            Reference::Topic(slug) => tables.has_topic(slug),
        };
        Ok(found)
    }

    async fn list_articles(&self, params: &ArticleListParams) -> StoreResult<Vec<ArticleSummary>> {
        self.online()?;
        let tables = self.tables.lock();

        let mut rows: Vec<&ArticleRow> = tables.matching(params).collect();
        rows.sort_by(|a, b| {
            let ordering = compare(a, b, params.sort_by);
            match params.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let summaries = rows
            .into_iter()
            .map(|row| tables.article(row).summary())
            .collect();
        Ok(window(summaries, &params.pagination))
    }

    async fn count_articles(&self, params: &ArticleListParams) -> StoreResult<i64> {
        self.online()?;
        Ok(self.tables.lock().matching(params).count() as i64)
    }

    async fn find_article(&self, article_id: i32) -> StoreResult<Option<Article>> {
        self.online()?;
        let tables = self.tables.lock();
        Ok(tables
            .articles
            .iter()
            .find(|a| a.article_id == article_id)
            .map(|row| tables.article(row)))
    }

    async fn insert_article(&self, article: &NewArticle) -> StoreResult<i32> {
        self.online()?;
        let mut tables = self.tables.lock();

        if !tables.has_user(&article.author) {
            return Err(foreign_key("articles_author_fkey"));
        }
        if !tables.has_topic(&article.topic) {
            return Err(foreign_key("articles_topic_fkey"));
        }

        let article_id = tables.next_article_id;
        tables.next_article_id += 1;
        tables.articles.push(ArticleRow {
            article_id,
            author: article.author.clone(),
            title: article.title.clone(),
            body: article.body.clone(),
            topic: article.topic.clone(),
            created_at: Utc::now(),
            votes: 0,
            article_img_url: article.article_img_url.clone(),
        });

        Ok(article_id)
    }

    async fn add_article_votes(&self, article_id: i32, delta: i32) -> StoreResult<bool> {
        self.online()?;
        let mut tables = self.tables.lock();
        let Some(row) = tables.articles.iter_mut().find(|a| a.article_id == article_id) else {
            return Ok(false);
        };
        row.votes = row.votes.checked_add(delta).ok_or(StoreError::OutOfRange)?;
        Ok(true)
    }

    async fn delete_article(&self, article_id: i32) -> StoreResult<bool> {
        self.online()?;
        let mut tables = self.tables.lock();
        let before = tables.articles.len();
        tables.articles.retain(|a| a.article_id != article_id);
        if tables.articles.len() == before {
            return Ok(false);
        }
        tables.comments.retain(|c| c.article_id != article_id);
        Ok(true)
    }

    async fn list_comments(
        &self,
        article_id: i32,
        page: &Pagination,
    ) -> StoreResult<Vec<Comment>> {
        self.online()?;
        let tables = self.tables.lock();

        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|c| c.article_id == article_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.comment_id.cmp(&a.comment_id))
        });

        Ok(window(comments, page))
    }

    async fn count_comments(&self, article_id: i32) -> StoreResult<i64> {
        self.online()?;
        Ok(self.tables.lock().comment_count(article_id))
    }

    async fn insert_comment(&self, comment: &NewComment) -> StoreResult<Comment> {
        self.online()?;
        let mut tables = self.tables.lock();

        if !tables.has_article(comment.article_id) {
            return Err(foreign_key("comments_article_id_fkey"));
        }
        if !tables.has_user(&comment.author) {
            return Err(foreign_key("comments_author_fkey"));
        }

        let created = Comment {
            comment_id: tables.next_comment_id,
            body: comment.body.clone(),
            article_id: comment.article_id,
            author: comment.author.clone(),
            votes: 0,
            created_at: Utc::now(),
        };
        tables.next_comment_id += 1;
        tables.comments.push(created.clone());

        Ok(created)
    }

    async fn add_comment_votes(&self, comment_id: i32, delta: i32) -> StoreResult<Option<Comment>> {
        self.online()?;
        let mut tables = self.tables.lock();
        let Some(comment) = tables.comments.iter_mut().find(|c| c.comment_id == comment_id) else {
            return Ok(None);
        };
        comment.votes = comment.votes.checked_add(delta).ok_or(StoreError::OutOfRange)?;
        Ok(Some(comment.clone()))
    }

    async fn delete_comment(&self, comment_id: i32) -> StoreResult<bool> {
        self.online()?;
        let mut tables = self.tables.lock();
        let before = tables.comments.len();
        tables.comments.retain(|c| c.comment_id != comment_id);
        Ok(tables.comments.len() < before)
    }

    async fn list_topics(&self) -> StoreResult<Vec<Topic>> {
        self.online()?;
        let mut topics = self.tables.lock().topics.clone();
        topics.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(topics)
    }

    async fn insert_topic(&self, topic: &NewTopic) -> StoreResult<Topic> {
        self.online()?;
        let mut tables = self.tables.lock();
        if tables.has_topic(&topic.slug) {
            return Err(StoreError::UniqueViolation {
                constraint: Some("topics_pkey".to_string()),
            });
        }

        let created = Topic {
            slug: topic.slug.clone(),
            description: topic.description.clone(),
        };
        tables.topics.push(created.clone());
        Ok(created)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        self.online()?;
        let mut users = self.tables.lock().users.clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn find_user(&self, username: &str) -> StoreResult<Option<User>> {
        self.online()?;
        Ok(self
            .tables
            .lock()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use gazette_kernel::query::RawArticleParams;

    fn params(raw: RawArticleParams) -> ArticleListParams {
        ArticleListParams::from_raw(&raw).unwrap()
    }

    #[tokio::test]
    async fn equal_sort_keys_fall_back_to_article_id() {
        let store = MemoryStore::seeded();
        let listed = store
            .list_articles(&params(RawArticleParams {
                limit: Some("20".to_string()),
                ..Default::default()
            }))
            .await
            .unwrap();

        // Articles 12 and 13 share a timestamp; descending puts 13 first.
        let ids: Vec<i32> = listed.iter().map(|a| a.article_id).collect();
        let twelve = ids.iter().position(|&id| id == 12).unwrap();
        let thirteen = ids.iter().position(|&id| id == 13).unwrap();
        assert_eq!(thirteen + 1, twelve);
    }

    #[tokio::test]
    async fn author_sort_is_bytewise() {
        let mut data = crate::seed();
        data.users.push(User {
            username: "Zed".to_string(),
            name: "zed".to_string(),
            avatar_url: String::new(),
        });
        let mut article = data.articles[0].clone();
        article.article_id = 14;
        article.author = "Zed".to_string();
        data.articles.push(article);
        let store = MemoryStore::with_data(data);

        let listed = store
            .list_articles(&params(RawArticleParams {
                sort_by: Some("author".to_string()),
                order: Some("asc".to_string()),
                ..Default::default()
            }))
            .await
            .unwrap();

        // Uppercase sorts before every lowercase name.
        assert_eq!(listed[0].author, "Zed");
    }

    #[tokio::test]
    async fn deleting_an_article_removes_its_comments() {
        let store = MemoryStore::seeded();
        let before = store.comment_total();

        assert!(store.delete_article(1).await.unwrap());

        assert_eq!(store.comment_total(), before - 11);
        assert_eq!(store.count_comments(1).await.unwrap(), 0);
        assert!(!store.delete_article(1).await.unwrap());
    }

    #[tokio::test]
    async fn vote_overflow_is_out_of_range() {
        let store = MemoryStore::seeded();
        let err = store.add_article_votes(1, i32::MAX).await.unwrap_err();
        assert!(matches!(err, StoreError::OutOfRange));

        // The failed update leaves the tally untouched.
        let article = store.find_article(1).await.unwrap().unwrap();
        assert_eq!(article.votes, 100);
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let store = MemoryStore::seeded();
        let err = store
            .insert_comment(&NewComment {
                article_id: 999,
                author: "butter_bridge".to_string(),
                body: "orphan".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn offline_store_fails_every_call() {
        let store = MemoryStore::seeded();
        store.set_offline(true);

        assert!(!store.ping().await);
        assert!(matches!(
            store.list_topics().await,
            Err(StoreError::Backend(_))
        ));
    }
}
