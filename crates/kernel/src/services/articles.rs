//! Article listing, lookup and mutation pipeline.

use std::sync::Arc;

use anyhow::anyhow;
use serde::Serialize;
use tracing::{debug, info};

use super::required;
use crate::error::{AppError, AppResult};
use crate::gate;
use crate::models::{
    Article, ArticleSummary, CreateArticle, DEFAULT_ARTICLE_IMG_URL, NewArticle, VoteUpdate,
};
use crate::query::{ArticleListParams, RawArticleParams};
use crate::store::{Reference, Store};

/// One page of the article collection.
#[derive(Debug, Clone, Serialize)]
pub struct ArticlePage {
    pub articles: Vec<ArticleSummary>,

    /// Articles matching the filter across all pages.
    pub total_count: i64,
}

/// Article service.
pub struct ArticleService {
    store: Arc<dyn Store>,
}

impl ArticleService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// List articles with sorting, topic filter and pagination.
    ///
    /// An unknown topic is a 404; a known topic with no articles, or a page
    /// past the end, is an empty page.
    pub async fn list(&self, raw: &RawArticleParams) -> AppResult<ArticlePage> {
        let params = ArticleListParams::from_raw(raw)?;

        if let Some(topic) = &params.topic
            && !gate::exists(self.store.as_ref(), &Reference::topic(topic.as_str())).await?
        {
            return Err(AppError::not_found("Topic does not exist"));
        }

        let (articles, total_count) = tokio::try_join!(
            self.store.list_articles(&params),
            self.store.count_articles(&params)
        )?;

        debug!(
            sort_by = %params.sort_by,
            topic = ?params.topic,
            page = params.pagination.page(),
            returned = articles.len(),
            total_count,
            "listed articles"
        );

        Ok(ArticlePage {
            articles,
            total_count,
        })
    }

    /// Single article with body and comment count.
    pub async fn get(&self, article_id: i32) -> AppResult<Article> {
        self.store
            .find_article(article_id)
            .await?
            .ok_or_else(|| AppError::not_found("Article does not exist"))
    }

    /// Create an article once its author and topic are known to exist.
    pub async fn create(&self, input: CreateArticle) -> AppResult<Article> {
        let article = NewArticle {
            author: required(input.author, "author")?,
            title: required(input.title, "title")?,
            body: required(input.body, "body")?,
            topic: required(input.topic, "topic")?,
            article_img_url: input
                .article_img_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ARTICLE_IMG_URL.to_string()),
        };

        gate::require_all(
            self.store.as_ref(),
            &[
                Reference::user(article.author.as_str()),
                Reference::topic(article.topic.as_str()),
            ],
        )
        .await?;

        let article_id = self.store.insert_article(&article).await?;
        info!(article_id, author = %article.author, topic = %article.topic, "article created");

        self.store
            .find_article(article_id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow!("article {article_id} missing after insert")))
    }

    /// Apply a signed vote delta and return the updated article.
    pub async fn add_votes(&self, article_id: i32, update: &VoteUpdate) -> AppResult<Article> {
        let delta = update.delta()?;
        let reference = Reference::Article(article_id);

        gate::require(self.store.as_ref(), &reference).await?;

        if !self.store.add_article_votes(article_id, delta).await? {
            return Err(AppError::Missing(reference));
        }
        debug!(article_id, delta, "article votes adjusted");

        self.store
            .find_article(article_id)
            .await?
            .ok_or(AppError::Missing(reference))
    }

    /// Delete an article and, through the store, its comments.
    pub async fn delete(&self, article_id: i32) -> AppResult<()> {
        let reference = Reference::Article(article_id);

        gate::require(self.store.as_ref(), &reference).await?;

        if !self.store.delete_article(article_id).await? {
            return Err(AppError::Missing(reference));
        }
        info!(article_id, "article deleted");

        Ok(())
    }
}
