//! Listing query composition using SeaQuery.
//!
//! Produces parameterized PostgreSQL statements. Filter values travel as
//! bind parameters; sort columns and directions are mapped from validated
//! enums onto fixed identifiers.

use sea_query::{
    Alias, Asterisk, Expr, Iden, Order, PostgresQueryBuilder, Query, SelectStatement, Value,
    Values,
};

use super::params::{ArticleListParams, SortColumn, SortOrder};
use super::schema::{Articles, Comments, Topics, Users};
use crate::store::Reference;

/// SQL text plus its positional bind values.
pub type Statement = (String, Values);

/// Column alias for the aggregated comment count.
pub const COMMENT_COUNT: &str = "comment_count";

/// Column alias for the companion count query.
pub const TOTAL_COUNT: &str = "total_count";

/// Column alias for existence checks.
pub const FOUND: &str = "found";

impl SortColumn {
    fn iden(self) -> Articles {
        match self {
            Self::CreatedAt => Articles::CreatedAt,
            Self::ArticleId => Articles::ArticleId,
            Self::Author => Articles::Author,
            Self::Topic => Articles::Topic,
        }
    }
}

impl From<SortOrder> for Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

/// Builder for the article collection view and its companion count.
pub struct ArticleListing<'a> {
    params: &'a ArticleListParams,
}

impl<'a> ArticleListing<'a> {
    pub fn new(params: &'a ArticleListParams) -> Self {
        Self { params }
    }

    /// Build the paginated listing query.
    ///
    /// Left-joins comments, groups by article and counts comments per
    /// article. The article body is never selected.
    pub fn build(&self) -> Statement {
        let mut query = Query::select();

        query
            .columns([
                (Articles::Table, Articles::ArticleId),
                (Articles::Table, Articles::Author),
                (Articles::Table, Articles::Title),
                (Articles::Table, Articles::Topic),
                (Articles::Table, Articles::CreatedAt),
                (Articles::Table, Articles::Votes),
                (Articles::Table, Articles::ArticleImgUrl),
            ])
            .expr_as(
                Expr::col((Comments::Table, Comments::CommentId)).count(),
                Alias::new(COMMENT_COUNT),
            )
            .from(Articles::Table)
            .left_join(
                Comments::Table,
                Expr::col((Articles::Table, Articles::ArticleId))
                    .equals((Comments::Table, Comments::ArticleId)),
            );

        self.add_topic_filter(&mut query);

        query.group_by_col((Articles::Table, Articles::ArticleId));

        // ORDER BY
        let order = Order::from(self.params.order);
        match self.params.sort_by {
            // Text columns compare bytewise regardless of database collation.
            SortColumn::Author | SortColumn::Topic => {
                query.order_by_expr(
                    Expr::cust(format!(
                        r#""articles"."{}" COLLATE "C""#,
                        self.params.sort_by.as_str()
                    )),
                    order.clone(),
                );
            }
            SortColumn::CreatedAt | SortColumn::ArticleId => {
                query.order_by((Articles::Table, self.params.sort_by.iden()), order.clone());
            }
        }
        if self.params.sort_by != SortColumn::ArticleId {
            // Stable tie-break so pages never overlap.
            query.order_by((Articles::Table, Articles::ArticleId), order);
        }

        // LIMIT/OFFSET for pagination
        let page = self.params.pagination;
        query.limit(u64::from(page.limit()));
        query.offset(page.offset());

        query.build(PostgresQueryBuilder)
    }

    /// Build the COUNT query for the total number of matching articles.
    ///
    /// Scoped by the same topic filter as the listing, unaffected by
    /// pagination.
    pub fn build_count(&self) -> Statement {
        let mut query = Query::select();

        query
            .expr_as(Expr::col(Asterisk).count(), Alias::new(TOTAL_COUNT))
            .from(Articles::Table);

        self.add_topic_filter(&mut query);

        query.build(PostgresQueryBuilder)
    }

    fn add_topic_filter(&self, query: &mut SelectStatement) {
        if let Some(topic) = &self.params.topic {
            query.and_where(Expr::col((Articles::Table, Articles::Topic)).eq(topic.as_str()));
        }
    }
}

/// Build `SELECT EXISTS(SELECT 1 FROM <table> WHERE <column> = $1)`.
pub fn exists(reference: &Reference) -> Statement {
    match reference {
        Reference::Article(id) => exists_in(Articles::Table, Articles::ArticleId, (*id).into()),
        Reference::Comment(id) => exists_in(Comments::Table, Comments::CommentId, (*id).into()),
        Reference::User(username) => {
            exists_in(Users::Table, Users::Username, username.as_str().into())
        }
        Reference::Topic(slug) => exists_in(Topics::Table, Topics::Slug, slug.as_str().into()),
    }
}

fn exists_in<T, C>(table: T, column: C, value: Value) -> Statement
where
    T: Iden + 'static,
    C: Iden + 'static,
{
    let mut inner = Query::select();
    inner
        .expr(Expr::cust("1"))
        .from(table)
        .and_where(Expr::col(column).eq(value));

    Query::select()
        .expr_as(Expr::exists(inner), Alias::new(FOUND))
        .build(PostgresQueryBuilder)
}
