//! Table and column identifiers for the query builder.

use sea_query::Iden;

#[derive(Debug, Clone, Copy, Iden)]
pub enum Articles {
    Table,
    ArticleId,
    Author,
    Title,
    Body,
    Topic,
    CreatedAt,
    Votes,
    ArticleImgUrl,
}

#[derive(Debug, Clone, Copy, Iden)]
pub enum Comments {
    Table,
    CommentId,
    ArticleId,
    Author,
    Body,
    Votes,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, Iden)]
pub enum Topics {
    Table,
    Slug,
    Description,
}

#[derive(Debug, Clone, Copy, Iden)]
pub enum Users {
    Table,
    Username,
    Name,
    AvatarUrl,
}
