//! Query-string validation and listing query composition.

pub mod composer;
pub mod params;
pub mod schema;

pub use composer::{ArticleListing, Statement};
pub use params::{
    ArticleListParams, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_OFFSET, Pagination, ParamError,
    RawArticleParams, RawPageParams, SortColumn, SortOrder,
};
