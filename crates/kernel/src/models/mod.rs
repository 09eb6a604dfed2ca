//! Database models.

pub mod article;
pub mod comment;
pub mod topic;
pub mod user;
pub mod votes;

pub use article::{Article, ArticleSummary, CreateArticle, DEFAULT_ARTICLE_IMG_URL, NewArticle};
pub use comment::{Comment, CreateComment, NewComment};
pub use topic::{CreateTopic, NewTopic, Topic};
pub use user::User;
pub use votes::{VoteDeltaError, VoteUpdate};
