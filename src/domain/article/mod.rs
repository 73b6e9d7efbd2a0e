pub mod entity;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use entity::{
    Article, ArticleChangeset, ArticleDetails, ArticleListFilter, ArticleListItem, Media,
    NewArticle,
};
pub use repository::{ArticleReadRepository, ArticleWriteRepository};
pub use services::CategorySync;
pub use value_objects::{ArticleContent, ArticleId, ArticleTitle, ImageReference, MediaId};
