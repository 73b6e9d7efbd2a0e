pub mod articles;
pub mod categories;
pub mod pagination;
pub mod serde_time;

pub use articles::{ArticleDto, ArticleSummaryDto, CategorySummaryDto, MediaDto};
pub use categories::CategoryDto;
pub use pagination::{Page, PageFilters};
