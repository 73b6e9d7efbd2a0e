use super::map_sqlx;
use crate::domain::category::{
    Category, CategoryDescription, CategoryId, CategoryName, CategoryRepository, CategoryUpdate,
    CategoryWithCount, NewCategory,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use std::collections::HashSet;

const CATEGORY_COLUMNS: &str = "id, name, description, created_at, updated_at";
const COUNTED_SELECT: &str = "SELECT c.id, c.name, c.description, c.created_at, c.updated_at, \
     (SELECT COUNT(*) FROM article_category ac WHERE ac.category_id = c.id) AS articles_count \
     FROM categories c";

#[derive(Clone)]
pub struct SqliteCategoryRepository {
    pool: SqlitePool,
}

impl SqliteCategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct CountedCategoryRow {
    #[sqlx(flatten)]
    category: CategoryRow,
    articles_count: i64,
}

impl TryFrom<CategoryRow> for Category {
    type Error = DomainError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Category {
            id: CategoryId::new(row.id)?,
            name: CategoryName::new(row.name)?,
            description: CategoryDescription::new(row.description)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<CountedCategoryRow> for CategoryWithCount {
    type Error = DomainError;

    fn try_from(row: CountedCategoryRow) -> Result<Self, Self::Error> {
        Ok(CategoryWithCount {
            category: Category::try_from(row.category)?,
            articles_count: u64::try_from(row.articles_count).unwrap_or_default(),
        })
    }
}

#[async_trait]
impl CategoryRepository for SqliteCategoryRepository {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category> {
        let NewCategory {
            name,
            description,
            created_at,
            updated_at,
        } = category;

        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "INSERT INTO categories (name, description, created_at, updated_at) VALUES (?, ?, ?, ?) RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(name.as_str())
        .bind(description.as_str())
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Category::try_from(row)
    }

    async fn update(&self, update: CategoryUpdate) -> DomainResult<Category> {
        let CategoryUpdate {
            id,
            name,
            description,
            updated_at,
        } = update;

        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "UPDATE categories SET name = ?, description = ?, updated_at = ? WHERE id = ? RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(name.as_str())
        .bind(description.as_str())
        .bind(updated_at)
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("category not found".into()))?;

        Category::try_from(row)
    }

    async fn delete(&self, id: CategoryId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("category not found".into()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = ?"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Category::try_from).transpose()
    }

    async fn find_with_count(&self, id: CategoryId) -> DomainResult<Option<CategoryWithCount>> {
        let row = sqlx::query_as::<_, CountedCategoryRow>(&format!("{COUNTED_SELECT} WHERE c.id = ?"))
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(CategoryWithCount::try_from).transpose()
    }

    async fn find_by_name(&self, name: &CategoryName) -> DomainResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE name = ?"
        ))
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Category::try_from).transpose()
    }

    async fn list_with_counts(&self) -> DomainResult<Vec<CategoryWithCount>> {
        let rows = sqlx::query_as::<_, CountedCategoryRow>(&format!(
            "{COUNTED_SELECT} ORDER BY c.created_at DESC, c.id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter()
            .map(CategoryWithCount::try_from)
            .collect::<Result<Vec<_>, _>>()
    }

    async fn find_missing(&self, ids: &[CategoryId]) -> DomainResult<Vec<CategoryId>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT id FROM categories WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(i64::from(*id));
        }
        separated.push_unseparated(")");

        let found: HashSet<i64> = builder
            .build_query_scalar::<i64>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?
            .into_iter()
            .collect();

        Ok(ids
            .iter()
            .copied()
            .filter(|id| !found.contains(&i64::from(*id)))
            .collect())
    }
}
