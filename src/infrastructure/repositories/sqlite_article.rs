use super::map_sqlx;
use crate::domain::article::{
    Article, ArticleChangeset, ArticleContent, ArticleDetails, ArticleId, ArticleListFilter,
    ArticleListItem, ArticleReadRepository, ArticleTitle, ArticleWriteRepository, ImageReference,
    Media, MediaId, NewArticle,
};
use crate::domain::category::{CategoryId, CategoryName, CategorySummary};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use std::collections::HashMap;

const ARTICLE_COLUMNS: &str = "a.id, a.title, a.content, a.banner, a.created_at, a.updated_at";

#[derive(Clone)]
pub struct SqliteArticleWriteRepository {
    pool: SqlitePool,
}

impl SqliteArticleWriteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct SqliteArticleReadRepository {
    pool: SqlitePool,
}

impl SqliteArticleReadRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    content: String,
    banner: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct MediaRow {
    id: i64,
    article_id: i64,
    image: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct CategoryLinkRow {
    article_id: i64,
    category_id: i64,
    name: String,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: ArticleId::new(row.id)?,
            title: ArticleTitle::new(row.title)?,
            content: ArticleContent::new(row.content)?,
            banner: ImageReference::new(row.banner)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<MediaRow> for Media {
    type Error = DomainError;

    fn try_from(row: MediaRow) -> Result<Self, Self::Error> {
        Ok(Media {
            id: MediaId::new(row.id)?,
            article_id: ArticleId::new(row.article_id)?,
            image: ImageReference::new(row.image)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<CategoryLinkRow> for CategorySummary {
    type Error = DomainError;

    fn try_from(row: CategoryLinkRow) -> Result<Self, Self::Error> {
        Ok(CategorySummary {
            id: CategoryId::new(row.category_id)?,
            name: CategoryName::new(row.name)?,
        })
    }
}

async fn load_details(
    conn: &mut SqliteConnection,
    id: ArticleId,
) -> DomainResult<Option<ArticleDetails>> {
    let row = sqlx::query_as::<_, ArticleRow>(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles a WHERE a.id = ?"
    ))
    .bind(i64::from(id))
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    let Some(row) = row else {
        return Ok(None);
    };

    let mut categories = load_category_links(conn, &[i64::from(id)]).await?;

    let media = sqlx::query_as::<_, MediaRow>(
        "SELECT id, article_id, image, created_at, updated_at FROM media WHERE article_id = ? ORDER BY id",
    )
    .bind(i64::from(id))
    .fetch_all(&mut *conn)
    .await
    .map_err(map_sqlx)?
    .into_iter()
    .map(Media::try_from)
    .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(ArticleDetails {
        article: Article::try_from(row)?,
        categories: categories.remove(&i64::from(id)).unwrap_or_default(),
        media,
    }))
}

/// Category id/name pairs for each article id, ordered by category id.
async fn load_category_links(
    conn: &mut SqliteConnection,
    article_ids: &[i64],
) -> DomainResult<HashMap<i64, Vec<CategorySummary>>> {
    let mut grouped: HashMap<i64, Vec<CategorySummary>> = HashMap::new();
    if article_ids.is_empty() {
        return Ok(grouped);
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT ac.article_id, c.id AS category_id, c.name FROM article_category ac \
         JOIN categories c ON c.id = ac.category_id WHERE ac.article_id IN (",
    );
    let mut separated = builder.separated(", ");
    for id in article_ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY ac.article_id, c.id");

    let rows = builder
        .build_query_as::<CategoryLinkRow>()
        .fetch_all(&mut *conn)
        .await
        .map_err(map_sqlx)?;

    for row in rows {
        let article_id = row.article_id;
        grouped
            .entry(article_id)
            .or_default()
            .push(CategorySummary::try_from(row)?);
    }
    Ok(grouped)
}

async fn attach_categories(
    conn: &mut SqliteConnection,
    article_id: i64,
    category_ids: &[CategoryId],
) -> DomainResult<()> {
    if category_ids.is_empty() {
        return Ok(());
    }

    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("INSERT INTO article_category (article_id, category_id) ");
    builder.push_values(category_ids, |mut row, category_id| {
        row.push_bind(article_id).push_bind(i64::from(*category_id));
    });
    builder
        .build()
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    Ok(())
}

async fn detach_categories(
    conn: &mut SqliteConnection,
    article_id: i64,
    category_ids: &[CategoryId],
) -> DomainResult<()> {
    if category_ids.is_empty() {
        return Ok(());
    }

    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("DELETE FROM article_category WHERE article_id = ");
    builder.push_bind(article_id);
    builder.push(" AND category_id IN (");
    let mut separated = builder.separated(", ");
    for category_id in category_ids {
        separated.push_bind(i64::from(*category_id));
    }
    separated.push_unseparated(")");
    builder
        .build()
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    Ok(())
}

async fn insert_media(
    conn: &mut SqliteConnection,
    article_id: i64,
    images: &[ImageReference],
    now: DateTime<Utc>,
) -> DomainResult<()> {
    if images.is_empty() {
        return Ok(());
    }

    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("INSERT INTO media (image, article_id, created_at, updated_at) ");
    builder.push_values(images, |mut row, image| {
        row.push_bind(image.as_str().to_owned())
            .push_bind(article_id)
            .push_bind(now)
            .push_bind(now);
    });
    builder
        .build()
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    Ok(())
}

async fn delete_media_rows(conn: &mut SqliteConnection, article_id: i64) -> DomainResult<()> {
    sqlx::query("DELETE FROM media WHERE article_id = ?")
        .bind(article_id)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    Ok(())
}

fn vanished(id: ArticleId) -> DomainError {
    DomainError::Persistence(format!("article {id} disappeared inside its own transaction"))
}

#[async_trait]
impl ArticleWriteRepository for SqliteArticleWriteRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<ArticleDetails> {
        let NewArticle {
            title,
            content,
            banner,
            category_ids,
            media,
            created_at,
            updated_at,
        } = article;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let article_id: i64 = sqlx::query_scalar(
            "INSERT INTO articles (title, content, banner, created_at, updated_at) VALUES (?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(title.as_str())
        .bind(content.as_str())
        .bind(banner.as_str())
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        attach_categories(&mut tx, article_id, &category_ids).await?;
        insert_media(&mut tx, article_id, &media, created_at).await?;

        let id = ArticleId::new(article_id)?;
        let details = load_details(&mut tx, id).await?.ok_or_else(|| vanished(id))?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(details)
    }

    async fn update(&self, changeset: ArticleChangeset) -> DomainResult<ArticleDetails> {
        let ArticleChangeset {
            id,
            title,
            content,
            banner,
            media,
            categories,
            updated_at,
        } = changeset;
        let article_id = i64::from(id);

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE articles SET title = ");
        builder.push_bind(title.into_inner());
        builder.push(", content = ");
        builder.push_bind(content.into_inner());
        if let Some(banner) = banner {
            builder.push(", banner = ");
            builder.push_bind(banner.into_inner());
        }
        builder.push(", updated_at = ");
        builder.push_bind(updated_at);
        builder.push(" WHERE id = ");
        builder.push_bind(article_id);

        let result = builder
            .build()
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("article not found".into()));
        }

        if !categories.is_noop() {
            detach_categories(&mut tx, article_id, &categories.detach).await?;
            attach_categories(&mut tx, article_id, &categories.attach).await?;
        }

        if let Some(images) = media {
            delete_media_rows(&mut tx, article_id).await?;
            insert_media(&mut tx, article_id, &images, updated_at).await?;
        }

        let details = load_details(&mut tx, id).await?.ok_or_else(|| vanished(id))?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(details)
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let article_id = i64::from(id);
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        delete_media_rows(&mut tx, article_id).await?;

        sqlx::query("DELETE FROM article_category WHERE article_id = ?")
            .bind(article_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(article_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("article not found".into()));
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(())
    }
}

#[async_trait]
impl ArticleReadRepository for SqliteArticleReadRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<ArticleDetails>> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        load_details(&mut conn, id).await
    }

    async fn list_page(
        &self,
        filter: ArticleListFilter,
        page: u32,
        page_size: u32,
    ) -> DomainResult<(Vec<ArticleListItem>, u64)> {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let offset = i64::from(page - 1) * i64::from(page_size);
        let category = filter.category.map(i64::from);

        fn apply_conditions(builder: &mut QueryBuilder<'_, Sqlite>, category: Option<i64>) {
            if let Some(category_id) = category {
                builder.push(
                    " WHERE EXISTS (SELECT 1 FROM article_category ac WHERE ac.article_id = a.id AND ac.category_id = ",
                );
                builder.push_bind(category_id);
                builder.push(")");
            }
        }

        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;

        let mut count_builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT COUNT(*) FROM articles a");
        apply_conditions(&mut count_builder, category);
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&mut *conn)
            .await
            .map_err(map_sqlx)?;

        let mut list_builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {ARTICLE_COLUMNS} FROM articles a"));
        apply_conditions(&mut list_builder, category);
        list_builder.push(" ORDER BY a.created_at DESC, a.id DESC LIMIT ");
        list_builder.push_bind(i64::from(page_size));
        list_builder.push(" OFFSET ");
        list_builder.push_bind(offset);

        let rows = list_builder
            .build_query_as::<ArticleRow>()
            .fetch_all(&mut *conn)
            .await
            .map_err(map_sqlx)?;

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut links = load_category_links(&mut conn, &ids).await?;

        let items = rows
            .into_iter()
            .map(|row| {
                let categories = links.remove(&row.id).unwrap_or_default();
                Ok(ArticleListItem {
                    article: Article::try_from(row)?,
                    categories,
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        Ok((items, u64::try_from(total).unwrap_or_default()))
    }
}
