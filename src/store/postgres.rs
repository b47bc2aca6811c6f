//! PostgreSQL store backed by a single connection per invocation.

use async_trait::async_trait;
use sqlx::{Connection, PgConnection, Postgres, QueryBuilder};
use tracing::{debug, warn};

use super::{Connector, ContentStore, RegistrationStore};
use crate::core::config::AppConfig;
use crate::core::models::{
    Achievement, ContentItem, ContentKind, GalleryItem, NewContent, NewRegistration, NewsItem,
    Registration, RegistrationField, RegistrationUpdate,
};
use crate::errors::ApiError;

const NEWS_COLUMNS: &str = "id, title, category, date";
const ACHIEVEMENT_COLUMNS: &str = "id, title, recipient, date, created_at";
const GALLERY_COLUMNS: &str = "id, image_url, caption, created_at";
const REGISTRATION_COLUMNS: &str = "id, first_name, last_name, user_id, is_admin, created_at";

/// Opens a fresh [`PgStore`] for every invocation.
#[derive(Debug, Clone)]
pub struct PgConnector {
    database_url: String,
}

impl PgConnector {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self {
            database_url: config.database_url.clone(),
        }
    }
}

#[async_trait]
impl Connector for PgConnector {
    type Store = PgStore;

    async fn connect(&self) -> Result<PgStore, ApiError> {
        let conn = PgConnection::connect(&self.database_url).await?;
        debug!("Database connection opened");
        Ok(PgStore { conn })
    }

    async fn release(&self, store: PgStore) {
        if let Err(e) = store.conn.close().await {
            warn!("Failed to close database connection cleanly: {}", e);
        }
    }
}

pub struct PgStore {
    conn: PgConnection,
}

pub(crate) fn list_sql(kind: ContentKind) -> String {
    match kind {
        ContentKind::News => format!("SELECT {NEWS_COLUMNS} FROM news ORDER BY date DESC"),
        ContentKind::Achievements => {
            format!("SELECT {ACHIEVEMENT_COLUMNS} FROM achievements ORDER BY created_at DESC")
        }
        ContentKind::Gallery => {
            format!("SELECT {GALLERY_COLUMNS} FROM gallery ORDER BY created_at DESC")
        }
    }
}

pub(crate) const fn delete_sql(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::News => "DELETE FROM news WHERE id = $1",
        ContentKind::Achievements => "DELETE FROM achievements WHERE id = $1",
        ContentKind::Gallery => "DELETE FROM gallery WHERE id = $1",
    }
}

/// `UPDATE registrations SET col = $n, ... WHERE id = $m RETURNING ...`, with
/// column names taken only from [`RegistrationField::column`].
pub(crate) fn update_query(id: i32, update: &RegistrationUpdate) -> QueryBuilder<'_, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE registrations SET ");
    let mut assignments = builder.separated(", ");
    for field in update.fields() {
        assignments.push(field.column());
        assignments.push_unseparated(" = ");
        match field {
            RegistrationField::IsAdmin(v) => assignments.push_bind_unseparated(*v),
            RegistrationField::FirstName(v)
            | RegistrationField::LastName(v)
            | RegistrationField::UserId(v) => assignments.push_bind_unseparated(v.as_str()),
        };
    }
    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING ");
    builder.push(REGISTRATION_COLUMNS);
    builder
}

#[async_trait]
impl ContentStore for PgStore {
    async fn list(&mut self, kind: ContentKind) -> Result<Vec<ContentItem>, ApiError> {
        let sql = list_sql(kind);
        let items = match kind {
            ContentKind::News => sqlx::query_as::<_, NewsItem>(&sql)
                .fetch_all(&mut self.conn)
                .await?
                .into_iter()
                .map(ContentItem::News)
                .collect(),
            ContentKind::Achievements => sqlx::query_as::<_, Achievement>(&sql)
                .fetch_all(&mut self.conn)
                .await?
                .into_iter()
                .map(ContentItem::Achievement)
                .collect(),
            ContentKind::Gallery => sqlx::query_as::<_, GalleryItem>(&sql)
                .fetch_all(&mut self.conn)
                .await?
                .into_iter()
                .map(ContentItem::Gallery)
                .collect(),
        };
        Ok(items)
    }

    async fn insert(&mut self, item: NewContent) -> Result<ContentItem, ApiError> {
        let mut tx = self.conn.begin().await?;

        let inserted = match item {
            NewContent::News(news) => {
                let sql = format!(
                    "INSERT INTO news (title, category, date) \
                     VALUES ($1, $2, COALESCE($3, CURRENT_DATE)) RETURNING {NEWS_COLUMNS}"
                );
                let row = sqlx::query_as::<_, NewsItem>(&sql)
                    .bind(news.title)
                    .bind(news.category)
                    .bind(news.date)
                    .fetch_one(&mut *tx)
                    .await?;
                ContentItem::News(row)
            }
            NewContent::Achievement(achievement) => {
                let sql = format!(
                    "INSERT INTO achievements (title, recipient, date) \
                     VALUES ($1, $2, $3) RETURNING {ACHIEVEMENT_COLUMNS}"
                );
                let row = sqlx::query_as::<_, Achievement>(&sql)
                    .bind(achievement.title)
                    .bind(achievement.recipient)
                    .bind(achievement.date)
                    .fetch_one(&mut *tx)
                    .await?;
                ContentItem::Achievement(row)
            }
            NewContent::Gallery(gallery) => {
                let sql = format!(
                    "INSERT INTO gallery (image_url, caption) \
                     VALUES ($1, $2) RETURNING {GALLERY_COLUMNS}"
                );
                let row = sqlx::query_as::<_, GalleryItem>(&sql)
                    .bind(gallery.image_url)
                    .bind(gallery.caption)
                    .fetch_one(&mut *tx)
                    .await?;
                ContentItem::Gallery(row)
            }
        };

        tx.commit().await?;
        Ok(inserted)
    }

    async fn delete(&mut self, kind: ContentKind, id: i32) -> Result<u64, ApiError> {
        let mut tx = self.conn.begin().await?;
        let result = sqlx::query(delete_sql(kind))
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl RegistrationStore for PgStore {
    async fn list(&mut self) -> Result<Vec<Registration>, ApiError> {
        let sql =
            format!("SELECT {REGISTRATION_COLUMNS} FROM registrations ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, Registration>(&sql)
            .fetch_all(&mut self.conn)
            .await?;
        Ok(rows)
    }

    async fn insert(&mut self, registration: NewRegistration) -> Result<Registration, ApiError> {
        let sql = format!(
            "INSERT INTO registrations (first_name, last_name, user_id) \
             VALUES ($1, $2, $3) RETURNING {REGISTRATION_COLUMNS}"
        );
        let mut tx = self.conn.begin().await?;
        let row = sqlx::query_as::<_, Registration>(&sql)
            .bind(registration.first_name)
            .bind(registration.last_name)
            .bind(registration.user_id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn update(
        &mut self,
        id: i32,
        update: &RegistrationUpdate,
    ) -> Result<Option<Registration>, ApiError> {
        let mut query = update_query(id, update);
        let mut tx = self.conn.begin().await?;
        let row = query
            .build_query_as::<Registration>()
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn delete(&mut self, id: i32) -> Result<Option<Registration>, ApiError> {
        let sql =
            format!("DELETE FROM registrations WHERE id = $1 RETURNING {REGISTRATION_COLUMNS}");
        let mut tx = self.conn.begin().await?;
        let row = sqlx::query_as::<_, Registration>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }
}
