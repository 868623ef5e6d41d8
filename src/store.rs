//! Comment persistence: the `CommentStore` seam, its PostgreSQL and in-memory backends, and startup DDL.

use crate::config::ENV_DATABASE_URL;
use crate::error::{AppError, ConfigError};
use crate::model::{Comment, NewComment};
use async_trait::async_trait;
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Mutex;

/// Single-row read and insert over the comments table.
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Fetch one comment by primary key.
    async fn get(&self, id: i32) -> Result<Option<Comment>, AppError>;

    /// Insert a comment; the store assigns the id.
    async fn add(&self, comment: NewComment) -> Result<Comment, AppError>;

    /// Readiness probe.
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Returns schema-qualified comments table name (e.g. "\"public\".\"comments\"").
pub fn qualified_comments_table(schema: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident("comments"))
}

pub struct PgCommentStore {
    pool: PgPool,
    table: String,
}

impl PgCommentStore {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgCommentStore {
            pool,
            table: qualified_comments_table(schema),
        }
    }
}

#[async_trait]
impl CommentStore for PgCommentStore {
    async fn get(&self, id: i32) -> Result<Option<Comment>, AppError> {
        let sql = format!("SELECT id, txt FROM {} WHERE id = $1", self.table);
        tracing::debug!(sql = %sql, id, "query");
        let row: Option<(i32, String)> = sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row.map(Comment::from))
    }

    async fn add(&self, comment: NewComment) -> Result<Comment, AppError> {
        let sql = format!("INSERT INTO {} (txt) VALUES ($1) RETURNING id, txt", self.table);
        tracing::debug!(sql = %sql, "query");
        let row: (i32, String) = sqlx::query_as(&sql).bind(&comment.txt).fetch_one(&self.pool).await?;
        Ok(Comment::from(row))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Process-local store. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct MemoryCommentStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    last_id: i32,
    rows: BTreeMap<i32, String>,
}

impl MemoryCommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl CommentStore for MemoryCommentStore {
    async fn get(&self, id: i32) -> Result<Option<Comment>, AppError> {
        Ok(self.lock().rows.get(&id).map(|txt| Comment { id, txt: txt.clone() }))
    }

    async fn add(&self, comment: NewComment) -> Result<Comment, AppError> {
        let mut inner = self.lock();
        let id = inner
            .last_id
            .checked_add(1)
            .ok_or_else(|| AppError::Storage("comment id space exhausted".into()))?;
        inner.last_id = id;
        inner.rows.insert(id, comment.txt.clone());
        Ok(Comment { id, txt: comment.txt })
    }
}

/// Create schema if not exists, then the comments table.
pub async fn ensure_comments_table(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(schema)))
        .execute(pool)
        .await?;
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id SERIAL PRIMARY KEY,
            txt TEXT NOT NULL
        )
        "#,
        qualified_comments_table(schema)
    );
    sqlx::query(&ddl).execute(pool).await?;
    Ok(())
}

/// Create the database named in `database_url` if it does not exist (connects to `postgres` on the same server).
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let Some((admin, db_name)) = admin_connect_options(database_url)? else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the `postgres` maintenance database plus the target name. None when the URL names no
/// database or names `postgres` itself.
fn admin_connect_options(database_url: &str) -> Result<Option<(PgConnectOptions, String)>, ConfigError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|e| ConfigError::Invalid {
        key: ENV_DATABASE_URL,
        value: database_url.to_string(),
        reason: e.to_string(),
    })?;
    let name = match opts.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(None),
    };
    Ok(Some((opts.database("postgres"), name)))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_options_target_maintenance_db() {
        let (admin, db) = admin_connect_options("postgres://u:p@localhost:5432/superset?sslmode=disable")
            .unwrap()
            .unwrap();
        assert_eq!(db, "superset");
        assert_eq!(admin.get_database(), Some("postgres"));
        assert_eq!(admin.get_host(), "localhost");
        assert_eq!(admin.get_port(), 5432);
    }

    #[test]
    fn slash_in_query_does_not_leak_into_db_name() {
        let (admin, db) = admin_connect_options("postgres://u@h/app?sslrootcert=/etc/ca.pem")
            .unwrap()
            .unwrap();
        assert_eq!(db, "app");
        assert_eq!(admin.get_host(), "h");
        assert_eq!(admin.get_database(), Some("postgres"));
    }

    #[test]
    fn url_without_database_is_skipped() {
        assert!(admin_connect_options("postgres://localhost:5432").unwrap().is_none());
        assert!(admin_connect_options("postgres://localhost:5432/postgres").unwrap().is_none());
    }

    #[test]
    fn malformed_url_is_config_error() {
        let err = admin_connect_options("not a url").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_DATABASE_URL, .. }));
    }

    #[tokio::test]
    async fn exhausted_ids_are_storage_error() {
        let store = MemoryCommentStore::new();
        store.lock().last_id = i32::MAX;
        let err = store.add(NewComment { txt: "x".into() }).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn quoted_table_name() {
        assert_eq!(qualified_comments_table("public"), "\"public\".\"comments\"");
    }

    #[tokio::test]
    async fn memory_ids_increase() {
        let store = MemoryCommentStore::new();
        let a = store.add(NewComment { txt: "a".into() }).await.unwrap();
        let b = store.add(NewComment { txt: "b".into() }).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(store.get(2).await.unwrap(), Some(b));
        assert_eq!(store.get(3).await.unwrap(), None);
        assert_eq!(store.len(), 2);
    }
}
