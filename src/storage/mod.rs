// Repository over the SQLite pool - every entity read and write goes through here
mod discount_codes;
mod games;
mod profile;
mod social_links;
mod sponsors;

use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection};
use thiserror::Error;

use crate::state::DbPool;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Whether a list query includes inactive rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    ActiveOnly,
    All,
}

impl Visibility {
    fn where_clause(self) -> &'static str {
        match self {
            Visibility::ActiveOnly => "WHERE is_active = 1",
            Visibility::All => "",
        }
    }
}

/// Tables whose rows carry a `display_order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OrderedTable {
    SocialLinks,
    Sponsors,
    DiscountCodes,
    Games,
}

impl OrderedTable {
    fn name(self) -> &'static str {
        match self {
            OrderedTable::SocialLinks => "social_links",
            OrderedTable::Sponsors => "sponsors",
            OrderedTable::DiscountCodes => "discount_codes",
            OrderedTable::Games => "games",
        }
    }

    fn label(self) -> &'static str {
        match self {
            OrderedTable::SocialLinks => "social link",
            OrderedTable::Sponsors => "sponsor",
            OrderedTable::DiscountCodes => "discount code",
            OrderedTable::Games => "game",
        }
    }
}

/// Order clause shared by every list: display order, then insertion order.
const LIST_ORDER: &str = "ORDER BY display_order ASC, rowid ASC";

#[derive(Clone)]
pub struct Storage {
    pool: DbPool,
}

impl Storage {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> StorageResult<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }

    /// Assign `display_order = position` to every id in one transaction.
    /// An unknown id rolls back the whole batch.
    pub(crate) fn reorder(&self, table: OrderedTable, ids: &[String]) -> StorageResult<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        {
            let mut stmt = tx.prepare(&format!(
                "UPDATE {} SET display_order = ?1 WHERE id = ?2",
                table.name()
            ))?;
            for (position, id) in ids.iter().enumerate() {
                let updated = stmt.execute(params![position as i64, id])?;
                if updated == 0 {
                    return Err(StorageError::InvalidReference(format!(
                        "unknown {} {}",
                        table.label(),
                        id
                    )));
                }
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Physically remove one row.
    pub(crate) fn delete_row(&self, table: OrderedTable, id: &str) -> StorageResult<()> {
        let conn = self.conn()?;
        delete_in(&conn, table, id)
    }
}

fn delete_in(conn: &Connection, table: OrderedTable, id: &str) -> StorageResult<()> {
    let deleted = conn.execute(
        &format!("DELETE FROM {} WHERE id = ?1", table.name()),
        params![id],
    )?;
    if deleted == 0 {
        return Err(StorageError::NotFound(format!("{} {}", table.label(), id)));
    }
    Ok(())
}

fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}
