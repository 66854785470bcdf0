use rusqlite::{params, OptionalExtension, Row};

use super::{new_id, OrderedTable, Storage, StorageError, StorageResult, Visibility, LIST_ORDER};
use crate::models::{Game, GamePatch, NewGame};

const COLUMNS: &str =
    "id, name, platform, url, logo_url, display_order, is_active, created_at";

fn from_row(row: &Row) -> rusqlite::Result<Game> {
    Ok(Game {
        id: row.get(0)?,
        name: row.get(1)?,
        platform: row.get(2)?,
        url: row.get(3)?,
        logo_url: row.get(4)?,
        display_order: row.get(5)?,
        is_active: row.get(6)?,
        created_at: row.get(7)?,
    })
}

impl Storage {
    pub fn list_games(&self, visibility: Visibility) -> StorageResult<Vec<Game>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM games {} {}",
            COLUMNS,
            visibility.where_clause(),
            LIST_ORDER
        ))?;
        let games = stmt
            .query_map([], from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(games)
    }

    pub fn get_game(&self, id: &str) -> StorageResult<Option<Game>> {
        let conn = self.conn()?;
        let game = conn
            .query_row(
                &format!("SELECT {} FROM games WHERE id = ?1", COLUMNS),
                params![id],
                from_row,
            )
            .optional()?;
        Ok(game)
    }

    pub fn create_game(&self, input: NewGame) -> StorageResult<Game> {
        let input = input.normalized();
        let id = new_id();
        self.conn()?.execute(
            "INSERT INTO games (id, name, platform, url, logo_url, display_order, is_active) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                id,
                input.name,
                input.platform,
                input.url,
                input.logo_url,
                input.display_order,
                input.is_active,
            ],
        )?;
        self.get_game(&id)?
            .ok_or_else(|| StorageError::NotFound(format!("game {}", id)))
    }

    pub fn update_game(&self, id: &str, update: GamePatch) -> StorageResult<Game> {
        let mut game = self
            .get_game(id)?
            .ok_or_else(|| StorageError::NotFound(format!("game {}", id)))?;
        game.apply(update);

        self.conn()?.execute(
            "UPDATE games SET name = ?2, platform = ?3, url = ?4, logo_url = ?5, \
             display_order = ?6, is_active = ?7 WHERE id = ?1",
            params![
                game.id,
                game.name,
                game.platform,
                game.url,
                game.logo_url,
                game.display_order,
                game.is_active,
            ],
        )?;
        Ok(game)
    }

    pub fn delete_game(&self, id: &str) -> StorageResult<()> {
        self.delete_row(OrderedTable::Games, id)
    }

    pub fn reorder_games(&self, ids: &[String]) -> StorageResult<()> {
        self.reorder(OrderedTable::Games, ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::storage;

    #[test]
    fn update_applies_patch_and_persists() {
        let (_tmp, storage) = storage();
        let game = storage
            .create_game(
                serde_json::from_value(serde_json::json!({
                    "name": "Valorant",
                    "platform": "PC",
                    "url": "https://playvalorant.com"
                }))
                .unwrap(),
            )
            .unwrap();

        let update: GamePatch = serde_json::from_value(serde_json::json!({
            "platform": "",
            "displayOrder": 4
        }))
        .unwrap();
        storage.update_game(&game.id, update).unwrap();

        let stored = storage.get_game(&game.id).unwrap().unwrap();
        assert_eq!(stored.name, "Valorant");
        assert_eq!(stored.platform, None);
        assert_eq!(stored.display_order, 4);
        assert_eq!(stored.url.as_deref(), Some("https://playvalorant.com"));
    }
}
