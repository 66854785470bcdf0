use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{new_id, OrderedTable, Storage, StorageError, StorageResult, Visibility, LIST_ORDER};
use crate::models::{DiscountCode, DiscountCodePatch, NewDiscountCode};

const COLUMNS: &str = "id, sponsor_id, code, description, discount_percent, url, logo_url, \
     display_order, is_active, created_at";

fn from_row(row: &Row) -> rusqlite::Result<DiscountCode> {
    Ok(DiscountCode {
        id: row.get(0)?,
        sponsor_id: row.get(1)?,
        code: row.get(2)?,
        description: row.get(3)?,
        discount_percent: row.get(4)?,
        url: row.get(5)?,
        logo_url: row.get(6)?,
        display_order: row.get(7)?,
        is_active: row.get(8)?,
        created_at: row.get(9)?,
    })
}

fn ensure_sponsor_exists(conn: &Connection, sponsor_id: &str) -> StorageResult<()> {
    let exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM sponsors WHERE id = ?1",
        params![sponsor_id],
        |row| row.get(0),
    )?;
    if exists {
        Ok(())
    } else {
        Err(StorageError::InvalidReference(format!(
            "unknown sponsor {}",
            sponsor_id
        )))
    }
}

impl Storage {
    pub fn list_discount_codes(&self, visibility: Visibility) -> StorageResult<Vec<DiscountCode>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM discount_codes {} {}",
            COLUMNS,
            visibility.where_clause(),
            LIST_ORDER
        ))?;
        let codes = stmt
            .query_map([], from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(codes)
    }

    pub fn get_discount_code(&self, id: &str) -> StorageResult<Option<DiscountCode>> {
        let conn = self.conn()?;
        let code = conn
            .query_row(
                &format!("SELECT {} FROM discount_codes WHERE id = ?1", COLUMNS),
                params![id],
                from_row,
            )
            .optional()?;
        Ok(code)
    }

    pub fn create_discount_code(&self, input: NewDiscountCode) -> StorageResult<DiscountCode> {
        let input = input.normalized();
        let id = new_id();
        {
            let conn = self.conn()?;
            if let Some(ref sponsor_id) = input.sponsor_id {
                ensure_sponsor_exists(&conn, sponsor_id)?;
            }
            conn.execute(
                "INSERT INTO discount_codes (id, sponsor_id, code, description, discount_percent, \
                 url, logo_url, display_order, is_active) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    id,
                    input.sponsor_id,
                    input.code,
                    input.description,
                    input.discount_percent,
                    input.url,
                    input.logo_url,
                    input.display_order,
                    input.is_active,
                ],
            )?;
        }
        self.get_discount_code(&id)?
            .ok_or_else(|| StorageError::NotFound(format!("discount code {}", id)))
    }

    pub fn update_discount_code(
        &self,
        id: &str,
        update: DiscountCodePatch,
    ) -> StorageResult<DiscountCode> {
        let mut code = self
            .get_discount_code(id)?
            .ok_or_else(|| StorageError::NotFound(format!("discount code {}", id)))?;

        let conn = self.conn()?;
        if let Some(sponsor_id) = update.linked_sponsor() {
            ensure_sponsor_exists(&conn, sponsor_id)?;
        }
        code.apply(update);

        conn.execute(
            "UPDATE discount_codes SET sponsor_id = ?2, code = ?3, description = ?4, \
             discount_percent = ?5, url = ?6, logo_url = ?7, display_order = ?8, is_active = ?9 \
             WHERE id = ?1",
            params![
                code.id,
                code.sponsor_id,
                code.code,
                code.description,
                code.discount_percent,
                code.url,
                code.logo_url,
                code.display_order,
                code.is_active,
            ],
        )?;
        Ok(code)
    }

    pub fn delete_discount_code(&self, id: &str) -> StorageResult<()> {
        self.delete_row(OrderedTable::DiscountCodes, id)
    }

    pub fn reorder_discount_codes(&self, ids: &[String]) -> StorageResult<()> {
        self.reorder(OrderedTable::DiscountCodes, ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::storage;

    fn new_code(json: serde_json::Value) -> NewDiscountCode {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn general_code_has_no_sponsor() {
        let (_tmp, storage) = storage();
        let code = storage
            .create_discount_code(new_code(serde_json::json!({
                "code": "WELCOME",
                "sponsorId": "",
                "discountPercent": 20,
                "url": "https://shop.example.com"
            })))
            .unwrap();
        assert_eq!(code.sponsor_id, None);
        assert_eq!(code.discount_percent, Some(20));
        assert!(code.is_active);
    }

    #[test]
    fn unknown_sponsor_is_rejected() {
        let (_tmp, storage) = storage();
        let result = storage.create_discount_code(new_code(serde_json::json!({
            "code": "GHOST",
            "sponsorId": "missing"
        })));
        assert!(matches!(result, Err(StorageError::InvalidReference(_))));
        assert!(storage
            .list_discount_codes(Visibility::All)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn update_rejects_unknown_sponsor_and_keeps_row() {
        let (_tmp, storage) = storage();
        let code = storage
            .create_discount_code(new_code(serde_json::json!({ "code": "KEEP" })))
            .unwrap();
        let update: DiscountCodePatch =
            serde_json::from_value(serde_json::json!({ "sponsorId": "missing", "code": "NEW" }))
                .unwrap();
        assert!(storage.update_discount_code(&code.id, update).is_err());
        let stored = storage.get_discount_code(&code.id).unwrap().unwrap();
        assert_eq!(stored.code, "KEEP");
    }

    #[test]
    fn inactive_codes_are_hidden_from_public_list() {
        let (_tmp, storage) = storage();
        storage
            .create_discount_code(new_code(serde_json::json!({ "code": "ON" })))
            .unwrap();
        storage
            .create_discount_code(new_code(serde_json::json!({ "code": "OFF", "isActive": false })))
            .unwrap();
        let active = storage.list_discount_codes(Visibility::ActiveOnly).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].code, "ON");
    }
}
