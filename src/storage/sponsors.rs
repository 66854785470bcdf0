use rusqlite::{params, OptionalExtension, Row};

use super::{
    delete_in, new_id, OrderedTable, Storage, StorageError, StorageResult, Visibility, LIST_ORDER,
};
use crate::models::{NewSponsor, Sponsor, SponsorPatch};

const COLUMNS: &str = "id, name, description, logo_url, website_url, discount_code, \
     discount_percent, display_order, is_active, custom_bg_color, custom_text_color, created_at";

fn from_row(row: &Row) -> rusqlite::Result<Sponsor> {
    Ok(Sponsor {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        logo_url: row.get(3)?,
        website_url: row.get(4)?,
        discount_code: row.get(5)?,
        discount_percent: row.get(6)?,
        display_order: row.get(7)?,
        is_active: row.get(8)?,
        custom_bg_color: row.get(9)?,
        custom_text_color: row.get(10)?,
        created_at: row.get(11)?,
    })
}

impl Storage {
    pub fn list_sponsors(&self, visibility: Visibility) -> StorageResult<Vec<Sponsor>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM sponsors {} {}",
            COLUMNS,
            visibility.where_clause(),
            LIST_ORDER
        ))?;
        let sponsors = stmt
            .query_map([], from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(sponsors)
    }

    pub fn get_sponsor(&self, id: &str) -> StorageResult<Option<Sponsor>> {
        let conn = self.conn()?;
        let sponsor = conn
            .query_row(
                &format!("SELECT {} FROM sponsors WHERE id = ?1", COLUMNS),
                params![id],
                from_row,
            )
            .optional()?;
        Ok(sponsor)
    }

    pub fn create_sponsor(&self, input: NewSponsor) -> StorageResult<Sponsor> {
        let input = input.normalized();
        let id = new_id();
        self.conn()?.execute(
            "INSERT INTO sponsors (id, name, description, logo_url, website_url, discount_code, \
             discount_percent, display_order, is_active, custom_bg_color, custom_text_color) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                id,
                input.name,
                input.description,
                input.logo_url,
                input.website_url,
                input.discount_code,
                input.discount_percent,
                input.display_order,
                input.is_active,
                input.custom_bg_color,
                input.custom_text_color,
            ],
        )?;
        self.get_sponsor(&id)?
            .ok_or_else(|| StorageError::NotFound(format!("sponsor {}", id)))
    }

    pub fn update_sponsor(&self, id: &str, update: SponsorPatch) -> StorageResult<Sponsor> {
        let mut sponsor = self
            .get_sponsor(id)?
            .ok_or_else(|| StorageError::NotFound(format!("sponsor {}", id)))?;
        sponsor.apply(update);

        self.conn()?.execute(
            "UPDATE sponsors SET name = ?2, description = ?3, logo_url = ?4, website_url = ?5, \
             discount_code = ?6, discount_percent = ?7, display_order = ?8, is_active = ?9, \
             custom_bg_color = ?10, custom_text_color = ?11 WHERE id = ?1",
            params![
                sponsor.id,
                sponsor.name,
                sponsor.description,
                sponsor.logo_url,
                sponsor.website_url,
                sponsor.discount_code,
                sponsor.discount_percent,
                sponsor.display_order,
                sponsor.is_active,
                sponsor.custom_bg_color,
                sponsor.custom_text_color,
            ],
        )?;
        Ok(sponsor)
    }

    /// Delete a sponsor, first turning its discount codes into general codes.
    pub fn delete_sponsor(&self, id: &str) -> StorageResult<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let unlinked = tx.execute(
            "UPDATE discount_codes SET sponsor_id = NULL WHERE sponsor_id = ?1",
            params![id],
        )?;
        delete_in(&tx, OrderedTable::Sponsors, id)?;

        tx.commit()?;
        if unlinked > 0 {
            tracing::info!("Unlinked {} discount codes from deleted sponsor {}", unlinked, id);
        }
        Ok(())
    }

    pub fn reorder_sponsors(&self, ids: &[String]) -> StorageResult<()> {
        self.reorder(OrderedTable::Sponsors, ids)
    }
}
