use rusqlite::{params, OptionalExtension, Row};

use super::{new_id, OrderedTable, Storage, StorageResult, Visibility, LIST_ORDER};
use crate::models::{DisplayStyle, NewSocialLink, SocialLink, SocialLinkPatch};
use crate::storage::StorageError;

const COLUMNS: &str = "id, platform, url, follower_count, badge, description, display_order, \
     is_active, column_span, custom_bg_color, custom_text_color, display_style, created_at";

fn from_row(row: &Row) -> rusqlite::Result<SocialLink> {
    Ok(SocialLink {
        id: row.get(0)?,
        platform: row.get(1)?,
        url: row.get(2)?,
        follower_count: row.get(3)?,
        badge: row.get(4)?,
        description: row.get(5)?,
        display_order: row.get(6)?,
        is_active: row.get(7)?,
        column_span: row.get(8)?,
        custom_bg_color: row.get(9)?,
        custom_text_color: row.get(10)?,
        display_style: DisplayStyle::from_stored(&row.get::<_, String>(11)?),
        created_at: row.get(12)?,
    })
}

impl Storage {
    pub fn list_social_links(&self, visibility: Visibility) -> StorageResult<Vec<SocialLink>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM social_links {} {}",
            COLUMNS,
            visibility.where_clause(),
            LIST_ORDER
        ))?;
        let links = stmt
            .query_map([], from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(links)
    }

    pub fn get_social_link(&self, id: &str) -> StorageResult<Option<SocialLink>> {
        let conn = self.conn()?;
        let link = conn
            .query_row(
                &format!("SELECT {} FROM social_links WHERE id = ?1", COLUMNS),
                params![id],
                from_row,
            )
            .optional()?;
        Ok(link)
    }

    pub fn create_social_link(&self, input: NewSocialLink) -> StorageResult<SocialLink> {
        let input = input.normalized();
        let id = new_id();
        {
            let conn = self.conn()?;
            conn.execute(
                "INSERT INTO social_links (id, platform, url, follower_count, badge, description, \
                 display_order, is_active, column_span, custom_bg_color, custom_text_color, display_style) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    id,
                    input.platform,
                    input.url,
                    input.follower_count,
                    input.badge,
                    input.description,
                    input.display_order,
                    input.is_active,
                    input.column_span,
                    input.custom_bg_color,
                    input.custom_text_color,
                    input.display_style.as_str(),
                ],
            )?;
        }
        self.get_social_link(&id)?
            .ok_or_else(|| StorageError::NotFound(format!("social link {}", id)))
    }

    pub fn update_social_link(&self, id: &str, update: SocialLinkPatch) -> StorageResult<SocialLink> {
        let mut link = self
            .get_social_link(id)?
            .ok_or_else(|| StorageError::NotFound(format!("social link {}", id)))?;
        link.apply(update);

        let conn = self.conn()?;
        conn.execute(
            "UPDATE social_links SET platform = ?2, url = ?3, follower_count = ?4, badge = ?5, \
             description = ?6, display_order = ?7, is_active = ?8, column_span = ?9, \
             custom_bg_color = ?10, custom_text_color = ?11, display_style = ?12 WHERE id = ?1",
            params![
                link.id,
                link.platform,
                link.url,
                link.follower_count,
                link.badge,
                link.description,
                link.display_order,
                link.is_active,
                link.column_span,
                link.custom_bg_color,
                link.custom_text_color,
                link.display_style.as_str(),
            ],
        )?;
        Ok(link)
    }

    pub fn delete_social_link(&self, id: &str) -> StorageResult<()> {
        self.delete_row(OrderedTable::SocialLinks, id)
    }

    pub fn reorder_social_links(&self, ids: &[String]) -> StorageResult<()> {
        self.reorder(OrderedTable::SocialLinks, ids)
    }
}
