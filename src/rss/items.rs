use chrono::Utc;

use crate::crud::Order;
use crate::error::Result;
use crate::types::RowValues;

use super::model::{Item, NewItem};
use super::schema::ITEM_TABLE;
use super::RssDb;

const DELETE_OLD_ITEMS: &str =
    "DELETE FROM item WHERE feed_id = ?1 AND (stamp IS NULL OR stamp < ?2)";

impl RssDb {
    /// # Errors
    /// Returns the engine error.
    pub fn item(&mut self, id: i64) -> Result<Option<Item>> {
        self.table(ITEM_TABLE)?
            .get(id)?
            .as_ref()
            .map(Item::try_from)
            .transpose()
    }

    /// Ids of the items of `feed_id`, newest publication date first.
    ///
    /// # Errors
    /// Returns the engine error.
    pub fn item_ids(&mut self, feed_id: i64) -> Result<Vec<i64>> {
        self.table(ITEM_TABLE)?.ids_where(
            &[("feed_id", RowValues::Int(feed_id))],
            Some(Order::Desc("pubdate")),
        )
    }

    /// Store `item` unless its feed already has an item with the same URL.
    ///
    /// Returns the id of the new or existing item.
    ///
    /// # Errors
    /// Returns the engine error.
    pub fn add_item(&mut self, item: &NewItem) -> Result<i64> {
        let mut items = self.table(ITEM_TABLE)?;
        let existing = items.first_where(&[
            ("feed_id", RowValues::Int(item.feed_id)),
            ("url", RowValues::from(item.url.as_str())),
        ])?;
        if let Some(id) = existing
            .as_ref()
            .and_then(|row| row.get("id"))
            .and_then(RowValues::as_int)
        {
            return Ok(id);
        }
        items.insert(&item.to_record())
    }

    /// # Errors
    /// Returns the engine error.
    pub fn delete_item(&mut self, id: i64) -> Result<bool> {
        Ok(self.table(ITEM_TABLE)?.delete(id)? > 0)
    }

    /// Remove the items of `feed_id` stored longer ago than the retention window.
    ///
    /// Returns how many were removed.
    ///
    /// # Errors
    /// Returns the engine error.
    pub fn delete_old_items(&mut self, feed_id: i64) -> Result<usize> {
        let cutoff = Utc::now().naive_utc() - self.item_retention;
        let removed = self
            .connection()
            .exec_write(
                DELETE_OLD_ITEMS,
                &[RowValues::Int(feed_id), RowValues::from(cutoff)],
            )?
            .rows_changed()
            .unwrap_or(0);
        if removed > 0 {
            tracing::info!(feed_id, removed, "deleted old items");
        }
        Ok(removed)
    }

    /// # Errors
    /// Returns the engine error.
    pub fn count_items(&mut self, feed_id: i64) -> Result<i64> {
        self.table(ITEM_TABLE)?
            .count_where(&[("feed_id", RowValues::Int(feed_id))])
    }
}
