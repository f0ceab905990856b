use crate::crud::{Order, TableCrud};
use crate::error::Result;
use crate::types::RowValues;

use super::model::{Feed, FeedWrite, NewFeed};
use super::schema::{FEED_TABLE, ITEM_TABLE};
use super::RssDb;

impl RssDb {
    /// Ids of every feed, ordered by title.
    ///
    /// # Errors
    /// Returns the engine error.
    pub fn feed_ids(&mut self) -> Result<Vec<i64>> {
        self.table(FEED_TABLE)?
            .ids_where(&[], Some(Order::Asc("title")))
    }

    /// Ids of the feeds in group `group_id`, ordered by title.
    ///
    /// # Errors
    /// Returns the engine error.
    pub fn feed_ids_for_group(&mut self, group_id: i64) -> Result<Vec<i64>> {
        self.table(FEED_TABLE)?.ids_where(
            &[("group_id", RowValues::Int(group_id))],
            Some(Order::Asc("title")),
        )
    }

    /// # Errors
    /// Returns the engine error.
    pub fn feed(&mut self, id: i64) -> Result<Option<Feed>> {
        self.table(FEED_TABLE)?
            .get(id)?
            .as_ref()
            .map(Feed::try_from)
            .transpose()
    }

    /// # Errors
    /// Returns the engine error.
    pub fn feed_by_url(&mut self, url: &str) -> Result<Option<Feed>> {
        self.table(FEED_TABLE)?
            .first_where(&[("url", RowValues::from(url))])?
            .as_ref()
            .map(Feed::try_from)
            .transpose()
    }

    /// Store `feed`, refreshing the existing row when its URL is already known.
    ///
    /// # Errors
    /// Returns the engine error.
    pub fn add_feed(&mut self, feed: &NewFeed) -> Result<FeedWrite> {
        if let Some(existing) = self.feed_by_url(&feed.url)? {
            self.update_feed(feed, existing.id)?;
            tracing::debug!(id = existing.id, url = %feed.url, "refreshed feed");
            return Ok(FeedWrite::Updated(existing.id));
        }
        let id = self.table(FEED_TABLE)?.insert(&feed.to_record())?;
        tracing::debug!(id, url = %feed.url, "added feed");
        Ok(FeedWrite::Inserted(id))
    }

    /// Write the URL and every set field of `feed` onto feed `id`; fields left
    /// `None` keep their stored value. Returns whether a row changed.
    ///
    /// # Errors
    /// Returns the engine error, e.g. when `feed.url` belongs to another feed.
    pub fn update_feed(&mut self, feed: &NewFeed, id: i64) -> Result<bool> {
        Ok(self.table(FEED_TABLE)?.update(&feed.to_record(), id)? > 0)
    }

    /// Delete feed `id` together with its items; returns whether the feed existed.
    ///
    /// # Errors
    /// Returns the engine error; nothing is deleted in that case.
    pub fn delete_feed(&mut self, id: i64) -> Result<bool> {
        let mut tx = self.connection().transaction()?;
        let items = TableCrud::new(&mut tx, ITEM_TABLE)?
            .delete_where(&[("feed_id", RowValues::Int(id))])?;
        let feeds = TableCrud::new(&mut tx, FEED_TABLE)?.delete(id)?;
        tx.commit()?;
        tracing::debug!(id, items, "deleted feed");
        Ok(feeds > 0)
    }

    /// # Errors
    /// Returns the engine error.
    pub fn count_feeds(&mut self) -> Result<i64> {
        self.table(FEED_TABLE)?.count()
    }
}
