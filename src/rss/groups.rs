use chrono::Utc;

use crate::crud::Record;
use crate::error::Result;
use crate::types::RowValues;

use super::model::FeedGroup;
use super::schema::{FEED_TABLE, GROUP_TABLE};
use super::RssDb;

impl RssDb {
    /// # Errors
    /// Returns the engine error.
    pub fn group(&mut self, id: i64) -> Result<Option<FeedGroup>> {
        self.table(GROUP_TABLE)?
            .get(id)?
            .as_ref()
            .map(FeedGroup::try_from)
            .transpose()
    }

    /// Ids of every group, oldest first.
    ///
    /// # Errors
    /// Returns the engine error.
    pub fn group_ids(&mut self) -> Result<Vec<i64>> {
        self.table(GROUP_TABLE)?.ids_where(&[], None)
    }

    /// # Errors
    /// Returns the engine error.
    pub fn add_group(&mut self, title: &str) -> Result<i64> {
        let record = Record::new()
            .with("title", title)
            .with("stamp", Utc::now().naive_utc());
        self.table(GROUP_TABLE)?.insert(&record)
    }

    /// # Errors
    /// Returns the engine error.
    pub fn count_groups(&mut self) -> Result<i64> {
        self.table(GROUP_TABLE)?.count()
    }

    /// # Errors
    /// Returns the engine error.
    pub fn count_feeds_in_group(&mut self, group_id: i64) -> Result<i64> {
        self.table(FEED_TABLE)?
            .count_where(&[("group_id", RowValues::Int(group_id))])
    }

    /// Feeds not assigned to any group.
    ///
    /// # Errors
    /// Returns the engine error.
    pub fn count_feeds_in_no_group(&mut self) -> Result<i64> {
        self.table(FEED_TABLE)?
            .count_where(&[("group_id", RowValues::Null)])
    }
}
