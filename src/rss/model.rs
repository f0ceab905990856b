use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crud::Record;
use crate::error::{FeedbaseError, Result};
use crate::results::DbRow;
use crate::types::RowValues;

fn required_int(row: &DbRow, column: &str) -> Result<i64> {
    row.get(column)
        .and_then(RowValues::as_int)
        .ok_or_else(|| FeedbaseError::RowDecodeError {
            column: column.to_owned(),
            expected: "an integer",
        })
}

fn optional_int(row: &DbRow, column: &str) -> Option<i64> {
    row.get(column).and_then(RowValues::as_int)
}

fn optional_text(row: &DbRow, column: &str) -> Option<String> {
    row.get(column)
        .and_then(RowValues::as_text)
        .map(str::to_owned)
}

fn stamp(row: &DbRow) -> Option<NaiveDateTime> {
    row.get("stamp").and_then(RowValues::as_timestamp)
}

fn now() -> RowValues {
    RowValues::from(Utc::now().naive_utc())
}

/// A subscribed feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    pub id: i64,
    pub group_id: Option<i64>,
    pub url: String,
    pub title: Option<String>,
    pub desc: Option<String>,
    pub pubdate: Option<String>,
    pub stamp: Option<NaiveDateTime>,
}

impl TryFrom<&DbRow> for Feed {
    type Error = FeedbaseError;

    fn try_from(row: &DbRow) -> Result<Self> {
        Ok(Self {
            id: required_int(row, "id")?,
            group_id: optional_int(row, "group_id"),
            url: optional_text(row, "url").unwrap_or_default(),
            title: optional_text(row, "title"),
            desc: optional_text(row, "desc"),
            pubdate: optional_text(row, "pubdate"),
            stamp: stamp(row),
        })
    }
}

/// Fields written when adding or updating a feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewFeed {
    pub url: String,
    pub title: Option<String>,
    pub desc: Option<String>,
    pub pubdate: Option<String>,
    pub group_id: Option<i64>,
}

impl NewFeed {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    #[must_use]
    pub fn group(mut self, group_id: i64) -> Self {
        self.group_id = Some(group_id);
        self
    }

    /// Fields to write; unset options are left out so an update keeps the stored values.
    pub(crate) fn to_record(&self) -> Record {
        Record::new()
            .with("url", self.url.as_str())
            .with_some("title", self.title.as_deref())
            .with_some("desc", self.desc.as_deref())
            .with_some("pubdate", self.pubdate.as_deref())
            .with_some("group_id", self.group_id)
            .with("stamp", now())
    }
}

/// Outcome of [`super::RssDb::add_feed`]; feeds are unique by URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedWrite {
    Inserted(i64),
    /// A feed with the same URL existed and was refreshed.
    Updated(i64),
}

impl FeedWrite {
    #[must_use]
    pub fn id(&self) -> i64 {
        match self {
            FeedWrite::Inserted(id) | FeedWrite::Updated(id) => *id,
        }
    }
}

/// One entry of a feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub feed_id: i64,
    pub url: String,
    pub title: Option<String>,
    pub desc: Option<String>,
    pub pubdate: Option<String>,
    pub body: Option<String>,
    pub stamp: Option<NaiveDateTime>,
}

impl TryFrom<&DbRow> for Item {
    type Error = FeedbaseError;

    fn try_from(row: &DbRow) -> Result<Self> {
        Ok(Self {
            id: required_int(row, "id")?,
            feed_id: required_int(row, "feed_id")?,
            url: optional_text(row, "url").unwrap_or_default(),
            title: optional_text(row, "title"),
            desc: optional_text(row, "desc"),
            pubdate: optional_text(row, "pubdate"),
            body: optional_text(row, "body"),
            stamp: stamp(row),
        })
    }
}

/// Fields written when adding an item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub feed_id: i64,
    pub url: String,
    pub title: Option<String>,
    pub desc: Option<String>,
    pub pubdate: Option<String>,
    pub body: Option<String>,
}

impl NewItem {
    #[must_use]
    pub fn new(feed_id: i64, url: impl Into<String>) -> Self {
        Self {
            feed_id,
            url: url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn pubdate(mut self, pubdate: impl Into<String>) -> Self {
        self.pubdate = Some(pubdate.into());
        self
    }

    pub(crate) fn to_record(&self) -> Record {
        Record::new()
            .with("feed_id", self.feed_id)
            .with("url", self.url.as_str())
            .with_some("title", self.title.as_deref())
            .with_some("desc", self.desc.as_deref())
            .with_some("pubdate", self.pubdate.as_deref())
            .with_some("body", self.body.as_deref())
            .with("stamp", now())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedGroup {
    pub id: i64,
    pub title: Option<String>,
    pub stamp: Option<NaiveDateTime>,
}

impl TryFrom<&DbRow> for FeedGroup {
    type Error = FeedbaseError;

    fn try_from(row: &DbRow) -> Result<Self> {
        Ok(Self {
            id: required_int(row, "id")?,
            title: optional_text(row, "title"),
            stamp: stamp(row),
        })
    }
}
