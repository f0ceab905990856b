mod row;

pub use row::DbRow;
pub(crate) use row::{ColumnIndex, build_column_index};
