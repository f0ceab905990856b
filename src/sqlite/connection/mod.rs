mod core;
mod dml;
mod schema;
mod select;
mod tx;

pub use core::Connection;
pub use tx::Transaction;
