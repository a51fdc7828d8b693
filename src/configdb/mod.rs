// src/configdb/mod.rs
// Embedded configuration database access: connections, record types,
// reader, and transactional writer.

pub mod connection;
pub mod error;
pub mod reader;
pub mod records;
pub mod writer;

pub use connection::DbConnection;
pub use error::{DbError, DbResult};
pub use reader::DbReader;
pub use writer::DbWriter;
