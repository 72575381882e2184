pub mod mock;
pub mod sqlite;
