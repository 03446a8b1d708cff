//! Infrastructure: SQLite connection, migrations, session scope.

pub mod db;

pub use db::{get_connection, init_db, init_memory_db, session_scope, DbPool};
