mod item_repo_sqlite;
mod store_repo_sqlite;
mod tag_repo_sqlite;
mod user_repo_sqlite;

pub use item_repo_sqlite::*;
pub use store_repo_sqlite::*;
pub use tag_repo_sqlite::*;
pub use user_repo_sqlite::*;

mod repo_tx_sqlite;
mod schema;

pub use repo_tx_sqlite::*;
pub use schema::*;

mod util;
