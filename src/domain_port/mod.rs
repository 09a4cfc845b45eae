// store

mod token_blocklist;

pub use token_blocklist::*;

// repo

mod item_repo;
mod store_repo;
mod tag_repo;
mod user_repo;

mod repo_tx;

pub use item_repo::*;
pub use store_repo::*;
pub use tag_repo::*;
pub use user_repo::*;

pub use repo_tx::*;
