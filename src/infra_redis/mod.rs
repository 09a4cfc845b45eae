mod token_blocklist_redis;

pub use token_blocklist_redis::*;
