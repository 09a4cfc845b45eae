mod token_blocklist_memory;

pub use token_blocklist_memory::*;
