mod auth_service;
mod catalog_service;
mod token_hooks;
mod user_service;

pub use auth_service::*;
pub use catalog_service::*;
pub use token_hooks::*;
pub use user_service::*;
