mod auth_service_impl;
mod claims_augmenter_impl;
mod credential_hasher_argon2;
mod item_service_impl;
mod store_service_impl;
mod tag_service_impl;
mod token_codec_jwt;
mod token_guard;
mod token_hooks_impl;
mod user_service_impl;

pub use auth_service_impl::*;
pub use claims_augmenter_impl::*;
pub use credential_hasher_argon2::*;
pub use item_service_impl::*;
pub use store_service_impl::*;
pub use tag_service_impl::*;
pub use token_codec_jwt::*;
pub use token_guard::*;
pub use token_hooks_impl::*;
pub use user_service_impl::*;
