mod catalog;
mod token;
mod user;

pub use catalog::*;
pub use token::*;
pub use user::*;
