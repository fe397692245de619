//! Request and response models

mod payload;
mod user;

pub use payload::*;
pub use user::*;
