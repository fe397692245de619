//! Backend operations

mod create;
mod mutation;
mod query;

pub use create::*;
pub use mutation::*;
