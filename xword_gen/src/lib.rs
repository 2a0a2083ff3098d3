#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod board;
mod intersection;
pub mod numbering;
pub mod search;
pub mod slot;
pub mod template;
