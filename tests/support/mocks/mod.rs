// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod repos;
pub mod storage;
pub mod time;

pub use repos::{FailingArticleWrite, StaleCategoryCheck};
pub use storage::InMemoryBlobStore;
pub use time::{FixedClock, fixed_now};
