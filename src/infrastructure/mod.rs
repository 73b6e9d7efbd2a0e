pub mod database;
pub mod repositories;
pub mod storage;
pub mod time;
