// src/application/ports/mod.rs
pub mod storage;
pub mod time;
