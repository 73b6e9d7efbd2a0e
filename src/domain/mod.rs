// src/domain/mod.rs
pub mod article;
pub mod category;
pub mod errors;
