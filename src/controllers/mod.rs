// src/controllers/mod.rs

pub mod auth;
pub mod compose;
pub mod feed;
pub mod post_page;
pub mod profile;
