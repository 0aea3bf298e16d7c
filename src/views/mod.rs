// src/views/mod.rs

pub mod cards;
pub mod nav;
pub mod post;
pub mod profile;
