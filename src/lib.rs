// src/lib.rs

pub mod api;
pub mod authors;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod routes;
pub mod session;
pub mod state;
pub mod utils;
pub mod views;

pub use routes::{Page, render};
