// src/fetch/mod.rs
pub mod client;

pub use client::{FetchedPage, PageClient};
