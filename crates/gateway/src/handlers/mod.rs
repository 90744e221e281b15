//! API handlers module

pub mod ebooks;
pub mod health;
pub mod konsep;
pub mod listing;
pub mod modules;
pub mod news;
pub mod outbound;
pub mod papers;
pub mod site_config;
