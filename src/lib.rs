pub mod app;
pub mod auth;
pub mod config;
pub mod dates;
pub mod entries;
pub mod error;
pub mod foods;
pub mod nutrition;
pub mod openfoodfacts;
pub mod profile;
pub mod progress;
pub mod settings;
pub mod state;
pub mod storage;
