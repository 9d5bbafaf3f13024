pub mod api;
pub mod config;
pub mod demo;
pub mod error;
pub mod files;
pub mod gate;
pub mod membership;
pub mod models;
pub mod orchestrate;
pub mod reconcile;
pub mod timeline;
