pub mod config;
pub mod model;
pub mod repository;
pub mod telemetry;
pub mod timeline;
pub mod usecase;
