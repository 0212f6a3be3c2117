//! Product store and service.

pub mod repository;
pub mod service;
