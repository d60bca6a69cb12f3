//! Styleboard - reviews and a professional directory for beauty and grooming.
//!
//! Clients review the professionals they visit; each review keeps a
//! per-professional aggregate rating current. Professionals publish profiles,
//! services and portfolios, and everyone can query the directory or ask the
//! AI search assistant.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
