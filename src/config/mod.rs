//! Configuration modules, each loaded from environment variables.
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL database connection pool initialization
//! - [`jwt`]: JWT authentication configuration

pub mod cors;
pub mod database;
pub mod jwt;
