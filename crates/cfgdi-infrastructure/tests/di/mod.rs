//! Dependency Injection Tests
//!
//! End-to-end tests of the bootstrap: configuration file to resolved services.
