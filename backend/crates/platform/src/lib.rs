//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no business rules:
//! - Cookie building and parsing
//! - Cryptographic helpers (random bytes, constant-time compare)
//! - Password policy and Argon2id hashing

pub mod cookie;
pub mod crypto;
pub mod password;
