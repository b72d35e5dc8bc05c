//! Shared utilities and common types for the workout tracker.
//!
//! This crate provides common functionality used across all other crates:
//! - Digest helpers (session token hashing, legacy password digests)
//! - Password hashing with Argon2id
//! - JWT access and refresh tokens
//! - Common validation logic

pub mod crypto;
pub mod jwt;
pub mod password;
pub mod validation;
