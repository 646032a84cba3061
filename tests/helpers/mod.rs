//! Test helpers module
//!
//! This module provides utilities and helpers for testing the Bookly bot:
//! a mock Telegram API server, Telegram object builders, and a seeded
//! PostgreSQL database.

#![allow(dead_code)]

pub mod telegram_mock;
pub mod database_helper;
pub mod test_data;

pub use telegram_mock::*;
pub use database_helper::*;
pub use test_data::*;
