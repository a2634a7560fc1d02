//! # Repository Modules
//!
//! One repository per entity family, each owning its SQL:
//!
//! - [`catalog`] - sellable products and services (CRUD + stock)
//! - [`transaction`] - finalized sales (one-shot checkout write)
//! - [`settings`] - the single store settings row (VAT flag/rate)
//! - [`directory`] - staff and customer lists
//! - [`appointment`] - the booking calendar

pub mod appointment;
pub mod catalog;
pub mod directory;
pub mod settings;
pub mod transaction;
