//! # API Module
//!
//! This module contains all the business logic and data processing functions
//! for the adoption marketplace. Each submodule handles a specific domain
//! of functionality.
//!
//! ## Modules
//!
//! - [`application`] - Adoption application lifecycle and its pet side effects
//! - [`auth`] - Registration, login and token issuance
//! - [`pet`] - Pet listings, search/filtering and recommendations
//! - [`shelter`] - Shelter directory, profiles and statistics
//! - [`user`] - User profiles and the favorites ledger

pub mod application;
pub mod auth;
pub mod pet;
pub mod shelter;
pub mod user;
