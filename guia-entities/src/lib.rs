#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

//! # guia-entities
//!
//! Reusable, agnostic domain entities for guialocal.
//!
//! The entities only contain generic functionality that does not reveal any
//! application-specific business logic.

pub mod category;
pub mod email;
pub mod geo;
pub mod id;
pub mod listing;
pub mod listing_type;
pub mod password;
pub mod status;
pub mod time;
pub mod user;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
