//! Ferrous Response Filter Infrastructure Layer
pub mod dns;
