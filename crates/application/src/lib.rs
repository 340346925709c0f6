//! Ferrous Response Filter Application Layer
pub mod ports;
