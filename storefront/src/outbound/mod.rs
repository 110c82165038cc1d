//! Driven adapters implementing the domain ports.

pub mod catalogue;
pub mod persistence;
