//! Domain entities and their relational mapping.
//!
//! `kind`, `entity`, `attributes` and `timestamp` define what an entity is and
//! how it flattens to JSON. The per-kind modules (`user`, `place`, ...) map
//! the same entities onto sea-orm tables for the database backend.

pub mod errors;
pub mod db;
pub mod kind;
pub mod timestamp;
pub mod attributes;
pub mod entity;

pub mod base_model;
pub mod user;
pub mod place;
pub mod state;
pub mod city;
pub mod amenity;
pub mod review;

pub use entity::{storage_key, Entity, EntityData};
pub use errors::ModelError;
pub use kind::EntityKind;

#[cfg(test)]
mod tests;
