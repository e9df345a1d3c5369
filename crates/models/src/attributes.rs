//! Kind-specific attribute sets.
//!
//! Each struct lists the typed fields a kind carries beyond the common
//! `id`/`created_at`/`updated_at`. Missing fields fall back to their
//! defaults, matching a freshly constructed object.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A typed attribute set that can be split out of, and merged back into, a flat map.
pub trait Attributes: Serialize + DeserializeOwned + Default {
    /// Keys owned by this attribute set in the flat map.
    const FIELDS: &'static [&'static str];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl Attributes for User {
    const FIELDS: &'static [&'static str] = &["email", "password", "first_name", "last_name"];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct State {
    pub name: String,
}

impl Attributes for State {
    const FIELDS: &'static [&'static str] = &["name"];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct City {
    pub state_id: String,
    pub name: String,
}

impl Attributes for City {
    const FIELDS: &'static [&'static str] = &["state_id", "name"];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Amenity {
    pub name: String,
}

impl Attributes for Amenity {
    const FIELDS: &'static [&'static str] = &["name"];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Place {
    pub city_id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub number_rooms: i32,
    pub number_bathrooms: i32,
    pub max_guest: i32,
    pub price_by_night: i32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Attributes for Place {
    const FIELDS: &'static [&'static str] = &[
        "city_id",
        "user_id",
        "name",
        "description",
        "number_rooms",
        "number_bathrooms",
        "max_guest",
        "price_by_night",
        "latitude",
        "longitude",
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Review {
    pub place_id: String,
    pub user_id: String,
    pub text: String,
}

impl Attributes for Review {
    const FIELDS: &'static [&'static str] = &["place_id", "user_id", "text"];
}
