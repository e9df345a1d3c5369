//! Entity base contract.
//!
//! An [`Entity`] is the unit the storage layer persists: identity,
//! timestamps, a typed payload per kind and an open bag of extra
//! attributes. The flat map produced by [`Entity::to_map`] is the exact
//! shape written to the JSON document.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::attributes::{Amenity, Attributes, City, Place, Review, State, User};
use crate::errors::ModelError;
use crate::kind::EntityKind;
use crate::timestamp;

/// Flat-map key carrying the type tag.
pub const CLASS_KEY: &str = "__class__";

const RESERVED: [&str; 4] = ["id", "created_at", "updated_at", CLASS_KEY];

/// The composite key `"{kind}.{id}"`. Every insert, lookup and delete derives keys here.
pub fn storage_key(kind: EntityKind, id: &str) -> String {
    format!("{}.{}", kind.name(), id)
}

/// Typed payload, one variant per kind.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityData {
    BaseModel,
    User(User),
    Place(Place),
    State(State),
    City(City),
    Amenity(Amenity),
    Review(Review),
}

impl EntityData {
    /// Default payload for a freshly constructed entity of `kind`.
    pub fn empty(kind: EntityKind) -> Self {
        match kind {
            EntityKind::BaseModel => EntityData::BaseModel,
            EntityKind::User => EntityData::User(User::default()),
            EntityKind::Place => EntityData::Place(Place::default()),
            EntityKind::State => EntityData::State(State::default()),
            EntityKind::City => EntityData::City(City::default()),
            EntityKind::Amenity => EntityData::Amenity(Amenity::default()),
            EntityKind::Review => EntityData::Review(Review::default()),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntityData::BaseModel => EntityKind::BaseModel,
            EntityData::User(_) => EntityKind::User,
            EntityData::Place(_) => EntityKind::Place,
            EntityData::State(_) => EntityKind::State,
            EntityData::City(_) => EntityKind::City,
            EntityData::Amenity(_) => EntityKind::Amenity,
            EntityData::Review(_) => EntityKind::Review,
        }
    }

    fn fields(kind: EntityKind) -> &'static [&'static str] {
        match kind {
            EntityKind::BaseModel => &[],
            EntityKind::User => User::FIELDS,
            EntityKind::Place => Place::FIELDS,
            EntityKind::State => State::FIELDS,
            EntityKind::City => City::FIELDS,
            EntityKind::Amenity => Amenity::FIELDS,
            EntityKind::Review => Review::FIELDS,
        }
    }

    /// Split the kind's own fields out of `map`, leaving everything else behind.
    fn take(kind: EntityKind, map: &mut Map<String, Value>) -> Result<Self, ModelError> {
        Ok(match kind {
            EntityKind::BaseModel => EntityData::BaseModel,
            EntityKind::User => EntityData::User(take_attributes(kind, map)?),
            EntityKind::Place => EntityData::Place(take_attributes(kind, map)?),
            EntityKind::State => EntityData::State(take_attributes(kind, map)?),
            EntityKind::City => EntityData::City(take_attributes(kind, map)?),
            EntityKind::Amenity => EntityData::Amenity(take_attributes(kind, map)?),
            EntityKind::Review => EntityData::Review(take_attributes(kind, map)?),
        })
    }

    fn write_into(&self, map: &mut Map<String, Value>) {
        match self {
            EntityData::BaseModel => {}
            EntityData::User(attrs) => merge_attributes(attrs, map),
            EntityData::Place(attrs) => merge_attributes(attrs, map),
            EntityData::State(attrs) => merge_attributes(attrs, map),
            EntityData::City(attrs) => merge_attributes(attrs, map),
            EntityData::Amenity(attrs) => merge_attributes(attrs, map),
            EntityData::Review(attrs) => merge_attributes(attrs, map),
        }
    }
}

fn take_attributes<T: Attributes>(kind: EntityKind, map: &mut Map<String, Value>) -> Result<T, ModelError> {
    let mut own = Map::new();
    for field in T::FIELDS {
        if let Some(value) = map.remove(*field) {
            own.insert((*field).to_string(), value);
        }
    }
    serde_json::from_value(Value::Object(own)).map_err(|e| ModelError::invalid_attribute(kind, e.to_string()))
}

fn merge_attributes<T: Serialize>(attrs: &T, map: &mut Map<String, Value>) {
    // Plain field structs always serialize to an object.
    if let Ok(Value::Object(fields)) = serde_json::to_value(attrs) {
        map.extend(fields);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    data: EntityData,
    extra: Map<String, Value>,
}

impl Entity {
    /// Fresh entity of `kind` with default attributes.
    pub fn new(kind: EntityKind) -> Self {
        Self::from_data(EntityData::empty(kind))
    }

    /// Fresh entity with a new id and both timestamps set to now.
    pub fn from_data(data: EntityData) -> Self {
        let now = timestamp::now();
        Self { id: Uuid::new_v4().to_string(), created_at: now, updated_at: now, data, extra: Map::new() }
    }

    /// Rehydrate from already-typed parts, as read back from a database row.
    pub fn restore(
        id: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        data: EntityData,
        extra: Map<String, Value>,
    ) -> Self {
        Self { id, created_at, updated_at, data, extra }
    }

    /// Rebuild from a flat map whose `__class__` names the kind.
    pub fn from_map(mut map: Map<String, Value>) -> Result<Self, ModelError> {
        let kind = match map.remove(CLASS_KEY) {
            Some(Value::String(name)) => name.parse::<EntityKind>()?,
            Some(other) => return Err(ModelError::UnknownEntityKind(other.to_string())),
            None => return Err(ModelError::invalid_attribute("entity", format!("missing `{CLASS_KEY}`"))),
        };
        Self::from_map_as(kind, map)
    }

    /// Rebuild an entity of `kind` from a flat map.
    ///
    /// Omitted `id`/timestamps get fresh values; an explicit `null` for any of
    /// them is rejected. Keys the kind does not own are kept as extra attributes.
    pub fn from_map_as(kind: EntityKind, mut map: Map<String, Value>) -> Result<Self, ModelError> {
        if let Some(tag) = map.remove(CLASS_KEY) {
            if tag.as_str() != Some(kind.name()) {
                return Err(ModelError::invalid_attribute(kind, format!("`{CLASS_KEY}` is {tag}")));
            }
        }

        let id = match map.remove("id") {
            None => Uuid::new_v4().to_string(),
            Some(Value::Null) => return Err(ModelError::InvalidIdentity("id")),
            Some(Value::String(id)) if id.is_empty() => return Err(ModelError::InvalidIdentity("id")),
            Some(Value::String(id)) => id,
            Some(other) => return Err(ModelError::invalid_attribute(kind, format!("`id` must be a string, got {other}"))),
        };

        let now = timestamp::now();
        let created_at = take_timestamp(&mut map, "created_at")?.unwrap_or(now);
        let updated_at = take_timestamp(&mut map, "updated_at")?.unwrap_or(now);
        let data = EntityData::take(kind, &mut map)?;

        Ok(Self { id, created_at, updated_at, data, extra: map })
    }

    /// Flat map with every own attribute, ISO timestamps and the `__class__` tag.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = self.extra.clone();
        self.data.write_into(&mut map);
        map.insert("id".into(), Value::String(self.id.clone()));
        map.insert("created_at".into(), Value::String(timestamp::format(&self.created_at)));
        map.insert("updated_at".into(), Value::String(timestamp::format(&self.updated_at)));
        map.insert(CLASS_KEY.into(), Value::String(self.kind().name().to_string()));
        map
    }

    pub fn touch(&mut self) {
        self.updated_at = timestamp::now();
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.data.kind()
    }

    pub fn key(&self) -> String {
        storage_key(self.kind(), &self.id)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn data(&self) -> &EntityData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut EntityData {
        &mut self.data
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    /// Set an extra attribute. Names owned by the base contract or the kind's
    /// typed fields are rejected; change those through [`Entity::data_mut`].
    pub fn set_attribute(&mut self, name: impl Into<String>, value: Value) -> Result<(), ModelError> {
        let name = name.into();
        if RESERVED.contains(&name.as_str()) || EntityData::fields(self.kind()).contains(&name.as_str()) {
            return Err(ModelError::invalid_attribute(self.kind(), format!("`{name}` is not an extra attribute")));
        }
        self.extra.insert(name, value);
        Ok(())
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<Value> {
        self.extra.remove(name)
    }

    /// Extra attributes as a single JSON object, the form kept in table rows.
    pub fn extra_json(&self) -> Value {
        Value::Object(self.extra.clone())
    }
}

/// Inverse of [`Entity::extra_json`]. A SQL `NULL` reads back as no extras.
pub(crate) fn extra_from_json(kind: EntityKind, value: Value) -> Result<Map<String, Value>, ModelError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(ModelError::invalid_attribute(kind, format!("extra attributes must be an object, got {other}"))),
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = self.to_map();
        map.remove(CLASS_KEY);
        write!(f, "[{}] ({}) {}", self.kind(), self.id, Value::Object(map))
    }
}

fn take_timestamp(map: &mut Map<String, Value>, field: &'static str) -> Result<Option<DateTime<Utc>>, ModelError> {
    match map.remove(field) {
        None => Ok(None),
        Some(Value::Null) => Err(ModelError::InvalidIdentity(field)),
        Some(Value::String(raw)) => timestamp::parse(field, &raw).map(Some),
        Some(other) => Err(ModelError::MalformedTimestamp { field, value: other.to_string() }),
    }
}
