/// Idea and application primary keys are UUIDv7 (time-ordered).
pub type EntityId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Opaque user identifier issued by the identity provider.
pub type UserId = String;

/// Generate a fresh primary key.
pub fn new_entity_id() -> EntityId {
    uuid::Uuid::now_v7()
}
