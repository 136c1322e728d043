mod document;
pub use self::document::Document;

mod resource;
pub use self::resource::{Relationship, RelationshipData, ResourceIdentifier, ResourceObject};
