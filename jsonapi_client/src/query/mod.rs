mod common;
pub use self::common::{Query, QueryCommon, SortDirection};
mod resource;
pub use self::resource::ResourceQuery;
