mod api_error;
mod client;
mod errors;
mod query;
mod response;
pub mod types;
pub use self::api_error::{ApiError, ApiErrorKind};
pub use self::client::Client;
pub use self::errors::Error;
pub use self::query::{Query, QueryCommon, ResourceQuery, SortDirection};
pub use self::response::{HttpResponse, Response};
