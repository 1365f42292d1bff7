mod error;
mod request;

pub use error::ExplainError;
pub use request::{ExplainRequest, Settings, explain, load_request, resolve, to_json};
