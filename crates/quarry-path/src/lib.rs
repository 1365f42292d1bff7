mod error;
mod mapper;
mod projection;
mod value;

pub use error::PathError;
pub use mapper::Mapper;
pub use projection::Projection;
pub use value::DocumentValue;
