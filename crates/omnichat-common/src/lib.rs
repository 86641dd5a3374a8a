pub mod errors;
pub mod id;
pub mod types;

pub use errors::{ConfigError, OmniError};
pub use id::{new_correlation_id, new_id, SessionId};
pub use types::{Geometry, ModelIdentity};

pub type Result<T> = std::result::Result<T, OmniError>;
