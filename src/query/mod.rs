pub mod backend;
pub mod backends;
pub mod types;

pub use backend::{QueryBackend, QueryError};
pub use backends::HttpQueryBackend;
pub use types::{QueryAnswer, QueryEnvelope, QueryPayload, QueryRequest, QueryStatus};
