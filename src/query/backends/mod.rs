pub mod http;

pub use http::HttpQueryBackend;
