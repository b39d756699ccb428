pub mod http;
pub mod logger;

pub use http::HttpClient;
