pub mod http_client;
pub mod text;

pub use http_client::HttpClientFactory;
