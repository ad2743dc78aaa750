pub mod search;
pub mod news;

pub use search::{DuckDuckGoSearch, SearchProvider};
pub use news::{DigestSource, NewsDigest, NewsSentinel};
