pub mod rate_limiter;
pub mod sector;

pub use rate_limiter::{Admission, SlidingWindowLimiter};
pub use sector::{SectorError, SectorQuery};
