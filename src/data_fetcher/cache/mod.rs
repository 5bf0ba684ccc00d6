pub mod month_cache;

// Re-export month cache
pub use month_cache::*;
