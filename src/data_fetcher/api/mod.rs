pub mod fetch_utils;
pub mod http_client;
pub mod urls;

mod client;

pub use client::GameApiClient;
#[allow(unused_imports)]
pub use http_client::*;
pub use urls::*;
