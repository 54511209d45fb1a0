pub mod http;
pub mod traits;

#[cfg(test)]
pub(crate) mod fake;

pub use http::HttpTaskApi;
pub use traits::TaskApi;
