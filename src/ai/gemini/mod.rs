pub mod client;
pub mod interpret;
pub mod request;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::GeminiHttpClient;
pub use interpret::{interpret, Outcome};
pub use request::BuildError;
pub use types::{GenerateContentRequest, GenerateContentResponse};
