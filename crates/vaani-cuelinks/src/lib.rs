pub mod client;
pub mod error;
pub mod normalize;

pub use client::CuelinksClient;
pub use error::CuelinksError;
pub use normalize::extract_products;
