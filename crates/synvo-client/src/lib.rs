pub mod client;
pub mod error;
pub mod normalize;

pub use client::SynvoClient;
pub use error::ClientError;
