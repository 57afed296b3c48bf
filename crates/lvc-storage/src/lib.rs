//! lvc-storage
//!
//! Document provider backends: a local directory tree and an S3 bucket.
//! The S3 side is a thin wrapper around the AWS S3 SDK.

pub mod error;
pub mod local;
pub mod objects;
pub mod s3;
pub mod scratch;

pub use local::LocalProvider;
pub use s3::S3Provider;
