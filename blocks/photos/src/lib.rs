//! Builds `images.json` from the studio photo folders on Google Drive.

pub mod auth;
pub mod drive;
pub mod error;
pub mod manifest;

pub use error::DriveError;
