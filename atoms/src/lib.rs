pub mod images;
pub mod photos;
pub mod response;
