pub mod assets;
pub mod gallery;
pub mod health;
pub mod media;
pub mod photos;
pub mod upload;
