pub mod directory;
pub mod error;
pub mod model;
pub mod navigation;
pub mod validation;
