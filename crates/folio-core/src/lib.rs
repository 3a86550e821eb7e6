pub mod error;
pub mod render;
pub mod selection;
pub mod view;

pub type FolioResult<T> = std::result::Result<T, error::FolioError>;
