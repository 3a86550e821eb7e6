pub mod about;
pub mod annotations;
pub mod config;
pub mod defaults;
pub mod error;
pub mod utils;

#[cfg(test)]
pub mod test_utils;
