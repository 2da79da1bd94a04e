//! User directory boundary

pub mod ports;

pub use ports::UserDirectory;
