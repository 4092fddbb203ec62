//! reel library exports for testing

pub mod core;
pub mod query;
pub mod tui;

#[cfg(test)]
pub mod test_support;
