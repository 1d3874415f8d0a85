//! picsearch library exports for testing

pub mod core;
pub mod search;

#[cfg(test)]
pub mod test_support;
