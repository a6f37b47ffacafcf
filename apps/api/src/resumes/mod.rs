pub mod access;
pub mod handlers;
#[cfg(test)]
pub mod memory;
pub mod store;
