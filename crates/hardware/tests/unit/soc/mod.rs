
/// RAM bus.
pub mod ram;
