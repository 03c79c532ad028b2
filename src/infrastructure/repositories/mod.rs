pub mod mock;
pub mod schools;
