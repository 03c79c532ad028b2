pub mod schools;
