pub mod error;
pub mod log;
pub mod match_state;
pub mod rules;
pub mod serialization;
