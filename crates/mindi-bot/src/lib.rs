pub mod policy;
pub mod source;

pub use policy::{GreedyPolicy, Policy, PolicyContext};
pub use source::MoveSource;
