pub use self::{core::*, record::*};

pub mod core;
pub mod record;
