pub mod patient;
pub mod form;

pub use patient::*;
pub use form::*;
