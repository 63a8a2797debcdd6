pub mod classify;
pub mod extraction;
