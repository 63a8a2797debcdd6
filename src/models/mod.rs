pub mod enums;
pub mod lab;
pub mod layout;
pub mod patient;

pub use enums::*;
pub use lab::*;
pub use layout::*;
pub use patient::*;
