pub mod input;
pub mod output;
pub mod request;
pub mod tool;

pub use input::*;
pub use output::*;
pub use request::*;
pub use tool::*;
