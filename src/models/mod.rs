pub use category::*;
pub use contact::*;
pub use press_release::*;
pub use release_status::*;

mod category;
mod contact;
mod press_release;
mod release_status;
