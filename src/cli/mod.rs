mod console;
mod handlers;
mod router;
mod types;

pub use console::{is_input_closed, Console, InputClosed};
pub use router::{run, EXIT_CHOICE};
pub use types::App;
