//! Interactive panel mode

pub mod command;
pub mod session;

pub use command::{ReplCommand, parse_command, parse_funnel, resolve_chip};
pub use session::NavigatorRepl;
