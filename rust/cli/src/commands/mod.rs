//! Command handlers, one module per subcommand.
//!
//! Each handler takes its parsed arguments plus the output streams and
//! returns `Result<(), CliError>`; `run` turns the result into an exit code.

mod cfg;
mod deal;
mod play;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use play::handle_play_command;
