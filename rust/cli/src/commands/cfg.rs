//! Configuration command handler.
//!
//! Prints the resolved configuration as JSON, each value paired with the
//! layer it came from (`default`, `file` or `env`):
//!
//! ```json
//! {
//!   "seed": { "value": null, "source": "default" },
//!   "rounds": { "value": 3, "source": "file" },
//!   "reveal_dealer": { "value": false, "source": "default" }
//! }
//! ```

use crate::config::{self, ConfigError, ConfigResolved};
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    render(config::load_with_sources(), out, err)
}

fn render(
    resolved: Result<ConfigResolved, ConfigError>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let ConfigResolved { config, sources } = match resolved {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(e.to_string()));
        }
    };

    let display = serde_json::json!({
        "seed": { "value": config.seed, "source": sources.seed },
        "rounds": { "value": config.rounds, "source": sources.rounds },
        "reveal_dealer": { "value": config.reveal_dealer, "source": sources.reveal_dealer },
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
