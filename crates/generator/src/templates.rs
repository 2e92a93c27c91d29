//! Template loading and management

use slackweb_luagen_common::{GeneratorError, Result};
use tera::Tera;

/// Load the Lua templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.add_raw_template(
        "preamble.lua",
        include_str!("../templates/preamble.lua.tera"),
    )
    .map_err(|e| {
        GeneratorError::Generation(format!("Failed to load preamble.lua template: {}", e))
    })?;

    Ok(tera)
}
