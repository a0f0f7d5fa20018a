//! List command.

use crate::cli::output;
use crate::core::config::ConfigSet;
use crate::error::Result;

/// List the projects defined in the config file.
pub fn execute(configs: &ConfigSet, json: bool) -> Result<()> {
    let names = configs.names();

    if json {
        let output = serde_json::json!({
            "projects": names,
            "count": names.len()
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    output::header(&format!("{} projects", names.len()));
    for name in names {
        let profile = configs.select(name)?;
        output::list_item(&format!(
            "{}  {}",
            name,
            output::dimmed(&format!("{} / {} / {}", profile.region, profile.table_name, profile.file))
        ));
    }
    Ok(())
}
