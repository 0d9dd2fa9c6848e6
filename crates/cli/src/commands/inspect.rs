use anyhow::{Context, Result};
use modscope_core::ModuleDb;
use std::path::Path;
use tracing::debug;

use crate::display::print_summary;
use crate::utils::{absolute_path, determine_file_type};

pub fn inspect_command(filepath_arg: &str, json: bool) -> Result<()> {
    debug!("Inspecting file: {}", filepath_arg);
    let path = absolute_path(filepath_arg)?;

    let db = ModuleDb::discover(&path)
        .with_context(|| format!("Failed to load the workspace around {}", path.display()))?;
    print_inspection(&db, &path, json)
}

/// Prints the module view of `path` as JSON or formatted text
pub fn print_inspection(db: &ModuleDb, path: &Path, json: bool) -> Result<()> {
    let summary = db.file(path).summary();
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
        println!("   📄 Type: {}", determine_file_type(path));
    }
    Ok(())
}
