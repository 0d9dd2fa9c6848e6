use anyhow::{Context, Result};
use modscope_core::ModuleDb;
use tracing::debug;

use crate::display::{TreeRow, print_tree};
use crate::utils::absolute_path;

pub fn tree_command(path_arg: &str, json: bool) -> Result<()> {
    debug!("Building module tree for: {}", path_arg);
    let root = absolute_path(path_arg)?;

    let db = ModuleDb::discover(&root)
        .with_context(|| format!("Failed to load the workspace around {}", root.display()))?;

    let mut rows: Vec<TreeRow> = db
        .files()
        .into_iter()
        .filter_map(|file| {
            let path = file.path()?;
            path.starts_with(&root).then(|| TreeRow {
                crate_relative_path: file.crate_relative_path(),
                is_crate_root: file.is_crate_root(),
                path,
            })
        })
        .collect();
    rows.sort_by(|a, b| a.path.cmp(&b.path));

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print_tree(&root, &rows);
    }
    Ok(())
}
