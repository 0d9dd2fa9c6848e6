use anyhow::{Context, Result};
use modscope_core::{
    services::{
        cargo_workspace::find_manifest,
        source_walker::{is_in_excluded_dir, is_rust_source},
    },
    ConfigLoader, ModuleDb,
};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use tracing::{debug, info, warn};

use super::inspect::print_inspection;
use crate::utils::absolute_path;

pub fn watch_command(filepath_arg: &str, json: bool) -> Result<()> {
    let path = absolute_path(filepath_arg)?;
    let manifest = find_manifest(&path)
        .with_context(|| format!("No Cargo.toml found above {}", path.display()))?;
    let config = ConfigLoader::load_from_path(&path)?;
    let exclude = config.exclude();
    let db = ModuleDb::for_manifest(&manifest, &config)
        .with_context(|| format!("Failed to load the workspace around {}", path.display()))?;

    print_inspection(&db, &path, json)?;

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = RecommendedWatcher::new(tx, notify::Config::default())
        .context("Failed to create file watcher")?;
    let roots = watch_roots(&db, &path);
    for root in &roots {
        info!("Watching {}", root.display());
        watcher
            .watch(root, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch {}", root.display()))?;
    }

    for res in rx {
        match res {
            Ok(event) => {
                if apply_event(&db, &roots, &exclude, &event) > 0 {
                    debug!("Modification count now {}", db.modification_count());
                    print_inspection(&db, &path, json)?;
                }
            }
            Err(e) => warn!("Watcher error: {:?}", e),
        }
    }
    Ok(())
}

/// Package directory of the watched file, or its parent directory
fn watch_roots(db: &ModuleDb, path: &Path) -> Vec<PathBuf> {
    match db.file(path).containing_package() {
        Some(package) => vec![package.root],
        None => path.parent().map(Path::to_path_buf).into_iter().collect(),
    }
}

/// Feeds the Rust files of `event` to the database, skipping excluded
/// directories below `roots`; returns how many it touched
fn apply_event(db: &ModuleDb, roots: &[PathBuf], exclude: &[String], event: &Event) -> usize {
    if matches!(event.kind, EventKind::Access(_)) {
        return 0;
    }
    let mut touched = 0;
    let relevant = event.paths.iter().filter(|p| {
        is_rust_source(p) && !roots.iter().any(|root| is_in_excluded_dir(p, root, exclude))
    });
    for changed in relevant {
        db.notify_changed(changed);
        touched += 1;
    }
    touched
}
