use modscope_core::{CrateAttributes, ModuleSummary};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One line of `modscope tree`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeRow {
    pub path: PathBuf,
    pub crate_relative_path: Option<String>,
    pub is_crate_root: bool,
}

pub fn print_summary(summary: &ModuleSummary) {
    let path = summary
        .path
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    println!("🔍 Inspecting: {}", path);
    println!("{}", "=".repeat(80));

    println!("   📦 Module: {}", summary.mod_name.as_deref().unwrap_or("?"));
    println!(
        "   🧭 Crate path: {}",
        display_crate_path(summary.crate_relative_path.as_deref())
    );
    if summary.is_crate_root {
        println!("   🎯 Crate root");
    }
    println!("   👁  Public: {}", if summary.is_public { "yes" } else { "no" });

    match &summary.super_mod {
        Some(parent) => println!("   ⬆️  Declared in: {}", parent),
        None if summary.is_crate_root => {}
        None => println!("   ⚠️  No `mod` declaration found (detached file)"),
    }
    if let Some(path_attr) = &summary.path_attribute {
        println!("   🔗 #[path = \"{}\"]", path_attr);
    }

    match &summary.owned_directory {
        Some(dir) => println!("   📂 Owned directory: {}", dir.display()),
        None if summary.owns_directory => println!("   📂 Owned directory: (missing)"),
        None => println!("   📂 Owned directory: none"),
    }
    if let Some(root) = &summary.crate_root {
        println!("   🌳 Crate root: {}", root.display());
    }
    if summary.attributes != CrateAttributes::None {
        println!("   🏷️  Attributes: {}", attributes_label(summary.attributes));
    }
    if let Some(package) = &summary.package {
        println!("   📦 Package: {}", package);
    }
}

pub fn print_tree(root: &Path, rows: &[TreeRow]) {
    println!("🌳 Module tree: {}", root.display());
    println!("{}", "=".repeat(80));

    let width = rows
        .iter()
        .map(|row| relative_display(root, &row.path).len())
        .max()
        .unwrap_or(0);
    for row in rows {
        let marker = if row.is_crate_root { "🎯" } else { "  " };
        println!(
            "{} {:width$}  {}",
            marker,
            relative_display(root, &row.path),
            display_crate_path(row.crate_relative_path.as_deref()),
            width = width
        );
    }
    let detached = rows.iter().filter(|r| r.crate_relative_path.is_none()).count();
    println!();
    println!("{} file(s), {} detached", rows.len(), detached);
}

fn display_crate_path(path: Option<&str>) -> String {
    match path {
        Some("") => "crate".to_string(),
        Some(path) => format!("crate{}", path),
        None => "(detached)".to_string(),
    }
}

fn attributes_label(attributes: CrateAttributes) -> &'static str {
    match attributes {
        CrateAttributes::NoCore => "#![no_core]",
        CrateAttributes::NoStd => "#![no_std]",
        CrateAttributes::None => "none",
    }
}

fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
