//! Cargo-backed workspace service
//!
//! Reads `Cargo.toml` files with `cargo_toml` and records every target entry
//! point, explicit (`[lib]`, `[[bin]]`, ...) or auto-discovered the way cargo
//! does it, as a crate root.

use cargo_toml::Manifest;
use std::path::{Path, PathBuf};

use crate::{
    error::{Error, Result},
    interfaces::WorkspaceService,
    types::{Package, PackageOrigin},
    utils::normalize_path,
};

/// Library crates shipped in a rust-src `library/` directory
const STDLIB_CRATES: &[&str] = &["std", "core", "alloc", "proc_macro", "test"];

#[derive(Debug, Clone, Default)]
pub struct CargoWorkspace {
    packages: Vec<Package>,
}

impl CargoWorkspace {
    pub fn from_packages(packages: Vec<Package>) -> Self {
        Self { packages }
    }

    /// Loads the package and workspace members declared by `manifest_path`
    pub fn load(manifest_path: &Path) -> Result<Self> {
        let manifest = read_manifest(manifest_path)?;
        let root = manifest_dir(manifest_path)?;
        let mut packages = Vec::new();

        if manifest.package.is_some() {
            packages.push(package_from_manifest(&manifest, &root, PackageOrigin::Workspace));
        }

        if let Some(workspace) = &manifest.workspace {
            for member_dir in expand_members(&root, &workspace.members, &workspace.exclude) {
                let member_manifest = member_dir.join("Cargo.toml");
                if normalize_path(&member_dir) == normalize_path(&root) {
                    continue;
                }
                match read_manifest(&member_manifest) {
                    Ok(member) if member.package.is_some() => packages.push(package_from_manifest(
                        &member,
                        &member_dir,
                        PackageOrigin::Workspace,
                    )),
                    Ok(_) => tracing::debug!("Skipping virtual member manifest {:?}", member_manifest),
                    Err(e) => tracing::warn!("Skipping workspace member {:?}: {}", member_dir, e),
                }
            }
        }

        tracing::debug!(
            "Loaded {} package(s) from {:?}",
            packages.len(),
            manifest_path
        );
        Ok(Self { packages })
    }

    /// Registers the standard library crates found under a rust-src
    /// `library/` directory (or an older `src/` layout with `libstd/`)
    pub fn with_stdlib(mut self, library_dir: &Path) -> Self {
        for name in STDLIB_CRATES {
            let candidates = [
                library_dir.join(name).join("src").join("lib.rs"),
                library_dir.join(format!("lib{name}")).join("lib.rs"),
            ];
            let Some(lib_rs) = candidates.into_iter().find(|p| p.is_file()) else {
                continue;
            };
            let root = lib_rs
                .parent()
                .and_then(Path::parent)
                .map(normalize_path)
                .unwrap_or_else(|| normalize_path(library_dir));
            self.packages.push(Package {
                name: name.to_string(),
                origin: PackageOrigin::Stdlib,
                root,
                crate_roots: vec![normalize_path(&lib_rs)],
            });
        }
        self
    }
}

impl WorkspaceService for CargoWorkspace {
    fn is_crate_root(&self, path: &Path) -> bool {
        let path = normalize_path(path);
        self.packages
            .iter()
            .any(|pkg| pkg.crate_roots.iter().any(|root| *root == path))
    }

    fn containing_package(&self, path: &Path) -> Option<Package> {
        let path = normalize_path(path);
        self.packages
            .iter()
            .filter(|pkg| path.starts_with(&pkg.root))
            .max_by_key(|pkg| pkg.root.components().count())
            .cloned()
    }

    fn packages(&self) -> Vec<Package> {
        self.packages.clone()
    }
}

/// Manifest to load for a file: the nearest `Cargo.toml` above `start`, or
/// the nearest `[workspace]` manifest above that one when there is one
pub fn find_manifest(start: &Path) -> Option<PathBuf> {
    let abs_path = if start.is_relative() {
        std::env::current_dir().ok()?.join(start)
    } else {
        start.to_path_buf()
    };

    let mut manifests = abs_path
        .ancestors()
        .map(|dir| dir.join("Cargo.toml"))
        .filter(|candidate| candidate.is_file());
    let nearest = manifests.next()?;

    if is_workspace_manifest(&nearest) {
        return Some(nearest);
    }
    Some(manifests.find(|m| is_workspace_manifest(m)).unwrap_or(nearest))
}

fn is_workspace_manifest(path: &Path) -> bool {
    read_manifest(path)
        .map(|m| m.workspace.is_some())
        .unwrap_or(false)
}

fn read_manifest(manifest_path: &Path) -> Result<Manifest> {
    let contents = std::fs::read_to_string(manifest_path)?;
    Manifest::from_str(&contents).map_err(|e| Error::ManifestError {
        path: manifest_path.to_path_buf(),
        message: e.to_string(),
    })
}

fn manifest_dir(manifest_path: &Path) -> Result<PathBuf> {
    manifest_path
        .parent()
        .map(normalize_path)
        .ok_or_else(|| Error::ManifestError {
            path: manifest_path.to_path_buf(),
            message: "Cannot determine project root".to_string(),
        })
}

fn package_from_manifest(manifest: &Manifest, root: &Path, origin: PackageOrigin) -> Package {
    let name = manifest
        .package
        .as_ref()
        .map(|p| p.name.clone())
        .or_else(|| root.file_name().and_then(|n| n.to_str()).map(str::to_string))
        .unwrap_or_default();

    let mut crate_roots = Vec::new();
    let mut push = |path: PathBuf| {
        let path = normalize_path(&path);
        if !crate_roots.contains(&path) {
            crate_roots.push(path);
        }
    };

    // Explicit targets
    let explicit = manifest
        .lib
        .iter()
        .chain(&manifest.bin)
        .chain(&manifest.test)
        .chain(&manifest.bench)
        .chain(&manifest.example);
    for product in explicit {
        if let Some(path) = &product.path {
            push(root.join(path));
        }
    }

    // Conventional targets
    let conventional = [root.join("src/lib.rs"), root.join("src/main.rs"), root.join("build.rs")];
    for path in conventional {
        if path.is_file() {
            push(path);
        }
    }
    for dir in ["src/bin", "tests", "benches", "examples"] {
        for path in discover_target_files(&root.join(dir)) {
            push(path);
        }
    }

    Package {
        name,
        origin,
        root: normalize_path(root),
        crate_roots,
    }
}

/// `dir/*.rs` and `dir/*/main.rs`, sorted
fn discover_target_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut found: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter_map(|path| {
            if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("rs") {
                Some(path)
            } else if path.is_dir() && path.join("main.rs").is_file() {
                Some(path.join("main.rs"))
            } else {
                None
            }
        })
        .collect();
    found.sort();
    found
}

/// Expands `members` entries; supports plain paths and a trailing `*` segment
fn expand_members(root: &Path, members: &[String], exclude: &[String]) -> Vec<PathBuf> {
    let excluded: Vec<PathBuf> = exclude.iter().map(|e| normalize_path(&root.join(e))).collect();
    let mut dirs = Vec::new();

    for member in members {
        match member.strip_suffix("/*") {
            Some(parent) => {
                let Ok(entries) = std::fs::read_dir(root.join(parent)) else {
                    continue;
                };
                let mut matched: Vec<PathBuf> = entries
                    .filter_map(|entry| entry.ok().map(|e| e.path()))
                    .filter(|p| p.join("Cargo.toml").is_file())
                    .collect();
                matched.sort();
                dirs.extend(matched);
            }
            None => dirs.push(root.join(member)),
        }
    }

    dirs.into_iter()
        .map(|d| normalize_path(&d))
        .filter(|d| !excluded.contains(d))
        .collect()
}
