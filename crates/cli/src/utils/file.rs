use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

/// Resolves a command-line path against the current directory and checks it exists
pub fn absolute_path(arg: &str) -> Result<PathBuf> {
    let path = Path::new(arg);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    if !absolute.exists() {
        bail!("File not found: {}", absolute.display());
    }
    Ok(modscope_core::utils::normalize_path(&absolute))
}

/// Determine the type of file for display purposes
pub fn determine_file_type(path: &Path) -> String {
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

    match file_name {
        "main.rs" => "🎯 main.rs (binary)".to_string(),
        "lib.rs" => "📚 lib.rs (library)".to_string(),
        "mod.rs" => "📂 mod.rs (module)".to_string(),
        "build.rs" => "🔨 build.rs (build script)".to_string(),
        _ => {
            let path_str = path.to_string_lossy();
            if path_str.contains("/tests/") {
                "🧪 test file".to_string()
            } else if path_str.contains("/examples/") {
                "📝 example file".to_string()
            } else if path_str.contains("/benches/") {
                "⚡ benchmark file".to_string()
            } else if file_name.ends_with(".rs") {
                "📄 Rust file".to_string()
            } else {
                "📄 file".to_string()
            }
        }
    }
}
