use std::path::{Path, PathBuf};

use crate::domain::RunMode;

/// Directory the crate was built from; the base for [`RunMode::FromSource`].
pub const SOURCE_DIR: &str = env!("CARGO_MANIFEST_DIR");

/// Process-level launch configuration, resolved once in `main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchContext {
    pub run_mode: RunMode,
    pub base_dir: PathBuf,
}

impl LaunchContext {
    pub fn detect() -> Self {
        match std::env::current_exe() {
            Ok(exe) => Self::from_paths(&exe, Path::new(SOURCE_DIR)),
            // No executable path to inspect; the source checkout is the only base left.
            Err(_) => Self {
                run_mode: RunMode::FromSource,
                base_dir: PathBuf::from(SOURCE_DIR),
            },
        }
    }

    /// An executable living under the source tree (e.g. `target/debug`) is a
    /// source run; anything else is treated as a packaged install.
    pub fn from_paths(exe: &Path, source_dir: &Path) -> Self {
        if exe.starts_with(source_dir) {
            Self {
                run_mode: RunMode::FromSource,
                base_dir: source_dir.to_path_buf(),
            }
        } else {
            Self {
                run_mode: RunMode::Packaged,
                base_dir: bundle_resource_dir(exe),
            }
        }
    }
}

/// Where a bundler placed resources relative to the executable.
///
/// macOS app bundles keep them in `Contents/Resources` next to
/// `Contents/MacOS/<exe>`. Linux packages install `<prefix>/bin/<exe>` with
/// resources under `<prefix>/lib/<exe>`. Elsewhere they sit beside the executable.
pub fn bundle_resource_dir(exe: &Path) -> PathBuf {
    let exe_dir = exe.parent().unwrap_or_else(|| Path::new("."));

    if cfg!(target_os = "linux") && exe_dir.file_name().is_some_and(|name| name == "bin") {
        if let (Some(prefix), Some(stem)) = (exe_dir.parent(), exe.file_stem()) {
            return prefix.join("lib").join(stem);
        }
    }

    let in_app_bundle = exe_dir.file_name().is_some_and(|name| name == "MacOS")
        && exe_dir
            .parent()
            .and_then(Path::file_name)
            .is_some_and(|name| name == "Contents");

    match exe_dir.parent() {
        Some(contents) if in_app_bundle => contents.join("Resources"),
        _ => exe_dir.to_path_buf(),
    }
}

/// Window and engine settings for the shell
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub title: String,
    pub position: (i32, i32),
    pub size: (f64, f64),
    pub toolbar_height: f64,
    /// Persistent web-profile storage; `None` leaves it to the engine default.
    pub data_dir: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            title: "ArkIDE Desktop".to_string(),
            position: (100, 100),
            size: (1200.0, 800.0),
            toolbar_height: 40.0,
            data_dir: dirs::data_local_dir().map(|dir| dir.join("ArkIDE Desktop").join("webdata")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_run_uses_source_dir() {
        let ctx = LaunchContext::from_paths(
            Path::new("/work/arkide/target/debug/arkide-desktop"),
            Path::new("/work/arkide"),
        );
        assert_eq!(ctx.run_mode, RunMode::FromSource);
        assert_eq!(ctx.base_dir, PathBuf::from("/work/arkide"));
    }

    #[test]
    fn test_packaged_run_uses_exe_dir() {
        let ctx = LaunchContext::from_paths(
            Path::new("/opt/arkide/arkide-desktop"),
            Path::new("/work/arkide"),
        );
        assert_eq!(ctx.run_mode, RunMode::Packaged);
        assert_eq!(ctx.base_dir, PathBuf::from("/opt/arkide"));
    }

    #[test]
    fn test_packaged_app_bundle_uses_resources() {
        let ctx = LaunchContext::from_paths(
            Path::new("/Applications/ArkIDE Desktop.app/Contents/MacOS/arkide-desktop"),
            Path::new("/work/arkide"),
        );
        assert_eq!(ctx.run_mode, RunMode::Packaged);
        assert_eq!(
            ctx.base_dir,
            PathBuf::from("/Applications/ArkIDE Desktop.app/Contents/Resources")
        );
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_packaged_linux_install_uses_lib_dir() {
        let ctx = LaunchContext::from_paths(
            Path::new("/usr/bin/arkide-desktop"),
            Path::new("/work/arkide"),
        );
        assert_eq!(ctx.run_mode, RunMode::Packaged);
        assert_eq!(ctx.base_dir, PathBuf::from("/usr/lib/arkide-desktop"));

        let ctx = LaunchContext::from_paths(
            Path::new("/opt/arkide/bin/arkide-desktop"),
            Path::new("/work/arkide"),
        );
        assert_eq!(ctx.base_dir, PathBuf::from("/opt/arkide/lib/arkide-desktop"));
    }

    #[test]
    fn test_sibling_prefix_is_not_source() {
        // Component-wise match: "/work/arkide-build" is not inside "/work/arkide".
        let ctx = LaunchContext::from_paths(
            Path::new("/work/arkide-build/arkide-desktop"),
            Path::new("/work/arkide"),
        );
        assert_eq!(ctx.run_mode, RunMode::Packaged);
    }

    #[test]
    fn test_default_shell_config() {
        let config = ShellConfig::default();
        assert_eq!(config.title, "ArkIDE Desktop");
        assert_eq!(config.position, (100, 100));
        assert_eq!(config.size, (1200.0, 800.0));
    }
}
