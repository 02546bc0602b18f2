//! Compile-time build metadata exposed to the CLI.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("CONSOLE_KIT_BUILD_GIT_HASH");

/// Build timestamp captured at compile time.
pub const BUILD_TIMESTAMP: &str = env!("CONSOLE_KIT_BUILD_TIMESTAMP");

/// Version block used by `console-kit --version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("CONSOLE_KIT_BUILD_GIT_HASH"),
    "\nbuilt: ",
    env!("CONSOLE_KIT_BUILD_TIMESTAMP")
);

/// Help trailer block that surfaces build metadata in `console-kit --help`.
pub const HELP_BUILD_METADATA: &str = concat!(
    "Build metadata:\n  commit: ",
    env!("CONSOLE_KIT_BUILD_GIT_HASH"),
    "\n  built: ",
    env!("CONSOLE_KIT_BUILD_TIMESTAMP")
);

/// One-line metadata shown in the sample banner.
pub fn banner_metadata_line() -> String {
    format!("v{VERSION} ({GIT_COMMIT}, built {BUILD_TIMESTAMP})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_metadata_line_contains_all_fields() {
        let text = banner_metadata_line();
        assert!(text.starts_with('v'));
        assert!(text.contains(GIT_COMMIT));
        assert!(text.contains(BUILD_TIMESTAMP));
    }

    #[test]
    fn long_version_lists_commit_and_build_time() {
        assert!(LONG_VERSION.starts_with(VERSION));
        assert!(LONG_VERSION.contains("commit:"));
        assert!(LONG_VERSION.contains("built:"));
    }
}
