//! Compile-time build metadata exposed to CLI surfaces.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version block printed by `fmsh --version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("FMSH_BUILD_GIT_HASH"),
    "\nbuilt: ",
    env!("FMSH_BUILD_TIMESTAMP")
);

/// Help trailer block that surfaces build metadata in `fmsh --help`.
pub const HELP_BUILD_METADATA: &str = concat!(
    "Build metadata:\n  commit: ",
    env!("FMSH_BUILD_GIT_HASH"),
    "\n  built: ",
    env!("FMSH_BUILD_TIMESTAMP")
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_version_includes_expected_lines() {
        assert!(LONG_VERSION.starts_with(VERSION));
        let commit = env!("FMSH_BUILD_GIT_HASH");
        assert!(LONG_VERSION.contains(&format!("commit: {commit}")));
        assert!(LONG_VERSION.contains("built: "));
        assert!(HELP_BUILD_METADATA.contains(commit));
    }
}
