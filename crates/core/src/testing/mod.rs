//! Testing utilities and mock implementations.
//!
//! The [`MockLauncher`] stands in for real child processes, so whole batch
//! runs can be exercised without an engine installed.
//!
//! # Example
//!
//! ```rust,ignore
//! use sidemux_core::testing::{fixtures, MockLauncher};
//!
//! let launcher = MockLauncher::new();
//! fixtures::complete_item(dir.path(), "song", &Extensions::default());
//!
//! // Run the orchestrator with the mock...
//! ```

mod mock_launcher;

pub use mock_launcher::{MockLauncher, RecordedLaunch};

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::path::{Path, PathBuf};

    use crate::config::Extensions;
    use crate::processor::InputRole;

    /// Create an empty file named `<base_name>.<ext>` in `dir`.
    pub fn touch(dir: &Path, base_name: &str, ext: &str) -> PathBuf {
        let path = dir.join(format!("{base_name}.{ext}"));
        std::fs::write(&path, b"").expect("Failed to create fixture file");
        path
    }

    /// Create the input files for the given roles of one item.
    pub fn item_with(dir: &Path, base_name: &str, extensions: &Extensions, roles: &[InputRole]) {
        for role in roles {
            touch(dir, base_name, role.extension(extensions));
        }
    }

    /// Create all three input files of one item.
    pub fn complete_item(dir: &Path, base_name: &str, extensions: &Extensions) {
        item_with(dir, base_name, extensions, &InputRole::ALL);
    }
}
