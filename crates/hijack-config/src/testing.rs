//! Test environment abstraction for isolated testing.
//!
//! Provides `TestEnvironment` to manage:
//! - An isolated home directory (global config)
//! - An isolated project directory (project config)
//! - A placeholder layer library path
//!
//! # Usage
//!
//! ```ignore
//! use hijack_config::testing::TestEnvironment;
//!
//! #[test]
//! fn test_something() {
//!     let env = TestEnvironment::new().unwrap();
//!     env.write_project_config("[hijack]\nhost = \"example.com\"\n").unwrap();
//! }
//! ```

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use tempfile::TempDir;

/// Atomic counter for unique test IDs
static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Isolated test environment with unique paths
pub struct TestEnvironment {
    /// Temporary directory (dropped on cleanup)
    _temp_dir: TempDir,
    /// Stand-in for $HOME
    pub home: PathBuf,
    /// Working directory for launched commands
    pub project_root: PathBuf,
    /// Unique test ID
    pub test_id: u32,
}

impl TestEnvironment {
    /// Create a new isolated test environment
    pub fn new() -> anyhow::Result<Self> {
        let test_id = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();

        let home = root.join("home");
        let project_root = root.join("project");

        std::fs::create_dir_all(home.join(".dns-hijack"))?;
        std::fs::create_dir_all(project_root.join(".dns-hijack"))?;

        Ok(Self {
            _temp_dir: temp_dir,
            home,
            project_root,
            test_id,
        })
    }

    pub fn global_config_path(&self) -> PathBuf {
        self.home.join(".dns-hijack/config.toml")
    }

    pub fn project_config_path(&self) -> PathBuf {
        self.project_root.join(".dns-hijack/config.toml")
    }

    pub fn write_global_config(&self, contents: &str) -> anyhow::Result<PathBuf> {
        let path = self.global_config_path();
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn write_project_config(&self, contents: &str) -> anyhow::Result<PathBuf> {
        let path = self.project_config_path();
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    /// Create an empty file where a layer library would live.
    pub fn create_library(&self) -> anyhow::Result<PathBuf> {
        let path = self
            .project_root
            .join(format!("libhijack_layer-{}.so", self.test_id));
        std::fs::write(&path, b"")?;
        Ok(path)
    }

    /// Environment for spawning the launcher against this environment.
    ///
    /// Clears the hijack variables so the caller's own shell does not leak in.
    pub fn env(&self) -> Vec<(String, String)> {
        vec![
            ("HOME".to_string(), self.home.to_string_lossy().to_string()),
            (crate::HIJACK_HOST_ENV.to_string(), String::new()),
            (crate::HIJACK_ADDR_ENV.to_string(), String::new()),
        ]
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new().expect("Failed to create test environment")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_creates_directories() {
        let env = TestEnvironment::new().unwrap();
        assert!(env.home.join(".dns-hijack").exists());
        assert!(env.project_root.join(".dns-hijack").exists());
    }

    #[test]
    fn test_environment_has_unique_library() {
        let env1 = TestEnvironment::new().unwrap();
        let env2 = TestEnvironment::new().unwrap();
        let lib1 = env1.create_library().unwrap();
        let lib2 = env2.create_library().unwrap();
        assert_ne!(lib1.file_name(), lib2.file_name());
        assert!(lib1.exists());
    }

    #[test]
    fn test_write_configs() {
        let env = TestEnvironment::new().unwrap();
        let path = env.write_project_config("[hijack]\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[hijack]\n");
    }
}
