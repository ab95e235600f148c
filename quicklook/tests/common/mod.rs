//! Shared integration-test harness: builds a throwaway portfolio site in a
//! temporary directory and runs the `quicklook` binary against it.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Index page with both markers and a hand-set span class.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
    <main>
        <div class="grid">
            <div class="grid-item item-1 span-2" data-project="002_poster_series">
                <img src="/old.png" alt="Old">
            </div>
        </div>
    </main>
    <script>
        const projectNames = {
            '002_poster_series': 'Old'
        };
    </script>
</body>
</html>
"#;

/// A portfolio site rooted in a temporary directory.
pub struct SiteFixture {
    dir: TempDir,
}

#[allow(clippy::missing_panics_doc)]
impl SiteFixture {
    /// Creates an empty site.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    /// Site root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `relative` inside the site.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Writes a file, creating parent folders.
    pub fn write(&self, relative: &str, contents: &[u8]) -> &Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent");
        }
        std::fs::write(&path, contents).expect("failed to write fixture file");
        self
    }

    /// Adds an image to a flat-layout project.
    pub fn image(&self, project: &str, name: &str) -> &Self {
        self.write(&format!("assets/projects/{project}/{name}"), name.as_bytes())
    }

    /// Adds a thumbnail.
    pub fn thumbnail(&self, name: &str) -> &Self {
        self.write(&format!("assets/thubnails/{name}"), b"png")
    }

    /// Reads a site file as text.
    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative)).expect("failed to read site file")
    }

    /// Runs `quicklook --root <site> <args...>` and waits for it.
    pub fn run(&self, args: &[&str]) -> Output {
        let root = self.root().to_str().expect("non-UTF-8 temp dir");
        let mut full = vec!["--root", root];
        full.extend_from_slice(args);
        spawn_command(&full)
    }
}

/// Runs the `quicklook` binary with `args`, isolated from the caller's
/// `QUICKLOOK_*` environment.
#[allow(clippy::missing_panics_doc)]
pub fn spawn_command(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_quicklook"))
        .args(args)
        .env_remove("QUICKLOOK_CONFIG")
        .env_remove("QUICKLOOK_ROOT")
        .env_remove("QUICKLOOK_LOG_LEVEL")
        .env_remove("QUICKLOOK_LOG_FORMAT")
        .env("QUICKLOOK_COLOR", "never")
        .output()
        .expect("failed to run quicklook")
}

/// Stdout of `output` as text.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of `output` as text.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
