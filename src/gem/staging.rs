//! Per-build working directory.
//!
//! The staging tree is named `<gem>-<version>.<pid>` and lives beside the
//! output archive. It is removed when the guard drops, whichever way the
//! build ends.

use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const LIB_DIR: &str = "lib";

/// Owner of a staging tree; removes it on drop.
#[derive(Debug)]
pub struct StagingDir {
    dir: TempDir,
    lib: PathBuf,
}

impl StagingDir {
    /// Create `<output_dir>/<stem>.<pid>/lib`, creating `output_dir` too if
    /// needed.
    ///
    /// A leftover tree with the same name, from a crashed run that reused
    /// the pid, is removed first.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the stale tree cannot be removed or the new
    /// one cannot be created.
    pub fn create(output_dir: &Path, stem: &str, pid: u32) -> io::Result<Self> {
        fs::create_dir_all(output_dir)?;
        let name = format!("{stem}.{pid}");
        let stale = output_dir.join(&name);
        if stale.exists() {
            debug!("removing stale staging tree {}", stale.display());
            fs::remove_dir_all(&stale)?;
        }
        let dir = tempfile::Builder::new()
            .prefix(&name)
            .rand_bytes(0)
            .tempdir_in(output_dir)?;
        let lib = dir.path().join(LIB_DIR);
        fs::create_dir(&lib)?;
        debug!("staging in {}", dir.path().display());
        Ok(Self { dir, lib })
    }

    /// Return the staging tree's root.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Return the `lib/` directory inside the tree.
    #[must_use]
    pub fn lib_dir(&self) -> &Path {
        &self.lib
    }
}
