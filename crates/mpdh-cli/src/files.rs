//! File plumbing for command inputs and outputs.
//!
//! Outputs are staged next to their destination and renamed into place only
//! once every output of a command has been written.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Read a whole file as text.
///
/// A file that cannot be read is an I/O failure; a file that is readable but
/// not UTF-8 is reported as a malformed encoding.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    String::from_utf8(bytes)
        .with_context(|| format!("malformed encoding in {}: not UTF-8 text", path.display()))
}

/// A set of output files that are published together or not at all.
#[derive(Debug, Default)]
pub struct StagedOutputs {
    staged: Vec<(PathBuf, PathBuf)>,
}

impl StagedOutputs {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `contents` to a temporary sibling of `path`.
    ///
    /// # Returns
    /// An error if `path` is already staged in this set, or if the temporary
    /// file cannot be written.
    pub fn stage(&mut self, path: &Path, contents: &[u8]) -> Result<()> {
        if self.staged.iter().any(|(_, dest)| dest == path) {
            bail!("{} is given for more than one output", path.display());
        }
        let temp = staging_path(path);
        fs::write(&temp, contents).with_context(|| format!("writing {}", temp.display()))?;
        self.staged.push((temp, path.to_path_buf()));
        Ok(())
    }

    /// Rename every staged file into place.
    ///
    /// If a rename fails, outputs already published by this call are removed
    /// again and the remaining staged files are discarded.
    pub fn commit(mut self) -> Result<()> {
        let staged = std::mem::take(&mut self.staged);
        let mut published: Vec<PathBuf> = Vec::with_capacity(staged.len());
        for (index, (temp, dest)) in staged.iter().enumerate() {
            if let Err(e) = fs::rename(temp, dest) {
                for path in &published {
                    let _ = fs::remove_file(path);
                }
                for (temp, _) in &staged[index..] {
                    let _ = fs::remove_file(temp);
                }
                return Err(e).with_context(|| format!("writing {}", dest.display()));
            }
            published.push(dest.clone());
        }
        Ok(())
    }
}

impl Drop for StagedOutputs {
    fn drop(&mut self) {
        for (temp, _) in &self.staged {
            let _ = fs::remove_file(temp);
        }
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
}
