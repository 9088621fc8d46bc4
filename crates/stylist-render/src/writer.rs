//! Static site output.

use std::fs;
use std::path::{Path, PathBuf};

use crate::assets::AssetSource;
use crate::error::BuildError;
use crate::renderer::RenderOutput;

const INDEX_FILE: &str = "index.html";

/// Writes a rendered page and its assets into a directory.
pub struct SiteWriter<'a> {
    dir: &'a Path,
}

impl<'a> SiteWriter<'a> {
    pub fn new(dir: &'a Path) -> Self {
        Self { dir }
    }

    /// Create the directory, write `index.html`, then every asset.
    ///
    /// Returns the written files in write order. Existing files are
    /// overwritten.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::Write` or `BuildError::Copy` on any file system
    /// failure and `BuildError::MissingAsset` if a built-in asset is absent.
    pub fn write(&self, output: &RenderOutput) -> Result<Vec<PathBuf>, BuildError> {
        fs::create_dir_all(self.dir).map_err(|source| BuildError::Write {
            path: self.dir.to_path_buf(),
            source,
        })?;

        let mut files = Vec::with_capacity(output.assets.len() + 1);

        let index = self.dir.join(INDEX_FILE);
        write_file(&index, output.html.as_bytes())?;
        files.push(index);

        for asset in &output.assets {
            let dest = self.dir.join(&asset.path);
            match &asset.source {
                AssetSource::Embedded(name) => {
                    let data = stylist_assets::get(name)
                        .ok_or_else(|| BuildError::MissingAsset((*name).to_owned()))?;
                    write_file(&dest, &data)?;
                }
                AssetSource::File(src) if is_same_file(src, &dest) => {
                    tracing::debug!(path = %dest.display(), "Asset already in place");
                }
                AssetSource::File(src) => {
                    fs::copy(src, &dest).map_err(|source| BuildError::Copy {
                        from: src.clone(),
                        to: dest.clone(),
                        source,
                    })?;
                }
            }
            tracing::debug!(path = %dest.display(), "Wrote asset");
            files.push(dest);
        }

        Ok(files)
    }
}

/// Copying a file onto itself truncates it.
fn is_same_file(src: &Path, dest: &Path) -> bool {
    match (fs::canonicalize(src), fs::canonicalize(dest)) {
        (Ok(src), Ok(dest)) => src == dest,
        _ => false,
    }
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), BuildError> {
    fs::write(path, data).map_err(|source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    })
}
