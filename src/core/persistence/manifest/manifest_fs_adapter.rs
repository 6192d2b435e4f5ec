use std::{
    fs::{self, File},
    io::Write,
    path::PathBuf,
};

use anyhow::{bail, Context, Result};
use tracing::{debug, warn};

use crate::domain::manifest::render::manifest_renderer::RenderedDocument;

use super::manifest_output_adapter_trait::ManifestOutputAdapterTrait;

/// Writes rendered manifests into a directory.
///
/// Every document is staged as a `.tmp` sibling first and only renamed into
/// place once all of them were written and synced.
pub struct ManifestFsAdapter {
    out_dir: PathBuf,
}

impl ManifestFsAdapter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    fn stage(&self, doc: &RenderedDocument) -> Result<(PathBuf, PathBuf)> {
        let path = self.out_dir.join(&doc.file_name);
        let tmp_path = self.out_dir.join(format!("{}.tmp", doc.file_name));

        let mut f = File::create(&tmp_path)
            .with_context(|| format!("Failed to create {}", tmp_path.display()))?;
        f.write_all(doc.contents.as_bytes())?;
        f.flush()?;
        f.sync_all()
            .with_context(|| format!("Failed to sync {}", tmp_path.display()))?;

        Ok((tmp_path, path))
    }

    fn discard(staged: &[(PathBuf, PathBuf)]) {
        for (tmp_path, _) in staged {
            if let Err(e) = fs::remove_file(tmp_path) {
                warn!("Failed to remove staged file {}: {}", tmp_path.display(), e);
            }
        }
    }
}

impl ManifestOutputAdapterTrait for ManifestFsAdapter {
    fn write_all(&self, docs: &[RenderedDocument]) -> Result<Vec<PathBuf>> {
        for doc in docs {
            if doc.file_name.is_empty() || doc.file_name.contains(['/', '\\']) {
                bail!("Refusing to write unsafe file name '{}'", doc.file_name);
            }
        }

        fs::create_dir_all(&self.out_dir).with_context(|| {
            format!("Failed to create output directory {}", self.out_dir.display())
        })?;

        let mut staged = Vec::with_capacity(docs.len());
        for doc in docs {
            match self.stage(doc) {
                Ok(pair) => staged.push(pair),
                Err(e) => {
                    Self::discard(&staged);
                    return Err(e);
                }
            }
        }

        let mut written = Vec::with_capacity(staged.len());
        for (i, (tmp_path, path)) in staged.iter().enumerate() {
            if let Err(e) = fs::rename(tmp_path, path) {
                Self::discard(&staged[i..]);
                return Err(e).with_context(|| format!("Failed to finalize {}", path.display()));
            }
            debug!("Wrote {}", path.display());
            written.push(path.clone());
        }

        #[cfg(unix)]
        {
            let dir_file = File::open(&self.out_dir).context("Failed to open output directory")?;
            dir_file.sync_all().context("Failed to sync output directory")?;
        }

        Ok(written)
    }
}
