//! Fallback surface that writes the share kit into a directory.

use std::path::{Path, PathBuf};

use scorecard_core::artifact::decode_data_url;
use scorecard_core::{Channel, FallbackContent, FallbackSurface};

/// Card image written on reveal.
pub const CARD_FILE: &str = "score-card.png";
/// Raw share text written on reveal.
pub const TEXT_FILE: &str = "share.txt";
/// One `channel: link` line per channel.
pub const LINKS_FILE: &str = "links.txt";

/// [`FallbackSurface`] backed by a directory on disk.
///
/// Hiding removes the files of a previous reveal; revealing writes them.
#[derive(Debug, Clone)]
pub struct DirectoryFallbackSurface {
    dir: PathBuf,
}

impl DirectoryFallbackSurface {
    /// Surface writing into `dir` (created on reveal).
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_all(&self, content: &FallbackContent) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.dir.join(TEXT_FILE), &content.text)?;
        std::fs::write(self.dir.join(LINKS_FILE), format_links(content))?;

        if let Some(src) = &content.image_src {
            match decode_data_url(src) {
                Ok(png) => std::fs::write(self.dir.join(CARD_FILE), png)?,
                Err(e) => tracing::warn!("Skipping card image: {e}"),
            }
        }
        Ok(())
    }
}

/// Render the channel links as `Channel: link` lines.
#[must_use]
pub fn format_links(content: &FallbackContent) -> String {
    Channel::ALL
        .iter()
        .map(|channel| format!("{channel}: {}\n", content.links.get(*channel)))
        .collect()
}

impl FallbackSurface for DirectoryFallbackSurface {
    fn hide(&self) {
        for name in [CARD_FILE, TEXT_FILE, LINKS_FILE] {
            let path = self.dir.join(name);
            match std::fs::remove_file(&path) {
                Ok(()) => tracing::debug!("Removed stale {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => tracing::warn!("Failed to remove {}: {e}", path.display()),
            }
        }
    }

    fn reveal(&self, content: &FallbackContent) -> bool {
        match self.write_all(content) {
            Ok(()) => {
                tracing::info!("Share kit written to {}", self.dir.display());
                true
            }
            Err(e) => {
                tracing::warn!("Failed to write share kit to {}: {e}", self.dir.display());
                self.hide();
                false
            }
        }
    }
}
