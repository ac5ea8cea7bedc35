use crate::platform::Platform;
use crate::util::repo::Layout;
use anyhow::{Context, Result};
use std::fs;

/// Verify the compiler tree holds a published runtime library.
pub fn run(layout: &Layout, platform: &Platform) -> Result<()> {
    platform.ensure_supported()?;
    let tag = platform.tag().unwrap_or_default();

    let published = layout.published_library(tag);
    let meta = fs::metadata(&published)
        .with_context(|| format!("Missing published runtime: {}", published.display()))?;
    if meta.len() == 0 {
        anyhow::bail!("Published runtime is empty: {}", published.display());
    }

    tracing::info!("[ok] {} ({} bytes)", published.display(), meta.len());
    Ok(())
}
