use crate::config::XtaskConfig;
use crate::platform::Platform;
use crate::util::repo::Layout;
use anyhow::{bail, Result};

pub fn run(layout: &Layout, platform: &Platform, config: &XtaskConfig) -> Result<()> {
    let mut ok = true;

    if platform.is_supported() {
        tracing::info!("[OK] platform {platform}");
    } else {
        tracing::error!("[FAIL] platform {platform} is not supported yet");
        ok = false;
    }

    for tool in [&config.toolchain.cargo, &config.toolchain.archiver] {
        match which::which(tool) {
            Ok(path) => tracing::info!("[OK] {tool} ({})", path.display()),
            Err(_) => {
                tracing::error!("[FAIL] missing `{tool}` in PATH");
                ok = false;
            }
        }
    }

    for d in [layout.runtime_dir(), layout.compiler_dir()] {
        if d.is_dir() {
            tracing::info!("[OK] {}", d.display());
        } else {
            tracing::error!("[FAIL] missing directory: {}", d.display());
            ok = false;
        }
    }

    if !ok {
        bail!("doctor checks failed");
    }
    Ok(())
}
