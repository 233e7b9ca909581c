use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;

use crate::{acquisition::decode_gray, error::Result};

pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

/// Installs `bytes` as the new baseline image.
///
/// The bytes must decode as an image. A previous baseline is copied to
/// `<path>.bak` first; its location is returned.
pub fn update_baseline<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<Option<PathBuf>> {
    let path = path.as_ref();
    let gray = decode_gray(bytes, "new baseline")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let backup = if path.exists() {
        let backup = backup_path(path);
        fs::copy(path, &backup)?;
        info!("Previous baseline backed up to {}", backup.display());
        Some(backup)
    } else {
        None
    };

    fs::write(path, bytes)?;
    info!(
        "Baseline image saved to {} ({}x{})",
        path.display(),
        gray.width(),
        gray.height()
    );

    Ok(backup)
}
