use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Context;
use dvpl_core::format::EXTENSION;
use dvpl_core::looks_like_container;

/// A game asset loaded from disk, unpacked if it was stored as a container.
#[derive(Debug, Clone)]
pub struct Asset {
    pub path: PathBuf,
    /// Payload bytes: the decoded container contents, or the file verbatim.
    pub content: Vec<u8>,
    /// Whether the file on disk was a DVPL container. Pass this back to
    /// [`save_asset`] to write the asset in the form it was read.
    pub was_container: bool,
}

/// Read an asset, decoding it when it sniffs as a DVPL container.
///
/// Files that do not end in the magic are treated as plain payloads. A file
/// that does, but fails full decode, is an error rather than a fallback.
pub fn open_asset(path: impl AsRef<Path>) -> anyhow::Result<Asset> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        anyhow::bail!("asset path is empty");
    }

    let data = std::fs::read(path).with_context(|| format!("reading asset {:?}", path))?;

    let was_container = looks_like_container(&data);
    let content = if was_container {
        crate::decode(&data).with_context(|| format!("unpacking DVPL container {:?}", path))?
    } else {
        data
    };

    Ok(Asset {
        path: path.to_path_buf(),
        content,
        was_container,
    })
}

/// Write `content` to `path`, packing it as a container when `as_container`.
pub fn save_asset(path: impl AsRef<Path>, content: &[u8], as_container: bool) -> anyhow::Result<()> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        anyhow::bail!("asset path is empty");
    }

    let written = if as_container {
        let packed = crate::encode(Some(content))
            .with_context(|| format!("packing DVPL container for {:?}", path))?;
        std::fs::write(path, packed)
    } else {
        std::fs::write(path, content)
    };
    written.with_context(|| format!("writing asset {:?}", path))
}

/// `foo.sc2` → `foo.sc2.dvpl`
pub fn packed_path(path: impl AsRef<Path>) -> PathBuf {
    let mut name = OsString::from(path.as_ref().as_os_str());
    name.push(".");
    name.push(EXTENSION);
    PathBuf::from(name)
}

/// `foo.sc2.dvpl` → `foo.sc2`; `None` when there is no `.dvpl` suffix.
pub fn unpacked_path(path: impl AsRef<Path>) -> Option<PathBuf> {
    let path = path.as_ref();
    let is_packed = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case(EXTENSION));
    if !is_packed {
        return None;
    }
    let stem = path.file_stem()?;
    Some(path.with_file_name(stem))
}
