//! Archive readers.

use flate2::read::MultiGzDecoder;
use log::debug;
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};
use tar::Archive;
use zip::ZipArchive;

use crate::utils::{Error, Result};

/// Extracts every entry of a ZIP archive under `destination`.
///
/// Entry names are sanitized rather than rejected: `..`, root and drive
/// components are dropped, so `../x.txt` lands at `destination/x.txt`.
pub fn extract_zip(archive_path: &Path, destination: &Path) -> Result<()> {
    let mut archive = ZipArchive::new(File::open(archive_path)?)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let outpath = destination.join(entry.mangled_name());

        if entry.is_dir() {
            fs::create_dir_all(&outpath)?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut outfile = File::create(&outpath)?;
        io::copy(&mut entry, &mut outfile)?;
        debug!("Extracted {outpath:?}");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                fs::set_permissions(&outpath, fs::Permissions::from_mode(mode))?;
            }
        }
    }

    Ok(())
}

/// Extracts a gzip-compressed tar archive under `destination`.
///
/// Every member is checked first; if any would escape `destination` nothing is written.
pub fn extract_tar_gz(archive_path: &Path, destination: &Path) -> Result<()> {
    let mut archive = open_tar_gz(archive_path)?;
    for entry in archive.entries()? {
        let entry = entry?;
        let member = entry.path()?;
        if escapes(&member) {
            return Err(Error::PathTraversal {
                entry: member.into_owned(),
            });
        }
    }

    open_tar_gz(archive_path)?.unpack(destination)?;
    Ok(())
}

/// Decompresses a gzip file into `output`. Concatenated members are all decoded.
pub fn extract_gz(archive_path: &Path, output: &Path) -> Result<()> {
    let mut decoder = MultiGzDecoder::new(File::open(archive_path)?);
    let mut uncompressed = File::create(output)?;
    io::copy(&mut decoder, &mut uncompressed)?;
    Ok(())
}

fn open_tar_gz(archive_path: &Path) -> Result<Archive<MultiGzDecoder<File>>> {
    Ok(Archive::new(MultiGzDecoder::new(File::open(archive_path)?)))
}

fn escapes(member: &Path) -> bool {
    member.components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

/// Output path for a bare `.gz` file: its name minus the final extension, beside it.
pub fn gz_output_path(archive_path: &Path, destination: &Path) -> PathBuf {
    let stem = super::suffix::stem(archive_path).unwrap_or_default();
    destination.join(stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traversal_components_are_detected() {
        assert!(escapes(Path::new("../evil.txt")));
        assert!(escapes(Path::new("data/../../evil.txt")));
        assert!(escapes(Path::new("/etc/passwd")));
        assert!(!escapes(Path::new("data/./train.txt")));
    }

    #[test]
    fn gz_output_sits_beside_archive() {
        let out = gz_output_path(Path::new("/tmp/d/foo.gz"), Path::new("/tmp/d"));
        assert_eq!(out, PathBuf::from("/tmp/d/foo"));
    }
}
