use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::error::ArchiveError;

/// Lists and extracts archive members.
///
/// `filename` is the declared (catalog) filename of the artifact, which may
/// differ from the on-disk `path` since artifacts are stored by uuid.
pub trait Archiver {
    /// Flat list of file members, directories excluded, in archive order.
    fn list(&self, path: &Path, filename: &str) -> Result<Vec<String>, ArchiveError>;

    /// Extract a single member into `dest_dir`, returning the written path.
    fn extract(
        &self,
        path: &Path,
        filename: &str,
        member: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, ArchiveError>;
}

/// Join member names into the stored listing form.
pub fn join_listing<S: AsRef<str>>(members: &[S]) -> String {
    members
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n")
}

const ZIP_MAGIC: [&[u8; 4]; 3] = [b"PK\x03\x04", b"PK\x05\x06", b"PK\x07\x08"];

/// [`Archiver`] for zip files.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZipArchiver;

impl ZipArchiver {
    fn open(&self, path: &Path, filename: &str) -> Result<ZipArchive<File>, ArchiveError> {
        if !is_zip(path, filename)? {
            return Err(ArchiveError::unsupported(filename));
        }
        Ok(ZipArchive::new(File::open(path)?)?)
    }
}

/// Zip by declared extension, or by magic bytes when the extension is
/// missing or misleading.
fn is_zip(path: &Path, filename: &str) -> Result<bool, ArchiveError> {
    if filename.to_ascii_lowercase().ends_with(".zip") {
        return Ok(true);
    }
    let mut magic = [0u8; 4];
    let mut file = File::open(path)?;
    match file.read_exact(&mut magic) {
        Ok(()) => Ok(ZIP_MAGIC.iter().any(|m| **m == magic)),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e.into()),
    }
}

impl Archiver for ZipArchiver {
    fn list(&self, path: &Path, filename: &str) -> Result<Vec<String>, ArchiveError> {
        let mut archive = self.open(path, filename)?;
        let mut names = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let entry = archive.by_index(i)?;
            if entry.is_dir() {
                continue;
            }
            names.push(entry.name().to_string());
        }
        log::debug!("{filename}: {} members", names.len());
        Ok(names)
    }

    fn extract(
        &self,
        path: &Path,
        filename: &str,
        member: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, ArchiveError> {
        let mut archive = self.open(path, filename)?;
        let mut entry = match archive.by_name(member) {
            Ok(e) => e,
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(ArchiveError::MemberNotFound(member.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        // Only the final path component is kept so a member can never
        // escape dest_dir.
        let name = entry
            .enclosed_name()
            .and_then(|p| p.file_name().map(|n| n.to_os_string()))
            .ok_or_else(|| ArchiveError::MemberNotFound(member.to_string()))?;

        fs::create_dir_all(dest_dir)?;
        let dest = dest_dir.join(name);
        let mut out = File::create(&dest)?;
        io::copy(&mut entry, &mut out)?;
        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn build_zip(path: &Path) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        zip.add_directory("docs/", options).unwrap();
        zip.start_file("GAME.EXE", options).unwrap();
        zip.write_all(b"MZ").unwrap();
        zip.start_file("docs/game.nfo", options).unwrap();
        zip.write_all(b"greetings").unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn lists_file_members_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("9b1c");
        build_zip(&path);
        let names = ZipArchiver.list(&path, "game.zip").unwrap();
        assert_eq!(names, vec!["GAME.EXE", "docs/game.nfo"]);
    }

    #[test]
    fn detects_zip_by_magic_when_extension_is_wrong() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("artifact");
        build_zip(&path);
        assert_eq!(ZipArchiver.list(&path, "game.bin").unwrap().len(), 2);
    }

    #[test]
    fn rejects_non_zip_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("artifact");
        fs::write(&path, b"Rar!\x1a\x07\x00").unwrap();
        let err = ZipArchiver.list(&path, "game.rar").unwrap_err();
        assert!(matches!(err, ArchiveError::Unsupported(_)));
    }

    #[test]
    fn extracts_single_member_flattened() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("artifact");
        build_zip(&path);
        let out_dir = dir.path().join("out");
        let dest = ZipArchiver
            .extract(&path, "game.zip", "docs/game.nfo", &out_dir)
            .unwrap();
        assert_eq!(dest, out_dir.join("game.nfo"));
        assert_eq!(fs::read(&dest).unwrap(), b"greetings");
    }

    #[test]
    fn extract_missing_member() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("artifact");
        build_zip(&path);
        let err = ZipArchiver
            .extract(&path, "game.zip", "nope.txt", dir.path())
            .unwrap_err();
        assert!(matches!(err, ArchiveError::MemberNotFound(_)));
    }

    #[test]
    fn listing_is_newline_joined() {
        assert_eq!(join_listing(&["a.exe", "b.nfo"]), "a.exe\nb.nfo");
    }
}
