use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha384};

use crate::error::ArchiveError;

const CHUNK_SIZE: usize = 64 * 1024; // 64 KB

/// Weak and strong digests of a file, both lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigests {
    /// MD5
    pub weak: String,
    /// SHA-384
    pub strong: String,
    pub size: u64,
}

/// Compute MD5 and SHA-384 in one pass, streaming in 64KB chunks.
pub fn compute_digests<R: Read>(reader: &mut R) -> Result<FileDigests, ArchiveError> {
    let mut md5_ctx = md5::Context::new();
    let mut sha = Sha384::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut size: u64 = 0;

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        md5_ctx.consume(&buf[..n]);
        sha.update(&buf[..n]);
        size += n as u64;
    }

    Ok(FileDigests {
        weak: format!("{:x}", md5_ctx.compute()),
        strong: format!("{:x}", sha.finalize()),
        size,
    })
}

/// Digest a file on disk.
pub fn digest_file(path: &Path) -> Result<FileDigests, ArchiveError> {
    let mut file = File::open(path)?;
    compute_digests(&mut file)
}
