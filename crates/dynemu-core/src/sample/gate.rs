use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::error::GateError;

/// Largest sample the service accepts (25 MiB).
pub const MAX_SUBMISSION_BYTES: u64 = 25 * 1024 * 1024;

/// DOS header marker at the start of every PE image.
pub const PE_MAGIC: [u8; 2] = *b"MZ";

/// Confirm a sample may be submitted, returning its size in bytes.
///
/// Only stats the file and reads its first two bytes; the file is never
/// modified. Size is checked before the marker so an oversized non-PE file
/// reports the size violation.
pub fn check_submission(path: &Path) -> Result<u64, GateError> {
    let io_err = |source| GateError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(io_err)?;
    let size = file.metadata().map_err(io_err)?.len();

    if size > MAX_SUBMISSION_BYTES {
        return Err(GateError::TooLarge {
            size,
            limit: MAX_SUBMISSION_BYTES,
        });
    }

    let mut magic = [0u8; 2];
    match file.read_exact(&mut magic) {
        Ok(()) if magic == PE_MAGIC => Ok(size),
        Ok(()) => Err(GateError::NotPortableExecutable),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(GateError::NotPortableExecutable),
        Err(e) => Err(io_err(e)),
    }
}
