//! Gzip handling for the published artifact.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::infrastructure::error::{InfraError, InfraResult};

/// Gzip-encode `src` into `dst`.
pub fn gzip_file(src: &Path, dst: &Path) -> InfraResult<()> {
    let mut input =
        File::open(src).map_err(|e| InfraError::io(format!("open {}", src.display()), e))?;
    let output =
        File::create(dst).map_err(|e| InfraError::io(format!("create {}", dst.display()), e))?;

    let mut encoder = GzEncoder::new(BufWriter::new(output), Compression::default());
    io::copy(&mut input, &mut encoder)
        .map_err(|e| InfraError::io(format!("compress {}", src.display()), e))?;
    encoder
        .finish()
        .and_then(|mut writer| writer.flush())
        .map_err(|e| InfraError::io(format!("finish {}", dst.display()), e))
}

/// Read a gzip file and return its decompressed bytes.
pub fn gunzip_file(path: &Path) -> InfraResult<Vec<u8>> {
    let file =
        File::open(path).map_err(|e| InfraError::io(format!("open {}", path.display()), e))?;
    let mut decoder = GzDecoder::new(BufReader::new(file));

    let mut content = Vec::new();
    decoder
        .read_to_end(&mut content)
        .map_err(|e| InfraError::io(format!("decompress {}", path.display()), e))?;
    Ok(content)
}
