//! JSON persistence for raw and trimmed trees.
//!
//! Output mirrors the upstream dataset format: UTF-8, non-ASCII characters
//! left unescaped, one-space indentation. The trimmed file is compressed
//! and hashed downstream, so the byte layout must stay reproducible.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::domain::RawTreeData;
use crate::infrastructure::error::{InfraError, InfraResult};

/// Read a raw or trimmed tree snapshot from disk.
pub fn read_tree(path: &Path) -> InfraResult<RawTreeData> {
    let file = File::open(path).map_err(|e| InfraError::io(format!("open {}", path.display()), e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| InfraError::Json {
        context: format!("parse {}", path.display()),
        source: e,
    })
}

/// Write `value` as pretty JSON with one-space indentation.
pub fn write_pretty<T: Serialize>(value: &T, path: &Path) -> InfraResult<()> {
    let file =
        File::create(path).map_err(|e| InfraError::io(format!("create {}", path.display()), e))?;
    let mut writer = BufWriter::new(file);

    let formatter = PrettyFormatter::with_indent(b" ");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    value.serialize(&mut ser).map_err(|e| InfraError::Json {
        context: format!("serialize {}", path.display()),
        source: e,
    })?;

    writer
        .flush()
        .map_err(|e| InfraError::io(format!("flush {}", path.display()), e))
}
