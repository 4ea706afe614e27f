//! JSON data file for `InMemoryBlockStore`.
//!
//! Layout: `{"next_id": <u64>, "blocks": [<Block>, ...]}`. Writes go to a
//! sibling `.tmp` file which is then renamed over the target.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::StoreError;
use crate::block::{Block, BlockId};

#[derive(Debug, Deserialize)]
pub(super) struct Snapshot {
    pub next_id: u64,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    next_id: u64,
    blocks: Vec<&'a Block>,
}

/// Load the data file. A missing file is `Ok(None)`.
pub(super) fn read(path: &Path) -> Result<Option<Snapshot>, StoreError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error(path, e)),
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| StoreError::Corrupt {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

pub(super) fn write(
    path: &Path,
    next_id: u64,
    blocks: &BTreeMap<BlockId, Block>,
) -> Result<(), StoreError> {
    let snapshot = SnapshotRef {
        next_id,
        blocks: blocks.values().collect(),
    };
    let json = serde_json::to_vec_pretty(&snapshot).map_err(|e| StoreError::Corrupt {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let tmp = temp_path(path);
    std::fs::write(&tmp, json).map_err(|e| io_error(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| io_error(path, e))?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}
