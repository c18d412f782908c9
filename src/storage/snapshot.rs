//! Snapshot files: point-in-time images written atomically.
//!
//! Layout: magic bytes, a version byte, then the records as a
//! bincode-encoded sequence. A new snapshot is written to a sibling `.tmp`
//! file, synced, and renamed over the previous one.

use crate::config::SnapshotConfig;
use crate::error::{GeotrieError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

const SNAPSHOT_MAGIC: &[u8] = b"GEOTRIE_SNAPSHOT";
const SNAPSHOT_VERSION: u8 = 1;

pub struct SnapshotFile {
    path: PathBuf,
    config: SnapshotConfig,
    ops_since_snapshot: usize,
}

impl SnapshotFile {
    pub fn new<P: AsRef<Path>>(path: P, config: SnapshotConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config,
            ops_since_snapshot: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads every record. A missing or empty file holds no records.
    pub fn load<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        if !self.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        if file.metadata()?.len() == 0 {
            return Ok(Vec::new());
        }

        let mut reader = BufReader::new(file);

        let mut magic = vec![0u8; SNAPSHOT_MAGIC.len()];
        read_header(&mut reader, &mut magic)?;
        if magic != SNAPSHOT_MAGIC {
            return Err(GeotrieError::InvalidFormat);
        }

        let mut version = [0u8; 1];
        read_header(&mut reader, &mut version)?;
        if version[0] != SNAPSHOT_VERSION {
            return Err(GeotrieError::InvalidFormat);
        }

        let records: Vec<T> = bincode::deserialize_from(&mut reader)?;
        log::debug!(
            "Loaded {} records from snapshot {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    pub fn save<T: Serialize>(&mut self, records: &[T]) -> Result<()> {
        let temp_path = self.temp_path();

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;

        let mut writer = BufWriter::new(file);
        writer.write_all(SNAPSHOT_MAGIC)?;
        writer.write_all(&[SNAPSHOT_VERSION])?;
        bincode::serialize_into(&mut writer, records)?;

        writer.flush()?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        drop(file);

        std::fs::rename(&temp_path, &self.path)?;
        self.sync_parent_dir()?;

        self.ops_since_snapshot = 0;
        log::debug!(
            "Wrote {} records to snapshot {}",
            records.len(),
            self.path.display()
        );

        Ok(())
    }

    pub fn record_operation(&mut self) {
        self.ops_since_snapshot += 1;
    }

    pub fn should_snapshot(&self) -> bool {
        match self.config.auto_snapshot_ops {
            Some(threshold) => self.ops_since_snapshot >= threshold,
            None => false,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone();
        if let Some(name) = temp.file_name() {
            let mut new_name = name.to_string_lossy().into_owned();
            new_name.push_str(".tmp");
            temp.set_file_name(new_name);
        }
        temp
    }

    fn sync_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            let dir = File::open(parent)?;
            dir.sync_all()?;
        }
        Ok(())
    }
}

/// A file too short to hold the header is not a snapshot.
fn read_header<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => GeotrieError::InvalidFormat,
        _ => GeotrieError::Io(e),
    })
}
