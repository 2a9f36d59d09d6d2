//! Storage adapters: the byte-device seam and the shipped backends.

use crate::error::{Result, StrandError};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Byte-addressable storage device.
///
/// Adapters move raw bytes at absolute device addresses and nothing else.
/// Region bounds, record layout and chain state are all enforced above this
/// seam, so an adapter is expected to succeed for any in-device access.
pub trait Storage {
    /// Fill `buf` from the device starting at `address`.
    fn read(&mut self, address: u16, buf: &mut [u8]) -> Result<()>;

    /// Write `bytes` to the device starting at `address`.
    fn write(&mut self, address: u16, bytes: &[u8]) -> Result<()>;
}

/// RAM-backed device. Fresh memory is zeroed, so a new instance reads as
/// unformatted.
pub struct MemStorage {
    bytes: Vec<u8>,
}

impl MemStorage {
    pub fn new(capacity: usize) -> Self {
        MemStorage {
            bytes: vec![0u8; capacity],
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Raw device contents, for inspection.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Storage for MemStorage {
    fn read(&mut self, address: u16, buf: &mut [u8]) -> Result<()> {
        let start = address as usize;
        let src = self
            .bytes
            .get(start..start + buf.len())
            .ok_or(StrandError::OutOfRange)?;
        buf.copy_from_slice(src);
        Ok(())
    }

    fn write(&mut self, address: u16, bytes: &[u8]) -> Result<()> {
        let start = address as usize;
        let dst = self
            .bytes
            .get_mut(start..start + bytes.len())
            .ok_or(StrandError::OutOfRange)?;
        dst.copy_from_slice(bytes);
        Ok(())
    }
}

/// File-backed device, one byte of file per device address.
pub struct FileStorage {
    file: File,
    path: PathBuf,
}

impl FileStorage {
    /// Create a zero-filled image of `len` bytes, truncating any existing file.
    pub fn create<P: AsRef<Path>>(path: P, len: usize) -> Result<Self> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;

        file.write_all(&vec![0u8; len])?;
        file.flush()?;

        Ok(FileStorage {
            file,
            path: path.as_ref().to_path_buf(),
        })
    }

    /// Open an existing image.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(&path)?;

        Ok(FileStorage {
            file,
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sync all writes to disk.
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn read(&mut self, address: u16, buf: &mut [u8]) -> Result<()> {
        self.file.seek(SeekFrom::Start(address as u64))?;
        self.file.read_exact(buf)?;
        Ok(())
    }

    fn write(&mut self, address: u16, bytes: &[u8]) -> Result<()> {
        self.file.seek(SeekFrom::Start(address as u64))?;
        self.file.write_all(bytes)?;
        self.file.flush()?;
        Ok(())
    }
}
