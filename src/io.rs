//! Bounds-checked access to the storage region.

use crate::error::{Result, StrandError};
use crate::header::{RecordHeader, VolumeInfo, RECORD_HEADER_LEN, VOLUME_INFO_LEN};
use crate::storage::Storage;

/// A storage adapter fenced to the region `[start, end]`.
///
/// Every raw access is range-checked here before it reaches the adapter, so
/// nothing above this layer can touch bytes outside the region. The check
/// treats `end` as the last valid address for the access *endpoint*: a
/// transfer of `n` bytes at `a` must satisfy `a + n <= end`, which keeps the
/// byte at `end` itself out of reach of any non-empty transfer. Existing
/// on-device images were produced under that rule, so it is load-bearing.
pub struct RegionIo<S: Storage> {
    storage: S,
    start: u16,
    end: u16,
}

impl<S: Storage> RegionIo<S> {
    pub fn new(storage: S, start: u16, end: u16) -> Self {
        RegionIo {
            storage,
            start,
            end,
        }
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn check_range(&self, address: u16, len: usize) -> Result<()> {
        let a = u64::from(address);
        if a < u64::from(self.start) || a + len as u64 > u64::from(self.end) {
            return Err(StrandError::OutOfRange);
        }
        Ok(())
    }

    pub fn read(&mut self, address: u16, buf: &mut [u8]) -> Result<()> {
        self.check_range(address, buf.len())?;
        self.storage.read(address, buf)
    }

    pub fn write(&mut self, address: u16, bytes: &[u8]) -> Result<()> {
        self.check_range(address, bytes.len())?;
        self.storage.write(address, bytes)
    }

    /// Read the volume info block at the region start.
    pub fn read_volume_info(&mut self) -> Result<VolumeInfo> {
        let mut bytes = [0u8; VOLUME_INFO_LEN];
        self.read(self.start, &mut bytes)?;
        Ok(VolumeInfo::from_bytes(bytes))
    }

    pub fn write_volume_info(&mut self, info: &VolumeInfo) -> Result<()> {
        self.write(self.start, &info.to_bytes())
    }

    pub fn read_record_header(&mut self, address: u16) -> Result<RecordHeader> {
        let mut bytes = [0u8; RECORD_HEADER_LEN];
        self.read(address, &mut bytes)?;
        Ok(RecordHeader::from_bytes(bytes))
    }

    pub fn write_record_header(&mut self, address: u16, header: &RecordHeader) -> Result<()> {
        self.write(address, &header.to_bytes())
    }
}
