//! The store facade. Every public operation lives here.

use crate::alloc;
use crate::catalog::{find_live, Record, Walker};
use crate::error::{Result, StrandError};
use crate::header::{
    pad_name, RecordHeader, VolumeInfo, FORMAT_VERSION, RECORD_HEADER_LEN, VOLUME_INFO_LEN,
    VOLUME_TAG,
};
use crate::io::RegionIo;
use crate::storage::Storage;
use tracing::{debug, info};

/// Payload location and size of a live file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileInfo {
    /// Address of the first payload byte.
    pub address: u16,

    /// Payload length in bytes.
    pub size: u16,
}

/// Usage counters from one walk of the chain.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StrandStats {
    /// Live records, the blank record excluded.
    pub live_files: usize,

    /// Deleted records still sitting in the chain.
    pub tombstones: usize,

    /// Payload bytes held by live records.
    pub live_bytes: u32,

    /// Bytes spanned by reusable holes, headers included.
    pub hole_bytes: u32,

    /// Bytes an append at the end of the chain could still claim.
    pub tail_free: u32,
}

/// A record store over one storage region.
///
/// Holds the adapter and the region bounds for its whole life; nothing else
/// touches the region while a `Strand` owns it. All operations are
/// synchronous and take `&mut self`, there is no interior locking.
pub struct Strand<S: Storage> {
    io: RegionIo<S>,
}

impl<S: Storage> Strand<S> {
    /// Wire a store to `storage`, fenced to addresses `[start, end]`.
    ///
    /// Nothing is probed here; the first operation runs the format check.
    pub fn new(storage: S, start: u16, end: u16) -> Self {
        Strand {
            io: RegionIo::new(storage, start, end),
        }
    }

    pub fn start(&self) -> u16 {
        self.io.start()
    }

    pub fn end(&self) -> u16 {
        self.io.end()
    }

    /// Consume the store and hand the adapter back.
    pub fn into_storage(self) -> S {
        self.io.into_storage()
    }

    /// Lay down a fresh volume: the info block plus one blank terminal
    /// record. Anything previously stored becomes unreachable. Idempotent.
    pub fn format(&mut self) -> Result<()> {
        self.io.write_volume_info(&VolumeInfo::current())?;
        let origin = self.io.start() + VOLUME_INFO_LEN as u16;
        self.io.write_record_header(origin, &RecordHeader::blank())?;
        info!(
            start = self.io.start(),
            end = self.io.end(),
            "formatted region"
        );
        Ok(())
    }

    /// Confirm the region carries this format, and return the stored
    /// version. A wrong tag reports [`StrandError::Unformatted`] whatever
    /// the version bytes say; a right tag with another version reports
    /// [`StrandError::WrongVersion`].
    pub fn check_version(&mut self) -> Result<u16> {
        let info = self.io.read_volume_info()?;
        if info.tag != VOLUME_TAG {
            return Err(StrandError::Unformatted);
        }
        if info.version != FORMAT_VERSION {
            return Err(StrandError::WrongVersion {
                found: info.version,
            });
        }
        Ok(info.version)
    }

    /// Create `name` with `payload`. Fails with
    /// [`StrandError::FileAlreadyExists`] when a live record already has
    /// the name; tombstones don't count, their names are free for reuse.
    pub fn create_file(&mut self, name: &str, payload: &[u8]) -> Result<()> {
        self.check_version()?;
        if find_live(&mut self.io, name)?.is_some() {
            return Err(StrandError::FileAlreadyExists(name.to_string()));
        }
        self.place(name, payload)
    }

    /// Create or replace `name` with `payload`.
    ///
    /// Any live record with the name is tombstoned before the new bytes are
    /// placed. Same-size replacements land back on the same address through
    /// the hole scan. When placement then fails, say a larger payload no
    /// longer fits, `name` stays deleted rather than keeping its old
    /// contents.
    pub fn write_file(&mut self, name: &str, payload: &[u8]) -> Result<()> {
        self.check_version()?;
        if let Some(record) = find_live(&mut self.io, name)? {
            self.tombstone(record)?;
        }
        self.place(name, payload)
    }

    /// Payload address and size of the live record named `name`.
    pub fn file_info(&mut self, name: &str) -> Result<FileInfo> {
        self.check_version()?;
        let record = self.lookup(name)?;
        Ok(FileInfo {
            address: record.payload_address(),
            size: record.header.size,
        })
    }

    /// Read `name`'s payload into a fresh buffer.
    pub fn read_file(&mut self, name: &str) -> Result<Vec<u8>> {
        self.check_version()?;
        let record = self.lookup(name)?;
        let mut buf = vec![0u8; usize::from(record.header.size)];
        self.io.read(record.payload_address(), &mut buf)?;
        Ok(buf)
    }

    /// Read `name`'s payload into `buf`, which must hold exactly the stored
    /// size.
    pub fn read_file_into(&mut self, name: &str, buf: &mut [u8]) -> Result<()> {
        self.check_version()?;
        let record = self.lookup(name)?;
        if buf.len() != usize::from(record.header.size) {
            return Err(StrandError::BufferSizeMismatch {
                expected: record.header.size,
                actual: buf.len(),
            });
        }
        self.io.read(record.payload_address(), buf)
    }

    /// Tombstone the first live record named `name`. Only the header is
    /// rewritten; the payload stays behind as inert bytes.
    pub fn delete_file(&mut self, name: &str) -> Result<()> {
        self.check_version()?;
        let record = self.lookup(name)?;
        self.tombstone(record)
    }

    /// Usage counters from one walk of the chain.
    pub fn stats(&mut self) -> Result<StrandStats> {
        self.check_version()?;
        let mut stats = StrandStats::default();
        let mut walker = Walker::new(self.io.start());
        while let Some(record) = walker.advance(&mut self.io)? {
            if record.is_tombstone() {
                stats.tombstones += 1;
                if let Some(span) = record.span() {
                    stats.hole_bytes += u32::from(span);
                }
            } else if !record.header.is_blank() {
                stats.live_files += 1;
                stats.live_bytes += u32::from(record.header.size);
            }
            if record.is_terminal() {
                let after = if record.header.is_blank() {
                    u32::from(record.address)
                } else {
                    u32::from(record.payload_address()) + u32::from(record.header.size)
                };
                stats.tail_free = u32::from(self.io.end()).saturating_sub(after);
            }
        }
        Ok(stats)
    }

    fn lookup(&mut self, name: &str) -> Result<Record> {
        find_live(&mut self.io, name)?.ok_or_else(|| StrandError::FileNotFound(name.to_string()))
    }

    fn tombstone(&mut self, mut record: Record) -> Result<()> {
        record.header.mark_deleted();
        self.io.write_record_header(record.address, &record.header)?;
        debug!(address = record.address, "tombstoned record");
        Ok(())
    }

    /// Place a new live record. Write order is predecessor patch, then the
    /// new header, then the payload; a crash in between can strand the
    /// chain, which the format accepts and does not repair.
    fn place(&mut self, name: &str, payload: &[u8]) -> Result<()> {
        let size = u16::try_from(payload.len()).map_err(|_| StrandError::InsufficientSpace)?;
        let placement = alloc::plan(&mut self.io, size)?;

        if let Some(prev) = placement.patch {
            let mut prev_header = self.io.read_record_header(prev)?;
            prev_header.next = placement.address;
            self.io.write_record_header(prev, &prev_header)?;
        }

        let header = RecordHeader::new(pad_name(name), size, placement.next);
        self.io.write_record_header(placement.address, &header)?;
        self.io
            .write(placement.address + RECORD_HEADER_LEN as u16, payload)?;

        debug!(name, address = placement.address, size, "record written");
        Ok(())
    }
}
