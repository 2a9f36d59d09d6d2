//! Forward traversal of the record chain.

use crate::error::{Result, StrandError};
use crate::header::{pad_name, RecordHeader, RECORD_HEADER_LEN, VOLUME_INFO_LEN};
use crate::io::RegionIo;
use crate::storage::Storage;
use tracing::debug;

/// A record as it sits on storage: decoded header plus header address.
#[derive(Debug, Clone, Copy)]
pub struct Record {
    /// Address of the 16-byte header.
    pub address: u16,
    pub header: RecordHeader,
}

impl Record {
    /// Address of the first payload byte.
    pub fn payload_address(&self) -> u16 {
        self.address + RECORD_HEADER_LEN as u16
    }

    /// The terminal record closes the chain.
    pub fn is_terminal(&self) -> bool {
        self.header.next == 0
    }

    pub fn is_tombstone(&self) -> bool {
        self.header.is_deleted()
    }

    /// A reusable gap: a tombstone with a record after it.
    pub fn is_hole(&self) -> bool {
        self.is_tombstone() && !self.is_terminal()
    }

    /// Bytes from this header to the following one, header included.
    /// `None` on the terminal record, where no successor bounds the gap.
    /// Can exceed header-plus-payload of the file once stored here.
    pub fn span(&self) -> Option<u16> {
        if self.is_terminal() {
            None
        } else {
            Some(self.header.next - self.address)
        }
    }
}

/// Stepper over the chain from its fixed origin. Yields every record once,
/// terminal included, then `None`.
///
/// Reads go through the region gate, so a forged next-pointer outside the
/// region surfaces as `OutOfRange` instead of a wild read. Pointers that do
/// not move strictly forward are refused the same way; following one would
/// walk the chain in circles.
pub struct Walker {
    pending: Option<u32>,
}

impl Walker {
    /// Start just past the volume info block of a region beginning at `start`.
    pub fn new(start: u16) -> Self {
        Walker {
            pending: Some(u32::from(start) + VOLUME_INFO_LEN as u32),
        }
    }

    pub fn advance<S: Storage>(&mut self, io: &mut RegionIo<S>) -> Result<Option<Record>> {
        let address = match self.pending {
            Some(address) => address,
            None => return Ok(None),
        };
        let address = u16::try_from(address).map_err(|_| StrandError::OutOfRange)?;

        let header = io.read_record_header(address)?;
        if header.next == 0 {
            self.pending = None;
        } else if header.next <= address {
            debug!(address, next = header.next, "chain link does not move forward");
            return Err(StrandError::OutOfRange);
        } else {
            self.pending = Some(u32::from(header.next));
        }

        Ok(Some(Record { address, header }))
    }
}

/// First live record whose stored name matches `name` after padding.
/// Comparison is byte-exact over the padded form.
pub fn find_live<S: Storage>(io: &mut RegionIo<S>, name: &str) -> Result<Option<Record>> {
    let padded = pad_name(name);
    let mut walker = Walker::new(io.start());
    while let Some(record) = walker.advance(io)? {
        if !record.is_tombstone() && record.header.name == padded {
            return Ok(Some(record));
        }
    }
    Ok(None)
}
