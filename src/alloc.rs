//! Placement policy for new records.

use crate::catalog::Walker;
use crate::error::{Result, StrandError};
use crate::header::RECORD_HEADER_LEN;
use crate::io::RegionIo;
use crate::storage::Storage;
use tracing::debug;

/// Where a new record goes and what chain surgery links it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Address for the new header.
    pub address: u16,

    /// Next-pointer for the new header: the previous occupant's successor
    /// when filling a hole, 0 when the new record becomes the terminal.
    pub next: u16,

    /// Header address of the old terminal to re-point at `address`. Only
    /// set when appending extends the chain; in-place reuse patches nobody.
    pub patch: Option<u16>,
}

/// Choose where a record with a `size`-byte payload lands.
///
/// First fit by scan order: the first tombstoned gap wide enough wins and
/// the scan stops there. Without one, the record goes right after the
/// terminal record's payload, or straight over the terminal when that is
/// still the blank record left by `format`. The space check runs against
/// the chosen address before the decision is reported, so a failed plan
/// implies nothing was written.
pub fn plan<S: Storage>(io: &mut RegionIo<S>, size: u16) -> Result<Placement> {
    let required = RECORD_HEADER_LEN as u32 + u32::from(size);

    let mut walker = Walker::new(io.start());
    while let Some(record) = walker.advance(io)? {
        if record.is_hole() {
            let span = record.span().unwrap_or(0);
            if u32::from(span) >= required {
                debug!(address = record.address, span, required, "reusing hole");
                return fit(
                    io.end(),
                    u32::from(record.address),
                    required,
                    record.header.next,
                    None,
                );
            }
            continue;
        }
        if record.is_terminal() {
            if record.header.is_blank() {
                return fit(io.end(), u32::from(record.address), required, 0, None);
            }
            let after = u32::from(record.payload_address()) + u32::from(record.header.size);
            debug!(address = after, required, "appending after terminal");
            return fit(io.end(), after, required, 0, Some(record.address));
        }
    }

    // The walk ends at the terminal record or propagates an error, so this
    // exit has no legal path to it.
    Err(StrandError::Undefined)
}

fn fit(end: u16, address: u32, required: u32, next: u16, patch: Option<u16>) -> Result<Placement> {
    if address + required > u32::from(end) {
        return Err(StrandError::InsufficientSpace);
    }
    Ok(Placement {
        address: address as u16,
        next,
        patch,
    })
}
