//! On-storage record layouts. All integers little-endian, all structures
//! hand-packed; decoding never validates, the version gate does.

/// Volume tag written at the region start. ASCII, not null-terminated.
pub const VOLUME_TAG: [u8; 4] = *b"OSFS";
/// On-storage format version this build reads and writes.
pub const FORMAT_VERSION: u16 = 2;
/// Record name width. Shorter names are space-padded, longer ones truncated.
pub const NAME_LEN: usize = 11;
/// Encoded size of [`VolumeInfo`].
pub const VOLUME_INFO_LEN: usize = 6;
/// Encoded size of [`RecordHeader`].
pub const RECORD_HEADER_LEN: usize = 16;
/// Flags bit marking a record as deleted. Other bits are reserved.
pub const FLAG_DELETED: u8 = 1 << 7;

/// Volume info block at the first 6 bytes of the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeInfo {
    /// Format tag, [`VOLUME_TAG`] on a formatted region.
    pub tag: [u8; 4],

    /// Format version, [`FORMAT_VERSION`] on a region this build wrote.
    pub version: u16,
}

impl VolumeInfo {
    /// Volume info as written by `format` on this build.
    pub fn current() -> Self {
        VolumeInfo {
            tag: VOLUME_TAG,
            version: FORMAT_VERSION,
        }
    }

    pub fn to_bytes(&self) -> [u8; VOLUME_INFO_LEN] {
        let mut bytes = [0u8; VOLUME_INFO_LEN];
        bytes[0..4].copy_from_slice(&self.tag);
        bytes[4..6].copy_from_slice(&self.version.to_le_bytes());
        bytes
    }

    pub fn from_bytes(bytes: [u8; VOLUME_INFO_LEN]) -> Self {
        let mut tag = [0u8; 4];
        tag.copy_from_slice(&bytes[0..4]);
        VolumeInfo {
            tag,
            version: u16::from_le_bytes([bytes[4], bytes[5]]),
        }
    }
}

/// File record header. The payload follows it contiguously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    /// Space-padded name, not null-terminated. Compared byte-exact.
    pub name: [u8; NAME_LEN],

    /// Payload length in bytes.
    pub size: u16,

    /// Address of the next record header, 0 on the terminal record.
    pub next: u16,

    /// Flag bits, see [`FLAG_DELETED`].
    pub flags: u8,
}

impl RecordHeader {
    /// New live header for `name` with `size` payload bytes, chained to `next`.
    pub fn new(name: [u8; NAME_LEN], size: u16, next: u16) -> Self {
        RecordHeader {
            name,
            size,
            next,
            flags: 0,
        }
    }

    /// The blank zero-size terminal record `format` writes.
    pub fn blank() -> Self {
        RecordHeader::new([b' '; NAME_LEN], 0, 0)
    }

    pub fn is_deleted(&self) -> bool {
        self.flags & FLAG_DELETED != 0
    }

    /// Whether this is the blank record: zero size and an all-spaces name.
    /// Flags and chaining are not part of the comparison.
    pub fn is_blank(&self) -> bool {
        self.size == 0 && self.name == [b' '; NAME_LEN]
    }

    /// Set the deleted bit. Other flag bits are preserved.
    pub fn mark_deleted(&mut self) {
        self.flags |= FLAG_DELETED;
    }

    pub fn to_bytes(&self) -> [u8; RECORD_HEADER_LEN] {
        let mut bytes = [0u8; RECORD_HEADER_LEN];
        bytes[0..11].copy_from_slice(&self.name);
        bytes[11..13].copy_from_slice(&self.size.to_le_bytes());
        bytes[13..15].copy_from_slice(&self.next.to_le_bytes());
        bytes[15] = self.flags;
        bytes
    }

    pub fn from_bytes(bytes: [u8; RECORD_HEADER_LEN]) -> Self {
        let mut name = [0u8; NAME_LEN];
        name.copy_from_slice(&bytes[0..11]);
        RecordHeader {
            name,
            size: u16::from_le_bytes([bytes[11], bytes[12]]),
            next: u16::from_le_bytes([bytes[13], bytes[14]]),
            flags: bytes[15],
        }
    }
}

/// Pad `name` to the on-storage width: copy up to the first NUL byte or
/// [`NAME_LEN`] bytes, whichever comes first, and space-fill the rest.
/// Longer names are silently truncated.
pub fn pad_name(name: &str) -> [u8; NAME_LEN] {
    let mut padded = [b' '; NAME_LEN];
    for (slot, byte) in padded.iter_mut().zip(name.bytes()) {
        if byte == 0 {
            break;
        }
        *slot = byte;
    }
    padded
}
