//! # strandfs - Tiny Linked-Record File Store
//!
//! `strandfs` keeps named blobs on byte-addressable, erase-unfriendly
//! storage (EEPROM, FRAM, a plain file standing in for either). One flat
//! address range holds a singly-linked chain of fixed-format records; files
//! are created, overwritten and tombstone-deleted by rewriting 16-byte
//! headers in place. There are no directories, no compaction and no
//! wear-leveling, which is the point: every operation is a handful of
//! small, predictable reads and writes.
//!
//! ## On-storage format
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │ start        volume info (6 bytes)             │
//! │   [0..4)     tag "OSFS"                        │
//! │   [4..6)     format version, u16 LE            │
//! ├────────────────────────────────────────────────┤
//! │ start+6      record header (16 bytes)          │
//! │   [0..11)    name, space-padded                │
//! │   [11..13)   payload size, u16 LE              │
//! │   [13..15)   next header address, u16 LE       │
//! │              (0 marks the terminal record)     │
//! │   [15]       flags (bit 7 = deleted)           │
//! ├────────────────────────────────────────────────┤
//! │              payload (size bytes)              │
//! ├────────────────────────────────────────────────┤
//! │ ...          further records, linked by next   │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! Deleting a file only sets a header bit; the record stays in the chain as
//! a tombstone and its span is reused first-fit by later writes. The layout
//! is byte-compatible with regions written by the existing on-device
//! implementations of this format.
//!
//! ## Quick start
//!
//! ```rust
//! use strandfs::{MemStorage, Strand};
//!
//! # fn main() -> strandfs::Result<()> {
//! // A 1 KiB region covering addresses 0..=1023.
//! let mut store = Strand::new(MemStorage::new(1024), 0, 1023);
//! store.format()?;
//!
//! store.create_file("config", b"baud=9600")?;
//! store.create_file("banner", b"hello")?;
//! assert_eq!(store.read_file("config")?, b"baud=9600");
//!
//! // A same-size overwrite lands back on the record's old space.
//! let before = store.file_info("config")?;
//! store.write_file("config", b"baud=115k")?;
//! assert_eq!(store.file_info("config")?, before);
//! assert_eq!(store.read_file("config")?, b"baud=115k");
//!
//! store.delete_file("banner")?;
//! # Ok(())
//! # }
//! ```
//!
//! Any byte device works through the [`Storage`] trait; [`MemStorage`] and
//! [`FileStorage`] ship with the crate.

pub mod alloc;
pub mod catalog;
pub mod error;
pub mod header;
pub mod io;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use error::{Result, StrandError};
pub use header::{FORMAT_VERSION, NAME_LEN, VOLUME_TAG};
pub use storage::{FileStorage, MemStorage, Storage};
pub use store::{FileInfo, Strand, StrandStats};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
