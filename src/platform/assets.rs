//! Packed asset archives and the loader contract
//!
//! Assets ship in PCK containers: a "PCK" magic, a one-byte file count, then
//! 24-byte table entries of zero-padded name[16], byte size, and position in
//! 2048-byte sectors relative to the archive base. Names are stored
//! uppercase and matched case-insensitively. Archives nest; a table entry
//! may itself be another PCK file.

use crate::GameError;

pub const SECTOR_SIZE: usize = 2048;
/// Table entries that fit in the archive's first sector
pub const MAX_ENTRIES: usize = 85;

const MAGIC: &[u8; 3] = b"PCK";
const NAME_LEN: usize = 16;
const ENTRY_LEN: usize = NAME_LEN + 8;

/// Opaque loaded-model token handed back by an asset store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelHandle(pub u32);

/// Opaque loaded-image token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHandle(pub u32);

/// The loader contract the driver runs against. Loads are blocking and must
/// all complete before the per-frame loop starts.
pub trait AssetStore {
    fn load_model(&mut self, name: &str) -> Result<ModelHandle, GameError>;
    fn load_image(&mut self, name: &str) -> Result<ImageHandle, GameError>;
}

#[derive(Debug, Clone)]
struct PackEntry {
    name: String,
    size: u32,
    /// Sector offset from the archive base
    pos: u32,
}

/// An in-memory PCK archive with its parsed table of contents
#[derive(Debug, Clone)]
pub struct PackArchive {
    data: Vec<u8>,
    entries: Vec<PackEntry>,
}

impl PackArchive {
    /// Parse an archive from its raw bytes, validating the table up front
    pub fn parse(data: Vec<u8>) -> Result<Self, GameError> {
        if data.len() < 4 {
            return Err(GameError::ArchiveCorrupt {
                reason: "shorter than the archive header".into(),
            });
        }
        if &data[0..3] != MAGIC {
            return Err(GameError::ArchiveCorrupt {
                reason: "bad magic, not a PCK archive".into(),
            });
        }
        let count = data[3] as usize;
        if count > MAX_ENTRIES {
            return Err(GameError::ArchiveCorrupt {
                reason: format!("table claims {count} entries, limit is {MAX_ENTRIES}"),
            });
        }
        if data.len() < 4 + count * ENTRY_LEN {
            return Err(GameError::ArchiveCorrupt {
                reason: "truncated table of contents".into(),
            });
        }

        let mut entries = Vec::with_capacity(count);
        for i in 0..count {
            let at = 4 + i * ENTRY_LEN;
            let raw_name = &data[at..at + NAME_LEN];
            let end = raw_name.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
            let name = String::from_utf8_lossy(&raw_name[..end]).into_owned();
            let size = u32::from_le_bytes([
                data[at + 16],
                data[at + 17],
                data[at + 18],
                data[at + 19],
            ]);
            let pos = u32::from_le_bytes([
                data[at + 20],
                data[at + 21],
                data[at + 22],
                data[at + 23],
            ]);
            let start = pos as usize * SECTOR_SIZE;
            if start + size as usize > data.len() {
                return Err(GameError::ArchiveCorrupt {
                    reason: format!("entry {name:?} points past the end of the archive"),
                });
            }
            entries.push(PackEntry { name, size, pos });
        }

        log::debug!("archive parsed: {} entries", entries.len());
        Ok(Self { data, entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find(&self, name: &str) -> Option<&PackEntry> {
        self.entries.iter().find(|e| e.name.eq_ignore_ascii_case(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Borrow a file's bytes out of the archive
    pub fn read_file(&self, name: &str) -> Result<&[u8], GameError> {
        let entry = self.find(name).ok_or_else(|| GameError::AssetMissing {
            name: name.to_owned(),
        })?;
        let start = entry.pos as usize * SECTOR_SIZE;
        Ok(&self.data[start..start + entry.size as usize])
    }

    /// Parse a nested archive stored as a file in this one
    pub fn sub_archive(&self, name: &str) -> Result<PackArchive, GameError> {
        PackArchive::parse(self.read_file(name)?.to_vec())
    }
}

/// Asset store backed by a parsed PCK archive. Loading verifies the entry
/// exists and hands out a handle; the raw bytes stay borrowed from the
/// archive until upload.
#[derive(Debug)]
pub struct PackAssets {
    archive: PackArchive,
    loaded: Vec<String>,
}

impl PackAssets {
    pub fn new(archive: PackArchive) -> Self {
        Self {
            archive,
            loaded: Vec::new(),
        }
    }

    fn load(&mut self, name: &str) -> Result<u32, GameError> {
        let bytes = self.archive.read_file(name)?;
        log::debug!("loaded {name}: {} bytes", bytes.len());
        self.loaded.push(name.to_ascii_uppercase());
        Ok(self.loaded.len() as u32 - 1)
    }

    /// Bytes for a previously issued handle index
    pub fn bytes(&self, handle: u32) -> Result<&[u8], GameError> {
        let name = self
            .loaded
            .get(handle as usize)
            .ok_or_else(|| GameError::AssetMissing {
                name: format!("handle #{handle}"),
            })?;
        self.archive.read_file(name)
    }
}

impl AssetStore for PackAssets {
    fn load_model(&mut self, name: &str) -> Result<ModelHandle, GameError> {
        Ok(ModelHandle(self.load(name)?))
    }

    fn load_image(&mut self, name: &str) -> Result<ImageHandle, GameError> {
        Ok(ImageHandle(self.load(name)?))
    }
}

/// Handle-issuing store with no backing data, for tests and the headless
/// demo. Records every requested name.
#[derive(Debug, Default)]
pub struct NullAssets {
    pub requested: Vec<String>,
    next: u32,
}

impl AssetStore for NullAssets {
    fn load_model(&mut self, name: &str) -> Result<ModelHandle, GameError> {
        self.requested.push(name.to_owned());
        self.next += 1;
        Ok(ModelHandle(self.next - 1))
    }

    fn load_image(&mut self, name: &str) -> Result<ImageHandle, GameError> {
        self.requested.push(name.to_owned());
        self.next += 1;
        Ok(ImageHandle(self.next - 1))
    }
}
