// Format constants and field layout for Nexus PLT files

pub const FILE_TAG: &[u8; 12] = b"PLOT  BIN   ";
pub const STOP_CLASS: &[u8; 8] = b"STOP    ";

pub const CLASS_NAME_LEN: usize = 8;
pub const INSTANCE_NAME_LEN: usize = 8;
pub const VAR_NAME_LEN: usize = 4;
pub const UNIT_TAG_LEN: usize = 6;
pub const WORD_LEN: usize = 4;

// Simulation time is stored in days, summary time in seconds
pub const SECONDS_PER_DAY: f64 = 86400.0;

// Input container, sniffed from the leading bytes of the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    None,
    Gzip,
    Zstd,
    Lz4,
}

impl CompressionType {
    pub fn detect(prefix: &[u8]) -> Self {
        if prefix.starts_with(&[0x1f, 0x8b]) {
            CompressionType::Gzip
        } else if prefix.starts_with(&[0x28, 0xb5, 0x2f, 0xfd]) {
            CompressionType::Zstd
        } else if prefix.starts_with(&[0x04, 0x22, 0x4d, 0x18]) {
            CompressionType::Lz4
        } else {
            CompressionType::None
        }
    }
}

/// One positional element of the binary layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Advance without looking at the content.
    Skip(usize),
    /// Raw identifier bytes.
    Bytes(usize),
    /// Big-endian 32-bit word.
    Word,
}

/// A named run of fields read in one go. The name shows up in
/// truncation errors.
#[derive(Debug, Clone, Copy)]
pub struct Section {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl Section {
    pub fn byte_len(&self) -> usize {
        self.fields
            .iter()
            .map(|f| match f {
                Field::Skip(n) | Field::Bytes(n) => *n,
                Field::Word => WORD_LEN,
            })
            .sum()
    }
}

use Field::{Bytes, Skip, Word};

// Header: leading skip + file tag
pub const HEADER_TAG: Section = Section {
    name: "file tag",
    fields: &[Skip(4), Bytes(12)],
};

// Plot file version, simulator, two simulator version blobs, unit system
pub const HEADER_UNITS: Section = Section {
    name: "unit system",
    fields: &[Skip(6), Skip(6), Skip(6), Skip(6), Bytes(UNIT_TAG_LEN)],
};

// Reserved blob + num_classes, day, month, year, nx, ny, nz, ncomp
pub const HEADER_FIELDS: Section = Section {
    name: "header integers",
    fields: &[
        Skip(530 + 264),
        Word, Word, Word, Word, Word, Word, Word, Word,
    ],
};

pub const CLASS_NAMES_PREFIX: Section = Section {
    name: "class name block",
    fields: &[Skip(8)],
};

pub const CLASS_NAME: Section = Section {
    name: "class name",
    fields: &[Bytes(CLASS_NAME_LEN)],
};

pub const VAR_COUNTS_PREFIX: Section = Section {
    name: "variable count block",
    fields: &[Skip(8)],
};

pub const VAR_COUNT: Section = Section {
    name: "variable count",
    fields: &[Word],
};

pub const CATALOG_PREFIX: Section = Section {
    name: "variable catalog",
    fields: &[Skip(8)],
};

// The first slot of every class catalog names the time variable
pub const CLASS_VARS_PREFIX: Section = Section {
    name: "time variable name",
    fields: &[Skip(4)],
};

pub const VAR_NAME: Section = Section {
    name: "variable name",
    fields: &[Bytes(VAR_NAME_LEN)],
};

pub const CLASS_VARS_TRAILER: Section = Section {
    name: "variable catalog trailer",
    fields: &[Skip(8)],
};

pub const BLOCK_CLASS: Section = Section {
    name: "record block class name",
    fields: &[Bytes(CLASS_NAME_LEN)],
};

// timestep, time, item count, max items (unused), max perforations
pub const BLOCK_HEADER: Section = Section {
    name: "record block header",
    fields: &[Skip(8), Word, Word, Word, Word, Word],
};

pub const INSTANCE_HEADER: Section = Section {
    name: "instance header",
    fields: &[Skip(8), Bytes(INSTANCE_NAME_LEN), Skip(64)],
};

pub const VALUE: Section = Section {
    name: "instance value",
    fields: &[Word],
};

pub const BLOCK_TRAILER: Section = Section {
    name: "record block trailer",
    fields: &[Skip(8)],
};
