// Sequential big-endian reader over a byte source

use crate::core::constants::{Field, Section, WORD_LEN};
use crate::core::error::{NexusError, Result};
use std::io::{ErrorKind, Read};

const SKIP_CHUNK: usize = 256;

/// Values produced by running a [`Section`], grouped by kind and kept in
/// layout order. Skipped fields produce nothing.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SectionValues {
    pub bytes: Vec<Vec<u8>>,
    pub words: Vec<i32>,
}

pub struct ByteCursor<R> {
    inner: R,
    offset: u64,
}

impl<R: Read> ByteCursor<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, offset: 0 }
    }

    /// Bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    pub fn read_exact(&mut self, n: usize, section: &'static str) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        self.fill(&mut buf, section)?;
        Ok(buf)
    }

    pub fn read_array<const N: usize>(&mut self, section: &'static str) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.fill(&mut buf, section)?;
        Ok(buf)
    }

    pub fn skip(&mut self, n: usize, section: &'static str) -> Result<()> {
        let mut scratch = [0u8; SKIP_CHUNK];
        let mut left = n;
        while left > 0 {
            let chunk = left.min(SKIP_CHUNK);
            self.fill(&mut scratch[..chunk], section).map_err(|e| match e {
                NexusError::TruncatedInput { needed, .. } => NexusError::TruncatedInput {
                    section,
                    needed: left - chunk + needed,
                },
                other => other,
            })?;
            left -= chunk;
        }
        Ok(())
    }

    pub fn read_i32_be(&mut self, section: &'static str) -> Result<i32> {
        let buf = self.read_array::<WORD_LEN>(section)?;
        Ok(i32::from_be_bytes(buf))
    }

    pub fn read_f32_be(&mut self, section: &'static str) -> Result<f32> {
        self.read_i32_be(section).map(reinterpret_as_float)
    }

    /// Walks the fields of `section` in order.
    pub fn read_section(&mut self, section: &Section) -> Result<SectionValues> {
        let mut values = SectionValues::default();
        for field in section.fields {
            match *field {
                Field::Skip(n) => self.skip(n, section.name)?,
                Field::Bytes(n) => values.bytes.push(self.read_exact(n, section.name)?),
                Field::Word => values.words.push(self.read_i32_be(section.name)?),
            }
        }
        Ok(values)
    }

    fn fill(&mut self, buf: &mut [u8], section: &'static str) -> Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(NexusError::TruncatedInput {
                        section,
                        needed: buf.len() - filled,
                    })
                }
                Ok(n) => {
                    filled += n;
                    self.offset += n as u64;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                // Decoders report a cut stream as UnexpectedEof
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                    return Err(NexusError::TruncatedInput {
                        section,
                        needed: buf.len() - filled,
                    })
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

/// Bit-exact reinterpretation of a 32-bit word as IEEE-754 binary32.
///
/// The PLT format stores float bit patterns in integer slots, so this must
/// never be a numeric `as` conversion.
pub fn reinterpret_as_float(word: i32) -> f32 {
    f32::from_bits(word as u32)
}
