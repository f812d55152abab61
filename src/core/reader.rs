// Nexus PLT reader: header, variable catalog and record blocks

use crate::core::compression::open_source;
use crate::core::constants::*;
use crate::core::cursor::{reinterpret_as_float, ByteCursor};
use crate::core::error::{NexusError, Result};
use crate::core::format::*;
use crate::core::names::{ClassName, InstanceName, VarName};
use crate::core::units::UnitSystem;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, trace, warn};

/// Loads a plot file. Gzip, zstd and lz4 compressed files are decoded
/// transparently.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Plot> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| NexusError::OpenFailure {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Loading Nexus plot file {}", path.display());
    let source = open_source(BufReader::new(file))?;
    load_from(source)
}

/// Loads a plot from any byte source positioned at the start of the file.
///
/// Decoding is all-or-nothing: any error discards everything read so far.
pub fn load_from<R: Read>(source: R) -> Result<Plot> {
    let mut cursor = ByteCursor::new(source);

    let header = read_header(&mut cursor)?;
    let catalog = read_catalog(&mut cursor, header.num_classes)?;

    let mut data = Vec::new();
    let mut records = RecordStream::new(&mut cursor, &catalog);
    while let BlockState::More = records.read_block(&mut data)? {}

    info!(
        "Loaded {} data points in {} classes ({} bytes)",
        data.len(),
        catalog.len(),
        cursor.offset()
    );
    Ok(Plot { header, data })
}

pub fn read_header<R: Read>(cursor: &mut ByteCursor<R>) -> Result<Header> {
    let tag = cursor.read_section(&HEADER_TAG)?;
    if tag.bytes[0].as_slice() != FILE_TAG {
        return Err(NexusError::bad_header(format!(
            "Could not verify file type: got {:?}",
            String::from_utf8_lossy(&tag.bytes[0])
        )));
    }

    let units = cursor.read_section(&HEADER_UNITS)?;
    let unit_system = UnitSystem::from_tag(&units.bytes[0]).ok_or_else(|| {
        NexusError::bad_header(format!(
            "Unknown unit system {:?}",
            String::from_utf8_lossy(&units.bytes[0])
        ))
    })?;

    let fields = cursor.read_section(&HEADER_FIELDS)?;
    let fields: [i32; 8] = fields
        .words
        .try_into()
        .map_err(|_| NexusError::bad_header("Header field count mismatch"))?;
    let header = Header::from_fields(unit_system, fields)?;

    debug!(
        "Header: units={:?} classes={} start={}-{}-{} grid={}x{}x{}",
        header.unit_system,
        header.num_classes,
        header.year,
        header.month,
        header.day,
        header.nx,
        header.ny,
        header.nz
    );
    Ok(header)
}

pub fn read_catalog<R: Read>(cursor: &mut ByteCursor<R>, num_classes: i32) -> Result<VariableCatalog> {
    let num_classes = usize::try_from(num_classes)
        .map_err(|_| NexusError::bad_header("Negative class count"))?;

    cursor.read_section(&CLASS_NAMES_PREFIX)?;
    let mut classes = Vec::with_capacity(num_classes.min(256));
    for _ in 0..num_classes {
        classes.push(read_name::<_, ClassName>(cursor, &CLASS_NAME)?);
    }

    cursor.read_section(&VAR_COUNTS_PREFIX)?;
    let mut counts = Vec::with_capacity(classes.len());
    for _ in 0..num_classes {
        counts.push(cursor.read_section(&VAR_COUNT)?.words[0]);
    }
    if counts.iter().any(|c| *c < 0) {
        return Err(NexusError::bad_header("Negative variable count, corrupted file"));
    }

    cursor.read_section(&CATALOG_PREFIX)?;
    let mut catalog = VariableCatalog::new();
    for (class, count) in classes.into_iter().zip(counts) {
        cursor.read_section(&CLASS_VARS_PREFIX)?;
        let mut names = Vec::with_capacity((count as usize).min(1024));
        for _ in 0..count {
            names.push(read_name::<_, VarName>(cursor, &VAR_NAME)?);
        }
        cursor.read_section(&CLASS_VARS_TRAILER)?;

        debug!("Class {} declares {} variables", class, names.len());
        catalog.insert(class, names);
    }

    Ok(catalog)
}

fn read_name<R, N>(cursor: &mut ByteCursor<R>, section: &Section) -> Result<N>
where
    R: Read,
    N: for<'a> TryFrom<&'a [u8]>,
{
    let values = cursor.read_section(section)?;
    N::try_from(values.bytes[0].as_slice())
        .map_err(|_| NexusError::bad_header(format!("Malformed {}", section.name)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    More,
    Stopped,
}

/// Reads timestep blocks until the `STOP` class name.
pub struct RecordStream<'a, R> {
    cursor: &'a mut ByteCursor<R>,
    catalog: &'a VariableCatalog,
    blocks: usize,
}

impl<'a, R: Read> RecordStream<'a, R> {
    pub fn new(cursor: &'a mut ByteCursor<R>, catalog: &'a VariableCatalog) -> Self {
        Self {
            cursor,
            catalog,
            blocks: 0,
        }
    }

    /// Number of blocks read so far.
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    /// Reads one block, appending its values to `out`.
    pub fn read_block(&mut self, out: &mut Vec<DataPoint>) -> Result<BlockState> {
        let class: ClassName = read_name(&mut *self.cursor, &BLOCK_CLASS)?;
        if class.as_bytes() == STOP_CLASS {
            debug!("Reached end of plot after {} blocks", self.blocks);
            return Ok(BlockState::Stopped);
        }

        let words = self.cursor.read_section(&BLOCK_HEADER)?.words;
        let timestep = reinterpret_as_float(words[0]) as i32;
        let time = reinterpret_as_float(words[1]);
        let num_items = reinterpret_as_float(words[2]);
        let max_perfs = reinterpret_as_float(words[4]) as i32;

        if !(num_items >= 0.0) {
            return Err(NexusError::bad_header(format!(
                "Invalid item count {} in class {}",
                num_items, class
            )));
        }
        let num_items = num_items as usize;

        // Classes missing from the catalog carry no values
        let catalog = self.catalog;
        let varnames = match catalog.get(&class) {
            Some(names) => names,
            None => {
                warn!("Class {} is not declared in the variable catalog", class);
                &[][..]
            }
        };

        trace!(
            "Block {}: class={} timestep={} time={} items={}",
            self.blocks,
            class,
            timestep,
            time,
            num_items
        );

        for _ in 0..num_items {
            let instance: InstanceName = read_name(&mut *self.cursor, &INSTANCE_HEADER)?;
            for varname in varnames {
                let value = self.cursor.read_f32_be(VALUE.name)?;
                out.push(DataPoint {
                    timestep,
                    time,
                    max_perfs,
                    class,
                    instance,
                    varname: *varname,
                    value,
                });
            }
        }

        self.cursor.read_section(&BLOCK_TRAILER)?;
        self.blocks += 1;
        Ok(BlockState::More)
    }
}
