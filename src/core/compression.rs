// Transparent decompression of plot file sources

use crate::core::constants::{CompressionType, FILE_TAG};
use crate::core::error::{NexusError, Result};
use flate2::bufread::MultiGzDecoder;
use std::io::{BufRead, Read};
use tracing::debug;

/// Wraps `source` in a decoder matching its leading bytes. Uncompressed
/// sources are passed through untouched.
///
/// A buffer that already shows the file tag at offset 4 is raw, whatever its
/// first four bytes hold. Only when fewer than 16 bytes are buffered do the
/// leading bytes alone decide.
pub fn open_source<R: BufRead + 'static>(mut source: R) -> Result<Box<dyn Read>> {
    let prefix = source.fill_buf()?;
    let compression = if prefix.get(4..16) == Some(&FILE_TAG[..]) {
        CompressionType::None
    } else {
        CompressionType::detect(prefix)
    };
    debug!("Input compression: {:?}", compression);

    match compression {
        CompressionType::None => Ok(Box::new(source)),

        CompressionType::Gzip => Ok(Box::new(MultiGzDecoder::new(source))),

        #[cfg(feature = "zstd")]
        CompressionType::Zstd => zstd::stream::read::Decoder::with_buffer(source)
            .map(|d| Box::new(d) as Box<dyn Read>)
            .map_err(|e| NexusError::Decompression(format!("Zstd: {}", e))),

        #[cfg(not(feature = "zstd"))]
        CompressionType::Zstd => Err(NexusError::Decompression(
            "Zstd support not enabled".to_string(),
        )),

        #[cfg(feature = "lz4")]
        CompressionType::Lz4 => lz4::Decoder::new(source)
            .map(|d| Box::new(d) as Box<dyn Read>)
            .map_err(|e| NexusError::Decompression(format!("LZ4: {}", e))),

        #[cfg(not(feature = "lz4"))]
        CompressionType::Lz4 => Err(NexusError::Decompression(
            "LZ4 support not enabled".to_string(),
        )),
    }
}
