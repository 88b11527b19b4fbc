//! `.lzma.zip` backend.
//!
//! The `zip` crate reads LZMA entries but cannot write them, so this backend
//! lays out the container itself: local headers, central directory and end
//! record, without zip64 extensions. Entries are encoded with liblzma (through
//! `xz2`) at the configured preset and stored in the standard layout for
//! method 14:
//!
//! ```text
//! | sdk major | sdk minor | props len (u16 LE) | props (5) | raw LZMA stream + end marker |
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use xz2::stream::{LzmaOptions, Stream};
use xz2::write::XzEncoder;

use super::{ArchiveBackend, CompressionLevel, NORMALIZED_MODE, PackedArtifact, read_input};
use crate::output::{artifact_path, input_path};
use crate::{Error, Result};

const LOCAL_HEADER_SIGNATURE: u32 = 0x0403_4b50;
const CENTRAL_HEADER_SIGNATURE: u32 = 0x0201_4b50;
const END_OF_CENTRAL_DIRECTORY_SIGNATURE: u32 = 0x0605_4b50;

const METHOD_LZMA: u16 = 14;
/// Minimum reader version for LZMA entries (6.3).
const VERSION_NEEDED: u16 = 63;
/// Unix host, APPNOTE version 6.3.
const VERSION_MADE_BY: u16 = (3 << 8) | VERSION_NEEDED;

/// General purpose flag: the LZMA stream ends with an end-of-stream marker.
const FLAG_LZMA_EOS: u16 = 1 << 1;
/// General purpose flag: the entry name is UTF-8.
const FLAG_UTF8_NAME: u16 = 1 << 11;

/// 1980-01-01 00:00:00 in MS-DOS date and time encoding.
const DOS_EPOCH_DATE: u16 = (1 << 5) | 1;
const DOS_EPOCH_TIME: u16 = 0;

const S_IFREG: u32 = 0o100_000;

/// LZMA SDK version recorded in each entry header.
const LZMA_SDK_VERSION: [u8; 2] = [9, 20];
const LZMA_PROPS_LEN: usize = 5;
/// Properties plus the 8-byte unpacked size of an `.lzma` stream header.
const LZMA_ALONE_HEADER_LEN: usize = LZMA_PROPS_LEN + 8;
/// Smallest dictionary liblzma accepts.
const MIN_DICT_SIZE: u32 = 4096;

/// zip container with LZMA entries.
///
/// Entry metadata is normalised the same way as for [`ZipBackend`](super::ZipBackend):
/// permissions `0o777` and the zip epoch as modification time. The level is
/// used as the LZMA preset.
#[derive(Debug, Clone, Copy, Default)]
pub struct LzmaZipBackend {
    level: CompressionLevel,
}

impl LzmaZipBackend {
    pub const SUFFIX: &'static str = ".lzma.zip";

    pub fn new(level: CompressionLevel) -> Self {
        Self { level }
    }

    pub fn level(&self) -> CompressionLevel {
        self.level
    }
}

impl ArchiveBackend for LzmaZipBackend {
    fn suffix(&self) -> &'static str {
        Self::SUFFIX
    }

    fn info(&self) -> String {
        format!("{} with level={}", Self::SUFFIX, self.level)
    }

    fn pack(
        &self,
        out_dir: &Path,
        base_name: &str,
        files_dir: &Path,
        files: &[String],
    ) -> Result<PackedArtifact> {
        let (name, path) = artifact_path(out_dir, base_name, Self::SUFFIX)?;
        let file = File::create(&path).map_err(|e| Error::archive_write(&name, e))?;
        let mut writer = ContainerWriter::new(BufWriter::new(file), self.level);

        let mut uncompressed = 0u64;
        for file_name in files {
            let source = input_path(files_dir, file_name)?;
            let start = Instant::now();
            let data = read_input(&source)?;

            writer
                .add_entry(file_name, &data)
                .map_err(|e| Error::archive_write(&name, e))?;

            uncompressed += data.len() as u64;
            tracing::debug!(
                artifact = %name,
                file = %file_name,
                size = data.len(),
                elapsed = ?start.elapsed(),
                "archived"
            );
        }

        let mut inner = writer
            .finish()
            .map_err(|e| Error::archive_write(&name, e))?;
        inner.flush().map_err(|e| Error::archive_write(&name, e))?;
        drop(inner);

        PackedArtifact::from_disk(name, path, files.len(), uncompressed)
    }
}

/// Central directory record of an entry already written.
struct CentralEntry {
    name: Vec<u8>,
    flags: u16,
    crc32: u32,
    compressed_size: u32,
    uncompressed_size: u32,
    header_offset: u32,
}

/// Sequential zip writer for LZMA entries.
struct ContainerWriter<W: Write> {
    inner: W,
    level: CompressionLevel,
    offset: u64,
    entries: Vec<CentralEntry>,
}

impl<W: Write> ContainerWriter<W> {
    fn new(inner: W, level: CompressionLevel) -> Self {
        Self {
            inner,
            level,
            offset: 0,
            entries: Vec::new(),
        }
    }

    fn add_entry(&mut self, name: &str, data: &[u8]) -> io::Result<()> {
        let payload = encode_entry(data, self.level)?;

        let mut flags = FLAG_LZMA_EOS;
        if !name.is_ascii() {
            flags |= FLAG_UTF8_NAME;
        }

        let entry = CentralEntry {
            name: name.as_bytes().to_vec(),
            flags,
            crc32: crc32fast::hash(data),
            compressed_size: fit_u32(payload.len() as u64, "compressed entry")?,
            uncompressed_size: fit_u32(data.len() as u64, "entry")?,
            header_offset: fit_u32(self.offset, "archive")?,
        };
        let name_len = fit_u16(entry.name.len(), "entry name")?;

        let mut header = Vec::with_capacity(30 + entry.name.len());
        put_u32(&mut header, LOCAL_HEADER_SIGNATURE);
        put_u16(&mut header, VERSION_NEEDED);
        put_u16(&mut header, entry.flags);
        put_u16(&mut header, METHOD_LZMA);
        put_u16(&mut header, DOS_EPOCH_TIME);
        put_u16(&mut header, DOS_EPOCH_DATE);
        put_u32(&mut header, entry.crc32);
        put_u32(&mut header, entry.compressed_size);
        put_u32(&mut header, entry.uncompressed_size);
        put_u16(&mut header, name_len);
        put_u16(&mut header, 0);
        header.extend_from_slice(&entry.name);

        self.write(&header)?;
        self.write(&payload)?;
        self.entries.push(entry);
        Ok(())
    }

    fn finish(mut self) -> io::Result<W> {
        let directory_offset = fit_u32(self.offset, "archive")?;
        let entry_count = fit_u16(self.entries.len(), "entry count")?;

        let mut directory = Vec::new();
        for entry in &self.entries {
            put_u32(&mut directory, CENTRAL_HEADER_SIGNATURE);
            put_u16(&mut directory, VERSION_MADE_BY);
            put_u16(&mut directory, VERSION_NEEDED);
            put_u16(&mut directory, entry.flags);
            put_u16(&mut directory, METHOD_LZMA);
            put_u16(&mut directory, DOS_EPOCH_TIME);
            put_u16(&mut directory, DOS_EPOCH_DATE);
            put_u32(&mut directory, entry.crc32);
            put_u32(&mut directory, entry.compressed_size);
            put_u32(&mut directory, entry.uncompressed_size);
            put_u16(&mut directory, fit_u16(entry.name.len(), "entry name")?);
            put_u16(&mut directory, 0); // extra field length
            put_u16(&mut directory, 0); // comment length
            put_u16(&mut directory, 0); // disk number
            put_u16(&mut directory, 0); // internal attributes
            put_u32(&mut directory, (S_IFREG | NORMALIZED_MODE) << 16);
            put_u32(&mut directory, entry.header_offset);
            directory.extend_from_slice(&entry.name);
        }
        let directory_size = fit_u32(directory.len() as u64, "central directory")?;

        put_u32(&mut directory, END_OF_CENTRAL_DIRECTORY_SIGNATURE);
        put_u16(&mut directory, 0);
        put_u16(&mut directory, 0);
        put_u16(&mut directory, entry_count);
        put_u16(&mut directory, entry_count);
        put_u32(&mut directory, directory_size);
        put_u32(&mut directory, directory_offset);
        put_u16(&mut directory, 0);

        self.write(&directory)?;
        Ok(self.inner)
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)?;
        self.offset += bytes.len() as u64;
        Ok(())
    }
}

/// Compress `data` at preset `level` and prepend the zip LZMA entry header.
fn encode_entry(data: &[u8], level: CompressionLevel) -> io::Result<Vec<u8>> {
    let mut options = LzmaOptions::new_preset(level.get())?;
    // A dictionary larger than the entry buys nothing and costs memory.
    options.dict_size(dict_size_for(data.len()));

    let stream = Stream::new_lzma_encoder(&options)?;
    let mut encoder = XzEncoder::new_stream(
        Vec::with_capacity(data.len() / 2 + LZMA_ALONE_HEADER_LEN),
        stream,
    );
    encoder.write_all(data)?;
    // The `.lzma` header records an unknown size, so the stream ends with an end marker.
    let stream = encoder.finish()?;

    if stream.len() < LZMA_ALONE_HEADER_LEN {
        return Err(io::Error::other("LZMA encoder produced a truncated stream"));
    }

    let mut entry = Vec::with_capacity(stream.len() - 4);
    entry.extend_from_slice(&LZMA_SDK_VERSION);
    entry.extend_from_slice(&(LZMA_PROPS_LEN as u16).to_le_bytes());
    entry.extend_from_slice(&stream[..LZMA_PROPS_LEN]);
    entry.extend_from_slice(&stream[LZMA_ALONE_HEADER_LEN..]);
    Ok(entry)
}

fn dict_size_for(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX).max(MIN_DICT_SIZE)
}

fn put_u16(buf: &mut Vec<u8>, value: u16) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn put_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn fit_u32(value: u64, what: &str) -> io::Result<u32> {
    u32::try_from(value).map_err(|_| io::Error::other(format!("{what} exceeds 4 GiB")))
}

fn fit_u16(value: usize, what: &str) -> io::Result<u16> {
    u16::try_from(value).map_err(|_| io::Error::other(format!("{what} exceeds {}", u16::MAX)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Read;
    use xz2::read::XzDecoder;

    /// Rebuild the `.lzma` header the entry layout drops and decode the stream.
    fn decode_entry(payload: &[u8]) -> Vec<u8> {
        assert_eq!(&payload[2..4], &[5, 0]);
        let mut alone = payload[4..4 + LZMA_PROPS_LEN].to_vec();
        alone.extend_from_slice(&u64::MAX.to_le_bytes());
        alone.extend_from_slice(&payload[4 + LZMA_PROPS_LEN..]);

        let stream = Stream::new_lzma_decoder(u64::MAX).unwrap();
        let mut output = Vec::new();
        XzDecoder::new_stream(alone.as_slice(), stream)
            .read_to_end(&mut output)
            .unwrap();
        output
    }

    fn level(value: u32) -> CompressionLevel {
        CompressionLevel::new(value).unwrap()
    }

    #[test]
    fn test_entry_round_trip() {
        let data = b"import os\nimport sys\n\nprint(os.getcwd())\n".repeat(8);
        let payload = encode_entry(&data, level(9)).unwrap();
        assert_eq!(&payload[..2], &LZMA_SDK_VERSION);
        assert_eq!(decode_entry(&payload), data);
    }

    #[test]
    fn test_empty_entry() {
        let payload = encode_entry(b"", level(9)).unwrap();
        assert!(decode_entry(&payload).is_empty());
    }

    #[test]
    fn test_every_level_decodes() {
        let data = b"def handler(event):\n    return event\n".repeat(64);
        for value in 0..=CompressionLevel::MAX {
            let payload = encode_entry(&data, level(value)).unwrap();
            assert_eq!(decode_entry(&payload), data, "level {value}");
        }
    }

    #[test]
    fn test_repetitive_input_compresses() {
        let data = b"class Handler(object):\n    pass\n".repeat(512);
        let payload = encode_entry(&data, level(9)).unwrap();
        assert!(
            payload.len() * 20 < data.len(),
            "{} bytes from {}",
            payload.len(),
            data.len()
        );
    }

    #[test]
    fn test_dict_size_is_bounded_by_input() {
        assert_eq!(dict_size_for(0), MIN_DICT_SIZE);
        assert_eq!(dict_size_for(100_000), 100_000);
    }

    #[test]
    fn test_container_layout() {
        let mut writer = ContainerWriter::new(Vec::new(), level(6));
        writer.add_entry("a.py", b"a = 1\n").unwrap();
        writer.add_entry("pkg/b.py", b"b = 2\n").unwrap();
        let bytes = writer.finish().unwrap();

        assert_eq!(&bytes[..4], &LOCAL_HEADER_SIGNATURE.to_le_bytes());
        assert_eq!(u16::from_le_bytes([bytes[8], bytes[9]]), METHOD_LZMA);

        // End record: 22 bytes, entry count at offset 10.
        let end = &bytes[bytes.len() - 22..];
        assert_eq!(&end[..4], &END_OF_CENTRAL_DIRECTORY_SIGNATURE.to_le_bytes());
        assert_eq!(u16::from_le_bytes([end[10], end[11]]), 2);
    }

    #[test]
    fn test_info_reports_level() {
        assert_eq!(LzmaZipBackend::new(level(3)).info(), ".lzma.zip with level=3");
    }
}
