//! Binary decoder for the CPK format
//!
//! Decoding is all-or-nothing: either a complete [`Package`] is returned or a
//! [`DecodeError`] carrying the byte offset of the first problem found.

mod entry;
mod primitives;
mod string;
mod value;

use crate::error::DecodeError;
use crate::types::{Package, SUPPORTED_VERSIONS};
use entry::parse_entries;
use primitives::{Input, PResult, WireErrorKind, fail, to_decode_error, u16_le, u32_le};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Default nesting limit; root entries are at depth 1
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Decoder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Deepest nesting level accepted before failing with
    /// [`DecodeError::DepthLimitExceeded`]. Open containers are kept on a heap
    /// stack, so the limit bounds memory rather than call-stack use.
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecoderConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Package decoder. Holds no state besides its configuration.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode a package that spans all of `bytes`
    pub fn decode(&self, bytes: &[u8]) -> Result<Package, DecodeError> {
        let (package, consumed) = self.decode_prefix(bytes)?;
        if consumed < bytes.len() {
            return Err(DecodeError::TrailingData {
                count: (bytes.len() - consumed) as u64,
                offset: consumed as u64,
            });
        }
        Ok(package)
    }

    /// Decode a package at the start of `bytes`, returning it together with
    /// the number of bytes it occupied
    pub fn decode_prefix(&self, bytes: &[u8]) -> Result<(Package, usize), DecodeError> {
        match parse_package(bytes, &self.config) {
            Ok((rest, package)) => Ok((package, bytes.len() - rest.len())),
            Err(e) => Err(to_decode_error(e, bytes.len())),
        }
    }

    /// Read `reader` to the end and decode its contents
    pub fn decode_reader<R: Read>(&self, mut reader: R) -> Result<Package, DecodeError> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        self.decode(&buf)
    }

    /// Open, read and decode the file at `path`
    pub fn decode_file(&self, path: impl AsRef<Path>) -> Result<Package, DecodeError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let package = self.decode_reader(BufReader::new(file))?;
        tracing::debug!(
            path = %path.display(),
            entries = package.root().len(),
            "decoded package"
        );
        Ok(package)
    }
}

/// Decode a package spanning all of `bytes` with the default configuration
pub fn decode(bytes: &[u8]) -> Result<Package, DecodeError> {
    Decoder::default().decode(bytes)
}

/// Decode a package read from `reader` with the default configuration
pub fn decode_reader<R: Read>(reader: R) -> Result<Package, DecodeError> {
    Decoder::default().decode_reader(reader)
}

/// Decode the package file at `path` with the default configuration
pub fn decode_file(path: impl AsRef<Path>) -> Result<Package, DecodeError> {
    Decoder::default().decode_file(path)
}

fn parse_package<'a>(input: Input<'a>, config: &DecoderConfig) -> PResult<'a, Package> {
    let start = input;
    let (input, version) = u16_le(input)?;
    if !SUPPORTED_VERSIONS.contains(&version) {
        return Err(fail(start, WireErrorKind::UnsupportedVersion(version)));
    }
    let (input, content_type) = u16_le(input)?;
    let (input, flags) = u32_le(input)?;
    let (input, root) = parse_entries(input, config, 1)?;
    Ok((input, Package::with_version(version, content_type, flags, root)))
}
