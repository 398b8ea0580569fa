//! ---
//! hostsim_section: "05-wire-formats"
//! hostsim_subsection: "module"
//! hostsim_type: "source"
//! hostsim_scope: "code"
//! hostsim_description: "Remote-write wire types for generated time series."
//! hostsim_version: "v0.1.0"
//! hostsim_owner: "tbd"
//! ---
use std::io::{self, Read, Write};

use prost::Message;

use crate::{Result, WireError, WriteRequest};

/// Protobuf encode `request` and compress it with snappy block format,
/// the body a remote-write receiver expects.
pub fn encode_write_request(request: &WriteRequest) -> Result<Vec<u8>> {
    let proto = request.encode_to_vec();
    let mut encoder = snap::raw::Encoder::new();
    Ok(encoder.compress_vec(&proto)?)
}

pub fn decode_write_request(body: &[u8]) -> Result<WriteRequest> {
    let mut decoder = snap::raw::Decoder::new();
    let proto = decoder.decompress_vec(body)?;
    Ok(WriteRequest::decode(proto.as_slice())?)
}

/// Write `payload` preceded by its length as a big-endian `u32`.
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> Result<()> {
    let len = u32::try_from(payload.len()).map_err(|_| WireError::FrameTooLarge(payload.len()))?;
    writer.write_all(&len.to_be_bytes())?;
    writer.write_all(payload)?;
    Ok(())
}

/// Iterates length-prefixed frames produced by [`write_frame`].
#[derive(Debug)]
pub struct FrameReader<R> {
    inner: R,
}

impl<R: Read> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Next frame, or `None` on a clean end of stream.
    pub fn next_frame(&mut self) -> Result<Option<Vec<u8>>> {
        let mut prefix = [0u8; 4];
        match self.inner.read_exact(&mut prefix) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(err) => return Err(err.into()),
        }
        let expected = u32::from_be_bytes(prefix) as usize;
        let mut payload = Vec::new();
        (&mut self.inner)
            .take(expected as u64)
            .read_to_end(&mut payload)?;
        if payload.len() != expected {
            return Err(WireError::TruncatedFrame {
                expected,
                actual: payload.len(),
            });
        }
        Ok(Some(payload))
    }
}

impl<R: Read> Iterator for FrameReader<R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame().transpose()
    }
}
