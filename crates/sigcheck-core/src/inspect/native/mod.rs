//! Built-in packet inspector.
//!
//! Parses an armored or binary OpenPGP file with sequoia and prints a listing
//! in the gpg layout. Only metadata is read; signatures are not
//! cryptographically verified.

mod listing;

use std::path::Path;

use sequoia_openpgp as openpgp;

use openpgp::parse::{PacketParser, PacketParserResult, Parse};
use openpgp::Packet;

use super::{InspectError, PacketInspector};

/// Pure-Rust packet listing; needs no external tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeInspector;

impl PacketInspector for NativeInspector {
    fn name(&self) -> &str {
        "native"
    }

    fn list_packets(&self, path: &Path) -> Result<String, InspectError> {
        let data = std::fs::read(path).map_err(|source| InspectError::Read {
            path: path.display().to_string(),
            source,
        })?;
        list_packets_bytes(&data)
    }
}

fn malformed(e: impl std::fmt::Display) -> InspectError {
    InspectError::Malformed(e.to_string())
}

/// List the packets in `data`. ASCII armor is detected and decoded.
///
/// Fails if the data holds no parseable signature packet.
pub fn list_packets_bytes(data: &[u8]) -> Result<String, InspectError> {
    let mut out = String::new();
    let mut signatures = 0;
    let mut ppr = PacketParser::from_bytes(data).map_err(malformed)?;
    while let PacketParserResult::Some(pp) = ppr {
        match &pp.packet {
            Packet::Signature(sig) => {
                signatures += 1;
                listing::render_signature(&mut out, sig);
            }
            Packet::Unknown(u) => {
                return Err(malformed(format_args!("{} packet: {}", u.tag(), u.error())));
            }
            other => listing::render_other(&mut out, other.tag()),
        }
        let (_, next) = pp.next().map_err(malformed)?;
        ppr = next;
    }
    if signatures == 0 {
        return Err(malformed("no signature packet found"));
    }
    Ok(out)
}
