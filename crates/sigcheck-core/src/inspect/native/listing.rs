//! Render parsed packets in the `gpg --list-packets` text layout.

use std::fmt::Write as _;

use sequoia_openpgp as openpgp;

use openpgp::packet::signature::subpacket::{Subpacket, SubpacketArea, SubpacketValue};
use openpgp::packet::{Signature, Tag};
use openpgp::serialize::MarshalInto;
use openpgp::{Fingerprint, KeyID};

fn packet_name(tag: Tag) -> &'static str {
    match u8::from(tag) {
        1 => "pubkey enc",
        2 => "signature",
        3 => "symkey enc",
        4 => "onepass_sig",
        5 => "secret key",
        6 => "public key",
        7 => "secret sub key",
        8 => "compressed",
        9 => "encrypted",
        10 => "marker",
        11 => "literal data",
        12 => "trust",
        13 => "user ID",
        14 => "public sub key",
        17 => "attribute",
        18 => "encrypted mdc",
        19 => "mdc",
        _ => "unknown",
    }
}

/// Key version implied by the fingerprint length.
fn fingerprint_version(fpr: &Fingerprint) -> u8 {
    match fpr.as_bytes().len() {
        20 => 4,
        32 => 5,
        _ => 0,
    }
}

fn describe_subpacket(value: &SubpacketValue) -> String {
    match value {
        SubpacketValue::SignatureCreationTime(t) => format!("sig created {}", u32::from(*t)),
        SubpacketValue::Issuer(id) => format!("issuer key ID {}", id.to_hex()),
        SubpacketValue::IssuerFingerprint(fpr) => {
            format!("issuer fpr v{} {}", fingerprint_version(fpr), fpr.to_hex())
        }
        other => match other.to_vec() {
            Ok(d) if d.len() <= 16 => format!("data: {}", hex::encode(d)),
            Ok(d) => format!("data: [{} bytes]", d.len()),
            Err(_) => "data: [unserializable]".to_string(),
        },
    }
}

fn write_subpacket(out: &mut String, area: &str, sp: &Subpacket) {
    let _ = writeln!(
        out,
        "\t{}{area} {} len {} ({})",
        if sp.critical() { "critical " } else { "" },
        u8::from(sp.tag()),
        sp.value().serialized_len(),
        describe_subpacket(sp.value())
    );
}

fn write_area(out: &mut String, area: &str, subpackets: &SubpacketArea) {
    for sp in subpackets.iter() {
        write_subpacket(out, area, sp);
    }
}

/// Key ID of the issuer: an issuer subpacket, else derived from an issuer fingerprint.
fn issuer_key_id(sig: &Signature) -> String {
    sig.issuers()
        .next()
        .cloned()
        .or_else(|| sig.issuer_fingerprints().next().map(KeyID::from))
        .map(|id| id.to_hex())
        .unwrap_or_else(|| "0000000000000000".to_string())
}

fn creation_time(sig: &Signature) -> u32 {
    sig.hashed_area()
        .iter()
        .chain(sig.unhashed_area().iter())
        .find_map(|sp| match sp.value() {
            SubpacketValue::SignatureCreationTime(t) => Some(u32::from(*t)),
            _ => None,
        })
        .unwrap_or(0)
}

pub(crate) fn render_signature(out: &mut String, sig: &Signature) {
    let version = sig.version();
    let prefix = sig.digest_prefix();
    let _ = writeln!(
        out,
        ":signature packet: algo {}, keyid {}",
        u8::from(sig.pk_algo()),
        issuer_key_id(sig)
    );
    let _ = writeln!(
        out,
        "\tversion {version}, created {}, md5len {}, sigclass 0x{:02x}",
        creation_time(sig),
        if version == 3 { 5 } else { 0 },
        u8::from(sig.typ())
    );
    let _ = writeln!(
        out,
        "\tdigest algo {}, begin of digest {:02x} {:02x}",
        u8::from(sig.hash_algo()),
        prefix[0],
        prefix[1]
    );
    write_area(out, "hashed subpkt", sig.hashed_area());
    write_area(out, "subpkt", sig.unhashed_area());
}

pub(crate) fn render_other(out: &mut String, tag: Tag) {
    let _ = writeln!(out, ":{} packet:", packet_name(tag));
}
