//! Builders for OpenPGP signature packets used as test fixtures.

/// Detached v4 signature (binary) whose hashed area names `fpr` as issuer.
pub fn v4_signature(fpr: &[u8; 20]) -> Vec<u8> {
    let mut issuer = vec![22, 33, 4];
    issuer.extend_from_slice(fpr);
    let mut created = vec![5, 2];
    created.extend_from_slice(&1_700_000_000u32.to_be_bytes());
    let hashed: Vec<u8> = issuer.into_iter().chain(created).collect();

    let mut body = vec![4, 0x00, 1, 8];
    body.extend_from_slice(&(hashed.len() as u16).to_be_bytes());
    body.extend_from_slice(&hashed);
    body.extend_from_slice(&[0, 0]); // no unhashed subpackets
    body.extend_from_slice(&[0xde, 0xad]);
    body.extend_from_slice(&[0x00, 0x10, 0xbe, 0xef]);

    let mut out = vec![0x89];
    out.extend_from_slice(&(body.len() as u16).to_be_bytes());
    out.extend(body);
    out
}

/// Parse 40 hex characters into fingerprint bytes.
pub fn fpr_bytes(hex: &str) -> [u8; 20] {
    let mut out = [0u8; 20];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).unwrap();
    }
    out
}
