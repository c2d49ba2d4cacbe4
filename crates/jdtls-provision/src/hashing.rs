use sha1::{Digest, Sha1};

/// Lowercase hex SHA-1 of `input`.
pub(crate) fn sha1_hex(input: &[u8]) -> String {
    let mut h = Sha1::new();
    h.update(input);
    hex::encode(h.finalize())
}
