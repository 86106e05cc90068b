//! Descriptive-metadata codec
//!
//! Sizing-only view of the on-account token metadata entry. The wire encoding
//! is length-prefixed: a fixed update-authority + mint prefix, then each
//! string as a 4-byte little-endian length followed by its bytes, then the
//! additional pairs as a counted list of (key, value) strings. The actual
//! content writing is delegated to the metadata instructions; this module
//! only answers "how many bytes will that entry occupy".

/// Byte budget for the encoded token name.
pub const MAX_NAME_LEN: usize = 32;
/// Byte budget for the encoded token symbol.
pub const MAX_SYMBOL_LEN: usize = 10;
/// Byte budget for the encoded metadata uri.
pub const MAX_URI_LEN: usize = 200;

/// Update authority and mint address, both fixed 32-byte fields.
const FIXED_PREFIX_LEN: usize = 64;
/// Little-endian u32 length prefix on every string and on the pair list.
const LEN_PREFIX: usize = 4;
/// Type+length header of the metadata TLV entry itself.
const TLV_HEADER_LEN: usize = 4;

/// Descriptive metadata attached to a mint.
///
/// Encoded length is a pure function of this value; two equal specs always
/// size identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataSpec {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    /// Additional (key, value) pairs, written in attachment order
    pub additional: Vec<(String, String)>,
}

impl MetadataSpec {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            uri: uri.into(),
            additional: Vec::new(),
        }
    }

    /// Append one additional key/value pair.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional.push((key.into(), value.into()));
        self
    }

    /// Length of the encoded metadata value, excluding the TLV header.
    pub fn encoded_len(&self) -> usize {
        let strings = LEN_PREFIX + self.name.len()
            + LEN_PREFIX + self.symbol.len()
            + LEN_PREFIX + self.uri.len();
        let pairs: usize = self
            .additional
            .iter()
            .map(|(k, v)| LEN_PREFIX + k.len() + LEN_PREFIX + v.len())
            .sum();
        FIXED_PREFIX_LEN + strings + LEN_PREFIX + pairs
    }

    /// Full TLV footprint of the metadata entry: header plus encoded value.
    pub fn tlv_len(&self) -> usize {
        TLV_HEADER_LEN + self.encoded_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_strings_still_carry_prefixes() {
        let spec = MetadataSpec::new("", "", "");
        // 64 fixed + 3 string prefixes + empty pair list prefix
        assert_eq!(spec.encoded_len(), 64 + 12 + 4);
        assert_eq!(spec.tlv_len(), spec.encoded_len() + 4);
    }

    #[test]
    fn each_pair_adds_both_prefixed_strings() {
        let base = MetadataSpec::new("Tok", "TK", "https://x");
        let with = base.clone().with_field("tier", "gold");
        assert_eq!(
            with.encoded_len(),
            base.encoded_len() + 4 + "tier".len() + 4 + "gold".len()
        );
    }

    #[test]
    fn sizing_is_deterministic() {
        let a = MetadataSpec::new("Tok", "TK", "https://x").with_field("a", "b");
        let b = MetadataSpec::new("Tok", "TK", "https://x").with_field("a", "b");
        assert_eq!(a.encoded_len(), b.encoded_len());
    }

    #[test]
    fn length_counts_bytes_not_chars() {
        let spec = MetadataSpec::new("é", "", "");
        assert_eq!(spec.encoded_len(), 64 + 4 + 2 + 4 + 4 + 4);
    }
}
