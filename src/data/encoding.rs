//! Text Encoding Module
//! Strict decoders for the encodings the volume file is published in.

use encoding_rs::{EUC_KR, UTF_8};
use serde::{Deserialize, Serialize};
use std::fmt;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Candidate text encoding for the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextEncoding {
    /// UTF-8 with an optional leading byte order mark
    #[serde(rename = "utf-8-sig")]
    Utf8Sig,
    /// Windows code page 949 (Unified Hangul Code)
    #[serde(rename = "cp949")]
    Cp949,
    /// KS X 1001 only, no cp949 extension syllables
    #[serde(rename = "euc-kr")]
    EucKr,
}

impl TextEncoding {
    /// Default fallback order.
    pub const DEFAULT_ORDER: [TextEncoding; 3] =
        [TextEncoding::Utf8Sig, TextEncoding::Cp949, TextEncoding::EucKr];

    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8Sig => "utf-8-sig",
            TextEncoding::Cp949 => "cp949",
            TextEncoding::EucKr => "euc-kr",
        }
    }

    /// Decode bytes, returning `None` on any malformed sequence.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8Sig => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                UTF_8
                    .decode_without_bom_handling_and_without_replacement(body)
                    .map(|text| text.into_owned())
            }
            TextEncoding::Cp949 => EUC_KR
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned()),
            TextEncoding::EucKr => {
                if !is_ks_x_1001(bytes) {
                    return None;
                }
                EUC_KR
                    .decode_without_bom_handling_and_without_replacement(bytes)
                    .map(|text| text.into_owned())
            }
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every non-ASCII byte must belong to a 0xA1..=0xFE lead/trail pair.
fn is_ks_x_1001(bytes: &[u8]) -> bool {
    let in_range = |b: u8| (0xA1..=0xFE).contains(&b);
    let mut iter = bytes.iter().copied();
    while let Some(b) = iter.next() {
        if b < 0x80 {
            continue;
        }
        match iter.next() {
            Some(trail) if in_range(b) && in_range(trail) => {}
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cp949_bytes(text: &str) -> Vec<u8> {
        let (bytes, _, had_errors) = EUC_KR.encode(text);
        assert!(!had_errors);
        bytes.into_owned()
    }

    #[test]
    fn test_utf8_sig_strips_bom() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("년도,항구분".as_bytes());
        assert_eq!(
            TextEncoding::Utf8Sig.decode(&bytes).as_deref(),
            Some("년도,항구분")
        );
    }

    #[test]
    fn test_utf8_sig_rejects_legacy_bytes() {
        let bytes = cp949_bytes("북항");
        assert!(TextEncoding::Utf8Sig.decode(&bytes).is_none());
    }

    #[test]
    fn test_cp949_decodes_korean() {
        let bytes = cp949_bytes("신항,총계");
        assert_eq!(TextEncoding::Cp949.decode(&bytes).as_deref(), Some("신항,총계"));
        assert_eq!(TextEncoding::EucKr.decode(&bytes).as_deref(), Some("신항,총계"));
    }

    #[test]
    fn test_euc_kr_rejects_cp949_extension() {
        // 똠 only exists in the cp949 extension area
        let bytes = cp949_bytes("똠");
        assert!(TextEncoding::Cp949.decode(&bytes).is_some());
        assert!(TextEncoding::EucKr.decode(&bytes).is_none());
    }

    #[test]
    fn test_invalid_bytes_rejected_everywhere() {
        let bytes = [0xFF, 0xFF, 0x41, 0xFF];
        for encoding in TextEncoding::DEFAULT_ORDER {
            assert!(encoding.decode(&bytes).is_none(), "{encoding} accepted garbage");
        }
    }
}
