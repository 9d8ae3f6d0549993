//! Shared plumbing for the 32-byte digest identifiers.

use crate::error::{TypeError, TypeResult};

/// Decode a 64-character hex string into a 32-byte digest.
pub(crate) fn decode_digest(s: &str) -> TypeResult<[u8; 32]> {
    let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
    if bytes.len() != 32 {
        return Err(TypeError::InvalidLength {
            expected: 32,
            actual: bytes.len(),
        });
    }
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&bytes);
    Ok(arr)
}

/// Accessors, hex parsing and `Debug`/`Display` for a `[u8; 32]` newtype.
///
/// `$prefix` is the display prefix (`step` renders as `step:abababab`), and
/// is also accepted, but not required, by `from_hex`.
macro_rules! digest_ref {
    ($name:ident, $prefix:literal) => {
        impl $name {
            /// Wrap a pre-computed 32-byte digest.
            pub fn from_hash(hash: [u8; 32]) -> Self {
                Self(hash)
            }

            /// The raw 32-byte digest.
            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            /// Hex-encoded string representation.
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }

            /// Short hex representation (first 8 characters).
            pub fn short_hex(&self) -> String {
                hex::encode(&self.0[..4])
            }

            #[doc = concat!(
                "Parse from a hex string, with or without the `",
                $prefix,
                ":` prefix."
            )]
            pub fn from_hex(s: &str) -> $crate::error::TypeResult<Self> {
                let s = s.strip_prefix(concat!($prefix, ":")).unwrap_or(s);
                $crate::digest::decode_digest(s).map(Self)
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.short_hex())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.short_hex())
            }
        }
    };
}

pub(crate) use digest_ref;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_length_digest() {
        let hex = "01".repeat(32);
        assert_eq!(decode_digest(&hex), Ok([1u8; 32]));
    }

    #[test]
    fn rejects_overlong_digest() {
        let hex = "01".repeat(33);
        assert_eq!(
            decode_digest(&hex),
            Err(TypeError::InvalidLength {
                expected: 32,
                actual: 33
            })
        );
    }
}
