use alloc::vec::Vec;
use core::fmt;
use core::ops::Deref;

/// An owned CBOR document.
///
/// Empty by default, converts losslessly from and into `Vec<u8>`.
///
/// # Examples
///
/// ```
/// use ac_cbor::CborBytes;
///
/// let bytes = CborBytes::from(vec![0xD9, 0xD9, 0xF7]);
/// assert_eq!(format!("{bytes:?}"), "CborBytes(D9-D9-F7)");
/// assert_eq!(Vec::from(bytes), [0xD9, 0xD9, 0xF7]);
///
/// assert!(CborBytes::default().is_empty());
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct CborBytes(Vec<u8>);

impl CborBytes {
    #[inline]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for CborBytes {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for CborBytes {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for CborBytes {
    #[inline]
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for CborBytes {
    #[inline]
    fn from(value: &[u8]) -> Self {
        Self(value.into())
    }
}

impl From<CborBytes> for Vec<u8> {
    #[inline]
    fn from(value: CborBytes) -> Self {
        value.0
    }
}

impl PartialEq<[u8]> for CborBytes {
    #[inline]
    fn eq(&self, other: &[u8]) -> bool {
        self.0 == other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for CborBytes {
    #[inline]
    fn eq(&self, other: &[u8; N]) -> bool {
        self.0 == other
    }
}

/// Upper case hex, bytes separated by `-`.
impl fmt::Debug for CborBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CborBytes(")?;
        for (index, byte) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("-")?;
            }
            write!(f, "{byte:02X}")?;
        }
        f.write_str(")")
    }
}
