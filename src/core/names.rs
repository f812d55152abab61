// Fixed-width identifiers used as lookup keys

use std::borrow::Cow;
use std::fmt;

macro_rules! fixed_name {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name([u8; $len]);

        impl $name {
            pub const LEN: usize = $len;

            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Builds a name from text, space padded to the full width.
            /// Returns `None` when the text does not fit.
            pub fn padded(text: &str) -> Option<Self> {
                let src = text.as_bytes();
                if src.len() > $len {
                    return None;
                }
                let mut bytes = [b' '; $len];
                bytes[..src.len()].copy_from_slice(src);
                Some(Self(bytes))
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Display form with trailing padding removed.
            pub fn trimmed(&self) -> Cow<'_, str> {
                let end = self
                    .0
                    .iter()
                    .rposition(|b| *b != b' ' && *b != 0)
                    .map_or(0, |i| i + 1);
                String::from_utf8_lossy(&self.0[..end])
            }

            /// Exact comparison against `text` padded to the full width.
            pub fn is(&self, text: &str) -> bool {
                Self::padded(text).map_or(false, |other| other == *self)
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = std::array::TryFromSliceError;

            fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                <[u8; $len]>::try_from(bytes).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.trimmed())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), String::from_utf8_lossy(&self.0))
            }
        }
    };
}

fixed_name!(
    /// Class of simulation entities, e.g. `FIELD   `.
    ClassName,
    8
);
fixed_name!(
    /// Named entity inside a class, e.g. `NETWORK `.
    InstanceName,
    8
);
fixed_name!(
    /// Per-class variable short name, e.g. `QOP `.
    VarName,
    4
);
