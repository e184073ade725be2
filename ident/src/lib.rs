//! Switch identifiers shared between the store and the request layer.
//!
//! An identifier is at most [`ID_LEN`] characters drawn from the 62-character
//! [`ALPHABET`]. Freshly generated identifiers always use the full length.

pub mod id;

pub use id::{ALPHABET, ID_LEN, InvalidId, PASSWORD_LEN, SwitchId, is_valid};

/// Returns the ident crate version string.
pub fn ident_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_matches_pkg() {
        assert_eq!(ident_version(), env!("CARGO_PKG_VERSION"));
    }
}
