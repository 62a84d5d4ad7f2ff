//! Hash command handler.

use loopy_core::md5_hex;

/// Print the lowercase hex MD5 digest of `input`.
///
/// Needs no context: hashing touches neither the data directory nor
/// location services.
pub fn execute(input: &str) {
    println!("{}", md5_hex(input));
}
