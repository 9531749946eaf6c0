//! Session code generation.
//!
//! Session codes are 6-character strings using Crockford's Base32 alphabet,
//! short enough to share verbally and free of look-alike characters.

use rand::Rng;

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ"; // no I, L, O, U

pub const SESSION_CODE_LEN: usize = 6;

/// Generate a candidate session code.
///
/// Uniqueness is not guaranteed here; callers must insert the code into the
/// session store and retry on collision.
pub fn generate_session_code() -> String {
    let mut rng = rand::rng();
    let mut code = String::with_capacity(SESSION_CODE_LEN);
    for _ in 0..SESSION_CODE_LEN {
        code.push(CROCKFORD[rng.random_range(0..CROCKFORD.len())] as char);
    }
    code
}
