use crate::RandSource;

/// Returns a string of `digits` decimal digits drawn from the CSPRNG.
///
/// The first digit is drawn from 1-9 so the numeric reading is unambiguously
/// `digits` long; the rest are drawn from 0-9. One random byte per digit,
/// reduced by modulo (see the bias note on
/// [`FairnessEngine::secure_random_int`]).
///
/// [`FairnessEngine::secure_random_int`]: crate::FairnessEngine::secure_random_int
pub fn generate_secure_digits<R: RandSource<u8>>(rng: &R, digits: usize) -> String {
    let mut out = String::with_capacity(digits);
    for i in 0..digits {
        let byte = rng.rand();
        let digit = if i == 0 { 1 + byte % 9 } else { byte % 10 };
        out.push(char::from(b'0' + digit));
    }
    out
}
