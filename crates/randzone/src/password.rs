use crate::RandSource;
use core::fmt;

const DIGITS: &str = "0123456789";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SPECIALS: &str = "!@#$%^&*()-_=+[]{};:,.<>?";

/// Which character classes a generated password may draw from.
///
/// Classes are concatenated in a fixed order (digits, lowercase, uppercase,
/// specials) when building the sampling charset.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordOptions {
    pub length: usize,
    pub digits: bool,
    pub lowercase: bool,
    pub uppercase: bool,
    pub special: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: 16,
            digits: true,
            lowercase: true,
            uppercase: true,
            special: true,
        }
    }
}

/// Concatenates the enabled character classes in fixed class order. Empty
/// when no class is enabled.
pub fn build_charset(options: &PasswordOptions) -> String {
    let mut charset = String::new();
    if options.digits {
        charset.push_str(DIGITS);
    }
    if options.lowercase {
        charset.push_str(LOWERCASE);
    }
    if options.uppercase {
        charset.push_str(UPPERCASE);
    }
    if options.special {
        charset.push_str(SPECIALS);
    }
    charset
}

/// Draws `options.length` independent CSPRNG-indexed characters from the
/// built charset. Returns an empty string when the charset is empty or the
/// length is zero.
///
/// Sampling is independent per character: a password is not guaranteed to
/// contain at least one character from every enabled class. Class coverage
/// holds only in aggregate.
pub fn generate_password<R: RandSource<u32>>(rng: &R, options: &PasswordOptions) -> String {
    let charset: Vec<char> = build_charset(options).chars().collect();
    if charset.is_empty() || options.length == 0 {
        return String::new();
    }
    (0..options.length)
        .map(|_| charset[rng.rand() as usize % charset.len()])
        .collect()
}

/// Password strength tiers, ordered weakest to strongest.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PasswordStrength {
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl PasswordStrength {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Weak => "Weak",
            Self::Moderate => "Moderate",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very Strong",
        }
    }
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Additive strength score, up to 7 points: one each for length thresholds
/// 8/12/16 and one each for containing a lowercase letter, an uppercase
/// letter, a digit, and a non-alphanumeric character.
pub fn password_score(password: &str) -> u32 {
    let mut score = 0;
    for threshold in [8, 12, 16] {
        if password.len() >= threshold {
            score += 1;
        }
    }
    if password.chars().any(|c| c.is_ascii_lowercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 1;
    }
    score
}

/// Maps [`password_score`] onto a tier by fixed thresholds.
pub fn password_strength(password: &str) -> PasswordStrength {
    match password_score(password) {
        0..=2 => PasswordStrength::Weak,
        3..=4 => PasswordStrength::Moderate,
        5 => PasswordStrength::Strong,
        _ => PasswordStrength::VeryStrong,
    }
}
