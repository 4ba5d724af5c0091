//! `SQL_ID` computation
//!
//! The id is the MD5 digest of the statement text plus a trailing NUL byte.
//! Only the last 8 digest bytes are used: two little-endian 32 bit words,
//! combined high word first and printed as 13 base-32 symbols.

use callsig_core::{CallsigError, Result};
use std::str::FromStr;

/// Length of a statement fingerprint
pub const SQL_ID_LENGTH: usize = 13;

/// Base-32 alphabet without `e`, `i`, `l` and `o`
pub const SQL_ID_ALPHABET: &[u8; 32] = b"0123456789abcdfghjkmnpqrstuvwxyz";

/// A statement fingerprint
///
/// # Examples
///
/// ```
/// use callsig_routines::Fingerprint;
///
/// let id = Fingerprint::of("SELECT * from dual where dummy = :1 ");
/// assert_eq!(id.as_str(), "71hmmykrsa7wp");
/// assert_eq!(id.to_string().parse::<Fingerprint>().unwrap(), id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint a statement
    pub fn of(statement: &str) -> Self {
        Self::from_value(folded_digest(statement))
    }

    fn from_value(mut value: u64) -> Self {
        let mut symbols = [' '; SQL_ID_LENGTH];
        for slot in symbols.iter_mut().rev() {
            *slot = char::from(SQL_ID_ALPHABET[(value & 0x1f) as usize]);
            value >>= 5;
        }
        Self(symbols.iter().collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Fingerprint {
    type Err = CallsigError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = s
            .chars()
            .find(|c| !c.is_ascii() || !SQL_ID_ALPHABET.contains(&(*c as u8)));
        if let Some(c) = invalid {
            return Err(CallsigError::InvalidFingerprint(format!(
                "'{}' is not a fingerprint symbol",
                c
            )));
        }
        // Every symbol is ASCII from here on, so bytes and characters agree.
        if s.len() != SQL_ID_LENGTH {
            return Err(CallsigError::InvalidFingerprint(format!(
                "expected {} characters, got {}",
                SQL_ID_LENGTH,
                s.len()
            )));
        }
        // 13 symbols carry 65 bits, the leading symbol can only encode 0..=15.
        if SQL_ID_ALPHABET
            .iter()
            .position(|b| *b == s.as_bytes()[0])
            .is_some_and(|idx| idx >= 16)
        {
            return Err(CallsigError::InvalidFingerprint(format!(
                "'{}' exceeds 64 bits",
                s
            )));
        }

        Ok(Self(s.to_string()))
    }
}

/// Compute the `SQL_ID` of a statement
///
/// # Examples
///
/// ```
/// use callsig_routines::sql_id;
///
/// assert_eq!(sql_id("select * from dual"), "a5ks9fhw2v9s1");
/// ```
pub fn sql_id(statement: &str) -> String {
    Fingerprint::of(statement).to_string()
}

/// Compute the `HASH_VALUE` of a statement, the low word of its `SQL_ID`
pub fn sql_hash_value(statement: &str) -> u32 {
    folded_digest(statement) as u32
}

fn folded_digest(statement: &str) -> u64 {
    let mut ctx = md5::Context::new();
    ctx.consume(statement.as_bytes());
    ctx.consume([0]);
    let digest = ctx.compute().0;

    let high = u32::from_le_bytes([digest[8], digest[9], digest[10], digest[11]]);
    let low = u32::from_le_bytes([digest[12], digest[13], digest[14], digest[15]]);
    (u64::from(high) << 32) | u64::from(low)
}
