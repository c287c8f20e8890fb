//! Transaction payloads and their canonical encoding.
//!
//! # Canonical form
//! The bytes that get hashed and signed are a compact JSON object with the
//! fields in this exact order:
//!
//! ```text
//! {"sender_public_key":"<hex>","recipient_public_key":"<str>","amount":<num>}
//! ```
//!
//! `amount` is written the way a browser's `JSON.stringify` writes numbers:
//! plain decimal for magnitudes in `[1e-6, 1e21)` (`10`, `0.000001`,
//! `123456789012345680`), exponent form with an explicit sign outside it
//! (`1e+21`, `1e-7`). The server re-derives this string from the posted
//! fields, so the posted body goes through the same encoder.

use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::value::RawValue;

/// Largest exponent written in plain decimal form.
const MAX_PLAIN_DIGITS: i32 = 21;
/// Smallest decimal-point position written in plain decimal form.
const MIN_PLAIN_POINT: i32 = -6;

/// An unsigned transfer awaiting signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub sender_public_key: String,
    pub recipient_public_key: String,
    #[serde(serialize_with = "serialize_amount")]
    pub amount: f64,
}

impl TransactionDraft {
    pub fn new(
        sender_public_key: impl Into<String>,
        recipient_public_key: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            sender_public_key: sender_public_key.into(),
            recipient_public_key: recipient_public_key.into(),
            amount,
        }
    }

    /// The exact string that is hashed for signing.
    pub fn canonical_string(&self) -> String {
        // Field order comes from the struct declaration; serde_json emits no
        // whitespace in compact mode. Serializing plain strings and an f64
        // cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        self.canonical_string().into_bytes()
    }
}

/// A draft together with its signature. Built only by the signer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedTransaction {
    #[serde(flatten)]
    draft: TransactionDraft,
    signature: String,
}

impl SignedTransaction {
    pub(crate) fn new(draft: TransactionDraft, signature: String) -> Self {
        Self { draft, signature }
    }

    pub fn draft(&self) -> &TransactionDraft {
        &self.draft
    }

    /// Lowercase hex of the DER-encoded signature.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Split into parts. Changing the draft afterwards invalidates the signature.
    pub fn into_parts(self) -> (TransactionDraft, String) {
        (self.draft, self.signature)
    }

    /// Body posted to `/transactions/new`.
    pub fn to_request_body(&self) -> SubmitBody<'_> {
        SubmitBody {
            sender_public_key: &self.draft.sender_public_key,
            recipient_public_key: &self.draft.recipient_public_key,
            amount: self.draft.amount,
            signature: &self.signature,
        }
    }
}

/// Wire form of a signed transaction: the canonical fields plus `signature`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SubmitBody<'a> {
    sender_public_key: &'a str,
    recipient_public_key: &'a str,
    #[serde(serialize_with = "serialize_amount")]
    amount: f64,
    signature: &'a str,
}

/// Serialize an amount the same way for hashing and for transmission.
///
/// The number is emitted as a raw JSON token so serde_json's own float
/// formatting never gets a say.
pub fn serialize_amount<S: Serializer>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    let token = RawValue::from_string(format_amount(*amount)).map_err(S::Error::custom)?;
    token.serialize(serializer)
}

/// ECMAScript `Number.prototype.toString` rendering of an amount.
///
/// Non-finite values become `null`, as `JSON.stringify` writes them.
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return "null".to_string();
    }
    if amount == 0.0 {
        // Covers -0 as well
        return "0".to_string();
    }
    if amount < 0.0 {
        return format!("-{}", format_amount(-amount));
    }

    // Shortest round-trip digits in scientific form, e.g. "1.2345678901234568e17"
    let scientific = format!("{:e}", amount);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    // Position of the decimal point relative to the first digit
    let n = exponent + 1;

    if k <= n && n <= MAX_PLAIN_DIGITS {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= MAX_PLAIN_DIGITS {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{}.{}", int_part, frac_part)
    } else if MIN_PLAIN_POINT < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let (first, rest) = digits.split_at(1);
        let fraction = if rest.is_empty() {
            String::new()
        } else {
            format!(".{}", rest)
        };
        let sign = if exponent >= 0 { '+' } else { '-' };
        format!("{}{}e{}{}", first, fraction, sign, exponent.abs())
    }
}
