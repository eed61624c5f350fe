use crate::Signer;

/// Query signature keyed by the homepage `gtk` value (`"<high>.<low>"`).
///
/// Operates on UTF-16 code units with 32-bit wrapping arithmetic so the
/// result matches what the service computes in the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct GtkSigner;

const ROUND_OPS: &[u8] = b"+-a^+6";
const FINAL_OPS: &[u8] = b"+-3^+b+-f";

impl GtkSigner {
    pub fn new() -> Self {
        Self
    }
}

impl Signer for GtkSigner {
    fn sign(&self, query: &str, signing_key: &str) -> Option<String> {
        let (high, low) = parse_key(signing_key)?;

        let mut acc = high;
        for byte in utf8_bytes(&truncate(query)) {
            acc += i64::from(byte);
            acc = mix(acc, ROUND_OPS);
        }
        acc = mix(acc, FINAL_OPS);
        acc = i64::from(acc as i32 ^ low as i32);
        if acc < 0 {
            acc = (acc & 0x7fff_ffff) + 0x8000_0000;
        }
        acc %= 1_000_000;

        Some(format!("{}.{}", acc, acc as i32 ^ high as i32))
    }
}

/// Both halves are wrapped to 32 bits, as the browser does on first use
fn parse_key(key: &str) -> Option<(i64, i64)> {
    let (high, low) = key.trim().split_once('.')?;
    let high: i64 = high.parse().ok()?;
    let low: i64 = low.parse().ok()?;
    Some((i64::from(high as i32), i64::from(low as i32)))
}

/// Long queries are sampled: first 10, middle 10 and last 10 characters.
///
/// Counted in code points, so an astral character is never split; without
/// one this is the same as counting UTF-16 units.
fn truncate(query: &str) -> Vec<u16> {
    let chars: Vec<char> = query.chars().collect();
    let len = chars.len();
    if len <= 30 {
        return query.encode_utf16().collect();
    }

    let mid = len / 2 - 5;
    chars[..10]
        .iter()
        .chain(&chars[mid..mid + 10])
        .chain(&chars[len - 10..])
        .collect::<String>()
        .encode_utf16()
        .collect()
}

/// UTF-8 encode code units; a surrogate split by truncation is encoded alone
fn utf8_bytes(units: &[u16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(units.len() * 3);
    let mut i = 0;
    while i < units.len() {
        let mut code = u32::from(units[i]);
        if code < 0x80 {
            bytes.push(code as u8);
        } else {
            if code < 0x800 {
                bytes.push((code >> 6 | 0xc0) as u8);
            } else {
                let paired = code & 0xfc00 == 0xd800
                    && i + 1 < units.len()
                    && units[i + 1] & 0xfc00 == 0xdc00;
                if paired {
                    i += 1;
                    code = 0x10000 + ((code & 0x3ff) << 10) + (u32::from(units[i]) & 0x3ff);
                    bytes.push((code >> 18 | 0xf0) as u8);
                    bytes.push((code >> 12 & 0x3f | 0x80) as u8);
                } else {
                    bytes.push((code >> 12 | 0xe0) as u8);
                }
                bytes.push((code >> 6 & 0x3f | 0x80) as u8);
            }
            bytes.push((code & 0x3f | 0x80) as u8);
        }
        i += 1;
    }
    bytes
}

/// Each op is three bytes: combine (`+` add, else xor), shift (`+` logical
/// right, else left) and the amount as a base-36 digit
fn mix(mut acc: i64, ops: &[u8]) -> i64 {
    for op in ops.chunks_exact(3) {
        let amount = if op[2] >= b'a' {
            u32::from(op[2] - b'a' + 10)
        } else {
            u32::from(op[2] - b'0')
        };
        let shifted = if op[1] == b'+' {
            i64::from((acc as u32) >> amount)
        } else {
            i64::from((acc as i32).wrapping_shl(amount))
        };
        acc = if op[0] == b'+' {
            i64::from((acc + shifted) as i32)
        } else {
            i64::from(acc as i32 ^ shifted as i32)
        };
    }
    acc
}
