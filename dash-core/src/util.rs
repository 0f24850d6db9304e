use heapless::String;
use micromath::F32Ext;

use crate::devices::{Key, Mac};
use crate::Error;

const ONE_POINT: f32 = 10_f32;
const TWO_POINT: f32 = 100_f32;

/// Truncates (not rounds) a reading to one or two decimals, the way the
/// panel shows it.
pub fn digits(from: f32, two_point: bool) -> f32 {
    let prec: f32 = if two_point { TWO_POINT } else { ONE_POINT };
    (from * prec).trunc() / prec
}

pub fn format_mac(mac: &Mac) -> String<17> {
    let mut out = String::new();
    for (index, byte) in mac.iter().enumerate() {
        if index > 0 {
            let _ = out.push(':');
        }
        push_hex(&mut out, *byte);
    }
    out
}

pub fn format_key(key: &Key) -> String<32> {
    let mut out = String::new();
    for byte in key {
        push_hex(&mut out, *byte);
    }
    out.make_ascii_uppercase();
    out
}

/// Six digit, zero padded PIN.
pub fn format_pin(pin: u32) -> String<6> {
    let mut out = String::new();
    let mut divisor = 100_000;
    while divisor > 0 {
        let digit = (pin / divisor % 10) as u8;
        let _ = out.push((b'0' + digit) as char);
        divisor /= 10;
    }
    out
}

/// Accepts `aa:bb:cc:dd:ee:ff`, dash separated or bare hex.
pub fn parse_mac(s: &str) -> Result<Mac, Error> {
    let mut hex_digits = String::<12>::new();
    for c in s.trim().chars().filter(|c| !matches!(c, ':' | '-')) {
        hex_digits.push(c).map_err(|_| Error::InvalidMac)?;
    }
    let mut mac = [0u8; 6];
    hex::decode_to_slice(hex_digits.as_bytes(), &mut mac).map_err(|_| Error::InvalidMac)?;
    Ok(mac)
}

pub fn parse_key(s: &str) -> Result<Key, Error> {
    let mut key = [0u8; 16];
    hex::decode_to_slice(s.trim(), &mut key).map_err(|_| Error::InvalidKey)?;
    Ok(key)
}

/// Copies as much of `s` as fits, never splitting a character.
pub fn truncated<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

fn push_hex<const N: usize>(out: &mut String<N>, byte: u8) {
    let mut pair = [0u8; 2];
    if hex::encode_to_slice([byte], &mut pair).is_ok() {
        for c in pair {
            let _ = out.push(c as char);
        }
    }
}
