//! Small string helpers: prefix checks, truncation, number formatting, random keys.

use rand::seq::SliceRandom;

/// Default limit used by [`shorten_string`].
pub const DEFAULT_SHORTEN_LENGTH: usize = 40;
/// Default length used by [`generate_key`].
pub const DEFAULT_KEY_LENGTH: usize = 10;

const KEY_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ELLIPSIS: &str = "...";
/// Precision a double carries reliably; rounding works on this many digits.
const SIGNIFICANT_DIGITS: usize = 15;

/// True if `s` begins with `prefix`. An empty prefix matches everything.
pub fn starts_with(s: &str, prefix: &str) -> bool {
  s.starts_with(prefix)
}

/// Truncate `s` to at most `max` characters, appending `...` when something was cut.
///
/// Counts Unicode scalar values, so multi-byte text is never split mid-character.
pub fn shorten_string(s: &str, max: usize) -> String {
  match s.char_indices().nth(max) {
    Some((cut, _)) => format!("{}{}", &s[..cut], ELLIPSIS),
    None => s.to_string(),
  }
}

/// Format a number with exactly two decimals and `,` as thousands separator.
///
/// `1234.5` -> `"1,234.50"`. Halves round away from zero on the decimal
/// value as written (`3.005` -> `"3.01"`), not on its binary approximation.
/// Negative values that round to zero render as `"0.00"`.
pub fn two_decimal(value: f64) -> String {
  if !value.is_finite() {
    return two_decimal(0.0);
  }
  let (int_part, frac_part) = round_cents(value.abs());

  let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
  for (i, ch) in int_part.chars().enumerate() {
    if i > 0 && (int_part.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(ch);
  }

  let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.bytes().all(|b| b == b'0');
  let sign = if value.is_sign_negative() && !is_zero { "-" } else { "" };
  format!("{sign}{grouped}.{frac_part}")
}

/// Integer and two-digit fraction of a non-negative finite `abs`.
///
/// The value is first reduced to 15 significant digits, then rounded half up
/// at the second decimal on those digits.
fn round_cents(abs: f64) -> (String, String) {
  if abs >= 1e15 {
    // No fractional digits survive at this magnitude.
    let fixed = format!("{abs:.2}");
    return match fixed.split_once('.') {
      Some((int_part, frac_part)) => (int_part.to_string(), frac_part.to_string()),
      None => (fixed, "00".to_string()),
    };
  }

  let sci = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, abs);
  let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
  let exp: i64 = exp.parse().unwrap_or(0);
  let digits: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).map(|b| b - b'0').collect();

  // Number of leading digits that land left of the cut at 1/100.
  let keep = exp + 1 + 2;
  let cents: u64 = if keep < 0 {
    0
  } else {
    let keep = keep as usize;
    let kept = digits.iter().take(keep).fold(0u64, |acc, &d| acc * 10 + u64::from(d));
    let kept = kept * 10u64.pow(keep.saturating_sub(digits.len()) as u32);
    match digits.get(keep) {
      Some(&next) if next >= 5 => kept + 1,
      _ => kept,
    }
  };
  ((cents / 100).to_string(), format!("{:02}", cents % 100))
}

/// Like [`two_decimal`] but for raw input such as a form field.
///
/// Only the leading number is read, the way a loose numeric cast does:
/// `"12abc"` -> `"12.00"`. Input without a leading number is treated as `0`.
pub fn two_decimal_str(raw: &str) -> String {
  two_decimal(leading_number(raw).parse::<f64>().unwrap_or(0.0))
}

/// Longest prefix of `raw` (after leading whitespace) that reads as a decimal
/// number: sign, digits, optional fraction, optional exponent.
fn leading_number(raw: &str) -> &str {
  let s = raw.trim_start();
  let b = s.as_bytes();
  let digits_from = |mut i: usize| {
    while i < b.len() && b[i].is_ascii_digit() {
      i += 1;
    }
    i
  };

  let mut end = if matches!(b.first(), Some(b'+' | b'-')) { 1 } else { 0 };
  let int_end = digits_from(end);
  let mut has_digits = int_end > end;
  end = int_end;
  if b.get(end) == Some(&b'.') {
    let frac_end = digits_from(end + 1);
    if frac_end > end + 1 || has_digits {
      has_digits |= frac_end > end + 1;
      end = frac_end;
    }
  }
  if !has_digits {
    return "";
  }
  if matches!(b.get(end), Some(b'e' | b'E')) {
    let sign = usize::from(matches!(b.get(end + 1), Some(b'+' | b'-')));
    let exp_end = digits_from(end + 1 + sign);
    if exp_end > end + 1 + sign {
      end = exp_end;
    }
  }
  &s[..end]
}

/// Random alphanumeric key of `len` distinct characters.
///
/// Characters are drawn without replacement, so the result is at most 62 long.
pub fn generate_key(len: usize) -> String {
  let mut rng = rand::thread_rng();
  KEY_ALPHABET
    .choose_multiple(&mut rng, len)
    .map(|&b| b as char)
    .collect()
}
