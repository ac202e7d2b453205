use std::path::Path;

use crate::foundation::error::{TraceError, TraceResult};
use crate::path::model::{PolarSample, ThetaRhoPath};

/// Parse theta-rho text into a path.
///
/// One `theta rho` pair per line, separated by any run of whitespace; extra tokens are ignored.
/// Lines whose first non-whitespace character is `#` are comments. Each of the first two tokens is
/// read by its leading number, so `12px` is 12. Blank lines, lines with fewer than two tokens, and
/// lines where either token has no leading number are dropped without error, so this never fails
/// and may return an empty path.
#[tracing::instrument(skip(text), fields(bytes = text.len()))]
pub fn parse_coordinates(text: &str) -> ThetaRhoPath {
    let mut samples = Vec::new();
    let mut dropped = 0usize;

    for line in text.lines() {
        let line = line.trim_start();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_line(line) {
            Some(sample) => samples.push(sample),
            None => dropped += 1,
        }
    }

    tracing::debug!(samples = samples.len(), dropped, "parsed theta-rho text");
    ThetaRhoPath::new(samples)
}

fn parse_line(line: &str) -> Option<PolarSample> {
    let mut tokens = line.split_whitespace();
    let theta = parse_number(tokens.next()?)?;
    let rho = parse_number(tokens.next()?)?;
    Some(PolarSample::new(theta, rho))
}

/// Read the longest leading decimal number of `token`, ignoring whatever follows it.
///
/// `"1.5abc"` reads as 1.5 and `"1,5"` as 1. The only infinity spelling is `Infinity` (optionally
/// signed); `inf`, `nan` and tokens without a leading number yield `None`.
fn parse_number(token: &str) -> Option<f64> {
    let token = token.trim_start();
    let (sign, rest) = match token.as_bytes().first() {
        Some(b'-') => (-1.0, &token[1..]),
        Some(b'+') => (1.0, &token[1..]),
        _ => (1.0, token),
    };
    if rest.starts_with("Infinity") {
        return Some(sign * f64::INFINITY);
    }
    let len = decimal_prefix_len(rest.as_bytes())?;
    rest[..len]
        .parse::<f64>()
        .ok()
        .map(|v| sign * v)
        .filter(|v| !v.is_nan())
}

/// Byte length of the `digits [. digits] [e [sign] digits]` prefix, or `None` without any
/// mantissa digit. An exponent marker with no digits after it is not part of the prefix.
fn decimal_prefix_len(bytes: &[u8]) -> Option<usize> {
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let int_digits = digits_from(0);
    let mut end = int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits_from(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }
    Some(end)
}

/// Read and parse a theta-rho file.
///
/// Invalid UTF-8 is replaced rather than rejected; only an unreadable file is an error.
#[tracing::instrument]
pub fn read_path_file(path: &Path) -> TraceResult<ThetaRhoPath> {
    let bytes = std::fs::read(path).map_err(|e| {
        TraceError::input(format!("failed to read path file '{}': {e}", path.display()))
    })?;
    Ok(parse_coordinates(&String::from_utf8_lossy(&bytes)))
}

#[cfg(test)]
#[path = "../../tests/unit/path/parse.rs"]
mod tests;
