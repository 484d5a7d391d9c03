//! Numeric field decoder
//!
//! Extracts one floating-point literal from a command line. This does not
//! go through `str::parse`: digits are collected into an integer and the
//! decimal point is tracked as a base-10 exponent, which keeps the float
//! work to at most two multiplications for typical G-code values (E0 to
//! E-4).
//!
//! Scientific notation is not recognized. `E` is a G-code word letter on
//! some machines, so it terminates the number like any other letter.
//!
//! # Limitations
//!
//! At most [`MAX_INT_DIGITS`] significant digits are kept, leading zeros
//! included. Further digits before the decimal point become trailing zeros
//! (not rounded); further digits after it are dropped. G-code values stay
//! well inside this range, but the decoder is not a general-purpose float
//! parser.

use grblwire_core::DecodeError;

/// Maximum number of digits accumulated into the integer part
pub const MAX_INT_DIGITS: u32 = 8;

/// A decoded numeric field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericField {
    /// Decoded value
    pub value: f32,
    /// Offset of the first character after the number
    pub end: usize,
}

/// Decode the number starting at `cursor` in `line`
///
/// Accepts an optional sign, then digits with at most one decimal point.
/// Scanning stops at the first other character, which is not consumed.
/// Fails when no digit was found; the cursor is then meaningless to the
/// caller, which reports a bad number format.
pub fn read_float(line: &[u8], cursor: usize) -> Result<NumericField, DecodeError> {
    let bytes = line.get(cursor..).unwrap_or_default();
    let mut idx = 0;

    let is_negative = match bytes.first() {
        Some(b'-') => {
            idx += 1;
            true
        }
        Some(b'+') => {
            idx += 1;
            false
        }
        _ => false,
    };

    let mut integer_value: u32 = 0;
    let mut exponent: i32 = 0;
    let mut num_digits: u32 = 0;
    let mut is_decimal = false;

    while let Some(&ch) = bytes.get(idx) {
        if ch.is_ascii_digit() {
            num_digits += 1;
            if num_digits <= MAX_INT_DIGITS {
                if is_decimal {
                    exponent -= 1;
                }
                integer_value = integer_value * 10 + u32::from(ch - b'0');
            } else if !is_decimal {
                // Overflow digit before the point: keep the magnitude.
                exponent += 1;
            }
        } else if ch == b'.' && !is_decimal {
            is_decimal = true;
        } else {
            break;
        }
        idx += 1;
    }

    if num_digits == 0 {
        return Err(DecodeError::NoDigits { position: cursor });
    }

    let mut value = integer_value as f32;
    if value != 0.0 {
        while exponent <= -2 {
            value *= 0.01;
            exponent += 2;
        }
        if exponent < 0 {
            value *= 0.1;
        } else {
            while exponent > 0 {
                value *= 10.0;
                exponent -= 1;
            }
        }
    }

    Ok(NumericField {
        value: if is_negative { -value } else { value },
        end: cursor + idx,
    })
}
