//! Digit arrays and the sign transform.

use std::fmt::Display;

use ndarray::{Array1, Array2};
use tracing::debug;

use crate::error::{BitsError, BitsResult};

/// Line width at which [`format_array`] wraps, matching numpy's default.
const LINE_WIDTH: usize = 75;

/// Map each ASCII digit to its value: `"1010"` → `[1, 0, 1, 0]`.
pub fn digits_to_u8(digits: &str) -> BitsResult<Array1<u8>> {
    digits
        .chars()
        .enumerate()
        .map(|(position, ch)| match ch {
            '0'..='9' => Ok(ch as u8 - b'0'),
            _ => Err(BitsError::InvalidDigit { ch, position }),
        })
        .collect::<BitsResult<Vec<u8>>>()
        .map(Array1::from)
}

/// Reshape a copy of `values` to `(rows, cols)`.
///
/// Callers drop the result; `values` itself is never modified. A shape that
/// does not hold exactly `values.len()` elements is an error.
pub fn reshape_discarded(values: &Array1<u8>, (rows, cols): (usize, usize)) -> BitsResult<Array2<u8>> {
    let reshaped = values
        .to_shape((rows, cols))
        .map_err(|_| BitsError::Shape {
            len: values.len(),
            rows,
            cols,
        })?
        .to_owned();
    debug!(?reshaped, "reshaped copy discarded");
    Ok(reshaped)
}

/// Negate every value, then replace zeros by one: `[1, 0, 2]` → `[-1, 1, -2]`.
pub fn sign_transform(values: &Array1<u8>) -> Array1<i16> {
    let mut signs = values.mapv(|v| -i16::from(v));
    signs.mapv_inplace(|s| if s == 0 { 1 } else { s });
    signs
}

/// Print a 1-D array the way numpy does: `[-1  1 -1  1]`.
///
/// Elements are right-aligned to the widest one and separated by a space.
/// Lines longer than 75 characters wrap with a one-space indent.
pub fn format_array<T: Display>(values: &Array1<T>) -> String {
    let items: Vec<String> = values.iter().map(ToString::to_string).collect();
    let width = items.iter().map(String::len).max().unwrap_or(0);

    let mut out = String::from("[");
    let mut line_len = 1;
    for (i, item) in items.iter().enumerate() {
        let cell = format!("{item:>width$}");
        if i > 0 {
            // Room for the separator, the cell and a closing bracket.
            if line_len + 1 + cell.len() + 1 > LINE_WIDTH {
                out.push_str("\n ");
                line_len = 1;
            } else {
                out.push(' ');
                line_len += 1;
            }
        }
        out.push_str(&cell);
        line_len += cell.len();
    }
    out.push(']');
    out
}
