//! Building and reading tapes for the sample alphabet.
//!
//! The bundled programs work on binary numerals written least-significant
//! bit rightmost: the tape carries a `start` marker at cell 0, then number
//! fields separated by single blanks, with trailing blanks as headroom for
//! numerals that grow during a run.

use crate::types::Sym;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A cell held something other than a digit, a separator, or the
    /// start marker at cell 0.
    #[error("unexpected symbol at cell {index}")]
    UnexpectedSymbol { index: usize },
}

/// Lays out `values` as binary numerals on a fresh tape: the start marker,
/// each numeral followed by one blank separator, then `padding` extra
/// blanks.
///
/// `encode(&[7, 3], 2)` produces the canonical addition input
/// `[start, 1, 1, 1, _, 1, 1, _, _, _]`.
pub fn encode(values: &[u64], padding: usize) -> Vec<Sym> {
    let mut cells = vec![Sym::Start];
    for &value in values {
        cells.extend(bits(value));
        cells.push(Sym::Blank);
    }
    cells.extend(std::iter::repeat(Sym::Blank).take(padding));
    cells
}

/// Reads every number field off a tape: fields are maximal digit runs
/// between blanks, parsed as binary. Empty fields (runs of blanks) are
/// skipped, so trailing headroom does not produce phantom zeros.
pub fn decode(cells: &[Sym]) -> Result<Vec<u64>, DecodeError> {
    let mut values = Vec::new();
    let mut field: Option<u64> = None;

    for (index, &cell) in cells.iter().enumerate() {
        match cell {
            Sym::Start if index == 0 => {}
            Sym::Zero => field = Some(field.unwrap_or(0) << 1),
            Sym::One => field = Some((field.unwrap_or(0) << 1) | 1),
            Sym::Blank => {
                if let Some(value) = field.take() {
                    values.push(value);
                }
            }
            _ => return Err(DecodeError::UnexpectedSymbol { index }),
        }
    }

    if let Some(value) = field {
        values.push(value);
    }

    Ok(values)
}

fn bits(value: u64) -> Vec<Sym> {
    if value == 0 {
        return vec![Sym::Zero];
    }

    let mut digits = Vec::new();
    let mut rest = value;
    while rest > 0 {
        digits.push(if rest & 1 == 1 { Sym::One } else { Sym::Zero });
        rest >>= 1;
    }
    digits.reverse();
    digits
}
