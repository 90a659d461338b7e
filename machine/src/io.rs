//! Input and output in the C-INTERCAL manner.
//!
//! Numbers are read as spelled-out digits (`ONE TWO THREE`) and
//! written as Roman numerals.  Tails are read and written using the
//! "Turing text" model, in which the array elements hold differences
//! between successive characters rather than the characters
//! themselves.
use tracing::{event, Level};

use base::prelude::reverse_bits;

use super::alarm::Fault;

/// What Turing text input stores into an element once the input is
/// exhausted.
pub const END_OF_INPUT: u16 = 256;

const DIGIT_WORDS: [(&str, u32); 12] = [
    ("ZERO", 0),
    ("OH", 0),
    ("ONE", 1),
    ("TWO", 2),
    ("THREE", 3),
    ("FOUR", 4),
    ("FIVE", 5),
    ("SIX", 6),
    ("SEVEN", 7),
    ("EIGHT", 8),
    ("NINE", 9),
    ("NINER", 9),
];

const NUMERALS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

fn digit_value(word: &str) -> Option<u32> {
    let upper = word.to_ascii_uppercase();
    DIGIT_WORDS
        .iter()
        .find(|(spelling, _)| *spelling == upper)
        .map(|(_, value)| *value)
}

/// Plain Roman numerals (empty for zero).
#[must_use]
pub fn roman(mut n: u32) -> String {
    let mut result = String::new();
    for (value, numeral) in NUMERALS {
        while n >= value {
            result.push_str(numeral);
            n -= value;
        }
    }
    result
}

/// The two lines which `READ OUT` prints for a number: a line of
/// overbars (each multiplying the numeral beneath it by 1000) and the
/// numeral itself.  Zero is written as a lone overbar.
#[must_use]
pub fn numeral_lines(n: u32) -> String {
    if n == 0 {
        return "_\n\n".to_string();
    }
    // Below 4000 the thousands are written with plain Ms.
    let (barred, plain) = if n < 4000 {
        (String::new(), roman(n))
    } else {
        (roman(n / 1000), roman(n % 1000))
    };
    format!(
        "{}{}\n{barred}{plain}\n",
        "_".repeat(barred.len()),
        " ".repeat(plain.len())
    )
}

/// The unread part of the program's input.
#[derive(Debug)]
pub struct Input<'a> {
    bytes: &'a [u8],
    position: usize,
    last_byte: u8,
}

impl<'a> Input<'a> {
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Input<'a> {
        Input {
            bytes,
            position: 0,
            last_byte: 0,
        }
    }

    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.bytes.get(self.position).copied();
        if byte.is_some() {
            self.position += 1;
        }
        byte
    }

    fn next_line(&mut self) -> Option<&'a [u8]> {
        let rest = &self.bytes[self.position..];
        if rest.is_empty() {
            return None;
        }
        match rest.iter().position(|b| *b == b'\n') {
            Some(end) => {
                self.position += end + 1;
                Some(&rest[..end])
            }
            None => {
                self.position = self.bytes.len();
                Some(rest)
            }
        }
    }

    /// Read one line of spelled-out digits.
    ///
    /// # Errors
    ///
    /// Fails at the end of the input, if a word is not a digit, or if
    /// the number doesn't fit in 16 bits.
    pub fn read_number(&mut self) -> Result<u16, Fault> {
        let line = self.next_line().ok_or(Fault::EndOfInput)?;
        let text = String::from_utf8_lossy(line);
        let mut value: u32 = 0;
        let mut digits = 0;
        for word in text.split_whitespace() {
            let digit = digit_value(word).ok_or_else(|| Fault::NotADigit(word.to_string()))?;
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit))
                .ok_or(Fault::ValueTooLarge(u32::MAX))?;
            digits += 1;
        }
        if digits == 0 {
            return Err(Fault::NotADigit(text.trim().to_string()));
        }
        event!(Level::TRACE, "read number {value}");
        u16::try_from(value).map_err(|_| Fault::ValueTooLarge(value))
    }

    /// Fill `elements` with Turing text input.
    pub fn read_text(&mut self, elements: &mut [u16]) {
        for element in elements.iter_mut() {
            *element = match self.next_byte() {
                Some(byte) => {
                    let difference = byte.wrapping_sub(self.last_byte);
                    self.last_byte = byte;
                    u16::from(difference)
                }
                None => END_OF_INPUT,
            };
        }
    }
}

/// Everything the program has printed so far.
#[derive(Debug, Default)]
pub struct Output {
    bytes: Vec<u8>,
    last_text: u8,
}

impl Output {
    #[must_use]
    pub fn new() -> Output {
        Output::default()
    }

    pub fn write_number(&mut self, n: u32) {
        self.bytes.extend_from_slice(numeral_lines(n).as_bytes());
    }

    /// Write the Turing text held in `elements`.
    pub fn write_text(&mut self, elements: &[u16]) {
        for element in elements {
            // Only the low 8 bits of the element matter.
            let low = element.to_le_bytes()[0];
            let current = self.last_text.wrapping_sub(low);
            self.bytes.push(reverse_bits(current));
            self.last_text = current;
        }
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
