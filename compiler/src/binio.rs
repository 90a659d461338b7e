//! Byte-oriented input and output.
//!
//! C-INTERCAL performs character I/O on tails using the "Turing
//! text" model.  `WRITE IN` on a tail stores, for each character, the
//! difference between it and the previous character read (modulo
//! 256).  `READ OUT` on a tail takes each element away from the
//! previous output value, reverses the bits of the 8-bit result and
//! prints that.  [`BinaryIo`] tracks the previous input and output
//! values in the generated program so that callers can deal in plain
//! bytes.
use tracing::{event, Level};

use base::prelude::{reverse_bits, ConstructionError, Expr, Kind, Reference};

use super::session::Session;

/// The masks and distances of the three swaps which reverse the bits
/// of a byte: nibbles, then bit pairs, then single bits.
const REVERSAL_STAGES: [(u16, u32); 3] = [(0x0F, 4), (0x33, 2), (0x55, 1)];

const BYTE_MASK: u16 = 0xFF;

/// The elements `1..=length` of `array`.  Built before anything is
/// emitted, so that a spot is rejected without touching the listing.
fn elements(array: Reference, length: u16) -> Result<Vec<Expr>, ConstructionError> {
    if array.kind() != Kind::Tail {
        return Err(ConstructionError::NotAnArray(array));
    }
    (1..=length).map(|i| array.index(i)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryIo {
    last_input: Reference,
    last_output: Reference,
    output_buffer: Reference,
    scratch: Reference,
}

impl BinaryIo {
    /// Allocate (and emit the initialisation of) the cells used for
    /// byte I/O in `session`.
    ///
    /// # Errors
    ///
    /// Fails when the session runs out of variable names.
    pub fn new(session: &mut Session) -> Result<BinaryIo, ConstructionError> {
        let last_input = session.spot_with(0)?;
        let last_output = session.spot_with(0)?;
        let output_buffer = session.tail_with(1)?;
        let scratch = session.spot()?;
        event!(
            Level::DEBUG,
            "byte I/O uses {last_input} (input), {last_output} (output), {output_buffer} (buffer)"
        );
        Ok(BinaryIo {
            last_input,
            last_output,
            output_buffer,
            scratch,
        })
    }

    /// Read `length` bytes into the elements `1..=length` of `array`,
    /// which must already have (at least) that dimension.  Each element
    /// ends up holding the byte itself.
    ///
    /// # Errors
    ///
    /// Fails if `array` is not a tail, in which case nothing is
    /// emitted.
    pub fn read_bytes(
        &self,
        session: &mut Session,
        array: Reference,
        length: u16,
    ) -> Result<(), ConstructionError> {
        let elements = elements(array, length)?;
        session.read_into(array);
        for element in elements {
            session.add(&element, self.last_input, &element);
            session.assign(&element, element.clone().and(BYTE_MASK));
            session.assign(self.last_input, &element);
        }
        Ok(())
    }

    /// Interpret the elements `1..=length` of `array` as the ASCII
    /// digits of a binary number, most significant digit first, and
    /// store the number in `destination`.  Only the low bit of each
    /// element is looked at.
    ///
    /// # Errors
    ///
    /// Fails if `array` is not a tail, in which case nothing is
    /// emitted.
    pub fn parse_bits(
        &self,
        session: &mut Session,
        destination: Reference,
        array: Reference,
        length: u16,
    ) -> Result<(), ConstructionError> {
        let elements = elements(array, length)?;
        session.assign(destination, 0);
        for element in elements {
            let bit = element.and(1);
            session.assign(destination, Expr::from(destination).shift_left(1).or(bit));
        }
        Ok(())
    }

    /// Print a single byte known when the program is generated.
    pub fn write_char(&self, session: &mut Session, byte: u8) {
        let reversed = u16::from(reverse_bits(byte));
        self.emit_reversed(session, Expr::Constant(reversed));
    }

    /// Print each byte of `text`.
    pub fn write_str(&self, session: &mut Session, text: &str) {
        for byte in text.bytes() {
            self.write_char(session, byte);
        }
    }

    /// Print a byte computed at run time.  `value` must lie in
    /// 0..=255.
    pub fn write_byte<V: Into<Expr>>(&self, session: &mut Session, value: V) {
        session.assign(self.scratch, value);
        for (low, places) in REVERSAL_STAGES {
            let high = (low << places) & BYTE_MASK;
            let current = Expr::from(self.scratch);
            let swapped = current
                .clone()
                .and(low)
                .shift_left(places)
                .or(current.and(high).shift_right(places));
            session.assign(self.scratch, swapped);
        }
        self.emit_reversed(session, Expr::from(self.scratch));
    }

    fn emit_reversed(&self, session: &mut Session, reversed: Expr) {
        // The tail element has to hold last_output - reversed, so that
        // READ OUT computes last_output - element = reversed.
        let element = Expr::Subscript {
            array: self.output_buffer,
            index: Box::new(Expr::Constant(1)),
        };
        session.subtract(&element, self.last_output, &reversed);
        session.write_out(self.output_buffer);
        session.assign(self.last_output, reversed);
    }
}
