use super::super::types::{Byte, Word, Adr};

/// Byte-addressed 16-bit bus.
///
/// Words are stored most-significant byte first. Addresses for which
/// `is_byte_port` answers true are byte-wide ports: a word read there yields
/// only the port byte (high byte forced to zero) and a word write stores only
/// the low byte.
pub trait BusTrait {
    fn read8(&mut self, adr: Adr) -> Byte;
    fn write8(&mut self, adr: Adr, value: Byte);

    /// Side-effect free read, used by the disassembler.
    fn peek8(&self, adr: Adr) -> Byte;

    fn is_byte_port(&self, _adr: Adr) -> bool { false }

    fn read16(&mut self, adr: Adr) -> Word {
        if self.is_byte_port(adr) {
            return self.read8(adr) as Word;
        }
        let d0 = self.read8(adr) as Word;
        let d1 = self.read8(adr.wrapping_add(1)) as Word;
        (d0 << 8) | d1
    }

    fn write16(&mut self, adr: Adr, value: Word) {
        if self.is_byte_port(adr) {
            self.write8(adr, value as Byte);
            return;
        }
        self.write8(adr,                  (value >> 8) as Byte);
        self.write8(adr.wrapping_add(1),   value       as Byte);
    }

    fn peek16(&self, adr: Adr) -> Word {
        if self.is_byte_port(adr) {
            return self.peek8(adr) as Word;
        }
        let d0 = self.peek8(adr) as Word;
        let d1 = self.peek8(adr.wrapping_add(1)) as Word;
        (d0 << 8) | d1
    }
}
