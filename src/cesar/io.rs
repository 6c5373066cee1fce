//! Keyboard and display helpers over the memory mapped I/O area.

use super::super::cpu::Cpu;
use super::super::cpu::memory::{KEYBOARD_STATE, KEYBOARD_INPUT, DISPLAY_START, DISPLAY_END};
use super::super::types::{Byte};

pub const KEY_READY: Byte = 0x80;

/// Offers a key to the program. The key is taken only when the previous
/// one was consumed, i.e. the state byte is 0. Returns whether it was.
pub fn press_key(cpu: &mut Cpu, ascii: Byte) -> bool {
    if cpu.memory_byte(KEYBOARD_STATE) != 0 {
        return false;
    }
    cpu.set_byte(KEYBOARD_INPUT, ascii);
    cpu.set_byte(KEYBOARD_STATE, KEY_READY);
    true
}

/// The 36 display cells as text.
pub fn display_text(cpu: &Cpu) -> String {
    (DISPLAY_START..=DISPLAY_END)
        .map(|adr| {
            let b = cpu.memory_byte(adr);
            if (0x20..0x7f).contains(&b) { b as char } else { ' ' }
        })
        .collect()
}
