pub mod addressing;
mod bus_trait;
mod cpu;
pub mod disasm;
mod execute;
mod flags;
pub mod memory;
mod mnemonics;
pub mod opcode;
pub mod registers;
mod util;

pub use self::bus_trait::BusTrait;
pub use self::cpu::{Cpu, ExecutionResult};
pub use self::flags::{ConditionFlags, FLAG_C, FLAG_N, FLAG_V, FLAG_Z};
pub use self::memory::Memory;
pub use self::mnemonics::{Cell, MnemonicTable};
