pub type Byte = u8;
pub type Word = u16;
pub type SByte = i8;
pub type SWord = i16;
pub type Adr = u16;
