use super::flags::{FLAG_N, FLAG_Z, FLAG_V, FLAG_C};
use super::super::types::{Byte, Word, SByte, Adr};

// "NZVC" order, unset bits omitted.
pub fn cc_letters(bits: Byte) -> String {
    [(FLAG_N, 'N'), (FLAG_Z, 'Z'), (FLAG_V, 'V'), (FLAG_C, 'C')].iter()
        .filter(|(flag, _)| (bits & flag) != 0)
        .map(|(_, c)| *c)
        .collect()
}

// PC relative target of a signed byte offset.
pub fn branch_target(pc: Adr, ofs: SByte) -> Adr {
    pc.wrapping_add(ofs as Word)
}

#[test]
fn test_cc_letters() {
    assert_eq!("", cc_letters(0));
    assert_eq!("NZVC", cc_letters(0x0f));
    assert_eq!("ZC", cc_letters(0x05));
    assert_eq!("NV", cc_letters(0xfa));
}

#[test]
fn test_branch_target() {
    assert_eq!(0x0012, branch_target(0x0010, 2));
    assert_eq!(0x000e, branch_target(0x0010, -2));
    assert_eq!(0xfffe, branch_target(0x0000, -2));
}
