//! Memory image files: a 4 byte header followed by the whole memory.

use std::fs;
use std::path::Path;

use log::{debug, warn};

use super::super::cpu::Cpu;
use super::super::cpu::memory::{MEMORY_SIZE};
use super::super::error::{CesarError, Result};
use super::super::types::{Byte, Adr};

pub const HEADER: [Byte; 4] = [0x03, 0x52, 0x4d, 0x53];
pub const IMAGE_SIZE: usize = HEADER.len() + MEMORY_SIZE;

/// Validates a memory image and returns its 64K body.
///
/// Only the size is checked; a foreign header is logged and accepted.
pub fn parse_image(bytes: &[Byte]) -> Result<Vec<Byte>> {
    if bytes.len() != IMAGE_SIZE {
        return Err(CesarError::InvalidImageSize { expected: IMAGE_SIZE, actual: bytes.len() });
    }
    if bytes[..HEADER.len()] != HEADER {
        warn!("unexpected image header {:02x?}", &bytes[..HEADER.len()]);
    }
    Ok(bytes[HEADER.len()..].to_vec())
}

pub fn load_image<P: AsRef<Path>>(path: P) -> Result<Vec<Byte>> {
    let bytes = fs::read(path.as_ref())?;
    debug!("read {} bytes from {}", bytes.len(), path.as_ref().display());
    parse_image(&bytes)
}

pub fn save_image<P: AsRef<Path>>(path: P, cpu: &Cpu) -> Result<()> {
    let mut bytes = Vec::with_capacity(IMAGE_SIZE);
    bytes.extend_from_slice(&HEADER);
    bytes.extend_from_slice(cpu.memory().as_slice());
    fs::write(path, bytes)?;
    Ok(())
}

/// Copies `image[start..=end]` to memory at `target`, clipped at the top
/// of the address space.
pub fn load_partial(cpu: &mut Cpu, image: &[Byte], start: Adr, end: Adr, target: Adr) {
    cpu.set_memory_range(image, start, end, target);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_with(program: &[Byte]) -> Vec<Byte> {
        let mut bytes = HEADER.to_vec();
        bytes.extend_from_slice(program);
        bytes.resize(IMAGE_SIZE, 0);
        bytes
    }

    #[test]
    fn rejects_wrong_size() {
        match parse_image(&[0x03, 0x52, 0x4d, 0x53, 0x00]) {
            Err(CesarError::InvalidImageSize { expected, actual }) => {
                assert_eq!(65540, expected);
                assert_eq!(5, actual);
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn accepts_foreign_header() {
        let mut bytes = image_with(&[0xf0]);
        bytes[0] = 0;
        let body = parse_image(&bytes).unwrap();
        assert_eq!(MEMORY_SIZE, body.len());
        assert_eq!(0xf0, body[0]);
    }

    #[test]
    fn save_then_load() {
        let path = std::env::temp_dir().join(format!("cesar-image-{}.mem", std::process::id()));
        let mut cpu = Cpu::new();
        cpu.set_memory(&[0x80, 0x01, 0xf0]);
        save_image(&path, &cpu).unwrap();
        let body = load_image(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(&[0x80, 0x01, 0xf0, 0x00], &body[..4]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("cesar-image-does-not-exist.mem");
        assert!(matches!(load_image(&path), Err(CesarError::Io(_))));
    }

    #[test]
    fn partial_load_is_clipped() {
        let body = parse_image(&image_with(&[0x11, 0x22, 0x33, 0x44])).unwrap();
        let mut cpu = Cpu::new();
        load_partial(&mut cpu, &body, 0, 3, 0xfffe);
        assert_eq!(0x11, cpu.memory_byte(0xfffe));
        assert_eq!(0x22, cpu.memory_byte(0xffff));
        assert_eq!(0x00, cpu.memory_byte(0x0000));
        assert_eq!(0x22, cpu.original_byte(0xffff));
    }
}
