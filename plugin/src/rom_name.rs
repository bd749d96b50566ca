//! Cartridge name extraction from the 64-byte ROM header.
//!
//! The title field is Shift_JIS in principle, but almost every game sticks to the ASCII
//! subset, so anything outside a small whitelist is replaced with a space. Games with an
//! empty or fully filtered title are named after their four-character game ID instead.

use crate::errors::PluginError;

/// Number of header bytes the adapter exposes to the RDP core.
pub const ROM_HEADER_LEN: usize = 0x40;

/// Logical offset of the 20-byte image name.
const NAME_OFFSET: usize = 32;
const NAME_LEN: usize = 20;

/// Logical offset of the cartridge/game ID used as a fallback name.
const GAME_ID_OFFSET: usize = 59;
const GAME_ID_LEN: usize = 4;

/// The name plus the one guaranteed space that terminates the trim scan.
pub const MIN_NAME_CAPACITY: usize = NAME_LEN + 1;

/// Width of the words the host stores header bytes in.
pub const WORD_SIZE: usize = 4;

/// The mask applied to byte addresses inside 32-bit words (`3` on little-endian hosts).
pub const BYTE_ADDR_XOR: usize = physical_offset(0, WORD_SIZE);

/// Maps a logical (big-endian, linear string order) byte offset to where that byte lives in
/// a host buffer made of native-endian words of `word_size` bytes.
///
/// On big-endian hosts the two orders agree. On little-endian hosts the bytes of every word
/// are reversed, which XOR-ing the low bits of the offset undoes. `word_size` must be a
/// power of two.
pub const fn physical_offset(logical: usize, word_size: usize) -> usize {
    if cfg!(target_endian = "little") {
        logical ^ (word_size - 1)
    } else {
        logical
    }
}

/// Passes ASCII alphanumerics and `_ - .` through unchanged; everything else becomes a space.
pub fn filter_char(c: u8) -> u8 {
    match c {
        b'_' | b'-' | b'.' => c,
        c if c.is_ascii_alphanumeric() => c,
        _ => b' ',
    }
}

fn header_byte(header: &[u8], logical: usize) -> u8 {
    header[physical_offset(logical, WORD_SIZE)]
}

/// Writes the sanitized, NUL-terminated cartridge name into `out` and returns its length.
///
/// `out` must hold at least `MIN_NAME_CAPACITY` bytes, otherwise it's left untouched and
/// `PluginError::InsufficientBuffer` is returned. At most the first `MIN_NAME_CAPACITY`
/// bytes are written. `header` must cover `ROM_HEADER_LEN` bytes.
pub fn extract_rom_name(header: &[u8], out: &mut [u8]) -> Result<usize, PluginError> {
    if out.len() < MIN_NAME_CAPACITY {
        return Err(PluginError::InsufficientBuffer { capacity: out.len() });
    }

    for (i, slot) in out[..NAME_LEN].iter_mut().enumerate() {
        *slot = filter_char(header_byte(header, NAME_OFFSET + i));
    }

    // Guarantees the trim below always has a space to start from.
    out[NAME_LEN] = b' ';

    let mut len = MIN_NAME_CAPACITY;
    while len > 0 && out[len - 1] == b' ' {
        out[len - 1] = 0;
        len -= 1;
    }

    if len == 0 {
        for (i, slot) in out[..GAME_ID_LEN].iter_mut().enumerate() {
            *slot = filter_char(header_byte(header, GAME_ID_OFFSET + i));
        }

        out[GAME_ID_LEN] = 0;
        len = GAME_ID_LEN;
    }

    Ok(len)
}

/// Convenience wrapper around `extract_rom_name` for logging.
pub fn rom_name(header: &[u8]) -> String {
    let mut buf = [0u8; MIN_NAME_CAPACITY];

    match extract_rom_name(header, &mut buf) {
        Ok(len) => String::from_utf8_lossy(&buf[..len]).into_owned(),
        Err(_) => String::new(),
    }
}
