//! No-std compatible decimal formatting and parsing for protocol lines.
//!
//! These functions write numbers directly to byte buffers without
//! requiring heap allocation or the standard library.

/// Write a u16 as an unsigned decimal string.
///
/// Returns the number of bytes written (1-5 bytes).
///
/// # Panics
///
/// Panics if `buf.len() < 5` (max size: "65535").
#[inline]
pub fn write_u16(buf: &mut [u8], value: u16) -> usize {
    debug_assert!(buf.len() >= 5, "buffer too small for u16");

    if value == 0 {
        buf[0] = b'0';
        return 1;
    }

    // Digits come out least significant first
    let mut temp = [0u8; 5];
    let mut n = value;
    let mut len = 0;
    while n > 0 {
        temp[len] = b'0' + (n % 10) as u8;
        n /= 10;
        len += 1;
    }

    for i in 0..len {
        buf[i] = temp[len - 1 - i];
    }

    len
}

/// Parse an unsigned decimal string as u16.
///
/// Rejects empty input, signs, whitespace, and values above `u16::MAX`.
#[inline]
pub fn parse_u16(s: &[u8]) -> Option<u16> {
    if s.is_empty() {
        return None;
    }

    let mut value: u16 = 0;
    for &b in s {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value.checked_mul(10)?.checked_add((b - b'0') as u16)?;
    }

    Some(value)
}

/// Trim leading and trailing ASCII whitespace (including CR and LF).
#[inline]
pub fn trim(line: &[u8]) -> &[u8] {
    let start = line
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(line.len());
    let end = line
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &line[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_u16() {
        let mut buf = [0u8; 5];

        let len = write_u16(&mut buf, 0);
        assert_eq!(&buf[..len], b"0");

        let len = write_u16(&mut buf, 7);
        assert_eq!(&buf[..len], b"7");

        let len = write_u16(&mut buf, 512);
        assert_eq!(&buf[..len], b"512");

        let len = write_u16(&mut buf, 1023);
        assert_eq!(&buf[..len], b"1023");

        let len = write_u16(&mut buf, u16::MAX);
        assert_eq!(&buf[..len], b"65535");
    }

    #[test]
    fn test_parse_u16() {
        assert_eq!(parse_u16(b"0"), Some(0));
        assert_eq!(parse_u16(b"1023"), Some(1023));
        assert_eq!(parse_u16(b"65535"), Some(65535));
        assert_eq!(parse_u16(b"65536"), None);
        assert_eq!(parse_u16(b""), None);
        assert_eq!(parse_u16(b"-1"), None);
        assert_eq!(parse_u16(b" 1"), None);
        assert_eq!(parse_u16(b"1a"), None);
    }

    #[test]
    fn test_trim() {
        assert_eq!(trim(b"  GET_CONFIG \r\n"), b"GET_CONFIG");
        assert_eq!(trim(b"\tabc"), b"abc");
        assert_eq!(trim(b"abc"), b"abc");
        assert_eq!(trim(b"   "), b"");
        assert_eq!(trim(b""), b"");
        assert_eq!(trim(b"a b"), b"a b");
    }
}
