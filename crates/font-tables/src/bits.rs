//! Bit-string encoding used for flag fields (`"00000001 01000000"`).

/// Format the low `width` bits of `value`, most significant first, in groups of eight.
pub fn format_bits(value: u32, width: u32) -> String {
    (0..width)
        .rev()
        .map(|bit| if value >> bit & 1 == 1 { '1' } else { '0' })
        .collect::<Vec<_>>()
        .chunks(8)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a bit string, ignoring whitespace between groups.
pub fn parse_bits(text: &str) -> Option<u32> {
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.is_empty() || digits.len() > 32 {
        return None;
    }
    u32::from_str_radix(&digits, 2).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bits() {
        assert_eq!(format_bits(0x0140, 16), "00000001 01000000");
        assert_eq!(format_bits(0x0121, 16), "00000001 00100001");
        assert_eq!(format_bits(1, 32), "00000000 00000000 00000000 00000001");
    }

    #[test]
    fn test_parse_bits() {
        assert_eq!(parse_bits("00000001 00000001"), Some(0x0101));
        assert_eq!(parse_bits("  1 0 "), Some(2));
        assert_eq!(parse_bits("2"), None);
        assert_eq!(parse_bits(""), None);
    }
}
