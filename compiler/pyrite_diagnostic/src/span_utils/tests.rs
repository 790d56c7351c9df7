use super::*;
use proptest::prelude::*;

#[test]
fn test_line_offset_table_lookup() {
    let source = "abc\ndefgh\nij";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.line_from_offset(0), 1);
    assert_eq!(table.line_from_offset(3), 1); // '\n' after abc
    assert_eq!(table.line_from_offset(4), 2);
    assert_eq!(table.line_from_offset(10), 3);
    assert_eq!(table.line_start_offset(2), Some(4));
    assert_eq!(table.line_start_offset(0), None);
    assert_eq!(table.line_start_offset(4), None);
}

#[test]
fn test_position_uses_byte_columns() {
    let source = "αβ = 1\nx";
    let table = LineOffsetTable::build(source);
    // 'α' and 'β' are two bytes each
    assert_eq!(table.position(4), Pos::new(1, 4));
    assert_eq!(table.position(8), Pos::new(1, 8));
    assert_eq!(table.position(9), Pos::new(2, 0));
    assert_eq!(table.position(10), Pos::new(2, 1));
}

#[test]
fn test_line_text_strips_terminators() {
    let source = "first\r\nsecond\nthird";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.line_text(source, 1), Some("first"));
    assert_eq!(table.line_text(source, 2), Some("second"));
    assert_eq!(table.line_text(source, 3), Some("third"));
    assert_eq!(table.line_text(source, 4), None);
}

#[test]
fn test_byte_to_char_ascii() {
    assert_eq!(byte_offset_to_char_offset("hello", 0), 0);
    assert_eq!(byte_offset_to_char_offset("hello", 3), 3);
}

#[test]
fn test_byte_to_char_multibyte_prefix() {
    // "é" is two bytes: the '=' sits at byte 4 but character 3
    let line = "aé = 1";
    assert_eq!(line.find('='), Some(4));
    assert_eq!(byte_offset_to_char_offset(line, 4), 3);
}

#[test]
fn test_byte_to_char_inside_character() {
    // Byte 2 splits the two-byte "é"
    assert_eq!(byte_offset_to_char_offset("aé", 2), 2);
}

#[test]
fn test_byte_to_char_clamps() {
    assert_eq!(byte_offset_to_char_offset("ab", 99), 2);
    assert_eq!(byte_offset_to_char_offset("", 5), 0);
}

proptest! {
    #[test]
    fn prop_ascii_columns_unchanged(line in "[ -~]{0,40}", offset in 0usize..50) {
        let expected = offset.min(line.len());
        prop_assert_eq!(byte_offset_to_char_offset(&line, offset), expected);
    }

    #[test]
    fn prop_char_boundaries_count_chars(line in "\\PC{0,20}") {
        for (char_index, (byte_index, _)) in line.char_indices().enumerate() {
            prop_assert_eq!(byte_offset_to_char_offset(&line, byte_index), char_index);
        }
        prop_assert_eq!(byte_offset_to_char_offset(&line, line.len()), line.chars().count());
    }

    #[test]
    fn prop_char_offset_monotonic(line in "\\PC{0,20}", a in 0usize..80, b in 0usize..80) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            byte_offset_to_char_offset(&line, lo) <= byte_offset_to_char_offset(&line, hi)
        );
    }
}
