//! Unit tests for the HID encoder and report serialization.
//!
//! These tests run on the host (not embedded) and verify the pure
//! logic of key translation and report layout.

use super::ascii::{needs_shift, table_index, usage_for_ascii, SCAN_CODES};
use super::keyboard::{KeyboardReport, KEYBOARD_REPORT_DESCRIPTOR};
use super::{encode, usage_of, Encoded};
use crate::keymap::{Key, LAYOUT, MOD_LEFT_ALT, MOD_LEFT_CTRL, MOD_LEFT_SHIFT};

// ═══════════════════════════════════════════════════════════════════════════
// Scan Code Table Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn lowercase_a_maps_to_usage_4() {
    assert_eq!(table_index(b'a'), Some(0x41));
    assert_eq!(usage_for_ascii(b'a'), Some((0x04, false)));
}

#[test]
fn letters_are_contiguous() {
    for (i, ch) in (b'a'..=b'z').enumerate() {
        assert_eq!(usage_for_ascii(ch), Some((0x04 + i as u8, false)));
    }
    for (i, ch) in (b'A'..=b'Z').enumerate() {
        assert_eq!(usage_for_ascii(ch), Some((0x04 + i as u8, true)));
    }
}

#[test]
fn digits_follow_keyboard_row() {
    // '1'..'9' are 0x1E..0x26, '0' comes last at 0x27.
    assert_eq!(usage_for_ascii(b'0'), Some((0x27, false)));
    for (i, ch) in (b'1'..=b'9').enumerate() {
        assert_eq!(usage_for_ascii(ch), Some((0x1E + i as u8, false)));
    }
}

#[test]
fn punctuation_samples() {
    assert_eq!(usage_for_ascii(b' '), Some((0x2C, false)));
    assert_eq!(usage_for_ascii(b'!'), Some((0x1E, true)));
    assert_eq!(usage_for_ascii(b'-'), Some((0x2D, false)));
    assert_eq!(usage_for_ascii(b'_'), Some((0x2D, true)));
    assert_eq!(usage_for_ascii(b';'), Some((0x33, false)));
    assert_eq!(usage_for_ascii(b':'), Some((0x33, true)));
    assert_eq!(usage_for_ascii(b'~'), Some((0x35, true)));
    assert_eq!(usage_for_ascii(0x7F), Some((0x4C, false)));
}

#[test]
fn table_covers_printable_range_only() {
    assert_eq!(SCAN_CODES.len(), 96);
    assert_eq!(usage_for_ascii(0x1F), None);
    assert_eq!(usage_for_ascii(0x80), None);
    assert_eq!(usage_for_ascii(b'\n'), None);
}

// ═══════════════════════════════════════════════════════════════════════════
// Shift Predicate Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn shift_predicate_matches_ranges() {
    let shifted = |i: u8| {
        (1..=6).contains(&i)
            || (8..=11).contains(&i)
            || i == 26
            || i == 28
            || (30..=58).contains(&i)
            || i == 62
            || i == 63
            || (91..=94).contains(&i)
    };
    for i in 0..=u8::MAX {
        assert_eq!(needs_shift(i), shifted(i), "index {}", i);
    }
}

#[test]
fn shift_predicate_boundaries() {
    assert!(needs_shift(5));
    assert!(!needs_shift(7));
    assert!(!needs_shift(0));
    assert!(!needs_shift(12));
    assert!(!needs_shift(27));
    assert!(!needs_shift(29));
    assert!(needs_shift(58));
    assert!(!needs_shift(59));
    assert!(!needs_shift(95));
}

// ═══════════════════════════════════════════════════════════════════════════
// Encoder Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn every_ascii_position_decodes_to_table_entry() {
    for row in LAYOUT.iter() {
        for key in row.iter() {
            if let Key::Char(c) = *key {
                let expected = SCAN_CODES[(c - 0x20) as usize];
                assert_eq!(encode(*key, 0).usage, expected, "key {}", c as char);
            }
        }
    }
}

#[test]
fn enter_and_tab_use_their_own_value() {
    assert_eq!(
        encode(Key::Enter, 0),
        Encoded {
            modifier: 0,
            usage: 0x28
        }
    );
    assert_eq!(
        encode(Key::Tab, MOD_LEFT_CTRL),
        Encoded {
            modifier: MOD_LEFT_CTRL,
            usage: 0x2B
        }
    );
    assert_eq!(usage_of(Key::Caps), Some((0x39, false)));
}

#[test]
fn caps_is_not_the_digit_nine() {
    assert_eq!(Key::Caps.hid_byte(), b'9');
    assert_eq!(usage_for_ascii(b'9'), Some((0x26, false)));
    assert_eq!(
        encode(Key::Caps, MOD_LEFT_ALT),
        Encoded {
            modifier: MOD_LEFT_ALT,
            usage: 0x39
        }
    );
}

#[test]
fn held_modifier_passes_through_unshifted_key() {
    let enc = encode(Key::Char(b'c'), MOD_LEFT_CTRL);
    assert_eq!(enc.modifier, MOD_LEFT_CTRL);
    assert_eq!(enc.usage, 0x06);

    let enc = encode(Key::Char(b'x'), MOD_LEFT_SHIFT);
    assert_eq!(enc.modifier, MOD_LEFT_SHIFT);
    assert_eq!(enc.usage, 0x1B);
}

#[test]
fn shifted_char_overrides_held_modifier() {
    let enc = encode(Key::Char(b'Q'), MOD_LEFT_ALT);
    assert_eq!(enc.modifier, MOD_LEFT_SHIFT);
    assert_eq!(enc.usage, 0x14);
}

#[test]
fn modifiers_and_no_key_have_no_usage() {
    for key in [Key::Shift, Key::Ctrl, Key::Alt, Key::NoKey] {
        assert_eq!(usage_of(key), None);
        assert_eq!(encode(key, MOD_LEFT_ALT).usage, 0);
        assert_eq!(encode(key, MOD_LEFT_ALT).modifier, MOD_LEFT_ALT);
    }
    assert_eq!(encode(Key::Char(0x05), 0).usage, 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Keyboard Report Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn keyboard_report_empty() {
    let report = KeyboardReport::empty();
    assert!(report.is_empty());
    assert_eq!(report.to_bytes(), [0; 8]);
}

#[test]
fn keyboard_report_key_layout() {
    let report = Encoded {
        modifier: MOD_LEFT_SHIFT,
        usage: 0x1E,
    }
    .report();
    assert_eq!(report.to_bytes(), [0x02, 0x00, 0x1E, 0, 0, 0, 0, 0]);
    assert!(!report.is_empty());
}

#[test]
fn keyboard_report_release_clears_everything() {
    let mut report = KeyboardReport::key(MOD_LEFT_CTRL, 0x04);
    report.release();
    assert!(report.is_empty());
}

#[test]
fn set_primary_keeps_modifier() {
    let mut report = KeyboardReport::key(MOD_LEFT_SHIFT, 0x1E);
    report.set_primary(0);
    assert_eq!(report.to_bytes(), [0x02, 0, 0, 0, 0, 0, 0, 0]);
    assert!(!report.is_empty());
}

#[test]
fn descriptor_declares_led_output() {
    // Usage Page (LEDs) followed later by an Output item.
    let led_page = KEYBOARD_REPORT_DESCRIPTOR
        .windows(2)
        .position(|w| w == [0x05, 0x08])
        .expect("LED usage page");
    assert!(KEYBOARD_REPORT_DESCRIPTOR[led_page..]
        .windows(2)
        .any(|w| w == [0x91, 0x02]));
    assert_eq!(KEYBOARD_REPORT_DESCRIPTOR.last(), Some(&0xC0));
}
