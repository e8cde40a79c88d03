#[macro_use]
extern crate hamcrest;
use hamcrest::prelude::*;
use kvstream::{OpenMode, StreamError, StreamMode, Translation};

/// token, read, write, existing, new, truncate, at end
const TABLE: [(&str, bool, bool, bool, bool, bool, bool); 10] = [
    ("r", true, false, true, false, false, false),
    ("r+", true, true, true, false, false, false),
    ("w", false, true, true, true, true, false),
    ("w+", true, true, true, true, true, false),
    ("a", false, true, true, true, false, true),
    ("a+", true, true, true, true, false, true),
    ("x", false, true, false, true, false, false),
    ("x+", true, true, false, true, false, false),
    ("c", false, true, true, true, false, false),
    ("c+", true, true, true, true, false, false),
];

#[test]
fn capability_matrix() {
    for (token, read, write, existing, new, truncate, at_end) in TABLE {
        let mode = StreamMode::parse(token).unwrap();

        assert_eq!(mode.allows_read(), read, "read of {token}");
        assert_eq!(mode.allows_write(), write, "write of {token}");
        assert_eq!(mode.allows_existing_file_opening(), existing, "existing of {token}");
        assert_eq!(mode.allows_new_file_opening(), new, "new of {token}");
        assert_eq!(mode.implies_existing_content_deletion(), truncate, "truncate of {token}");
        assert_eq!(mode.implies_positioning_cursor_at_the_end(), at_end, "end of {token}");
        assert_eq!(
            mode.implies_positioning_cursor_at_the_beginning(),
            !at_end,
            "beginning of {token}"
        );
    }
}

#[test]
fn table_covers_all_modes() {
    let tokens: Vec<&str> = OpenMode::ALL.iter().map(|mode| mode.as_str()).collect();
    let expected: Vec<&str> = TABLE.iter().map(|row| row.0).collect();
    assert_that!(tokens, is(equal_to(expected)));
}

#[test]
fn translation_flags_in_any_order() {
    let a = StreamMode::parse("r+b").unwrap();
    let b = StreamMode::parse("rb+").unwrap();

    assert_eq!(a, b);
    assert_eq!(a.open_mode(), OpenMode::ReadPlus);
    assert!(a.is_binary());
    assert!(!a.is_text());
}

#[test]
fn text_is_the_default() {
    let plain = StreamMode::parse("w").unwrap();
    let text = StreamMode::parse("wt").unwrap();

    assert!(plain.is_text());
    assert_eq!(plain.translation(), None);
    assert!(text.is_text());
    assert_eq!(text.translation(), Some(Translation::Text));
}

#[test]
fn display_renders_the_token() {
    assert_eq!(StreamMode::parse("a+").unwrap().to_string(), "a+");
    assert_eq!(StreamMode::parse("xb").unwrap().to_string(), "xb");
    assert_eq!(StreamMode::parse("c+t").unwrap().to_string(), "c+t");
    assert_eq!(
        StreamMode::with_translation(OpenMode::Write, Translation::Binary).to_string(),
        "wb"
    );
}

#[test]
fn invalid_tokens_are_rejected() {
    for token in ["", "q", "R", "+", "r++", "rbt", "rbb", "w+x", "r ", " r", "read"] {
        match StreamMode::parse(token) {
            Err(StreamError::InvalidMode(t)) => assert_eq!(t, token),
            other => panic!("Expected InvalidMode for {token:?}, got {other:?}"),
        }
    }
}

#[test]
fn open_mode_rejects_translation_flag() {
    assert!("rb".parse::<OpenMode>().is_err());
    assert_eq!("r+".parse::<OpenMode>().unwrap(), OpenMode::ReadPlus);
    assert_eq!(OpenMode::try_from("c").unwrap(), OpenMode::Create);
}

#[test]
fn from_open_mode() {
    let mode: StreamMode = OpenMode::Exclusive.into();

    assert!(!mode.allows_existing_file_opening());
    assert!(mode.allows_new_file_opening());
    assert!(!mode.allows_read());
}
