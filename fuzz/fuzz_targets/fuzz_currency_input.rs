#![no_main]

use libfuzzer_sys::fuzz_target;
use shoots_ledger::{Cents, CurrencyInput, MAX_INPUT_DIGITS};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Parsing never panics; digit-free input is zero.
    match Cents::from_input(text) {
        Ok(cents) => {
            if !text.chars().any(|c| c.is_ascii_digit()) {
                assert_eq!(cents, Cents::ZERO);
            }
            let shown = cents.to_dollar_string();
            assert_eq!(shown.split_once('.').map(|(_, frac)| frac.len()), Some(2));
        }
        Err(_) => assert!(text.chars().filter(char::is_ascii_digit).count() > 19),
    }

    let mut field = CurrencyInput::new();
    for key in text.chars() {
        let before = field.raw().to_string();
        if field.push(key).is_err() {
            assert_eq!(field.raw(), before);
        }
        assert!(field.raw().len() <= MAX_INPUT_DIGITS);
    }
});
