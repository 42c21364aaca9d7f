//! Single character classification for the `charclass` tool.

use anyhow::{bail, Result};

/// Coarse class of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Uppercase,
    Lowercase,
    Digit,
    Special,
}

impl CharClass {
    pub fn of(ch: char) -> Self {
        if ch.is_uppercase() {
            CharClass::Uppercase
        } else if ch.is_lowercase() {
            CharClass::Lowercase
        } else if ch.is_ascii_digit() {
            CharClass::Digit
        } else {
            CharClass::Special
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            CharClass::Uppercase => "Uppercase letter",
            CharClass::Lowercase => "Lowercase letter",
            CharClass::Digit => "Digit",
            CharClass::Special => "Special character",
        }
    }
}

/// Accept a line holding exactly one character (trailing newline stripped)
pub fn parse_single_char(line: &str) -> Result<char> {
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => bail!("Invalid input! Please enter exactly ONE character."),
    }
}

/// Report lines printed for an accepted character
pub fn report(ch: char) -> Vec<String> {
    vec![
        format!("You entered: {}", ch),
        format!("ASCII value: {}", ch as u32),
        format!("Character type: {}", CharClass::of(ch).describe()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(CharClass::of('Q'), CharClass::Uppercase);
        assert_eq!(CharClass::of('q'), CharClass::Lowercase);
        assert_eq!(CharClass::of('7'), CharClass::Digit);
        assert_eq!(CharClass::of('#'), CharClass::Special);
        assert_eq!(CharClass::of(' '), CharClass::Special);
    }

    #[test]
    fn test_parse_single_char() {
        assert_eq!(parse_single_char("x\n").unwrap(), 'x');
        assert_eq!(parse_single_char("é\r\n").unwrap(), 'é');
        assert!(parse_single_char("\n").is_err());
        assert!(parse_single_char("ab\n").is_err());
    }

    #[test]
    fn test_report() {
        assert_eq!(
            report('A'),
            vec![
                "You entered: A".to_string(),
                "ASCII value: 65".to_string(),
                "Character type: Uppercase letter".to_string(),
            ]
        );
    }
}
