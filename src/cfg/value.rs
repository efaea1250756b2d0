//! `Value` implementations for the primitive and library types used in the
//! configuration file.

use super::{
    error::{value_error, Error},
    parse::Value,
    scanner::Scanner,
};
use crate::color::Color;
use pango::FontDescription;

/// Gets the value of a single valid hex digit.
fn hex_digit_value(c: char) -> u8 {
    c.to_digit(16).map_or(0, |d| d as u8)
}

/// Gets the byte value of 2 valid hex digits.
fn hex_byte_value(chars: &[char]) -> u8 {
    (hex_digit_value(chars[0]) << 4) | hex_digit_value(chars[1])
}

/// Parses a list of values using the given delimiters.
pub fn parse_list<T: Value>(
    scanner: &mut Scanner,
    open: char,
    close: char,
    delim: char,
    allow_newlines: bool,
) -> Result<Vec<T>, Error> {
    let mut v = Vec::new();
    let after_value_what = format!("`{}` or `{}`", delim, close);
    scanner.expect_eq(open)?;
    scanner.skip_space(allow_newlines);
    if scanner.next_if(|c| c == close).is_some() {
        return Ok(v);
    }
    loop {
        scanner.skip_space(allow_newlines);
        v.push(T::parse(scanner)?);
        scanner.skip_space(allow_newlines);
        if scanner.expect(&after_value_what, |c| c == delim || c == close)? == close {
            break;
        }
    }
    Ok(v)
}

trait IsUint {}
impl IsUint for u8 {}
impl IsUint for u16 {}
impl IsUint for u32 {}
impl IsUint for u64 {}
impl IsUint for usize {}

impl<T> Value for T
where
    T: IsUint + std::str::FromStr,
    <T as std::str::FromStr>::Err: std::fmt::Display,
{
    fn parse(scanner: &mut Scanner) -> Result<Self, Error> {
        let digits = scanner.digits();
        digits
            .parse::<T>()
            .map_err(|e| value_error("invalid number value", format!("{e}")))
    }
}

impl Value for i32 {
    fn parse(scanner: &mut Scanner) -> Result<Self, Error> {
        let negative = scanner.next_if(|c| c == '-').is_some();
        let magnitude = u32::parse(scanner)?;
        let value = if negative {
            -(magnitude as i64)
        } else {
            magnitude as i64
        };
        i32::try_from(value).map_err(|_| value_error("invalid number value", "out of range"))
    }
}

impl Value for bool {
    fn parse(scanner: &mut Scanner) -> Result<Self, Error> {
        let next_word = scanner.some(|c| c.is_ascii_alphabetic());
        match next_word.as_str().to_ascii_lowercase().as_str() {
            "true" | "yes" => Ok(true),
            "false" | "no" => Ok(false),
            _ => Err(next_word.as_error(
                "invalid boolean value",
                "expected `true`, `yes`, `false`, or `no`",
            )),
        }
    }
}

impl Value for String {
    fn parse(scanner: &mut Scanner) -> Result<Self, Error> {
        let delim = scanner
            .next_if(|c| c == '"' || c == '\'')
            .ok_or_else(|| value_error("invalid string value", "expected `\"` or `'`"))?;
        let s = scanner.all_until(delim)?;
        scanner.next();
        Ok(s.to_string())
    }
}

impl Value for FontDescription {
    fn parse(scanner: &mut Scanner) -> Result<Self, Error> {
        let s = String::parse(scanner)?;
        Ok(FontDescription::from_string(&s))
    }
}

impl Value for Color {
    fn parse(scanner: &mut Scanner) -> Result<Self, Error> {
        if scanner.next_if(|c| c == '#').is_some() {
            let hex_chars = scanner.some(|c| c.is_ascii_hexdigit());
            if hex_chars.len() != 6 && hex_chars.len() != 8 {
                return Err(value_error(
                    "invalid hex color",
                    "expected `#RRGGBB` or `#RRGGBBAA`",
                ));
            }
            let chars: Vec<_> = hex_chars.chars().collect();
            let components: Vec<_> = chars.chunks(2).map(hex_byte_value).collect();
            let alpha = components.get(3).map_or(1.0, |a| *a as f64 / 255.0);
            Ok(Color::new(
                components[0] as f64 / 255.0,
                components[1] as f64 / 255.0,
                components[2] as f64 / 255.0,
                alpha,
            ))
        } else if scanner.starts_with("rgb") {
            let name = scanner.some(|c| c.is_ascii_alphabetic());
            let expected = match name.as_str() {
                "rgb" => 3,
                "rgba" => 4,
                _ => return Err(name.as_error("invalid color value", "expected `rgb` or `rgba`")),
            };
            let components: Vec<u8> = parse_list(scanner, '(', ')', ',', false)?;
            if components.len() != expected {
                return Err(value_error(
                    "invalid color value",
                    format!("expected {expected} components"),
                ));
            }
            let alpha = components.get(3).map_or(1.0, |a| *a as f64 / 255.0);
            Ok(Color::new(
                components[0] as f64 / 255.0,
                components[1] as f64 / 255.0,
                components[2] as f64 / 255.0,
                alpha,
            ))
        } else {
            Err(value_error("invalid color value", "expected color").with_help(
                "valid formats are `#RRGGBB`, `#RRGGBBAA`, `rgb(r, g, b)`, and `rgba(r, g, b, a)`",
            ))
        }
    }
}

impl<T> Value for Vec<T>
where
    T: Value,
{
    fn parse(scanner: &mut Scanner) -> Result<Self, Error> {
        parse_list(scanner, '[', ']', ',', true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse<T: Value>(s: &str) -> Result<T, Error> {
        T::parse(&mut Scanner::new(s))
    }

    #[test]
    fn numbers() {
        assert_eq!(parse::<u16>("24").ok(), Some(24));
        assert!(parse::<u8>("300").is_err());
        assert!(parse::<u32>("abc").is_err());
        assert_eq!(parse::<i32>("-15").ok(), Some(-15));
        assert_eq!(parse::<i32>("7").ok(), Some(7));
    }

    #[test]
    fn booleans() {
        assert_eq!(parse::<bool>("Yes").ok(), Some(true));
        assert_eq!(parse::<bool>("false").ok(), Some(false));
        assert!(parse::<bool>("maybe").is_err());
    }

    #[test]
    fn strings() {
        assert_eq!(parse::<String>("'%H:%M'").ok().as_deref(), Some("%H:%M"));
        assert_eq!(parse::<String>("\"it's\"").ok().as_deref(), Some("it's"));
        assert_eq!(parse::<String>("''").ok().as_deref(), Some(""));
        assert!(parse::<String>("bare").is_err());
        assert!(parse::<String>("'open").is_err());
    }

    #[test]
    fn string_lists() {
        let list = parse::<Vec<String>>("['title', 'clock']").ok();
        assert_eq!(list, Some(vec!["title".to_string(), "clock".to_string()]));
        assert_eq!(parse::<Vec<String>>("[ ]").ok(), Some(Vec::new()));
        assert!(parse::<Vec<String>>("['a' 'b']").is_err());
    }

    #[test]
    fn colors() {
        assert_eq!(
            parse::<Color>("#FF0000").ok(),
            Some(Color::new_rgb(1.0, 0.0, 0.0))
        );
        let half = parse::<Color>("#00000080").ok().map(|c| c.alpha);
        assert_eq!(half, Some(128.0 / 255.0));
        assert_eq!(
            parse::<Color>("rgb(0, 255, 0)").ok(),
            Some(Color::new_rgb(0.0, 1.0, 0.0))
        );
        assert_eq!(
            parse::<Color>("rgba(0, 0, 255, 0)").ok(),
            Some(Color::new(0.0, 0.0, 1.0, 0.0))
        );
        assert!(parse::<Color>("#12345").is_err());
        assert!(parse::<Color>("rgb(1, 2)").is_err());
        assert!(parse::<Color>("red").is_err());
    }
}
