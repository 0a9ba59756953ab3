//! Set header recognition
//!
//! A header line is one of five shapes, matched case-insensitively with only
//! surrounding whitespace allowed:
//!
//! | Matcher          | Examples                 |
//! |------------------|--------------------------|
//! | numbered, colon  | `Set 1:`, `set ii :`     |
//! | numbered, bare   | `Set 1`, `SET IV`        |
//! | encore, colon    | `Encore:`                |
//! | encore, bare     | `Encore`                 |
//! | E shorthand      | `E`, `e:`                |
//!
//! The convention of the first non-blank line decides which family is tried
//! first; both families are still tried on every line.

/// A recognised header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header {
    /// `Set <N>`; `number` is `None` when the numeral is not understood
    Numbered { label: String, number: Option<u32> },
    /// `Encore` or `E`
    Encore,
}

/// Header convention locked in from the first non-blank line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderConvention {
    /// `Set 1:`
    Colon,
    /// `Set 1`
    Bare,
}

type Matcher = fn(&str) -> Option<Header>;

static COLON_FIRST: [Matcher; 5] = [
    numbered_with_colon,
    encore_with_colon,
    numbered_without_colon,
    encore_without_colon,
    encore_shorthand,
];

static BARE_FIRST: [Matcher; 5] = [
    numbered_without_colon,
    encore_without_colon,
    numbered_with_colon,
    encore_with_colon,
    encore_shorthand,
];

impl HeaderConvention {
    /// Colon convention only when the first line is a colon-style header
    pub fn detect(first_line: &str) -> Self {
        let line = first_line.trim();
        if numbered_with_colon(line).is_some() || encore_with_colon(line).is_some() {
            HeaderConvention::Colon
        } else {
            HeaderConvention::Bare
        }
    }

    fn matchers(self) -> &'static [Matcher; 5] {
        match self {
            HeaderConvention::Colon => &COLON_FIRST,
            HeaderConvention::Bare => &BARE_FIRST,
        }
    }

    /// Try every matcher in this convention's priority order
    pub fn match_line(self, line: &str) -> Option<Header> {
        let line = line.trim();
        self.matchers().iter().find_map(|matcher| matcher(line))
    }
}

/// True when the line matches any header shape
pub fn is_header(line: &str) -> bool {
    HeaderConvention::Bare.match_line(line).is_some()
}

fn without_colon(line: &str) -> Option<&str> {
    line.strip_suffix(':').map(str::trim_end)
}

fn numbered_with_colon(line: &str) -> Option<Header> {
    without_colon(line).and_then(numbered)
}

fn numbered_without_colon(line: &str) -> Option<Header> {
    if line.ends_with(':') {
        return None;
    }
    numbered(line)
}

fn encore_with_colon(line: &str) -> Option<Header> {
    without_colon(line).and_then(encore)
}

fn encore_without_colon(line: &str) -> Option<Header> {
    if line.ends_with(':') {
        return None;
    }
    encore(line)
}

fn encore_shorthand(line: &str) -> Option<Header> {
    let body = without_colon(line).unwrap_or(line);
    body.eq_ignore_ascii_case("e").then_some(Header::Encore)
}

fn encore(body: &str) -> Option<Header> {
    body.eq_ignore_ascii_case("encore").then_some(Header::Encore)
}

/// `set` + whitespace + a single numeral token
fn numbered(body: &str) -> Option<Header> {
    let keyword = body.get(..3)?;
    if !keyword.eq_ignore_ascii_case("set") {
        return None;
    }

    let rest = &body[3..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let label = rest.trim();
    if label.is_empty() || label.contains(char::is_whitespace) {
        return None;
    }

    let number = if label.chars().all(|c| c.is_ascii_digit()) {
        label.parse::<u32>().ok()
    } else if label.chars().all(|c| matches!(c.to_ascii_lowercase(), 'i' | 'v' | 'x')) {
        roman_to_number(label)
    } else {
        return None;
    };

    Some(Header::Numbered {
        label: label.to_string(),
        number,
    })
}

/// Roman numerals I through X
pub fn roman_to_number(numeral: &str) -> Option<u32> {
    const NUMERALS: [&str; 10] = ["i", "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix", "x"];

    let lower = numeral.trim().to_ascii_lowercase();
    NUMERALS
        .iter()
        .position(|n| *n == lower)
        .map(|idx| idx as u32 + 1)
}
