use url::form_urlencoded;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Allocate,
    Deallocate,
    Search,
    Hall,
    Log,
}

impl Action {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Allocate => "allocate",
            Self::Deallocate => "deallocate",
            Self::Search => "search",
            Self::Hall => "hall",
            Self::Log => "log",
        }
    }
}

pub fn parse_action(input: &str) -> Option<Action> {
    let parsed = match input.trim() {
        "allocate" => Action::Allocate,
        "deallocate" => Action::Deallocate,
        "search" => Action::Search,
        "hall" => Action::Hall,
        "log" => Action::Log,
        _ => return None,
    };

    Some(parsed)
}

/// Fields of one `QUERY_STRING`. Only the first occurrence of each key counts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Request {
    pub action: Option<Action>,
    pub rows: Option<i32>,
    pub cols: Option<i32>,
    pub roll: Option<i32>,
    pub name: String,
}

impl Request {
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let mut request = Self::default();
        let mut seen_action = false;
        let mut seen_name = false;

        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                "action" if !seen_action => {
                    seen_action = true;
                    request.action = parse_action(&value);
                }
                "rows" if request.rows.is_none() && !value.is_empty() => {
                    request.rows = Some(parse_int(&value));
                }
                "cols" if request.cols.is_none() && !value.is_empty() => {
                    request.cols = Some(parse_int(&value));
                }
                "roll" if request.roll.is_none() && !value.is_empty() => {
                    request.roll = Some(parse_int(&value));
                }
                "name" if !seen_name => {
                    seen_name = true;
                    request.name = value.trim().to_string();
                }
                _ => {}
            }
        }

        request
    }

    /// Roll when it is a usable (positive) number.
    #[must_use]
    pub fn positive_roll(&self) -> Option<i32> {
        self.roll.filter(|roll| *roll > 0)
    }
}

/// Leading-integer parse: optional sign, then digits; anything else yields 0.
/// Values past the `i32` range saturate.
#[must_use]
pub fn parse_int(input: &str) -> i32 {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        value = (value * 10 + i64::from(byte - b'0')).min(i64::from(i32::MAX) + 1);
    }
    if negative {
        value = -value;
    }

    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_allocate_request() {
        let request = Request::parse("action=allocate&rows=3&cols=4&roll=12&name=Mei+Ling");
        assert_eq!(
            request,
            Request {
                action: Some(Action::Allocate),
                rows: Some(3),
                cols: Some(4),
                roll: Some(12),
                name: "Mei Ling".to_string(),
            }
        );
    }

    #[test]
    fn decodes_percent_escapes_in_name() {
        let request = Request::parse("action=allocate&roll=1&name=Jos%C3%A9%20%26%20co");
        assert_eq!(request.name, "José & co");
    }

    #[test]
    fn missing_and_empty_fields_stay_unset() {
        let request = Request::parse("action=hall&rows=&roll=");
        assert_eq!(request.action, Some(Action::Hall));
        assert_eq!(request.rows, None);
        assert_eq!(request.roll, None);
        assert_eq!(request.positive_roll(), None);
    }

    #[test]
    fn unknown_action_is_none() {
        assert_eq!(Request::parse("action=explode").action, None);
        assert_eq!(Request::parse("").action, None);
    }

    #[test]
    fn first_occurrence_wins() {
        let request = Request::parse("roll=5&roll=9&action=search&action=log");
        assert_eq!(request.roll, Some(5));
        assert_eq!(request.action, Some(Action::Search));
    }

    #[test]
    fn parse_int_follows_leading_digits() {
        assert_eq!(parse_int("42"), 42);
        assert_eq!(parse_int("  7abc"), 7);
        assert_eq!(parse_int("-3"), -3);
        assert_eq!(parse_int("+8"), 8);
        assert_eq!(parse_int("abc"), 0);
        assert_eq!(parse_int(""), 0);
        assert_eq!(parse_int("99999999999"), i32::MAX);
        assert_eq!(parse_int("-99999999999"), i32::MIN);
    }

    #[test]
    fn non_positive_roll_is_not_usable() {
        assert_eq!(Request::parse("roll=0").positive_roll(), None);
        assert_eq!(Request::parse("roll=-2").positive_roll(), None);
        assert_eq!(Request::parse("roll=6").positive_roll(), Some(6));
    }
}
