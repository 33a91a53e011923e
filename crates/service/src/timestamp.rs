//! Record timestamps are RFC 3339 text in UTC with microsecond precision, so
//! lexical order matches chronological order.
use chrono::{SecondsFormat, Utc};

pub fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::now;

    #[test]
    fn now_is_parseable_and_ordered() {
        let a = now();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = now();
        assert!(chrono::DateTime::parse_from_rfc3339(&a).is_ok());
        assert!(a.ends_with('Z'));
        assert!(b > a);
    }
}
