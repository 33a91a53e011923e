//! Structural validation of entities before they reach storage.
//!
//! Every entity describes its constraints as a rule table ([`Validate::rules`]);
//! a [`Validator`] walks the table and reports one message per failing field.

use std::net::IpAddr;

use crate::errors::ValidationErrors;

/// A field value as seen by the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    Text(&'a str),
    Id(i32),
}

/// A single constraint on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Non-empty text, or an id greater than zero.
    Required,
    /// RFC 1123 hostname or an IPv4/IPv6 literal.
    HostnameOrIp,
    /// Exactly this literal.
    Equals(&'static str),
}

impl Rule {
    pub fn check(&self, value: Value<'_>) -> bool {
        match (self, value) {
            (Rule::Required, Value::Text(s)) => !s.is_empty(),
            (Rule::Required, Value::Id(id)) => id > 0,
            (Rule::HostnameOrIp, Value::Text(s)) => is_hostname_or_ip(s),
            (Rule::HostnameOrIp, Value::Id(_)) => false,
            (Rule::Equals(expected), Value::Text(s)) => s == *expected,
            (Rule::Equals(expected), Value::Id(id)) => id.to_string() == *expected,
        }
    }

    fn expectation(&self) -> String {
        match self {
            Rule::Required => "is required".to_string(),
            Rule::HostnameOrIp => "is a valid hostname or ip address".to_string(),
            Rule::Equals(expected) => format!("equals '{expected}'"),
        }
    }
}

/// The rules attached to one field of a record.
#[derive(Debug, Clone)]
pub struct FieldRules<'a> {
    pub field: &'static str,
    pub value: Value<'a>,
    pub rules: &'static [Rule],
}

impl<'a> FieldRules<'a> {
    pub fn new(field: &'static str, value: Value<'a>, rules: &'static [Rule]) -> Self {
        Self { field, value, rules }
    }

    /// First failing rule, if any. Later rules on the same field are not
    /// reported once one has failed.
    fn violation(&self) -> Option<String> {
        self.rules.iter().find(|rule| !rule.check(self.value)).map(|rule| {
            format!(
                "invalid '{field}' field, please check the '{field}' {}",
                rule.expectation(),
                field = self.field
            )
        })
    }
}

/// Implemented by records that carry a rule table.
pub trait Validate {
    fn rules(&self) -> Vec<FieldRules<'_>>;
}

/// Structural validator injected into the services.
pub trait Validator: Send + Sync {
    fn validate<T: Validate>(&self, record: &T) -> Result<(), ValidationErrors>;
}

/// Default validator evaluating each entity's rule table.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleValidator;

impl Validator for RuleValidator {
    fn validate<T: Validate>(&self, record: &T) -> Result<(), ValidationErrors> {
        let errors: Vec<String> = record.rules().iter().filter_map(FieldRules::violation).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors })
        }
    }
}

pub fn is_hostname_or_ip(value: &str) -> bool {
    value.parse::<IpAddr>().is_ok() || is_hostname(value)
}

fn is_hostname(value: &str) -> bool {
    let host = value.strip_suffix('.').unwrap_or(value);
    if host.is_empty() || host.len() > 253 {
        return false;
    }
    let labels: Vec<&str> = host.split('.').collect();
    // dotted numbers that failed to parse as an IP are not hostnames either
    if labels.iter().all(|l| !l.is_empty() && l.bytes().all(|b| b.is_ascii_digit())) {
        return false;
    }
    labels.iter().all(|l| is_label(l))
}

fn is_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        name: String,
        host: String,
        format: String,
        owner: i32,
    }

    impl Validate for Probe {
        fn rules(&self) -> Vec<FieldRules<'_>> {
            vec![
                FieldRules::new("name", Value::Text(&self.name), &[Rule::Required]),
                FieldRules::new("host", Value::Text(&self.host), &[Rule::Required, Rule::HostnameOrIp]),
                FieldRules::new("format", Value::Text(&self.format), &[Rule::Required, Rule::Equals("json")]),
                FieldRules::new("owner", Value::Id(self.owner), &[Rule::Required]),
            ]
        }
    }

    fn probe() -> Probe {
        Probe { name: "web1".into(), host: "10.0.0.5".into(), format: "json".into(), owner: 1 }
    }

    #[test]
    fn valid_record_passes() {
        assert!(RuleValidator.validate(&probe()).is_ok());
    }

    #[test]
    fn reports_one_message_per_failing_field() {
        let p = Probe { name: String::new(), host: String::new(), format: "xml".into(), owner: 0 };
        let errs = RuleValidator.validate(&p).unwrap_err();
        assert_eq!(errs.errors, vec![
            "invalid 'name' field, please check the 'name' is required".to_string(),
            "invalid 'host' field, please check the 'host' is required".to_string(),
            "invalid 'format' field, please check the 'format' equals 'json'".to_string(),
            "invalid 'owner' field, please check the 'owner' is required".to_string(),
        ]);
    }

    #[test]
    fn required_rejects_only_empty_text() {
        let p = Probe { name: "  ".into(), ..probe() };
        assert!(RuleValidator.validate(&p).is_ok());
        let p = Probe { name: String::new(), ..probe() };
        assert_eq!(RuleValidator.validate(&p).unwrap_err().errors.len(), 1);
    }

    #[test]
    fn hostname_rule_message() {
        let p = Probe { host: "not a host".into(), ..probe() };
        let errs = RuleValidator.validate(&p).unwrap_err();
        assert_eq!(errs.errors.len(), 1);
        assert!(errs.contains("'host' is a valid hostname or ip address"));
    }

    #[test]
    fn accepts_hostnames_and_ip_literals() {
        for ok in ["localhost", "web-1.example.com", "example.com.", "10.0.0.5", "::1", "fe80::1", "a1"] {
            assert!(is_hostname_or_ip(ok), "{ok} should be accepted");
        }
    }

    #[test]
    fn rejects_malformed_hosts() {
        let long_label = "a".repeat(64);
        for bad in ["", "bad host", "-web", "web-", "999.1.1.1", "a..b", "under_score.io", long_label.as_str()] {
            assert!(!is_hostname_or_ip(bad), "{bad} should be rejected");
        }
    }
}
