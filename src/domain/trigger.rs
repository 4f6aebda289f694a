use std::fmt;

use serde::Deserialize;

/// When a new search request is issued from user input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TriggerPolicy {
    /// Every edit re-queries. An empty term issues nothing.
    Eager,
    /// Edits change a draft; an explicit submit issues one request.
    #[default]
    Submit,
    /// One request at startup, then the term filters titles locally.
    Filter,
}

impl TriggerPolicy {
    pub fn has_submit(self) -> bool {
        self == TriggerPolicy::Submit
    }
}

impl fmt::Display for TriggerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TriggerPolicy::Eager => "eager",
            TriggerPolicy::Submit => "submit",
            TriggerPolicy::Filter => "filter",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        trigger: TriggerPolicy,
    }

    #[test]
    fn test_deserialize_lowercase() {
        let w: Wrapper = toml::from_str(r#"trigger = "eager""#).unwrap();
        assert_eq!(w.trigger, TriggerPolicy::Eager);
        let w: Wrapper = toml::from_str(r#"trigger = "filter""#).unwrap();
        assert_eq!(w.trigger, TriggerPolicy::Filter);
    }

    #[test]
    fn test_default_is_submit() {
        assert_eq!(TriggerPolicy::default(), TriggerPolicy::Submit);
        assert!(TriggerPolicy::default().has_submit());
        assert!(!TriggerPolicy::Eager.has_submit());
    }
}
