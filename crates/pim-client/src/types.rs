//! Wire helpers shared across record types.

/// Check fields travel as `0`/`1` integers; accept booleans and numeric
/// strings as well, and serialize as a plain boolean.
pub mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Int(i64),
        Float(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = Option::<Raw>::deserialize(deserializer)?;
        Ok(match raw {
            None => false,
            Some(Raw::Bool(b)) => b,
            Some(Raw::Int(i)) => i != 0,
            Some(Raw::Float(f)) => f != 0.0,
            Some(Raw::Text(s)) => matches!(s.trim(), "1" | "true" | "True" | "yes"),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct FlagRow {
        #[serde(default, with = "super::flag")]
        active: bool,
    }

    fn parse(json: &str) -> bool {
        serde_json::from_str::<FlagRow>(json).unwrap().active
    }

    #[test]
    fn flag_accepts_framework_shapes() {
        assert!(parse(r#"{"active": 1}"#));
        assert!(parse(r#"{"active": true}"#));
        assert!(parse(r#"{"active": "1"}"#));
        assert!(!parse(r#"{"active": 0}"#));
        assert!(!parse(r#"{"active": null}"#));
        assert!(!parse("{}"));
    }
}
