use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::emulation::Payload;
use crate::error::ServiceError;

const PARSED_OUTPUT: &str = "parsed_output";

/// A scalar from the service rendered the way it was sent: strings bare,
/// everything else in its JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireValue(pub Value);

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

impl From<&str> for WireValue {
    fn from(s: &str) -> Self {
        Self(Value::String(s.to_string()))
    }
}

/// Opaque severity code; zero is benign, anything else is flagged.
///
/// Some service builds send a plain flag instead of a code, so `false` and
/// `true` are read as `0` and `1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SuspicionLevel(pub i64);

impl<'de> Deserialize<'de> for SuspicionLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(i64),
            Flag(bool),
        }

        match Raw::deserialize(deserializer) {
            Ok(Raw::Code(code)) => Ok(Self(code)),
            Ok(Raw::Flag(flag)) => Ok(Self(i64::from(flag))),
            Err(_) => Err(de::Error::custom(
                "expected an integer suspicion code or a boolean flag",
            )),
        }
    }
}

impl SuspicionLevel {
    pub fn is_flagged(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for SuspicionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One emulated API call as observed by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    #[serde(rename(deserialize = "dll_name"))]
    pub module: String,
    #[serde(rename(deserialize = "function_called"))]
    pub function: String,
    #[serde(rename(deserialize = "arguments_passed"))]
    pub arguments: Vec<WireValue>,
    #[serde(rename(deserialize = "function_return_value"))]
    pub return_value: WireValue,
    #[serde(rename(deserialize = "known_suspicious_function"))]
    pub suspicion_level: SuspicionLevel,
    #[serde(rename(deserialize = "location"))]
    pub address: WireValue,
}

/// Project `parsed_output` into call records, preserving service order.
///
/// Every element must carry all six fields; nothing is defaulted.
pub fn build_call_table(payload: &Payload) -> Result<Vec<CallRecord>, ServiceError> {
    tracing::debug!("building output map from emulation results");

    let parsed = payload
        .get(PARSED_OUTPUT)
        .ok_or_else(|| ServiceError::Malformed(format!("missing `{PARSED_OUTPUT}`")))?;

    Vec::<CallRecord>::deserialize(parsed)
        .map_err(|e| ServiceError::Malformed(format!("`{PARSED_OUTPUT}`: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    fn call(function: &str, level: i64) -> Value {
        json!({
            "dll_name": "kernel32.dll",
            "function_called": function,
            "arguments_passed": [],
            "function_return_value": 0,
            "known_suspicious_function": level,
            "location": "0x401000"
        })
    }

    #[test]
    fn extracts_all_fields() {
        let table = build_call_table(&payload(json!({
            "parsed_output": [{
                "dll_name": "kernel32.dll",
                "function_called": "VirtualAlloc",
                "arguments_passed": ["0x0", "0x1000"],
                "function_return_value": "0x400000",
                "known_suspicious_function": 1,
                "location": "0x401020"
            }]
        })))
        .unwrap();

        assert_eq!(
            table,
            vec![CallRecord {
                module: "kernel32.dll".into(),
                function: "VirtualAlloc".into(),
                arguments: vec!["0x0".into(), "0x1000".into()],
                return_value: "0x400000".into(),
                suspicion_level: SuspicionLevel(1),
                address: "0x401020".into(),
            }]
        );
    }

    #[test]
    fn preserves_source_order_and_duplicates() {
        let table = build_call_table(&payload(json!({
            "parsed_output": [call("B", 0), call("A", 3), call("B", 0)]
        })))
        .unwrap();

        let names: Vec<&str> = table.iter().map(|c| c.function.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "B"]);
    }

    #[test]
    fn empty_parsed_output_yields_empty_table() {
        let table = build_call_table(&payload(json!({ "parsed_output": [] }))).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn missing_parsed_output_is_malformed() {
        let err = build_call_table(&Payload::new()).unwrap_err();
        assert!(matches!(err, ServiceError::Malformed(msg) if msg.contains("parsed_output")));
    }

    #[test]
    fn missing_field_is_malformed_not_defaulted() {
        let mut incomplete = call("Sleep", 0);
        incomplete.as_object_mut().unwrap().remove("location");

        let err = build_call_table(&payload(json!({ "parsed_output": [incomplete] })))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Malformed(msg) if msg.contains("location")));
    }

    #[test]
    fn missing_return_value_is_malformed() {
        let mut incomplete = call("Sleep", 0);
        incomplete
            .as_object_mut()
            .unwrap()
            .remove("function_return_value");

        assert!(build_call_table(&payload(json!({ "parsed_output": [incomplete] }))).is_err());
    }

    #[test]
    fn boolean_flag_and_numeric_location_are_accepted() {
        let mut flagged = call("CreateRemoteThread", 0);
        flagged["known_suspicious_function"] = json!(true);
        flagged["location"] = json!(4198432);
        let mut benign = call("GetTickCount", 0);
        benign["known_suspicious_function"] = json!(false);

        let table = build_call_table(&payload(json!({
            "parsed_output": [flagged, benign]
        })))
        .unwrap();

        assert_eq!(table[0].suspicion_level, SuspicionLevel(1));
        assert!(table[0].suspicion_level.is_flagged());
        assert_eq!(table[0].address.to_string(), "4198432");
        assert_eq!(table[1].suspicion_level, SuspicionLevel(0));
    }

    #[test]
    fn non_numeric_suspicion_level_is_malformed() {
        let mut odd = call("Sleep", 0);
        odd["known_suspicious_function"] = json!("high");

        let err = build_call_table(&payload(json!({ "parsed_output": [odd] }))).unwrap_err();
        assert!(matches!(err, ServiceError::Malformed(msg) if msg.contains("suspicion code")));
    }

    #[test]
    fn wire_values_render_without_quotes() {
        assert_eq!(WireValue::from("0x10").to_string(), "0x10");
        assert_eq!(WireValue(json!(4096)).to_string(), "4096");
        assert_eq!(WireValue(json!(null)).to_string(), "null");
    }

    #[test]
    fn only_zero_is_benign() {
        assert!(!SuspicionLevel(0).is_flagged());
        assert!(SuspicionLevel(1).is_flagged());
        assert!(SuspicionLevel(7).is_flagged());
        assert!(SuspicionLevel(-1).is_flagged());
    }
}
