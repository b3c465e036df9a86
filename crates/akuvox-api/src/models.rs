// Cloud API wire types
//
// Models for the SmartPlus property endpoints. Field names follow the wire
// exactly (`timeZone`, `communityID`, `Role`); numeric fields arrive as
// either JSON numbers or strings depending on firmware revision, so the
// tolerant deserializers below accept both.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

// ── Login ────────────────────────────────────────────────────────────

/// Fields consumed from a `POST /property/login` reply.
///
/// Every field is optional: the cloud includes whatever it has for the
/// account and the session applies the present ones additively.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct LoginReply {
    pub token: Option<String>,
    pub grade: Option<String>,
    pub account: Option<String>,
    pub time_zone: Option<String>,
    pub community_id: Option<String>,
    pub role: Option<String>,
}

impl LoginReply {
    /// Extract the known fields from a raw login response, field by field.
    /// Anything missing stays `None`; numeric encodings are stringified.
    pub(crate) fn from_body(body: &Value) -> Self {
        Self {
            token: stringly(body.get("token")),
            grade: stringly(body.get("grade")),
            account: stringly(body.get("account")),
            time_zone: stringly(body.get("timeZone")),
            community_id: stringly(body.get("communityID")),
            role: stringly(body.get("Role")),
        }
    }
}

/// String-or-number field to `String`; anything else is treated as absent.
fn stringly(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

// ── Communities ──────────────────────────────────────────────────────

/// A managed property/building group, from `GET /property/comunityinfo`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Community {
    #[serde(rename = "ID", deserialize_with = "de_code")]
    pub id: i64,
    #[serde(default, rename = "Location")]
    pub location: String,
}

// ── Devices ──────────────────────────────────────────────────────────

/// A physical intercom/monitor unit, from `GET /property/selectdevice`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Device {
    #[serde(default, rename = "ID", deserialize_with = "de_stringly")]
    pub id: String,
    #[serde(default, rename = "Relay", deserialize_with = "de_stringly")]
    pub relay: String,
    #[serde(default, rename = "Location")]
    pub location: String,
    #[serde(default, rename = "MAC")]
    pub mac: String,
    #[serde(default, rename = "Type")]
    pub device_type: DeviceType,
    #[serde(default, rename = "Status")]
    pub status: DeviceStatus,
    #[serde(default, rename = "UnitName")]
    pub unit_name: String,
    #[serde(default, rename = "RoomName")]
    pub room_name: String,
    #[serde(default, rename = "Name")]
    pub name: String,
    #[serde(default, rename = "VersionNumber")]
    pub version_number: String,
}

/// Device type. On the wire the code arrives as `1` or `"1"`; an absent
/// field means stair phone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DeviceType {
    /// Stair phone (`0`).
    #[default]
    StairPhone,
    /// Door phone (`1`).
    DoorPhone,
    /// Indoor monitor (`2`).
    IndoorMonitor,
}

impl DeviceType {
    /// The wire-level type code.
    pub fn code(self) -> i64 {
        match self {
            Self::StairPhone => 0,
            Self::DoorPhone => 1,
            Self::IndoorMonitor => 2,
        }
    }
}

impl<'de> Deserialize<'de> for DeviceType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match de_code(deserializer)? {
            0 => Ok(Self::StairPhone),
            1 => Ok(Self::DoorPhone),
            2 => Ok(Self::IndoorMonitor),
            other => Err(de::Error::custom(format!(
                "unknown device type code: {other}"
            ))),
        }
    }
}

/// Online/offline status. Same number-or-string tolerance as
/// [`DeviceType`]; an absent field means offline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DeviceStatus {
    /// Device is unreachable (`0`).
    #[default]
    Offline,
    /// Device is connected to the cloud (`1`).
    Online,
}

impl DeviceStatus {
    /// The wire-level status code.
    pub fn code(self) -> i64 {
        match self {
            Self::Offline => 0,
            Self::Online => 1,
        }
    }
}

impl<'de> Deserialize<'de> for DeviceStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match de_code(deserializer)? {
            0 => Ok(Self::Offline),
            1 => Ok(Self::Online),
            other => Err(de::Error::custom(format!(
                "unknown device status code: {other}"
            ))),
        }
    }
}

// ── Tolerant field deserializers ─────────────────────────────────────

/// Deserialize a string-or-number field into `String`.
fn de_stringly<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Deserialize a number-or-numeric-string field into `i64`.
fn de_code<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| de::Error::custom(format!("non-integer code: {n}"))),
        Value::String(s) => s
            .parse()
            .map_err(|_| de::Error::custom(format!("non-numeric code: {s:?}"))),
        other => Err(de::Error::custom(format!(
            "expected number or numeric string, got {other}"
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn device_type_accepts_string_and_number_codes() {
        let device: Device = serde_json::from_value(json!({ "Type": "1" })).unwrap();
        assert_eq!(device.device_type, DeviceType::DoorPhone);

        let device: Device = serde_json::from_value(json!({ "Type": 1 })).unwrap();
        assert_eq!(device.device_type, DeviceType::DoorPhone);

        let device: Device = serde_json::from_value(json!({ "Type": 2, "Status": "1" })).unwrap();
        assert_eq!(device.device_type, DeviceType::IndoorMonitor);
        assert_eq!(device.status, DeviceStatus::Online);
    }

    #[test]
    fn missing_type_and_status_use_wire_defaults() {
        let device: Device = serde_json::from_value(json!({})).unwrap();
        assert_eq!(device.device_type, DeviceType::StairPhone);
        assert_eq!(device.status, DeviceStatus::Offline);
        assert_eq!(device.id, "");
    }

    #[test]
    fn unknown_type_code_is_an_error() {
        let result: Result<Device, _> = serde_json::from_value(json!({ "Type": 7 }));
        assert!(result.is_err());
    }

    #[test]
    fn wire_codes_round_trip() {
        for type_code in [0, 1, 2] {
            let device: Device = serde_json::from_value(json!({ "Type": type_code })).unwrap();
            assert_eq!(device.device_type.code(), type_code);
        }
        for status_code in [0, 1] {
            let device: Device = serde_json::from_value(json!({ "Status": status_code })).unwrap();
            assert_eq!(device.status.code(), status_code);
        }
    }

    #[test]
    fn numeric_id_and_relay_are_stringified() {
        let device: Device =
            serde_json::from_value(json!({ "ID": 1024, "Relay": "2", "MAC": "0C:11:05:00:00:01" }))
                .unwrap();
        assert_eq!(device.id, "1024");
        assert_eq!(device.relay, "2");
        assert_eq!(device.mac, "0C:11:05:00:00:01");
    }

    #[test]
    fn community_id_accepts_numeric_string() {
        let community: Community =
            serde_json::from_value(json!({ "ID": "88", "Location": "North Tower" })).unwrap();
        assert_eq!(community.id, 88);
        assert_eq!(community.location, "North Tower");
    }

    #[test]
    fn login_reply_extracts_present_fields_only() {
        let reply = LoginReply::from_body(&json!({
            "result": 0,
            "token": "tok-123",
            "grade": 2,
            "communityID": 17,
        }));
        assert_eq!(reply.token.as_deref(), Some("tok-123"));
        assert_eq!(reply.grade.as_deref(), Some("2"));
        assert_eq!(reply.community_id.as_deref(), Some("17"));
        assert_eq!(reply.account, None);
        assert_eq!(reply.time_zone, None);
        assert_eq!(reply.role, None);
    }
}
