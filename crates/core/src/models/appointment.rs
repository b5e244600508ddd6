use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::service::ServiceId;

pub type ClientId = i64;
pub type EstablishmentId = i64;

/// Body of the appointment submission endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub client_id: ClientId,
    pub establishment_id: EstablishmentId,
    pub service_ids: Vec<ServiceId>,
    #[serde(with = "local_timestamp")]
    pub start_date_time: NaiveDateTime,
}

/// Appointment as returned by the backend after a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, with = "local_timestamp::option")]
    pub start_date_time: Option<NaiveDateTime>,
}

/// Error payload of the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(alias = "error")]
    pub message: String,
}

/// ISO-8601 local timestamps (`YYYY-MM-DDTHH:MM:SS`) built from wall-clock
/// fields, with no offset and no UTC conversion.
pub mod local_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn format(value: &NaiveDateTime) -> String {
        value.format(FORMAT).to_string()
    }

    pub fn parse(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        // Fractional seconds are tolerated on input and dropped by the formatter.
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
    }

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(|e| serde::de::Error::custom(format!("invalid timestamp {raw:?}: {e}")))
    }

    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(value) => serializer.serialize_str(&super::format(value)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| {
                    super::parse(&raw).map_err(|e| {
                        serde::de::Error::custom(format!("invalid timestamp {raw:?}: {e}"))
                    })
                })
                .transpose()
        }
    }
}
