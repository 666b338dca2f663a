//! Typed settings structures and value coercion.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default booking time slots offered when none are configured.
pub const DEFAULT_TIME_SLOTS: [&str; 4] = ["09:00", "11:00", "14:00", "16:00"];

/// The core quote-handling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSettings {
    /// Prefix prepended to quote numbers.
    pub quote_prefix: String,
    /// First quote number handed out, kept as text to preserve zero padding.
    pub quote_start_number: String,
    /// Notify the site admin about new submissions.
    pub send_to_admin: bool,
    /// Send the client a confirmation.
    pub send_to_client: bool,
    /// Recipient for admin notifications (empty falls back to the site address).
    pub admin_email: String,
    /// Admin notification subject template.
    pub email_subject_admin: String,
    /// Client confirmation subject template.
    pub email_subject_client: String,
    /// Attach a PDF rendering of the quote.
    pub enable_pdf: bool,
    /// Meeting length in minutes for booked consultations.
    pub meeting_duration: u32,
    /// Create a calendar event as soon as a meeting is booked.
    pub auto_create_event: bool,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            quote_prefix: "Q".to_string(),
            quote_start_number: "1001".to_string(),
            send_to_admin: true,
            send_to_client: true,
            admin_email: String::new(),
            email_subject_admin: "New Quote Submission #{quote_id}".to_string(),
            email_subject_client: "Thank you for your quote request #{quote_id}".to_string(),
            enable_pdf: false,
            meeting_duration: 60,
            auto_create_event: false,
        }
    }
}

/// Stored Google Calendar connection settings.
///
/// Only the configuration is modeled here; talking to the calendar API is
/// someone else's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoogleCalendarConfig {
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Whether an account has completed the OAuth flow.
    pub connected: bool,
    /// Current access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Unix timestamp the access token expires at.
    pub token_expires: i64,
    /// Target calendar.
    pub calendar_id: String,
    /// Create a calendar event as soon as a meeting is booked.
    pub auto_create_event: bool,
    /// Meeting length in minutes.
    pub meeting_duration: u32,
}

impl Default for GoogleCalendarConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            connected: false,
            access_token: String::new(),
            refresh_token: String::new(),
            token_expires: 0,
            calendar_id: "primary".to_string(),
            auto_create_event: false,
            meeting_duration: 60,
        }
    }
}

/// Lenient conversions from raw store values.
///
/// Durable settings stores are stringly typed - a flag may come back as
/// `true`, `"1"`, or `"yes"` depending on which surface wrote it. The
/// typed getters own the casting, so these helpers never fail; they fall
/// back to the caller's default instead.
pub mod coerce {
    use super::Value;

    /// Coerce a raw value to a bool.
    pub fn as_bool(value: &Value, default: bool) -> bool {
        match value {
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(default),
            Value::String(s) => match s.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => default,
            },
            _ => default,
        }
    }

    /// Coerce a raw value to a u64.
    pub fn as_u64(value: &Value, default: u64) -> u64 {
        match value {
            Value::Number(n) => n.as_u64().unwrap_or(default),
            Value::String(s) => s.trim().parse().unwrap_or(default),
            Value::Bool(b) => u64::from(*b),
            _ => default,
        }
    }

    /// Coerce a raw value to a u32.
    pub fn as_u32(value: &Value, default: u32) -> u32 {
        u32::try_from(as_u64(value, u64::from(default))).unwrap_or(default)
    }

    /// Coerce a raw value to an i64.
    pub fn as_i64(value: &Value, default: i64) -> i64 {
        match value {
            Value::Number(n) => n.as_i64().unwrap_or(default),
            Value::String(s) => s.trim().parse().unwrap_or(default),
            Value::Bool(b) => i64::from(*b),
            _ => default,
        }
    }

    /// Coerce a raw value to a string.
    pub fn as_string(value: &Value, default: &str) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => default.to_string(),
        }
    }

    /// Coerce a raw value to a list of strings.
    pub fn as_string_list(value: &Value, default: &[&str]) -> Vec<String> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(|item| as_string(item, ""))
                .filter(|s| !s.is_empty())
                .collect(),
            _ => default.iter().map(|s| s.to_string()).collect(),
        }
    }
}
