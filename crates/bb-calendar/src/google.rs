//! Google Calendar v3 REST client

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use bb_core::CalendarSettings;

use crate::error::{CalendarError, Result};
use crate::models::{parse_instant, EventPayload, EventWhen, RawEvent, REMINDER_MINUTES};
use crate::provider::CalendarProvider;

/// REST client for the Google Calendar API.
pub struct GoogleCalendarClient {
    client: Client,
    api_base: String,
    access_token: String,
}

impl GoogleCalendarClient {
    /// Create a new client from provider settings.
    pub fn new(settings: &CalendarSettings) -> Result<Self> {
        if settings.access_token.is_empty() {
            return Err(CalendarError::Configuration(
                "calendar access token is not set".to_string(),
            ));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| CalendarError::Configuration(e.to_string()))?;

        let api_base = settings.api_base.trim_end_matches('/').to_string();

        info!("Calendar client initialized for: {}", api_base);

        Ok(Self {
            client,
            api_base,
            access_token: settings.access_token.clone(),
        })
    }

    fn events_url(&self, calendar_id: &str) -> String {
        format!("{}/calendars/{}/events", self.api_base, calendar_id)
    }
}

#[async_trait]
impl CalendarProvider for GoogleCalendarClient {
    async fn list_events(
        &self,
        calendar_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<RawEvent>> {
        let url = self.events_url(calendar_id);
        debug!("Fetching events from: {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("timeMin", from.to_rfc3339()),
                ("timeMax", to.to_rfc3339()),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
            ])
            .send()
            .await
            .map_err(|e| CalendarError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(CalendarError::Status { status, message });
        }

        let page: EventsPage = response
            .json()
            .await
            .map_err(|e| CalendarError::Decode(e.to_string()))?;

        let mut events = Vec::with_capacity(page.items.len());
        for item in page.items {
            match decode_event(item) {
                Some(event) => events.push(event),
                // One undecodable record must not fail the whole query.
                None => warn!("Skipping calendar event with an unreadable time shape"),
            }
        }

        debug!("Fetched {} events from {}", events.len(), calendar_id);
        Ok(events)
    }

    async fn insert_event(&self, calendar_id: &str, payload: EventPayload) -> Result<()> {
        let url = self.events_url(calendar_id);
        debug!("Creating event: {}", payload.summary);

        let body = WireEventBody::try_from(&payload)?;

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            // No attendees in the payload, so no update fan-out either.
            .query(&[("sendUpdates", "none")])
            .json(&body)
            .send()
            .await
            .map_err(|e| CalendarError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(CalendarError::Status { status, message });
        }

        info!("Created event '{}' on {}", payload.summary, calendar_id);
        Ok(())
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct EventsPage {
    #[serde(default)]
    items: Vec<WireEvent>,
}

#[derive(Debug, Deserialize)]
struct WireEvent {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    start: Option<WireEventTime>,
    #[serde(default)]
    end: Option<WireEventTime>,
}

/// The provider expresses timed events with `dateTime` and all-day events
/// with `date` (end date exclusive). Exactly one of the two is present.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEventTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time_zone: Option<String>,
}

/// Resolve a wire event into the tagged union, or `None` when its time
/// shape cannot be read.
fn decode_event(event: WireEvent) -> Option<RawEvent> {
    let summary = event.summary.unwrap_or_default();
    let start = event.start?;
    let end = event.end?;

    let when = match (&start.date_time, &end.date_time, start.date, end.date) {
        (Some(s), Some(e), _, _) => EventWhen::Timed {
            start: parse_instant(s)?,
            end: parse_instant(e)?,
        },
        (None, None, Some(s), Some(e)) => EventWhen::AllDay { start: s, end: e },
        _ => return None,
    };

    Some(RawEvent { summary, when })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireEventBody {
    summary: String,
    description: String,
    start: WireEventTime,
    end: WireEventTime,
    reminders: WireReminders,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireReminders {
    use_default: bool,
    overrides: Vec<WireReminderOverride>,
}

#[derive(Debug, Serialize)]
struct WireReminderOverride {
    method: &'static str,
    minutes: u32,
}

impl TryFrom<&EventPayload> for WireEventBody {
    type Error = CalendarError;

    fn try_from(payload: &EventPayload) -> Result<Self> {
        Ok(Self {
            summary: payload.summary.clone(),
            description: payload.description.clone(),
            start: zoned_wire_time(payload.start, payload.time_zone)?,
            end: zoned_wire_time(payload.end, payload.time_zone)?,
            reminders: WireReminders {
                use_default: false,
                overrides: REMINDER_MINUTES
                    .iter()
                    .map(|&minutes| WireReminderOverride {
                        method: "popup",
                        minutes,
                    })
                    .collect(),
            },
        })
    }
}

fn zoned_wire_time(local: NaiveDateTime, zone: Tz) -> Result<WireEventTime> {
    let zoned = local
        .and_local_timezone(zone)
        .earliest()
        .ok_or_else(|| {
            CalendarError::InvalidPayload(format!("{} does not exist in {}", local, zone))
        })?;

    Ok(WireEventTime {
        date_time: Some(zoned.to_rfc3339()),
        date: None,
        time_zone: Some(zone.name().to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_timed(summary: &str, start: &str, end: &str) -> WireEvent {
        WireEvent {
            summary: Some(summary.to_string()),
            start: Some(WireEventTime {
                date_time: Some(start.to_string()),
                date: None,
                time_zone: None,
            }),
            end: Some(WireEventTime {
                date_time: Some(end.to_string()),
                date: None,
                time_zone: None,
            }),
        }
    }

    #[test]
    fn test_decode_timed_event() {
        let event = decode_event(wire_timed(
            "Corte - Ana",
            "2025-10-21T15:00:00-05:00",
            "2025-10-21T16:00:00-05:00",
        ))
        .unwrap();

        assert_eq!(event.summary, "Corte - Ana");
        match event.when {
            EventWhen::Timed { start, end } => {
                assert_eq!(start.to_rfc3339(), "2025-10-21T20:00:00+00:00");
                assert_eq!(end.to_rfc3339(), "2025-10-21T21:00:00+00:00");
            }
            _ => panic!("expected timed event"),
        }
    }

    #[test]
    fn test_decode_all_day_event() {
        let json = r#"{
            "summary": "Vacaciones",
            "start": { "date": "2025-10-21" },
            "end": { "date": "2025-10-22" }
        }"#;
        let wire: WireEvent = serde_json::from_str(json).unwrap();
        let event = decode_event(wire).unwrap();

        assert_eq!(
            event.when,
            EventWhen::AllDay {
                start: NaiveDate::from_ymd_opt(2025, 10, 21).unwrap(),
                end: NaiveDate::from_ymd_opt(2025, 10, 22).unwrap(),
            }
        );
    }

    #[test]
    fn test_decode_rejects_shapeless_event() {
        let wire = WireEvent {
            summary: Some("odd".to_string()),
            start: Some(WireEventTime {
                date_time: None,
                date: None,
                time_zone: None,
            }),
            end: None,
        };
        assert!(decode_event(wire).is_none());
    }

    #[test]
    fn test_insert_body_has_zone_and_reminders() {
        let payload = EventPayload {
            summary: "Corte - Ana".to_string(),
            description: "Cliente: Ana".to_string(),
            start: "2025-10-21T14:00:00".parse().unwrap(),
            end: "2025-10-21T15:00:00".parse().unwrap(),
            time_zone: Tz::America__Guayaquil,
        };

        let body = WireEventBody::try_from(&payload).unwrap();
        assert_eq!(
            body.start.date_time.as_deref(),
            Some("2025-10-21T14:00:00-05:00")
        );
        assert_eq!(body.start.time_zone.as_deref(), Some("America/Guayaquil"));
        assert!(!body.reminders.use_default);
        let minutes: Vec<u32> = body.reminders.overrides.iter().map(|o| o.minutes).collect();
        assert_eq!(minutes, vec![30, 10]);
    }
}
