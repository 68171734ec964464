//! Events.
//!
//! Flat event documents: DJ nights, wine tastings, private bookings.
//! Dates persist as ISO `YYYY-MM-DD` strings and are compared
//! lexicographically, which for that format is date order.

use crate::auth::RequestContext;
use crate::error::{CoreError, CoreResult};
use crate::id::short_id;
use krog_store::{Collection, Document, DocumentStore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Image used when an event doesn't bring its own.
pub const DEFAULT_EVENT_IMAGE: &str = "/src/assets/pictures/event.png";

/// Upper bound on the short description, in characters.
pub const MAX_SHORT_DESCRIPTION: usize = 100;

/// The kind of event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// DJ night.
    Dj,
    /// Wine tasting.
    Wine,
    /// Private booking.
    Private,
    /// Anything else.
    Other,
}

impl EventType {
    /// Returns the lowercase wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dj => "dj",
            Self::Wine => "wine",
            Self::Private => "private",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Event id.
    pub id: String,
    /// Event title, unique across events.
    pub title: String,
    /// Teaser text, at most [`MAX_SHORT_DESCRIPTION`] characters.
    pub short_description: String,
    /// Full description.
    pub long_description: String,
    /// ISO `YYYY-MM-DD` date.
    pub date: String,
    /// Start time, e.g. `"19:00"`.
    pub start_time: String,
    /// End time.
    pub end_time: String,
    /// The kind of event.
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Poster image path.
    pub image: String,
}

impl Document for Event {
    const COLLECTION: &'static str = "events";

    fn key(&self) -> &str {
        &self.id
    }
}

/// Input for creating an event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    /// Event title.
    pub title: String,
    /// Teaser text.
    pub short_description: String,
    /// Full description.
    pub long_description: String,
    /// ISO `YYYY-MM-DD` date.
    pub date: String,
    /// Start time.
    pub start_time: String,
    /// End time.
    pub end_time: String,
    /// The kind of event.
    pub event_type: EventType,
    /// Poster image; defaults to [`DEFAULT_EVENT_IMAGE`].
    pub image: Option<String>,
}

/// Field edits for an event.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    /// New title.
    pub title: Option<String>,
    /// New teaser text.
    pub short_description: Option<String>,
    /// New full description.
    pub long_description: Option<String>,
    /// New date.
    pub date: Option<String>,
    /// New start time.
    pub start_time: Option<String>,
    /// New end time.
    pub end_time: Option<String>,
    /// New kind.
    pub event_type: Option<EventType>,
    /// New poster image.
    pub image: Option<String>,
}

/// Queries and mutations over event documents.
pub struct EventService {
    events: Collection<Event>,
}

impl EventService {
    /// Creates the service over the given store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            events: Collection::new(store),
        }
    }

    /// Returns every event, earliest date first.
    pub fn list_all(&self) -> CoreResult<Vec<Event>> {
        let mut events = self.events.find_all()?;
        events.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(events)
    }

    /// Returns an event by id.
    pub fn get(&self, event_id: &str) -> CoreResult<Event> {
        self.events
            .find(event_id)?
            .ok_or_else(|| CoreError::EventNotFound {
                id: event_id.to_string(),
            })
    }

    /// Returns every event of one kind.
    pub fn by_type(&self, event_type: EventType) -> CoreResult<Vec<Event>> {
        Ok(self
            .events
            .find_all()?
            .into_iter()
            .filter(|event| event.event_type == event_type)
            .collect())
    }

    /// Returns events dated today or later, earliest first.
    pub fn future(&self) -> CoreResult<Vec<Event>> {
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        let mut events: Vec<Event> = self
            .events
            .find_all()?
            .into_iter()
            .filter(|event| event.date.as_str() >= today.as_str())
            .collect();
        events.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(events)
    }

    /// Creates an event.
    ///
    /// All text fields are required, the teaser is length-capped, and a
    /// title already in use is a conflict.
    pub fn create(&self, ctx: &RequestContext, event: NewEvent) -> CoreResult<Event> {
        ctx.require_authorized()?;

        let required = [
            (&event.title, "title"),
            (&event.short_description, "shortDescription"),
            (&event.long_description, "longDescription"),
            (&event.date, "date"),
            (&event.start_time, "startTime"),
            (&event.end_time, "endTime"),
        ];
        for (value, field) in required {
            if value.is_empty() {
                return Err(CoreError::validation(format!("{field} is required")));
            }
        }
        if event.short_description.chars().count() > MAX_SHORT_DESCRIPTION {
            return Err(CoreError::validation(format!(
                "short description cannot be longer than {MAX_SHORT_DESCRIPTION} characters"
            )));
        }
        if self
            .events
            .find_all()?
            .iter()
            .any(|existing| existing.title == event.title)
        {
            return Err(CoreError::DuplicateEventTitle { title: event.title });
        }

        let document = Event {
            id: short_id(),
            title: event.title,
            short_description: event.short_description,
            long_description: event.long_description,
            date: event.date,
            start_time: event.start_time,
            end_time: event.end_time,
            event_type: event.event_type,
            image: event.image.unwrap_or_else(|| DEFAULT_EVENT_IMAGE.to_string()),
        };

        self.events.save(&document)?;
        debug!(event = %document.id, "event created");
        Ok(document)
    }

    /// Updates an event field-wise.
    pub fn update(
        &self,
        ctx: &RequestContext,
        event_id: &str,
        patch: EventPatch,
    ) -> CoreResult<Event> {
        ctx.require_authorized()?;
        let mut event = self.get(event_id)?;

        if let Some(title) = patch.title {
            event.title = title;
        }
        if let Some(short_description) = patch.short_description {
            if short_description.chars().count() > MAX_SHORT_DESCRIPTION {
                return Err(CoreError::validation(format!(
                    "short description cannot be longer than {MAX_SHORT_DESCRIPTION} characters"
                )));
            }
            event.short_description = short_description;
        }
        if let Some(long_description) = patch.long_description {
            event.long_description = long_description;
        }
        if let Some(date) = patch.date {
            event.date = date;
        }
        if let Some(start_time) = patch.start_time {
            event.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            event.end_time = end_time;
        }
        if let Some(event_type) = patch.event_type {
            event.event_type = event_type;
        }
        if let Some(image) = patch.image {
            event.image = image;
        }

        self.events.save(&event)?;
        Ok(event)
    }

    /// Deletes an event, returning it.
    pub fn delete(&self, ctx: &RequestContext, event_id: &str) -> CoreResult<Event> {
        ctx.require_authorized()?;
        self.events
            .remove(event_id)?
            .ok_or_else(|| CoreError::EventNotFound {
                id: event_id.to_string(),
            })
    }
}
