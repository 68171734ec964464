//! Opening hours.
//!
//! One document per weekday, keyed by the day name. The day set is closed
//! (the seven weekdays), so "invalid day" is unrepresentable in typed
//! callers and a decode error for raw ones.

use crate::auth::RequestContext;
use crate::error::{CoreError, CoreResult};
use krog_store::{Collection, Document, DocumentStore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A weekday, ordered Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl Day {
    /// All days in display order.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Returns the day's position in the week, Monday = 0.
    #[must_use]
    pub fn order(self) -> u8 {
        self as u8
    }

    /// Returns the lowercase day name used as the document key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An opening interval, e.g. `11:00` to `21:00`.
///
/// Free-form strings on purpose: the card also says things like `"sent"`
/// (late), and an empty string means closed/unset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hours {
    /// Opening time.
    pub from: String,
    /// Closing time.
    pub to: String,
}

/// The opening hours for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHour {
    /// The weekday.
    pub day: Day,
    /// The interval.
    pub hours: Hours,
}

impl Document for OpeningHour {
    const COLLECTION: &'static str = "opening_hours";

    fn key(&self) -> &str {
        self.day.as_str()
    }
}

/// Partial edit of a day's hours.
#[derive(Debug, Clone, Default)]
pub struct HoursPatch {
    /// New opening time.
    pub from: Option<String>,
    /// New closing time.
    pub to: Option<String>,
}

/// Input for creating a day's hours.
#[derive(Debug, Clone)]
pub struct NewOpeningHour {
    /// The weekday.
    pub day: Day,
    /// Initial interval; missing sides default to empty strings.
    pub hours: Option<HoursPatch>,
}

/// Queries and mutations over opening-hour documents.
pub struct OpeningHoursService {
    days: Collection<OpeningHour>,
}

impl OpeningHoursService {
    /// Creates the service over the given store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            days: Collection::new(store),
        }
    }

    /// Returns every day's hours, Monday first.
    pub fn list_all(&self) -> CoreResult<Vec<OpeningHour>> {
        let mut hours = self.days.find_all()?;
        hours.sort_by_key(|entry| entry.day.order());
        Ok(hours)
    }

    /// Creates hours for a day.
    ///
    /// Missing `from`/`to` default to empty strings; a day that already
    /// has hours is a conflict.
    pub fn create(&self, ctx: &RequestContext, data: NewOpeningHour) -> CoreResult<OpeningHour> {
        ctx.require_authorized()?;

        if self.days.exists(data.day.as_str())? {
            return Err(CoreError::DuplicateDay {
                day: data.day.to_string(),
            });
        }

        let hours = data.hours.unwrap_or_default();
        let entry = OpeningHour {
            day: data.day,
            hours: Hours {
                from: hours.from.unwrap_or_default(),
                to: hours.to.unwrap_or_default(),
            },
        };

        self.days.save(&entry)?;
        Ok(entry)
    }

    /// Updates a day's hours.
    ///
    /// At least one of `from`/`to` must be supplied; the absent side
    /// keeps its stored value. Empty strings are allowed (closed/unset).
    pub fn update(
        &self,
        ctx: &RequestContext,
        day: Day,
        patch: HoursPatch,
    ) -> CoreResult<OpeningHour> {
        ctx.require_authorized()?;

        if patch.from.is_none() && patch.to.is_none() {
            return Err(CoreError::validation(
                "hours must contain from and/or to fields",
            ));
        }

        let mut entry = self
            .days
            .find(day.as_str())?
            .ok_or_else(|| CoreError::DayNotFound {
                day: day.to_string(),
            })?;

        if let Some(from) = patch.from {
            entry.hours.from = from;
        }
        if let Some(to) = patch.to {
            entry.hours.to = to;
        }

        self.days.save(&entry)?;
        Ok(entry)
    }

    /// Deletes a day's hours, returning them.
    pub fn delete(&self, ctx: &RequestContext, day: Day) -> CoreResult<OpeningHour> {
        ctx.require_authorized()?;
        self.days
            .remove(day.as_str())?
            .ok_or_else(|| CoreError::DayNotFound {
                day: day.to_string(),
            })
    }
}
