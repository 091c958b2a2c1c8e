//! Train departures and per-slot display lines.

use serde::{Deserialize, Serialize};

use crate::error::{InkyError, InkyResult};
use crate::text::{format_error_message, format_train_string, DEFAULT_LINE_LENGTH};

/// One departing service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainService {
    /// Scheduled departure, "HH:MM".
    pub scheduled: Option<String>,
    pub platform: Option<String>,
    /// Final destination of the service.
    pub destination: Option<String>,
    /// Expected departure or status, e.g. "On time".
    pub status: Option<String>,
}

impl TrainService {
    /// The formatted line, if every mandatory field is present.
    pub fn line(&self) -> Option<String> {
        Some(format_train_string(
            self.scheduled.as_deref()?,
            self.platform.as_deref(),
            self.destination.as_deref()?,
            self.status.as_deref()?,
        ))
    }
}

/// Departures between two stations for one render cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainSchedule {
    pub origin: String,
    pub destination: String,
    /// Number of train slots requested from the provider.
    pub requested: usize,
    /// `None` when the provider reports no running services.
    pub services: Option<Vec<TrainService>>,
    /// Network advisory text, shown in place of services.
    pub advisory: Option<String>,
}

impl TrainSchedule {
    /// Text for train slot `n` (0-based).
    ///
    /// Preference order: the service itself, chunk `n` of the advisory,
    /// a "no services" notice, then a generic error on the first slot only.
    pub fn line(&self, n: usize) -> InkyResult<String> {
        if n >= self.requested {
            return Err(InkyError::invalid_parameter(
                "train",
                format!("{} is out of range (requested {})", n, self.requested),
            ));
        }

        if let Some(line) = self
            .services
            .as_ref()
            .and_then(|services| services.get(n))
            .and_then(TrainService::line)
        {
            return Ok(line);
        }

        if let Some(advisory) = &self.advisory {
            return Ok(format_error_message(advisory, n, DEFAULT_LINE_LENGTH));
        }

        if n == 0 {
            if self.services.is_none() {
                return Ok(format!("No train services to {}.", self.destination));
            }
            return Ok("Error retrieving train data.".to_string());
        }

        Ok(String::new())
    }
}
