use chrono::{DateTime, Utc};

/// A point on the map, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Running => "🏃",
            Self::Cycling => "🚴",
        }
    }

    /// Style tag attached to the map popup, distinguishing the variants.
    pub const fn popup_style(self) -> &'static str {
        match self {
            Self::Running => "running-popup",
            Self::Cycling => "cycling-popup",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "running" => Some(Self::Running),
            "cycling" => Some(Self::Cycling),
            _ => None,
        }
    }
}

/// Variant payload. The derived metric is computed once at construction and
/// cached here, unrounded; rounding happens at display time only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutDetails {
    Running {
        cadence_spm: f64,
        pace_min_per_km: f64,
    },
    Cycling {
        elevation_gain_m: f64,
        speed_km_per_h: f64,
    },
}

#[derive(Debug, Clone)]
pub struct Workout {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub coordinates: Coordinates,
    pub distance_km: f64,
    pub duration_min: f64,
    pub details: WorkoutDetails,
}

impl Workout {
    pub const fn kind(&self) -> WorkoutKind {
        match self.details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// "Running on June 5" (month name, unpadded day of month).
    pub fn title(&self) -> String {
        format!(
            "{} on {}",
            self.kind().label(),
            self.created_at.format("%B %-d")
        )
    }

    pub fn popup_text(&self) -> String {
        format!("{} {}", self.kind().icon(), self.title())
    }
}

pub fn pace_min_per_km(distance_km: f64, duration_min: f64) -> f64 {
    duration_min / distance_km
}

pub fn speed_km_per_h(distance_km: f64, duration_min: f64) -> f64 {
    distance_km / (duration_min / 60.0)
}

/// Session-unique id: the last 10 digits of the creation timestamp in epoch
/// milliseconds, zero-padded. Two creations within the same millisecond
/// collide; accepted at session scale.
pub fn workout_id(created_at: DateTime<Utc>) -> String {
    format!(
        "{:010}",
        created_at.timestamp_millis().rem_euclid(10_000_000_000)
    )
}
