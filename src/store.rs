use crate::dlog;
use crate::types::{
    Coordinates, Workout, WorkoutDetails, pace_min_per_km, speed_km_per_h, workout_id,
};
use anyhow::{Result, bail};
use chrono::Utc;

/// In-memory, append-only collection of the session's workouts.
///
/// Single-threaded, single-writer: every mutation happens synchronously
/// inside one UI event callback.
#[derive(Debug, Default)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates, then constructs and appends a Running workout.
    ///
    /// Invalid input leaves the sequence untouched.
    pub fn create_running(
        &mut self,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        cadence_spm: f64,
    ) -> Result<&Workout> {
        check_positive(distance_km, "distance")?;
        check_positive(duration_min, "duration")?;
        check_positive(cadence_spm, "cadence")?;

        let created_at = Utc::now();
        let workout = Workout {
            id: workout_id(created_at),
            created_at,
            coordinates,
            distance_km,
            duration_min,
            details: WorkoutDetails::Running {
                cadence_spm,
                pace_min_per_km: pace_min_per_km(distance_km, duration_min),
            },
        };
        Ok(self.append(workout))
    }

    /// Validates, then constructs and appends a Cycling workout.
    pub fn create_cycling(
        &mut self,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Result<&Workout> {
        check_positive(distance_km, "distance")?;
        check_positive(duration_min, "duration")?;
        check_positive(elevation_gain_m, "elevation gain")?;

        let created_at = Utc::now();
        let workout = Workout {
            id: workout_id(created_at),
            created_at,
            coordinates,
            distance_km,
            duration_min,
            details: WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_km_per_h: speed_km_per_h(distance_km, duration_min),
            },
        };
        Ok(self.append(workout))
    }

    /// Linear scan; the session holds tens of entries at most.
    pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    /// Read-only view in insertion order.
    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    fn append(&mut self, workout: Workout) -> &Workout {
        dlog!(
            "stored workout id={} kind={}",
            workout.id,
            workout.kind().as_str()
        );
        let idx = self.workouts.len();
        self.workouts.push(workout);
        &self.workouts[idx]
    }
}

fn check_positive(value: f64, field: &str) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        bail!("{field} must be a positive number, got {value}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use super::*;
    use crate::types::WorkoutKind;

    const HERE: Coordinates = Coordinates { lat: 47.0, lon: 8.0 };

    #[test]
    fn running_caches_pace_at_creation() {
        let mut store = WorkoutStore::new();
        let w = store.create_running(HERE, 5.0, 25.0, 150.0).unwrap();
        assert_eq!(w.kind(), WorkoutKind::Running);
        let WorkoutDetails::Running {
            cadence_spm,
            pace_min_per_km,
        } = w.details
        else {
            panic!("expected a running payload");
        };
        assert_eq!(cadence_spm, 150.0);
        assert_eq!(pace_min_per_km, 5.0);
    }

    #[test]
    fn cycling_caches_speed_at_creation() {
        let mut store = WorkoutStore::new();
        let w = store.create_cycling(HERE, 20.0, 60.0, 300.0).unwrap();
        let WorkoutDetails::Cycling {
            elevation_gain_m,
            speed_km_per_h,
        } = w.details
        else {
            panic!("expected a cycling payload");
        };
        assert_eq!(elevation_gain_m, 300.0);
        assert_eq!(speed_km_per_h, 20.0);
    }

    #[test]
    fn pace_is_stored_unrounded() {
        let mut store = WorkoutStore::new();
        let w = store.create_running(HERE, 3.0, 10.0, 170.0).unwrap();
        let WorkoutDetails::Running {
            pace_min_per_km, ..
        } = w.details
        else {
            panic!("expected a running payload");
        };
        assert_eq!(pace_min_per_km, 10.0 / 3.0);
    }

    #[test]
    fn invalid_inputs_leave_the_store_unchanged() {
        let mut store = WorkoutStore::new();
        assert!(store.create_running(HERE, 0.0, 25.0, 150.0).is_err());
        assert!(store.create_running(HERE, -5.0, 25.0, 150.0).is_err());
        assert!(store.create_running(HERE, 5.0, f64::NAN, 150.0).is_err());
        assert!(store.create_cycling(HERE, 20.0, 60.0, f64::INFINITY).is_err());
        assert!(store.create_cycling(HERE, 20.0, -1.0, 300.0).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn find_by_id_returns_the_created_record() {
        let mut store = WorkoutStore::new();
        let id = store
            .create_running(HERE, 5.0, 25.0, 150.0)
            .unwrap()
            .id
            .clone();
        let found = store.find_by_id(&id).expect("created id must be findable");
        assert_eq!(found.id, id);
        assert_eq!(found.coordinates, HERE);
        assert!(store.find_by_id("0000000000").is_none());
    }

    #[test]
    fn all_preserves_insertion_order() {
        let mut store = WorkoutStore::new();
        store.create_running(HERE, 5.0, 25.0, 150.0).unwrap();
        store.create_cycling(HERE, 20.0, 60.0, 300.0).unwrap();
        store.create_running(HERE, 10.0, 50.0, 160.0).unwrap();

        assert_eq!(store.len(), 3);
        let kinds: Vec<WorkoutKind> = store.all().iter().map(Workout::kind).collect();
        assert_eq!(
            kinds,
            [
                WorkoutKind::Running,
                WorkoutKind::Cycling,
                WorkoutKind::Running
            ]
        );
    }
}
