use crate::controller::{MapWidget, WorkoutPanel};
use crate::types::{Coordinates, Workout, WorkoutDetails};
use anyhow::Result;
use std::io::Write;

/// Text rendering of the map widget. Writes to any sink so tests can
/// capture the output in a buffer.
pub struct ConsoleMap<W: Write> {
    out: W,
}

impl<W: Write> ConsoleMap<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> MapWidget for ConsoleMap<W> {
    fn init_view(&mut self, center: Coordinates, zoom: u8) -> Result<()> {
        writeln!(
            self.out,
            "[map] view centered on ({:.4}, {:.4}) at zoom {zoom}",
            center.lat, center.lon
        )?;
        Ok(())
    }

    fn add_marker(&mut self, at: Coordinates, popup_text: &str, popup_style: &str) -> Result<()> {
        writeln!(
            self.out,
            "[map] marker at ({:.4}, {:.4}) popup \"{popup_text}\" ({popup_style})",
            at.lat, at.lon
        )?;
        Ok(())
    }

    fn pan_to(&mut self, target: Coordinates) -> Result<()> {
        writeln!(
            self.out,
            "[map] panning to ({:.4}, {:.4})",
            target.lat, target.lon
        )?;
        Ok(())
    }
}

/// Text rendering of the entry form and the workout list.
pub struct ConsolePanel<W: Write> {
    out: W,
    // Cadence is the visible variant field until the first toggle.
    elevation_visible: bool,
}

impl<W: Write> ConsolePanel<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            elevation_visible: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> WorkoutPanel for ConsolePanel<W> {
    fn alert(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "! {message}")?;
        Ok(())
    }

    fn show_form(&mut self) -> Result<()> {
        writeln!(self.out, "[form] shown, distance field focused")?;
        Ok(())
    }

    fn hide_form(&mut self) -> Result<()> {
        writeln!(self.out, "[form] cleared and hidden")?;
        Ok(())
    }

    fn toggle_variant_field(&mut self) -> Result<()> {
        self.elevation_visible = !self.elevation_visible;
        let field = if self.elevation_visible {
            "elevation gain"
        } else {
            "cadence"
        };
        writeln!(self.out, "[form] variant field is now {field}")?;
        Ok(())
    }

    fn push_list_entry(&mut self, workout: &Workout) -> Result<()> {
        writeln!(
            self.out,
            "[workouts] #{id} {title}",
            id = workout.id,
            title = workout.title()
        )?;
        let metrics = match workout.details {
            WorkoutDetails::Running {
                cadence_spm,
                pace_min_per_km,
            } => format!(
                "{icon} {distance} km  ⏱ {duration} min  ⚡️ {pace_min_per_km:.1} min/km  🦶🏼 {cadence_spm} spm",
                icon = workout.kind().icon(),
                distance = workout.distance_km,
                duration = workout.duration_min,
            ),
            WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            } => format!(
                "{icon} {distance} km  ⏱ {duration} min  ⚡️ {speed_km_per_h:.1} km/h  ⛰ {elevation_gain_m} m",
                icon = workout.kind().icon(),
                distance = workout.distance_km,
                duration = workout.duration_min,
            ),
        };
        writeln!(self.out, "[workouts]   {metrics}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{pace_min_per_km, speed_km_per_h, workout_id};
    use chrono::{TimeZone, Utc};

    fn render_entry(workout: &Workout) -> String {
        let mut panel = ConsolePanel::new(Vec::new());
        panel.push_list_entry(workout).unwrap();
        String::from_utf8(panel.into_inner()).unwrap()
    }

    fn fixture(details: WorkoutDetails, distance_km: f64, duration_min: f64) -> Workout {
        let created_at = Utc.with_ymd_and_hms(2024, 6, 5, 17, 30, 0).unwrap();
        Workout {
            id: workout_id(created_at),
            created_at,
            coordinates: Coordinates { lat: 47.0, lon: 8.0 },
            distance_km,
            duration_min,
            details,
        }
    }

    #[test]
    fn running_entry_shows_pace_to_one_decimal() {
        let workout = fixture(
            WorkoutDetails::Running {
                cadence_spm: 150.0,
                pace_min_per_km: pace_min_per_km(5.0, 25.0),
            },
            5.0,
            25.0,
        );
        let rendered = render_entry(&workout);
        assert!(rendered.contains("Running on June 5"));
        assert!(rendered.contains("5.0 min/km"));
        assert!(rendered.contains("150 spm"));
        assert!(rendered.contains(&workout.id));
    }

    #[test]
    fn cycling_entry_shows_speed_and_elevation() {
        let workout = fixture(
            WorkoutDetails::Cycling {
                elevation_gain_m: 300.0,
                speed_km_per_h: speed_km_per_h(20.0, 60.0),
            },
            20.0,
            60.0,
        );
        let rendered = render_entry(&workout);
        assert!(rendered.contains("Cycling on June 5"));
        assert!(rendered.contains("20.0 km/h"));
        assert!(rendered.contains("300 m"));
    }

    #[test]
    fn uneven_pace_is_rounded_for_display_only() {
        let workout = fixture(
            WorkoutDetails::Running {
                cadence_spm: 170.0,
                pace_min_per_km: pace_min_per_km(3.0, 10.0),
            },
            3.0,
            10.0,
        );
        assert!(render_entry(&workout).contains("3.3 min/km"));
    }

    #[test]
    fn toggle_alternates_between_variant_fields() {
        let mut panel = ConsolePanel::new(Vec::new());
        panel.toggle_variant_field().unwrap();
        panel.toggle_variant_field().unwrap();
        let rendered = String::from_utf8(panel.into_inner()).unwrap();
        assert!(rendered.contains("now elevation gain"));
        assert!(rendered.contains("now cadence"));
    }

    #[test]
    fn map_renders_markers_with_popup_and_style() {
        let mut map = ConsoleMap::new(Vec::new());
        map.add_marker(
            Coordinates { lat: 47.0, lon: 8.0 },
            "🏃 Running on June 5",
            "running-popup",
        )
        .unwrap();
        let rendered = String::from_utf8(map.into_inner()).unwrap();
        assert_eq!(
            rendered,
            "[map] marker at (47.0000, 8.0000) popup \"🏃 Running on June 5\" (running-popup)\n"
        );
    }
}
