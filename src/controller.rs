use crate::dlog;
use crate::store::WorkoutStore;
use crate::types::{Coordinates, Workout, WorkoutKind};
use crate::utils::parse_positive;
use anyhow::Result;

/// Initial zoom level for the map view.
pub const MAP_ZOOM: u8 = 13;

/// What we need from the map-rendering collaborator. Tile loading, marker
/// drawing and pan animation all live behind this seam.
pub trait MapWidget {
    fn init_view(&mut self, center: Coordinates, zoom: u8) -> Result<()>;
    fn add_marker(&mut self, at: Coordinates, popup_text: &str, popup_style: &str) -> Result<()>;
    fn pan_to(&mut self, target: Coordinates) -> Result<()>;
}

/// What we need from the form/list collaborator.
pub trait WorkoutPanel {
    fn alert(&mut self, message: &str) -> Result<()>;
    /// Reveal the entry form and move focus to the distance field.
    fn show_form(&mut self) -> Result<()>;
    /// Clear all fields and hide the form.
    fn hide_form(&mut self) -> Result<()>;
    /// Swap which variant-specific field (cadence vs elevation) is visible.
    fn toggle_variant_field(&mut self) -> Result<()>;
    /// Append one entry block, tagged with the workout's id.
    fn push_list_entry(&mut self, workout: &Workout) -> Result<()>;
}

/// Owns all session state explicitly: the store and the map location
/// captured by the most recent click, awaiting form submission.
#[derive(Debug, Default)]
pub struct Controller {
    store: WorkoutStore,
    pending_location: Option<Coordinates>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }

    pub const fn pending_location(&self) -> Option<Coordinates> {
        self.pending_location
    }

    /// Location acquired: center the map there. Click forwarding is the
    /// driver's job; it routes subsequent clicks to `on_map_clicked`.
    pub fn on_location_acquired(
        &mut self,
        coordinates: Coordinates,
        map: &mut impl MapWidget,
    ) -> Result<()> {
        tracing::info!(lat = coordinates.lat, lon = coordinates.lon, "map ready");
        map.init_view(coordinates, MAP_ZOOM)
    }

    pub fn on_map_clicked(
        &mut self,
        coordinates: Coordinates,
        panel: &mut impl WorkoutPanel,
    ) -> Result<()> {
        dlog!(
            "map clicked lat={} lon={}",
            coordinates.lat,
            coordinates.lon
        );
        self.pending_location = Some(coordinates);
        panel.show_form()
    }

    /// Submit handling. Requires a pending map click; parses and validates
    /// the raw fields, then creates the workout and updates both views in
    /// the same step, so marker and list entry can never diverge.
    pub fn on_form_submitted(
        &mut self,
        selected_type: WorkoutKind,
        distance_raw: &str,
        duration_raw: &str,
        variant_raw: &str,
        map: &mut impl MapWidget,
        panel: &mut impl WorkoutPanel,
    ) -> Result<()> {
        let Some(at) = self.pending_location.take() else {
            // The form cannot be shown without a prior click.
            dlog!("submit without a pending map click; ignoring");
            return Ok(());
        };

        let parsed = parse_fields(selected_type, distance_raw, duration_raw, variant_raw);
        let (distance_km, duration_min, variant) = match parsed {
            Ok(fields) => fields,
            Err(e) => {
                tracing::warn!(err = %e, "rejected workout input");
                panel.alert("Inputs have to be positive numbers!")?;
                panel.hide_form()?;
                return Ok(());
            }
        };

        let workout = match selected_type {
            WorkoutKind::Running => self.store.create_running(at, distance_km, duration_min, variant)?,
            WorkoutKind::Cycling => self.store.create_cycling(at, distance_km, duration_min, variant)?,
        };

        map.add_marker(
            workout.coordinates,
            &workout.popup_text(),
            workout.kind().popup_style(),
        )?;
        panel.push_list_entry(workout)?;
        panel.hide_form()
    }

    pub fn on_workout_list_entry_clicked(
        &mut self,
        id: &str,
        map: &mut impl MapWidget,
    ) -> Result<()> {
        match self.store.find_by_id(id) {
            Some(workout) => map.pan_to(workout.coordinates),
            None => {
                // List entries only come from store contents.
                dlog!("list entry with unknown workout id={id}");
                Ok(())
            }
        }
    }

    /// Purely presentational; no store mutation.
    pub fn on_input_type_changed(&mut self, panel: &mut impl WorkoutPanel) -> Result<()> {
        panel.toggle_variant_field()
    }
}

fn parse_fields(
    selected_type: WorkoutKind,
    distance_raw: &str,
    duration_raw: &str,
    variant_raw: &str,
) -> Result<(f64, f64, f64)> {
    let distance_km = parse_positive(distance_raw, "distance")?;
    let duration_min = parse_positive(duration_raw, "duration")?;
    let variant = match selected_type {
        WorkoutKind::Running => parse_positive(variant_raw, "cadence")?,
        WorkoutKind::Cycling => parse_positive(variant_raw, "elevation gain")?,
    };
    Ok((distance_km, duration_min, variant))
}
