use crate::controller::{Controller, MapWidget, WorkoutPanel};
use crate::store::WorkoutStore;
use crate::types::{Coordinates, Workout, WorkoutDetails, WorkoutKind};
use anyhow::Result;
use serde_json::{Value as JsonValue, json};
use std::io::{BufRead, Write};

/// Line-oriented interactive session. Each command dispatches one event to
/// the controller; the selected activity type is form state and lives here,
/// not in the store.
///
/// Ends on `quit` or EOF.
pub fn run(
    mut input: impl BufRead,
    out: &mut impl Write,
    map: &mut impl MapWidget,
    panel: &mut impl WorkoutPanel,
    controller: &mut Controller,
) -> Result<()> {
    let mut selected = WorkoutKind::Running;

    writeln!(out, "type `help` for commands")?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts.as_slice() {
            &[] => {}
            &["click", lat, lon] => match parse_coordinates(lat, lon) {
                Some(coordinates) => controller.on_map_clicked(coordinates, panel)?,
                None => writeln!(out, "usage: click <lat> <lon>")?,
            },
            &["click", ..] => writeln!(out, "usage: click <lat> <lon>")?,
            &["type", raw] => match WorkoutKind::from_str(raw) {
                Some(kind) if kind != selected => {
                    selected = kind;
                    controller.on_input_type_changed(panel)?;
                }
                Some(_) => {}
                None => writeln!(out, "usage: type <running|cycling>")?,
            },
            &["type", ..] => writeln!(out, "usage: type <running|cycling>")?,
            &["submit", distance, duration, variant] => {
                controller.on_form_submitted(selected, distance, duration, variant, map, panel)?;
            }
            &["submit", ..] => {
                writeln!(out, "usage: submit <distance> <duration> <cadence|elevation>")?;
            }
            &["go", id] => controller.on_workout_list_entry_clicked(id, map)?,
            &["go", ..] => writeln!(out, "usage: go <id>")?,
            &["list", ..] => print_list(out, controller.store())?,
            &["json", ..] => writeln!(out, "{}", store_json(controller.store()))?,
            &["help", ..] => print_help(out)?,
            &["quit" | "exit", ..] => break,
            &[other, ..] => writeln!(out, "unknown command: {other} (try `help`)")?,
        }
    }

    tracing::info!(workouts = controller.store().len(), "session over");
    Ok(())
}

fn parse_coordinates(lat: &str, lon: &str) -> Option<Coordinates> {
    let lat = lat.parse::<f64>().ok().filter(|v| v.is_finite())?;
    let lon = lon.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(Coordinates { lat, lon })
}

fn print_list(out: &mut impl Write, store: &WorkoutStore) -> Result<()> {
    if store.is_empty() {
        writeln!(out, "no workouts yet")?;
        return Ok(());
    }

    for (i, w) in store.all().iter().enumerate() {
        writeln!(
            out,
            "{}\t{}\t{}\t{} km\t{} min",
            i + 1,
            w.id,
            w.title(),
            w.distance_km,
            w.duration_min
        )?;
    }
    Ok(())
}

fn print_help(out: &mut impl Write) -> Result<()> {
    writeln!(out, "click <lat> <lon>   pick a spot on the map")?;
    writeln!(out, "type <running|cycling>")?;
    writeln!(out, "submit <distance> <duration> <cadence|elevation>")?;
    writeln!(out, "go <id>             center the map on a workout")?;
    writeln!(out, "list                print recorded workouts")?;
    writeln!(out, "json                dump recorded workouts as JSON")?;
    writeln!(out, "quit                leave")?;
    Ok(())
}

fn store_json(store: &WorkoutStore) -> JsonValue {
    JsonValue::Array(store.all().iter().map(workout_json).collect())
}

fn workout_json(w: &Workout) -> JsonValue {
    match w.details {
        WorkoutDetails::Running {
            cadence_spm,
            pace_min_per_km,
        } => json!({
            "id": w.id,
            "type": w.kind().as_str(),
            "created_at": w.created_at.to_rfc3339(),
            "coordinates": { "lat": w.coordinates.lat, "lon": w.coordinates.lon },
            "distance_km": w.distance_km,
            "duration_min": w.duration_min,
            "cadence_spm": cadence_spm,
            "pace_min_per_km": pace_min_per_km,
        }),
        WorkoutDetails::Cycling {
            elevation_gain_m,
            speed_km_per_h,
        } => json!({
            "id": w.id,
            "type": w.kind().as_str(),
            "created_at": w.created_at.to_rfc3339(),
            "coordinates": { "lat": w.coordinates.lat, "lon": w.coordinates.lon },
            "distance_km": w.distance_km,
            "duration_min": w.duration_min,
            "elevation_gain_m": elevation_gain_m,
            "speed_km_per_h": speed_km_per_h,
        }),
    }
}
