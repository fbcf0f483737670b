//! WASM bindings for slot-engine.
//!
//! Exposes conflict checking, bookable-unit generation, free windows, and
//! clock conversion to the browser-side admin console via `wasm-bindgen`. All
//! complex types are passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir admin/src/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```
//!
//! The exported functions are thin wrappers over [`json`], which does the work
//! with plain `String` errors so it can be exercised off-wasm.

use wasm_bindgen::prelude::*;

pub mod json {
    //! JSON-in/JSON-out implementations behind the wasm exports.

    use serde::de::DeserializeOwned;
    use serde::Serialize;
    use slot_engine::{
        AvailabilityIndex, BookableUnit, DayOfWeek, Interval, OwnerId, Reservation, TimeOfDay,
        WeeklySlot,
    };

    /// One day's units, kept as an ordered array for JavaScript callers.
    #[derive(Serialize)]
    struct DayUnitsDto {
        day: DayOfWeek,
        units: Vec<BookableUnit>,
    }

    fn parse<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
    }

    fn render<T: Serialize>(value: &T) -> Result<String, String> {
        serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
    }

    pub fn check_schedule(
        requested_json: &str,
        reservations_json: &str,
        owner: &str,
    ) -> Result<String, String> {
        let requested: Vec<Interval> = parse(requested_json, "requested intervals")?;
        let reservations: Vec<Reservation> = parse(reservations_json, "reservations")?;

        render(&slot_engine::check_all(
            &requested,
            &reservations,
            &OwnerId::from(owner),
        ))
    }

    pub fn find_conflicts(
        requested_json: &str,
        reservations_json: &str,
        owner: &str,
    ) -> Result<String, String> {
        let requested: Vec<Interval> = parse(requested_json, "requested intervals")?;
        let reservations: Vec<Reservation> = parse(reservations_json, "reservations")?;

        render(&slot_engine::find_conflicts(
            &requested,
            &reservations,
            &OwnerId::from(owner),
        ))
    }

    pub fn generate_units(
        slots_json: &str,
        reservations_json: &str,
        owner: &str,
        unit_minutes: u16,
    ) -> Result<String, String> {
        let slots: Vec<WeeklySlot> = parse(slots_json, "weekly slots")?;
        let reservations: Vec<Reservation> = parse(reservations_json, "reservations")?;
        if unit_minutes == 0 {
            return Err("unit_minutes must be positive".to_string());
        }

        let week = slot_engine::generate_week_units(
            &AvailabilityIndex::new(slots),
            unit_minutes,
            &reservations,
            &OwnerId::from(owner),
        );
        let dtos: Vec<DayUnitsDto> = week
            .into_iter()
            .map(|(day, units)| DayUnitsDto { day, units })
            .collect();
        render(&dtos)
    }

    pub fn free_windows(
        slots_json: &str,
        reservations_json: &str,
        owner: &str,
        day: &str,
    ) -> Result<String, String> {
        let slots: Vec<WeeklySlot> = parse(slots_json, "weekly slots")?;
        let reservations: Vec<Reservation> = parse(reservations_json, "reservations")?;
        let day: DayOfWeek = day.parse().map_err(|e| format!("{}", e))?;

        render(&AvailabilityIndex::new(slots).free_windows(
            day,
            &reservations,
            &OwnerId::from(owner),
        ))
    }

    pub fn parse_clock(text: &str) -> Result<u16, String> {
        slot_engine::parse_clock(text)
            .map(TimeOfDay::minutes)
            .map_err(|e| e.to_string())
    }

    pub fn format_clock(minutes: u16, twelve_hour: bool) -> Result<String, String> {
        let t = TimeOfDay::from_minutes(minutes).map_err(|e| e.to_string())?;
        Ok(if twelve_hour {
            slot_engine::format_clock_12h(t)
        } else {
            slot_engine::format_clock_24h(t)
        })
    }
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Partition requested intervals into available and conflicting for `owner`.
///
/// `requested_json` is an array of `{day, start, end}`; `reservations_json`
/// an array of `{owner, day, start, end}`. Times may be `"HH:MM"` strings or
/// minute counts. Returns `{available: [...], conflicting: [...]}`.
#[wasm_bindgen(js_name = "checkSchedule")]
pub fn check_schedule(
    requested_json: &str,
    reservations_json: &str,
    owner: &str,
) -> Result<String, JsValue> {
    json::check_schedule(requested_json, reservations_json, owner).map_err(|e| JsValue::from_str(&e))
}

/// Every (requested, reservation) collision with its overlap in minutes.
#[wasm_bindgen(js_name = "findConflicts")]
pub fn find_conflicts(
    requested_json: &str,
    reservations_json: &str,
    owner: &str,
) -> Result<String, JsValue> {
    json::find_conflicts(requested_json, reservations_json, owner).map_err(|e| JsValue::from_str(&e))
}

/// Bookable units for the whole week, as `[{day, units: [{day, start, end, reserved}]}]`
/// in canonical day order.
#[wasm_bindgen(js_name = "generateUnits")]
pub fn generate_units(
    slots_json: &str,
    reservations_json: &str,
    owner: &str,
    unit_minutes: u16,
) -> Result<String, JsValue> {
    json::generate_units(slots_json, reservations_json, owner, unit_minutes)
        .map_err(|e| JsValue::from_str(&e))
}

/// Free gaps on one day after removing other owners' reservations.
#[wasm_bindgen(js_name = "freeWindows")]
pub fn free_windows(
    slots_json: &str,
    reservations_json: &str,
    owner: &str,
    day: &str,
) -> Result<String, JsValue> {
    json::free_windows(slots_json, reservations_json, owner, day).map_err(|e| JsValue::from_str(&e))
}

/// Parse a clock string into minutes since midnight.
#[wasm_bindgen(js_name = "parseClock")]
pub fn parse_clock(text: &str) -> Result<u16, JsValue> {
    json::parse_clock(text).map_err(|e| JsValue::from_str(&e))
}

/// Format minutes since midnight as `"09:00"` or, with `twelve_hour`, `"9:00 AM"`.
#[wasm_bindgen(js_name = "formatClock")]
pub fn format_clock(minutes: u16, twelve_hour: bool) -> Result<String, JsValue> {
    json::format_clock(minutes, twelve_hour).map_err(|e| JsValue::from_str(&e))
}
