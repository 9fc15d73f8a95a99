use super::types::{Catalog, CatalogError};
use chrono::NaiveTime;
use std::collections::HashSet;

pub fn parse_catalog(content: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog = serde_json::from_str(content)?;

    if catalog.rooms.is_empty() {
        return Err(CatalogError::MissingField("rooms".to_string()));
    }
    if catalog.time_slots.is_empty() {
        return Err(CatalogError::MissingField("time_slots".to_string()));
    }

    let mut seen = HashSet::new();
    for room in &catalog.rooms {
        if room.id == 0 || room.capacity == 0 {
            return Err(CatalogError::InvalidRoom(room.id));
        }
        if !seen.insert(room.id) {
            return Err(CatalogError::DuplicateRoom(room.id));
        }
    }

    // Display order is chronological order, so slot times must strictly increase
    let mut previous: Option<NaiveTime> = None;
    for slot in &catalog.time_slots {
        let time = parse_slot_time(&slot.time)?;
        if previous.is_some_and(|p| p >= time) {
            return Err(CatalogError::UnorderedTimeSlots(slot.time.clone()));
        }
        previous = Some(time);
    }

    Ok(catalog)
}

/// Parse a canonical "HH:MM" slot time
fn parse_slot_time(time: &str) -> Result<NaiveTime, CatalogError> {
    if time.len() != 5 {
        return Err(CatalogError::InvalidTimeSlot(time.to_string()));
    }
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| CatalogError::InvalidTimeSlot(time.to_string()))
}
