//! Per-weekday slot assignment of a subscription.
//!
//! Stored as a JSON object with exactly the keys `"0"` through `"6"` (Sunday first),
//! each mapping to a slot id or `null`. Parsing happens once at the storage/API edge;
//! the generator only ever sees the fixed-size [`WeeklySchedule`].

use std::fmt;

use serde::{
    de::{self, Deserializer, MapAccess, Visitor},
    ser::{SerializeMap, Serializer},
    Deserialize, Serialize,
};

use crate::clock::validate_day_of_week;
use crate::errors::{CareError, CareResult};

const DAY_KEYS: [&str; 7] = ["0", "1", "2", "3", "4", "5", "6"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeeklySchedule([Option<i64>; 7]);

impl WeeklySchedule {
    pub fn new(days: [Option<i64>; 7]) -> Self {
        Self(days)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn set(&mut self, day_of_week: u8, slot_id: Option<i64>) -> CareResult<()> {
        let day = validate_day_of_week(day_of_week)?;
        self.0[day as usize] = slot_id;
        Ok(())
    }

    pub fn slot_for(&self, day_of_week: u8) -> Option<i64> {
        self.0.get(day_of_week as usize).copied().flatten()
    }

    pub fn has_any_assignment(&self) -> bool {
        self.0.iter().any(Option::is_some)
    }

    /// `(day_of_week, slot_id)` for every assigned day, Sunday first.
    pub fn assignments(&self) -> impl Iterator<Item = (u8, i64)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(day, slot)| slot.map(|id| (day as u8, id)))
    }

    /// Distinct slot ids referenced by the schedule, ascending.
    pub fn slot_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.assignments().map(|(_, id)| id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Parses the stored JSON column. Anything but the exact seven-key shape fails.
    pub fn from_json(raw: &str) -> CareResult<Self> {
        serde_json::from_str(raw).map_err(|e| CareError::MalformedSchedule(e.to_string()))
    }

    pub fn to_json(&self) -> String {
        let map: serde_json::Map<String, serde_json::Value> = DAY_KEYS
            .iter()
            .zip(self.0.iter())
            .map(|(key, slot)| ((*key).to_string(), serde_json::json!(slot)))
            .collect();
        serde_json::Value::Object(map).to_string()
    }
}

/// True iff at least one weekday has a slot assigned.
pub fn has_any_assignment(schedule: &WeeklySchedule) -> bool {
    schedule.has_any_assignment()
}

impl fmt::Display for WeeklySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

impl Serialize for WeeklySchedule {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(DAY_KEYS.len()))?;
        for (key, slot) in DAY_KEYS.iter().zip(self.0.iter()) {
            map.serialize_entry(key, slot)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WeeklySchedule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(WeeklyScheduleVisitor)
    }
}

struct WeeklyScheduleVisitor;

impl<'de> Visitor<'de> for WeeklyScheduleVisitor {
    type Value = WeeklySchedule;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object with day keys \"0\" through \"6\"")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut days = [None; 7];
        let mut seen = [false; 7];

        while let Some(key) = map.next_key::<String>()? {
            let index = DAY_KEYS
                .iter()
                .position(|day| *day == key)
                .ok_or_else(|| de::Error::custom(format!("unexpected day key '{}'", key)))?;
            if seen[index] {
                return Err(de::Error::custom(format!("duplicate day key '{}'", key)));
            }
            seen[index] = true;
            days[index] = map.next_value::<Option<i64>>()?;
        }

        if let Some(index) = seen.iter().position(|present| !present) {
            return Err(de::Error::custom(format!("missing day key '{}'", DAY_KEYS[index])));
        }
        Ok(WeeklySchedule(days))
    }
}
