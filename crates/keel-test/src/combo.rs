//! Combo-input buffer - the reference TimedVar workload
//!
//! Inputs accumulate in a timed slot. The window opens on the first input and
//! is not extended by later ones, so a combo must be completed within
//! `window_ms` of its first press.

use serde_json::Value;

use keel_core::{ErrorKind, KeelResult, OptionExt, Report};
use keel_enum::{EnumStruct, EnumVariant};
use keel_time::{Clock, TimedVar};

/// Combo catalogue whose sequence field is malformed
pub const BAD_SEQUENCE: ErrorKind = ErrorKind::custom(200, "Bad combo sequence");

/// Field of each combo variant listing its input sequence
pub const SEQUENCE_FIELD: &str = "sequence";

pub struct ComboBuffer<C: Clock> {
    inputs: TimedVar<Vec<String>, C>,
    window_ms: u64,
    combos: EnumStruct,
}

impl<C: Clock> ComboBuffer<C> {
    pub fn new(combos: EnumStruct, window_ms: u64, clock: C) -> Self {
        ComboBuffer {
            inputs: TimedVar::empty(clock),
            window_ms,
            combos,
        }
    }

    /// Record an input; starts a new window if the previous one lapsed
    pub fn press(&mut self, input: &str) {
        if !self.inputs.update(|seq| seq.push(input.to_string())) {
            self.inputs.set_value(vec![input.to_string()]);
            self.inputs.set_lifespan(self.window_ms);
        }
    }

    /// Inputs in the current window
    pub fn pending(&mut self) -> Option<&[String]> {
        self.inputs.get_value().map(Vec::as_slice)
    }

    pub fn time_left_ms(&mut self) -> Option<u64> {
        self.inputs.time_ms_until_expiration()
    }

    /// Consume the window and match it against the catalogue
    pub fn resolve(&mut self) -> KeelResult<Option<EnumVariant>> {
        let Some(inputs) = self.inputs.take() else {
            return Ok(None);
        };

        for name in self.combos.variant_names() {
            let sequence = self
                .combos
                .schema(name)
                .and_then(|schema| schema.get(SEQUENCE_FIELD))
                .ok_or_report(BAD_SEQUENCE)
                .map_err(|report| report.to_builder().info("combo", name).build())?;

            if sequence_matches(sequence, &inputs)? {
                return self.combos.variant(name, Value::Null).map(Some);
            }
        }
        Ok(None)
    }

    /// Drop any pending inputs
    pub fn clear(&mut self) {
        self.inputs.force_expiration();
    }
}

fn sequence_matches(sequence: &Value, inputs: &[String]) -> KeelResult<bool> {
    let steps = sequence.as_array().ok_or_else(|| {
        Report::builder(BAD_SEQUENCE)
            .msg("sequence must be an array")
            .cause_value(sequence.clone())
            .build()
    })?;

    Ok(steps.len() == inputs.len()
        && steps
            .iter()
            .zip(inputs)
            .all(|(step, input)| step.as_str() == Some(input.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel_time::ManualClock;
    use serde_json::json;

    fn catalogue() -> EnumStruct {
        EnumStruct::builder("Combo")
            .variant(
                "Hadouken",
                json!({"sequence": ["down", "forward", "punch"], "damage": 20}),
            )
            .variant("Jab", json!({"sequence": ["punch"], "damage": 3}))
            .build()
            .unwrap()
    }

    #[test]
    fn test_combo_within_window() {
        let clock = ManualClock::new();
        let mut buffer = ComboBuffer::new(catalogue(), 300, clock.clone());

        buffer.press("down");
        clock.advance(100);
        buffer.press("forward");
        clock.advance(100);
        buffer.press("punch");

        let combo = buffer.resolve().unwrap().unwrap();
        assert!(combo.is("Hadouken"));
        assert_eq!(combo.get("damage"), Some(&json!(20)));
        assert_eq!(buffer.pending(), None);
    }

    #[test]
    fn test_window_measured_from_first_input() {
        let clock = ManualClock::new();
        let mut buffer = ComboBuffer::new(catalogue(), 300, clock.clone());

        buffer.press("down");
        clock.advance(200);
        buffer.press("forward");
        assert_eq!(buffer.time_left_ms(), Some(100));
        clock.advance(150);
        buffer.press("punch");

        // Window lapsed before "punch"; it opened a new one on its own.
        let combo = buffer.resolve().unwrap().unwrap();
        assert!(combo.is("Jab"));
    }

    #[test]
    fn test_unmatched_and_empty() {
        let clock = ManualClock::new();
        let mut buffer = ComboBuffer::new(catalogue(), 300, clock);
        assert_eq!(buffer.resolve().unwrap(), None);

        buffer.press("up");
        assert_eq!(buffer.resolve().unwrap(), None);

        buffer.press("punch");
        buffer.clear();
        assert_eq!(buffer.resolve().unwrap(), None);
    }

    #[test]
    fn test_malformed_catalogue_reports() {
        let combos = EnumStruct::builder("Combo")
            .variant("Broken", json!({"damage": 1}))
            .build()
            .unwrap();
        let mut buffer = ComboBuffer::new(combos, 300, ManualClock::new());
        buffer.press("punch");

        let err = buffer.resolve().unwrap_err();
        assert_eq!(err.kind(), BAD_SEQUENCE);
        assert_eq!(err.detail("combo"), Some(&json!("Broken")));
    }
}
