//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. Every use is additionally gated by
//! `cfg(debug_assertions)`.

pub struct DebugFlags {
    /// Emit timings and row counts when the CSV / model files are read.
    pub print_serde: bool,
    /// Emit one line per forecast request (range, steps, outcome).
    pub print_forecast_requests: bool,
    /// Emit UI interaction logs (date edits, toggles, button presses).
    pub print_ui_interactions: bool,
    /// Emit details of UI state serialization/deserialization.
    pub print_state_serde: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_serde: false,
    print_forecast_requests: false,
    print_ui_interactions: false,
    print_state_serde: false,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_are_off_by_default() {
        let DebugFlags {
            print_serde,
            print_forecast_requests,
            print_ui_interactions,
            print_state_serde,
        } = DEBUG_FLAGS;
        assert!(!print_serde && !print_forecast_requests);
        assert!(!print_ui_interactions && !print_state_serde);
    }
}
