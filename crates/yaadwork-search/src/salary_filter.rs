//! The salary filter control: one canonical range, three synchronized views.
//!
//! The slider, the two free-text fields, and the preset chips are all
//! derived from a single `SalaryRange`; editing any one re-derives the
//! others, so there is exactly one source of truth. Invalid edits stay
//! visible (the user sees what they typed) but never reach the committed
//! range.

use serde::{Deserialize, Serialize};

use crate::currency::{
    format_amount, parse_amount, presets, validate_range, SalaryPreset, SalaryRangeError,
};

/// The canonical salary filter value, owned by the search context that embeds
/// it. Mutated wholesale by the filter control, read-only everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    /// Whole JMD dollars.
    pub min: i64,
    pub max: i64,
    /// When set, jobs without an advertised salary are shown and the range
    /// is not applied.
    pub show_unspecified: bool,
}

impl Default for SalaryRange {
    fn default() -> Self {
        Self {
            min: 30_000,
            max: 1_000_000,
            show_unspecified: false,
        }
    }
}

/// UI-facing filter state binding the three input modes to one range.
#[derive(Debug, Clone)]
pub struct SalaryRangeFilter {
    committed: SalaryRange,
    min_text: String,
    max_text: String,
    /// Last committed numeric pair, restored when "unspecified" is toggled
    /// back off instead of resetting to defaults.
    retained: (i64, i64),
    error: Option<SalaryRangeError>,
}

impl Default for SalaryRangeFilter {
    fn default() -> Self {
        Self::new(SalaryRange::default())
    }
}

impl SalaryRangeFilter {
    #[must_use]
    pub fn new(range: SalaryRange) -> Self {
        Self {
            committed: range,
            min_text: format_amount(range.min, false),
            max_text: format_amount(range.max, false),
            retained: (range.min, range.max),
            error: None,
        }
    }

    /// The validated range as the search context sees it.
    #[must_use]
    pub fn committed(&self) -> SalaryRange {
        self.committed
    }

    /// Current contents of the min field, possibly mid-edit.
    #[must_use]
    pub fn min_text(&self) -> &str {
        &self.min_text
    }

    /// Current contents of the max field, possibly mid-edit.
    #[must_use]
    pub fn max_text(&self) -> &str {
        &self.max_text
    }

    /// The single validation message to display, if the visible text is
    /// invalid.
    #[must_use]
    pub fn error(&self) -> Option<SalaryRangeError> {
        self.error
    }

    /// Slider handle positions, derived from the committed range.
    #[must_use]
    pub fn slider_positions(&self) -> (i64, i64) {
        (self.committed.min, self.committed.max)
    }

    /// The preset chip matching the committed range, for highlighting.
    #[must_use]
    pub fn active_preset(&self) -> Option<&'static SalaryPreset> {
        presets()
            .iter()
            .find(|p| p.min == self.committed.min && p.max == self.committed.max)
    }

    /// Range editing is disabled while "unspecified" is on.
    #[must_use]
    pub fn is_range_editing_enabled(&self) -> bool {
        !self.committed.show_unspecified
    }

    /// Free-text edit of the minimum field.
    pub fn set_min_text(&mut self, text: &str) {
        if !self.is_range_editing_enabled() {
            return;
        }
        self.min_text = text.to_string();
        self.try_commit(parse_amount(&self.min_text), parse_amount(&self.max_text));
    }

    /// Free-text edit of the maximum field.
    pub fn set_max_text(&mut self, text: &str) {
        if !self.is_range_editing_enabled() {
            return;
        }
        self.max_text = text.to_string();
        self.try_commit(parse_amount(&self.min_text), parse_amount(&self.max_text));
    }

    /// Two-handle slider edit.
    pub fn set_slider(&mut self, min: i64, max: i64) {
        if !self.is_range_editing_enabled() {
            return;
        }
        self.try_commit(min, max);
        // The slider shows committed values, so a rejected drag also
        // re-derives the text fields back to the last valid pair.
        self.rederive_texts();
    }

    /// Preset chip quick-select.
    pub fn apply_preset(&mut self, preset: &SalaryPreset) {
        if !self.is_range_editing_enabled() {
            return;
        }
        self.try_commit(preset.min, preset.max);
        self.rederive_texts();
    }

    /// Toggle "salary unspecified". Disables range editing but keeps the last
    /// numeric values so toggling back restores them.
    pub fn toggle_unspecified(&mut self) {
        if self.committed.show_unspecified {
            self.committed.show_unspecified = false;
            self.committed.min = self.retained.0;
            self.committed.max = self.retained.1;
        } else {
            self.committed.show_unspecified = true;
        }
        self.error = None;
        self.rederive_texts();
    }

    fn try_commit(&mut self, min: i64, max: i64) {
        match validate_range(min, max) {
            Ok(()) => {
                self.committed.min = min;
                self.committed.max = max;
                self.retained = (min, max);
                self.error = None;
                self.rederive_texts();
            }
            Err(err) => {
                // Visible text keeps the rejected input; shared state does not.
                self.error = Some(err);
            }
        }
    }

    fn rederive_texts(&mut self) {
        self.min_text = format_amount(self.committed.min, false);
        self.max_text = format_amount(self.committed.max, false);
    }
}
