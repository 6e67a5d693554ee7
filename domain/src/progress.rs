//! Percentage bars and the colour palette shared by the widgets.

/// Accent colour of a widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Blue,
    Green,
    Yellow,
    Red,
}

/// A horizontal bar showing a percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBar {
    value: f64,
    pub label: Option<String>,
    pub tone: Tone,
    pub show_value: bool,
}

impl ProgressBar {
    /// `value` is a percentage; anything outside `[0, 100]` is clamped and a
    /// non-finite value counts as zero.
    pub fn new(value: f64) -> Self {
        let value = if value.is_finite() {
            value.clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            value,
            label: None,
            tone: Tone::default(),
            show_value: true,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn hide_value(mut self) -> Self {
        self.show_value = false;
        self
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// e.g. `"42%"`.
    pub fn value_label(&self) -> String {
        format!("{:.0}%", self.value)
    }

    /// Number of cells to fill in a bar `width` cells wide.
    pub fn filled_cells(&self, width: usize) -> usize {
        ((self.value / 100.0) * width as f64).round() as usize
    }
}
