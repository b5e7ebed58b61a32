//! Tooltip state machine.
//!
//! Two states, hidden (opacity 0) and visible (opacity 0.9). Entering a bar
//! starts a 200 ms fade in; leaving starts a 500 ms fade out. The displayed
//! opacity during a fade is interpolated from whatever was on screen when the
//! event arrived, so a leave in the middle of a fade in never jumps.

use std::time::Duration;

use crate::chart::scene::Bar;

pub const VISIBLE_OPACITY: f64 = 0.9;
pub const FADE_IN: Duration = Duration::from_millis(200);
pub const FADE_OUT: Duration = Duration::from_millis(500);
/// Horizontal distance between the pointer and the tooltip's left edge.
pub const POINTER_OFFSET_X: f64 = 5.0;

/// Pointer position in page coordinates, delivered with every hover event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub page_x: f64,
    pub page_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
}

/// A running opacity fade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
}

impl Fade {
    /// Opacity `elapsed` after the fade started.
    pub fn opacity_at(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * t
    }

    pub fn is_done(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    visibility: Visibility,
    html: String,
    data_date: Option<String>,
    left: f64,
    top: f64,
    /// Baseline row the tooltip is pinned to vertically.
    baseline: f64,
    fade: Option<Fade>,
}

impl Tooltip {
    /// A hidden tooltip pinned to `baseline` (chart height minus bottom padding).
    pub fn new(baseline: f64) -> Self {
        Self {
            visibility: Visibility::Hidden,
            html: String::new(),
            data_date: None,
            left: 0.0,
            top: baseline,
            baseline,
            fade: None,
        }
    }

    /// Pointer entered `bar`. `shown` is the opacity currently on screen.
    pub fn on_pointer_enter(&mut self, event: PointerEvent, bar: &Bar, shown: f64) {
        self.data_date = Some(bar.date.clone());
        self.html = bar.tooltip.clone();
        self.left = event.page_x + POINTER_OFFSET_X;
        // Pinned to the baseline row; the pointer's y is deliberately ignored.
        self.top = self.baseline;
        self.visibility = Visibility::Visible;
        self.fade = Some(Fade {
            from: shown,
            to: VISIBLE_OPACITY,
            duration: FADE_IN,
        });
    }

    /// Pointer left whichever bar it was on.
    pub fn on_pointer_leave(&mut self, shown: f64) {
        self.visibility = Visibility::Hidden;
        self.fade = Some(Fade {
            from: shown,
            to: 0.0,
            duration: FADE_OUT,
        });
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Settled opacity for the current state.
    pub fn opacity(&self) -> f64 {
        match self.visibility {
            Visibility::Visible => VISIBLE_OPACITY,
            Visibility::Hidden => 0.0,
        }
    }

    /// Opacity on screen `elapsed` after the last event.
    pub fn opacity_at(&self, elapsed: Duration) -> f64 {
        match &self.fade {
            Some(fade) => fade.opacity_at(elapsed),
            None => self.opacity(),
        }
    }

    pub fn fade(&self) -> Option<&Fade> {
        self.fade.as_ref()
    }

    /// Content; keeps the last text after hiding, as the fade out still shows it.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Date of the last hovered bar (`data-date`).
    pub fn data_date(&self) -> Option<&str> {
        self.data_date.as_deref()
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn top(&self) -> f64 {
        self.top
    }
}
