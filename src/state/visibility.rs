//! Visibility-triggered loading.
//!
//! The result list ends with a one-row sentinel. After each render the view
//! reports where the sentinel sits relative to the viewport, and the trigger
//! decides whether that is a new transition into view that should load the next
//! page.
//!
//! # State machine
//!
//! `Unobserved` -> attach -> `Observing` -> (intersect + eligible) -> dispatch,
//! stay `Observing` -> detach -> `Unobserved`.
//!
//! Changing any option re-registers the observation, which forgets the last
//! sample: a sentinel still in view afterwards counts as a fresh transition.
//! That is what keeps loading going when a short page leaves the sentinel on
//! screen.

/// Default margin around the viewport, in rows.
pub const DEFAULT_MARGIN_ROWS: u16 = 5;

/// Default fraction of the sentinel that must be visible.
pub const DEFAULT_THRESHOLD: f32 = 0.1;

/// Half-open row range `[start, start + len)` in list content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    /// First row.
    pub start: u32,
    /// Number of rows.
    pub len: u32,
}

impl RowSpan {
    /// Span starting at `start` covering `len` rows.
    pub fn new(start: u32, len: u32) -> Self {
        Self { start, len }
    }

    /// One past the last row.
    pub fn end(&self) -> u32 {
        self.start.saturating_add(self.len)
    }

    fn grow(&self, margin: u32) -> Self {
        let start = self.start.saturating_sub(margin);
        let end = self.end().saturating_add(margin);
        Self::new(start, end - start)
    }

    fn overlap(&self, other: &RowSpan) -> u32 {
        let start = self.start.max(other.start);
        let end = self.end().min(other.end());
        end.saturating_sub(start)
    }
}

/// Where the sentinel sits relative to the viewport after a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentinelGeometry {
    /// Visible rows of the list.
    pub viewport: RowSpan,
    /// Rows occupied by the sentinel.
    pub sentinel: RowSpan,
}

impl SentinelGeometry {
    /// Fraction of the sentinel inside the viewport grown by `margin_rows`.
    pub fn visible_ratio(&self, margin_rows: u16) -> f32 {
        let root = self.viewport.grow(u32::from(margin_rows));
        if self.sentinel.len == 0 {
            let inside = self.sentinel.start >= root.start && self.sentinel.start < root.end();
            return if inside { 1.0 } else { 0.0 };
        }
        root.overlap(&self.sentinel) as f32 / self.sentinel.len as f32
    }
}

/// Options the observation is registered with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerOptions {
    /// Rows added above and below the viewport when testing visibility.
    pub margin_rows: u16,
    /// Minimum visible fraction of the sentinel.
    pub threshold: f32,
    /// The fetcher reports more pages.
    pub has_next_page: bool,
    /// Typically "not already fetching the next page".
    pub enabled: bool,
}

impl Default for TriggerOptions {
    fn default() -> Self {
        Self {
            margin_rows: DEFAULT_MARGIN_ROWS,
            threshold: DEFAULT_THRESHOLD,
            has_next_page: false,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Observation {
    Unobserved,
    Observing {
        options: TriggerOptions,
        was_intersecting: bool,
    },
}

/// Subscription that turns sentinel samples into "load more" dispatches.
#[derive(Debug, Clone)]
pub struct VisibilityTrigger {
    observation: Observation,
    registrations: u64,
}

impl VisibilityTrigger {
    /// Unattached trigger.
    pub fn new() -> Self {
        Self {
            observation: Observation::Unobserved,
            registrations: 0,
        }
    }

    /// Start observing with `options`, replacing any existing registration.
    pub fn attach(&mut self, options: TriggerOptions) {
        self.observation = Observation::Observing {
            options,
            was_intersecting: false,
        };
        self.registrations += 1;
    }

    /// Re-register if `options` differ from the current registration.
    ///
    /// Does nothing while detached.
    pub fn update(&mut self, options: TriggerOptions) {
        if let Observation::Observing { options: current, .. } = self.observation {
            if current != options {
                self.attach(options);
            }
        }
    }

    /// Stop observing.
    pub fn detach(&mut self) {
        self.observation = Observation::Unobserved;
    }

    /// Currently attached.
    pub fn is_observing(&self) -> bool {
        matches!(self.observation, Observation::Observing { .. })
    }

    /// Number of times an observation was registered (attach or re-register).
    pub fn registrations(&self) -> u64 {
        self.registrations
    }

    /// Current options, while attached.
    pub fn options(&self) -> Option<TriggerOptions> {
        match self.observation {
            Observation::Observing { options, .. } => Some(options),
            Observation::Unobserved => None,
        }
    }

    /// Feed a sample. Returns `true` exactly once per transition into view
    /// while the trigger is eligible (`has_next_page && enabled`).
    pub fn observe(&mut self, geometry: SentinelGeometry) -> bool {
        let Observation::Observing {
            options,
            was_intersecting,
        } = &mut self.observation
        else {
            return false;
        };

        let ratio = geometry.visible_ratio(options.margin_rows);
        let intersecting = ratio > 0.0 && ratio >= options.threshold;
        let entered = intersecting && !*was_intersecting;
        *was_intersecting = intersecting;

        entered && options.has_next_page && options.enabled
    }

    /// Like [`observe`](Self::observe), but invokes `on_intersect` on dispatch.
    pub fn observe_with(&mut self, geometry: SentinelGeometry, on_intersect: impl FnOnce()) -> bool {
        let fire = self.observe(geometry);
        if fire {
            on_intersect();
        }
        fire
    }
}

impl Default for VisibilityTrigger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "visibility_tests.rs"]
mod tests;
