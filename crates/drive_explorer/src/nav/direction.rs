//! History-position based navigation direction inference.

use std::cell::Cell;

use drive_host::PositionSource;

use crate::model::NavDirection;

/// Classifies a move between two history positions.
pub fn classify_direction(previous: i64, current: i64) -> NavDirection {
    match current.cmp(&previous) {
        std::cmp::Ordering::Greater => NavDirection::Forward,
        std::cmp::Ordering::Less => NavDirection::Back,
        std::cmp::Ordering::Equal => NavDirection::Replace,
    }
}

/// Infers forward/back/replace by comparing history positions across navigation events.
///
/// Owners call [`DirectionTracker::observe`] from their route-change handler before updating
/// any state derived from the route, so the direction is already correct when the explorer
/// reads it in the same flush.
#[derive(Debug)]
pub struct DirectionTracker<P> {
    source: P,
    last_position: Cell<i64>,
    direction: Cell<NavDirection>,
    active: Cell<bool>,
}

impl<P: PositionSource> DirectionTracker<P> {
    /// Starts tracking from the source's current position.
    pub fn new(source: P) -> Self {
        let position = source.current_position();
        Self {
            source,
            last_position: Cell::new(position),
            direction: Cell::new(NavDirection::Replace),
            active: Cell::new(true),
        }
    }

    /// Records a navigation event and returns its direction.
    ///
    /// After [`DirectionTracker::stop`] this returns the last direction unchanged.
    pub fn observe(&self) -> NavDirection {
        if !self.active.get() {
            return self.direction.get();
        }
        let position = self.source.current_position();
        let direction = classify_direction(self.last_position.get(), position);
        self.last_position.set(position);
        self.direction.set(direction);
        direction
    }

    /// Direction of the most recently observed navigation.
    pub fn direction(&self) -> NavDirection {
        self.direction.get()
    }

    /// Position recorded at the most recent observation.
    pub fn last_position(&self) -> i64 {
        self.last_position.get()
    }

    /// Stops tracking; later events no longer change the direction.
    pub fn stop(&self) {
        self.active.set(false);
    }

    /// Whether the tracker still reacts to navigation events.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn source(&self) -> &P {
        &self.source
    }
}
