//! Route-path driven navigation source for the primary drive page.

use std::cell::RefCell;

use drive_host::{Area, HistoryNavigator, RouteLocation, ROOT_CID};

use super::{DirectionTracker, NavSource};
use crate::{config::ExplorerConfig, model::NavState};

/// Parses the two optional drive route segments into `(area, cid)`.
///
/// A first segment naming a known area selects that area and the second segment is the cid.
/// Anything else is taken as the cid itself within [`Area::All`]. Missing or empty segments fall
/// back to the root cid.
pub fn parse_drive_segments(first: Option<&str>, second: Option<&str>) -> (Area, String) {
    fn non_empty(segment: Option<&str>) -> Option<&str> {
        segment.filter(|s| !s.is_empty())
    }

    match non_empty(first) {
        Some(first) => match Area::parse(first) {
            Some(area) => (
                area,
                non_empty(second).unwrap_or(ROOT_CID).to_string(),
            ),
            None => (Area::All, first.to_string()),
        },
        None => (Area::All, ROOT_CID.to_string()),
    }
}

#[derive(Debug)]
struct PathSnapshot {
    area: Area,
    cid: String,
    seen: Option<(RouteLocation, i64)>,
}

/// Navigation source backed by the router path `<prefix>/:first?/:second?`.
///
/// The `(area, cid)` snapshot only moves while the active route belongs to the drive view;
/// visiting any other route freezes it so returning resumes the same directory.
#[derive(Debug)]
pub struct PathNavSource<H> {
    history: H,
    tracker: DirectionTracker<H>,
    prefix: Vec<String>,
    snapshot: RefCell<PathSnapshot>,
}

impl<H: HistoryNavigator + Clone> PathNavSource<H> {
    /// Creates a source for drive routes under `route_prefix` (for example `/drive`).
    pub fn new(history: H, route_prefix: &str) -> Self {
        let prefix = route_prefix
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        let source = Self {
            tracker: DirectionTracker::new(history.clone()),
            history,
            prefix,
            snapshot: RefCell::new(PathSnapshot {
                area: Area::All,
                cid: ROOT_CID.to_string(),
                seen: None,
            }),
        };
        let location = source.history.current_location();
        if let Some((area, cid)) = source.drive_params(&location) {
            let mut snapshot = source.snapshot.borrow_mut();
            snapshot.area = area;
            snapshot.cid = cid;
        }
        source.snapshot.borrow_mut().seen =
            Some((location, source.history.current_position()));
        source
    }

    /// Creates a source for the drive route prefix configured in `config`.
    pub fn from_config(history: H, config: &ExplorerConfig) -> Self {
        Self::new(history, &config.drive_route_prefix)
    }

    /// Handles a router navigation event.
    ///
    /// Returns `true` when the `(area, cid)` snapshot changed. Repeated calls for the same
    /// history entry are ignored.
    pub fn on_route_change(&self) -> bool {
        let location = self.history.current_location();
        let position = self.history.current_position();
        let seen = (location, position);
        if self.snapshot.borrow().seen.as_ref() == Some(&seen) {
            return false;
        }

        self.tracker.observe();
        let params = self.drive_params(&seen.0);
        let mut snapshot = self.snapshot.borrow_mut();
        snapshot.seen = Some(seen);
        let Some((area, cid)) = params else {
            return false;
        };
        if snapshot.area == area && snapshot.cid == cid {
            return false;
        }
        snapshot.area = area;
        snapshot.cid = cid;
        true
    }

    /// Whether `location` is a drive view route.
    pub fn is_drive_route(&self, location: &RouteLocation) -> bool {
        let segments = location.segments();
        segments.len() >= self.prefix.len()
            && segments.len() <= self.prefix.len() + 2
            && self
                .prefix
                .iter()
                .zip(segments.iter())
                .all(|(expected, actual)| expected.as_str() == *actual)
    }

    /// Stops direction tracking.
    pub fn dispose(&self) {
        self.tracker.stop();
    }

    fn drive_params(&self, location: &RouteLocation) -> Option<(Area, String)> {
        if !self.is_drive_route(location) {
            return None;
        }
        let segments = location.segments();
        let rest = &segments[self.prefix.len()..];
        Some(parse_drive_segments(
            rest.first().copied(),
            rest.get(1).copied(),
        ))
    }
}

impl<H: HistoryNavigator + Clone> NavSource for PathNavSource<H> {
    fn nav_state(&self) -> NavState {
        let snapshot = self.snapshot.borrow();
        NavState::new(
            snapshot.cid.clone(),
            Some(snapshot.area),
            self.tracker.direction(),
        )
    }
}

#[cfg(test)]
mod tests {
    use drive_host::MemoryHistory;

    use super::*;
    use crate::model::NavDirection;

    #[test]
    fn parse_drive_segments_matches_routing_rules() {
        let cases = [
            ((None, None), (Area::All, "0")),
            ((Some(""), None), (Area::All, "0")),
            ((Some("star"), None), (Area::Star, "0")),
            ((Some("star"), Some("42")), (Area::Star, "42")),
            ((Some("trash"), Some("")), (Area::Trash, "0")),
            ((Some("12345"), None), (Area::All, "12345")),
            ((Some("12345"), Some("ignored")), (Area::All, "12345")),
        ];
        for ((first, second), (area, cid)) in cases {
            assert_eq!(
                parse_drive_segments(first, second),
                (area, cid.to_string()),
                "input={first:?}/{second:?}"
            );
        }
    }

    #[test]
    fn source_tracks_drive_routes_and_direction() {
        let history = MemoryHistory::new(RouteLocation::new("/drive"));
        let source = PathNavSource::new(history.clone(), "/drive");
        assert_eq!(source.nav_state(), NavState::new("0", Some(Area::All), NavDirection::Replace));

        history.push(RouteLocation::new("/drive/10"));
        assert!(source.on_route_change());
        assert_eq!(source.cid(), "10");
        assert_eq!(source.direction(), NavDirection::Forward);

        history.push(RouteLocation::new("/drive/star/20"));
        assert!(source.on_route_change());
        assert_eq!(source.area(), Some(Area::Star));
        assert_eq!(source.cid(), "20");

        history.go(-1);
        assert!(source.on_route_change());
        assert_eq!(source.nav_state(), NavState::new("10", Some(Area::All), NavDirection::Back));
    }

    #[test]
    fn unrelated_route_freezes_last_directory() {
        let history = MemoryHistory::new(RouteLocation::new("/drive/55"));
        let source = PathNavSource::new(history.clone(), "/drive");
        assert_eq!(source.cid(), "55");

        history.push(RouteLocation::new("/video/abc"));
        assert!(!source.on_route_change());
        assert_eq!(source.cid(), "55");
        assert_eq!(source.direction(), NavDirection::Forward);

        history.go(-1);
        assert!(!source.on_route_change());
        assert_eq!(source.cid(), "55");
        assert_eq!(source.direction(), NavDirection::Back);
    }

    #[test]
    fn repeated_notifications_for_one_entry_keep_direction() {
        let history = MemoryHistory::new(RouteLocation::new("/drive"));
        let source = PathNavSource::new(history.clone(), "/drive");
        history.push(RouteLocation::new("/drive/1"));
        assert!(source.on_route_change());
        assert!(!source.on_route_change());
        assert_eq!(source.direction(), NavDirection::Forward);
    }

    #[test]
    fn configured_prefix_selects_the_drive_routes() {
        let config = ExplorerConfig {
            drive_route_prefix: "/files".to_string(),
            ..ExplorerConfig::default()
        };
        let history = MemoryHistory::new(RouteLocation::new("/files/star/8"));
        let source = PathNavSource::from_config(history.clone(), &config);
        assert_eq!(source.area(), Some(Area::Star));
        assert_eq!(source.cid(), "8");

        history.push(RouteLocation::new("/drive/9"));
        assert!(!source.on_route_change());
        assert_eq!(source.cid(), "8");
    }

    #[test]
    fn deeper_paths_are_not_drive_routes() {
        let history = MemoryHistory::new(RouteLocation::new("/"));
        let source = PathNavSource::new(history, "/drive");
        assert!(source.is_drive_route(&RouteLocation::new("/drive/star/1")));
        assert!(!source.is_drive_route(&RouteLocation::new("/drive/star/1/extra")));
        assert!(!source.is_drive_route(&RouteLocation::new("/drives")));
        assert!(!source.is_drive_route(&RouteLocation::new("/")));
    }
}
