//! Screen catalog and navigation history.

use crate::domain::Resource;
use std::fmt;

/// Upper bound on remembered back-navigation entries.
const HISTORY_LIMIT: usize = 32;

/// One navigable view of the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    /// Summary tiles, polled while mounted.
    #[default]
    Dashboard,
    /// A list screen over one record collection.
    Table(Resource),
    /// Sales and operational figures for a date range.
    Reports,
}

impl Screen {
    /// Every screen, in tab order.
    pub const ALL: [Self; 12] = [
        Self::Dashboard,
        Self::Table(Resource::JobOrders),
        Self::Table(Resource::Manifests),
        Self::Table(Resource::DeliveryOrders),
        Self::Table(Resource::Invoices),
        Self::Table(Resource::Customers),
        Self::Table(Resource::Drivers),
        Self::Table(Resource::Vehicles),
        Self::Table(Resource::VehicleTypes),
        Self::Table(Resource::VehicleHistory),
        Self::Table(Resource::Users),
        Self::Reports,
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Table(resource) => resource.title(),
            Self::Reports => "Reports",
        }
    }

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Table(resource) => resource.slug(),
            Self::Reports => "reports",
        }
    }

    /// Looks a screen up by its slug, ignoring case and surrounding blanks.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        let wanted = slug.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|s| s.slug() == wanted)
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// The neighbouring screen in tab order, wrapping at both ends.
    #[must_use]
    pub fn step(self, forward: bool) -> Self {
        let len = Self::ALL.len();
        let current = self.position();
        let next = if forward { (current + 1) % len } else { (current + len - 1) % len };
        Self::ALL[next]
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Owns the active screen and the back stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    current: Screen,
    history: Vec<Screen>,
}

impl Router {
    #[must_use]
    pub const fn new(start: Screen) -> Self {
        Self {
            current: start,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub const fn current(&self) -> Screen {
        self.current
    }

    /// Screens that [`Router::back`] would revisit, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Screen] {
        &self.history
    }

    /// Switches to `to`, remembering the current screen.
    ///
    /// Returns `false` (and records nothing) when `to` is already active.
    pub fn navigate(&mut self, to: Screen) -> bool {
        if to == self.current {
            return false;
        }

        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push(self.current);
        tracing::debug!(from = %self.current, to = %to, "navigate");
        self.current = to;
        true
    }

    /// Returns to the previous screen, if any.
    pub fn back(&mut self) -> Option<Screen> {
        let previous = self.history.pop()?;
        tracing::debug!(from = %self.current, to = %previous, "navigate back");
        self.current = previous;
        Some(previous)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Screen::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip_for_every_screen() {
        for screen in Screen::ALL {
            assert_eq!(Screen::from_slug(screen.slug()), Some(screen));
        }
        assert_eq!(Screen::from_slug(" Job-Orders "), Some(Screen::Table(Resource::JobOrders)));
        assert_eq!(Screen::from_slug("fleet"), None);
    }

    #[test]
    fn step_wraps_in_both_directions() {
        assert_eq!(Screen::Reports.step(true), Screen::Dashboard);
        assert_eq!(Screen::Dashboard.step(false), Screen::Reports);
        assert_eq!(Screen::Dashboard.step(true), Screen::Table(Resource::JobOrders));
    }

    #[test]
    fn back_walks_history_in_reverse() {
        let mut router = Router::default();
        assert!(router.navigate(Screen::Table(Resource::Customers)));
        assert!(router.navigate(Screen::Reports));

        assert_eq!(router.back(), Some(Screen::Table(Resource::Customers)));
        assert_eq!(router.back(), Some(Screen::Dashboard));
        assert_eq!(router.back(), None);
        assert_eq!(router.current(), Screen::Dashboard);
    }

    #[test]
    fn navigating_to_the_current_screen_is_a_no_op() {
        let mut router = Router::new(Screen::Reports);
        assert!(!router.navigate(Screen::Reports));
        assert!(router.history().is_empty());
    }

    #[test]
    fn history_is_bounded() {
        let mut router = Router::default();
        for i in 0..100 {
            router.navigate(Screen::ALL[i % Screen::ALL.len()].step(true));
        }
        assert!(router.history().len() <= HISTORY_LIMIT);
    }
}
