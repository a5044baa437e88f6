//! Fuzzy "go to screen" palette.
//!
//! Screen titles are ranked with the Skim matcher. An empty query lists every
//! screen in tab order.

use super::router::Screen;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// A screen that matches the current query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteMatch {
    pub screen: Screen,
    pub score: i64,
    /// `(start, end)` char ranges of the title to highlight, end exclusive.
    pub highlight: Vec<(usize, usize)>,
}

/// Query and ranked matches of the open palette.
#[derive(Debug, Clone)]
pub struct Palette {
    pub query: String,
    pub selected: usize,
    matches: Vec<PaletteMatch>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    #[must_use]
    pub fn new() -> Self {
        let mut palette = Self {
            query: String::new(),
            selected: 0,
            matches: Vec::new(),
        };
        palette.refresh();
        palette
    }

    #[must_use]
    pub fn matches(&self) -> &[PaletteMatch] {
        &self.matches
    }

    pub fn push(&mut self, c: char) {
        self.query.push(c);
        self.refresh();
    }

    pub fn pop(&mut self) {
        self.query.pop();
        self.refresh();
    }

    pub fn move_down(&mut self) {
        if !self.matches.is_empty() {
            self.selected = (self.selected + 1) % self.matches.len();
        }
    }

    pub fn move_up(&mut self) {
        if !self.matches.is_empty() {
            self.selected = self.selected.checked_sub(1).unwrap_or(self.matches.len() - 1);
        }
    }

    #[must_use]
    pub fn selected_screen(&self) -> Option<Screen> {
        self.matches.get(self.selected).map(|m| m.screen)
    }

    fn refresh(&mut self) {
        let query = self.query.trim();
        self.selected = 0;

        if query.is_empty() {
            self.matches = Screen::ALL
                .into_iter()
                .map(|screen| PaletteMatch { screen, score: 0, highlight: vec![] })
                .collect();
            return;
        }

        let matcher = SkimMatcherV2::default();
        let mut matches: Vec<PaletteMatch> = Screen::ALL
            .into_iter()
            .filter_map(|screen| {
                let (score, indices) = matcher.fuzzy_indices(screen.title(), query)?;
                Some(PaletteMatch {
                    screen,
                    score,
                    highlight: coalesce(&indices),
                })
            })
            .collect();

        // Stable: equal scores keep tab order.
        matches.sort_by(|a, b| b.score.cmp(&a.score));
        tracing::trace!(query = %query, matches = matches.len(), "palette refreshed");
        self.matches = matches;
    }
}

/// Folds sorted char indices into contiguous `(start, end)` runs.
#[must_use]
pub fn coalesce(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for &idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Resource;

    #[test]
    fn empty_query_lists_every_screen() {
        let palette = Palette::new();
        assert_eq!(palette.matches().len(), Screen::ALL.len());
        assert_eq!(palette.selected_screen(), Some(Screen::Dashboard));
    }

    #[test]
    fn query_ranks_the_obvious_screen_first() {
        let mut palette = Palette::new();
        for c in "cust".chars() {
            palette.push(c);
        }
        assert_eq!(palette.selected_screen(), Some(Screen::Table(Resource::Customers)));
        assert_eq!(palette.matches()[0].highlight, vec![(0, 4)]);
    }

    #[test]
    fn unmatched_query_selects_nothing() {
        let mut palette = Palette::new();
        for c in "zzz".chars() {
            palette.push(c);
        }
        assert!(palette.matches().is_empty());
        assert_eq!(palette.selected_screen(), None);

        palette.move_down();
        assert_eq!(palette.selected, 0);
    }

    #[test]
    fn selection_wraps() {
        let mut palette = Palette::new();
        palette.move_up();
        assert_eq!(palette.selected_screen(), Some(Screen::Reports));
        palette.move_down();
        assert_eq!(palette.selected_screen(), Some(Screen::Dashboard));
    }

    #[test]
    fn coalesce_merges_runs() {
        assert_eq!(coalesce(&[0, 1, 2, 5, 7, 8]), vec![(0, 3), (5, 6), (7, 9)]);
        assert!(coalesce(&[]).is_empty());
    }
}
