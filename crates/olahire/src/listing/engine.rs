use std::time::Instant;

use super::criteria::FilterCriteria;
use super::debounce::Debounce;
use super::ListRecord;
use crate::config::UiConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: &'static str,
    pub direction: SortDirection,
}

/// One page of the derived view.
#[derive(Debug)]
pub struct VisiblePage<'a, T> {
    pub items: Vec<&'a T>,
    pub page: usize,
    pub page_count: usize,
}

/// Debounced filter + stable sort + pagination over a snapshot of rows.
///
/// The snapshot is replaced wholesale on every fetch and never partially
/// mutated except through [`ListEngine::amend`], which exists for the edit
/// buffer to apply a committed value.
pub struct ListEngine<T> {
    items: Vec<T>,
    // Indices into `items`, in display order.
    visible: Vec<usize>,
    criteria: FilterCriteria,
    pending: Option<FilterCriteria>,
    debounce: Debounce,
    sort: Option<SortSpec>,
    page: usize,
    page_size: usize,
}

impl<T: ListRecord> ListEngine<T> {
    pub fn new(ui: &UiConfig) -> Self {
        Self {
            items: Vec::new(),
            visible: Vec::new(),
            criteria: FilterCriteria::default(),
            pending: None,
            debounce: Debounce::new(ui.quiet_interval()),
            sort: None,
            page: 1,
            page_size: ui.page_size,
        }
    }

    /// Replace the whole snapshot, recompute with the committed criteria,
    /// and reset to the first page.
    pub fn replace_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.recompute();
        self.page = 1;
    }

    /// Record new criteria and start the quiet window. Nothing is recomputed
    /// until [`ListEngine::poll`] observes the interval elapsing, so a burst
    /// of keystrokes costs a single recompute using only the last criteria.
    pub fn set_criteria(&mut self, criteria: FilterCriteria, now: Instant) {
        self.pending = Some(criteria);
        self.debounce.schedule(now);
    }

    /// Fire the pending recompute if the quiet interval elapsed. Returns
    /// whether the visible view changed generation.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.debounce.is_due(now) {
            return false;
        }
        let Some(criteria) = self.pending.take() else {
            return false;
        };
        self.criteria = criteria;
        self.debounce.cancel();
        self.recompute();
        // A filtered-out current page must not linger as a silent blank.
        self.page = 1;
        true
    }

    /// Stable re-sort of the current view. Ties keep their prior relative
    /// order so re-sorting after an edit does not shuffle unrelated rows.
    pub fn set_sort(&mut self, field: &'static str, direction: SortDirection) {
        self.sort = Some(SortSpec { field, direction });
        self.apply_sort();
        self.clamp_page();
    }

    /// Clamped page navigation; page numbers are 1-based.
    pub fn page(&mut self, n: usize) {
        let count = self.page_count();
        if count == 0 {
            self.page = 1;
        } else {
            self.page = n.clamp(1, count);
        }
    }

    pub fn visible(&self) -> VisiblePage<'_, T> {
        let page_count = self.page_count();
        let start = (self.page - 1) * self.page_size;
        let items = self
            .visible
            .iter()
            .skip(start)
            .take(self.page_size)
            .map(|&idx| &self.items[idx])
            .collect();
        VisiblePage {
            items,
            page: self.page,
            page_count,
        }
    }

    /// Committed criteria (pending ones are not visible until they fire).
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    /// Full snapshot, unfiltered.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Apply `amend` to the first row matching `pred`, then refresh the
    /// derived view in place (page preserved, clamped). This is the edit
    /// buffer's commit path; everything else replaces the snapshot wholesale.
    pub fn amend(
        &mut self,
        pred: impl Fn(&T) -> bool,
        amend: impl FnOnce(&mut T),
    ) -> bool {
        let Some(row) = self.items.iter_mut().find(|row| pred(row)) else {
            return false;
        };
        amend(row);
        self.recompute();
        self.clamp_page();
        true
    }

    fn page_count(&self) -> usize {
        self.visible.len().div_ceil(self.page_size)
    }

    fn clamp_page(&mut self) {
        let count = self.page_count();
        if count == 0 {
            self.page = 1;
        } else if self.page > count {
            self.page = count;
        }
    }

    fn recompute(&mut self) {
        self.visible = (0..self.items.len())
            .filter(|&idx| self.criteria.matches(&self.items[idx]))
            .collect();
        self.apply_sort();
    }

    fn apply_sort(&mut self) {
        let Some(SortSpec { field, direction }) = self.sort else {
            return;
        };
        let items = &self.items;
        // `sort_by` is stable; reversing the comparator flips direction
        // without perturbing ties.
        self.visible.sort_by(|&a, &b| {
            let ka = items[a].sort_key(field);
            let kb = items[b].sort_key(field);
            match direction {
                SortDirection::Ascending => ka.total_cmp(&kb),
                SortDirection::Descending => kb.total_cmp(&ka),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::numeric_key;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    struct Job {
        title: &'static str,
        location: &'static str,
        salary: &'static str,
        score: f64,
    }

    impl ListRecord for Job {
        fn haystacks(&self) -> Vec<&str> {
            vec![self.title]
        }

        fn categorical(&self, field: &str) -> Option<&str> {
            (field == "location").then_some(self.location)
        }

        fn numeric(&self, field: &str) -> i64 {
            if field == "salary" {
                numeric_key(self.salary)
            } else {
                0
            }
        }

        fn sort_key(&self, field: &str) -> f64 {
            if field == "score" {
                self.score
            } else {
                0.0
            }
        }
    }

    fn job(title: &'static str, location: &'static str, salary: &'static str, score: f64) -> Job {
        Job {
            title,
            location,
            salary,
            score,
        }
    }

    fn ui() -> UiConfig {
        UiConfig::default()
    }

    fn engine_with(items: Vec<Job>) -> ListEngine<Job> {
        let mut engine = ListEngine::new(&ui());
        engine.replace_items(items);
        engine
    }

    #[test]
    fn empty_snapshot_yields_empty_view() {
        let engine = engine_with(Vec::new());
        let view = engine.visible();
        assert!(view.items.is_empty());
        assert_eq!(view.page_count, 0);
        assert_eq!(view.page, 1);
    }

    #[test]
    fn no_criteria_passes_everything() {
        let engine = engine_with(vec![
            job("Engineer", "NY", "$90k", 0.9),
            job("Nurse", "NY", "$40k", 0.4),
        ]);
        assert_eq!(engine.visible().items.len(), 2);
    }

    #[test]
    fn filter_example_from_the_job_board() {
        let mut engine = engine_with(vec![
            job("Engineer", "NY", "$90k", 0.9),
            job("Nurse", "NY", "$40k", 0.4),
        ]);

        let criteria = FilterCriteria::new()
            .with_text("eng")
            .with_numeric_range("salary", 50_000, 200_000);
        let now = Instant::now();
        engine.set_criteria(criteria, now);
        assert!(engine.poll(now + Duration::from_millis(300)));

        let view = engine.visible();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].title, "Engineer");
    }

    #[test]
    fn burst_of_criteria_collapses_into_one_recompute_with_the_last() {
        let mut engine = engine_with(vec![
            job("Engineer", "NY", "$90k", 0.9),
            job("Nurse", "NY", "$40k", 0.4),
        ]);

        let start = Instant::now();
        for (offset, query) in ["e", "en", "eng", "nur"].iter().enumerate() {
            engine.set_criteria(
                FilterCriteria::new().with_text(*query),
                start + Duration::from_millis(offset as u64 * 50),
            );
        }

        // The first deadlines were superseded; nothing fires mid-burst.
        assert!(!engine.poll(start + Duration::from_millis(320)));
        assert_eq!(engine.visible().items.len(), 2);

        // One recompute fires, using only the last criteria.
        assert!(engine.poll(start + Duration::from_millis(450)));
        assert!(!engine.poll(start + Duration::from_millis(460)));
        let view = engine.visible();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].title, "Nurse");
    }

    #[test]
    fn pagination_clamps_and_counts() {
        let items: Vec<Job> = (0..12)
            .map(|i| match i {
                0 => job("Job 0", "NY", "$50k", 0.0),
                _ => job("Job n", "NY", "$50k", 0.0),
            })
            .collect();
        let mut engine = engine_with(items);

        let view = engine.visible();
        assert_eq!(view.page_count, 3);
        assert_eq!(view.items.len(), 5);

        engine.page(4);
        let view = engine.visible();
        assert_eq!(view.page, 3);
        assert_eq!(view.items.len(), 2);

        engine.page(0);
        assert_eq!(engine.visible().page, 1);
    }

    #[test]
    fn criteria_change_resets_to_page_one() {
        let items: Vec<Job> = (0..12).map(|_| job("Engineer", "NY", "$90k", 0.5)).collect();
        let mut engine = engine_with(items);
        engine.page(3);
        assert_eq!(engine.visible().page, 3);

        let now = Instant::now();
        engine.set_criteria(FilterCriteria::new().with_text("eng"), now);
        engine.poll(now + Duration::from_millis(300));
        assert_eq!(engine.visible().page, 1);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let mut engine = engine_with(vec![
            job("First", "NY", "$90k", 0.7),
            job("Second", "NY", "$80k", 0.7),
            job("Third", "NY", "$70k", 0.9),
        ]);

        engine.set_sort("score", SortDirection::Descending);
        let titles: Vec<&str> = engine.visible().items.iter().map(|j| j.title).collect();
        assert_eq!(titles, vec!["Third", "First", "Second"]);

        // Toggling direction reverses comparison but ties keep prior order.
        engine.set_sort("score", SortDirection::Ascending);
        let titles: Vec<&str> = engine.visible().items.iter().map(|j| j.title).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn amend_updates_one_row_and_keeps_the_view_consistent() {
        let mut engine = engine_with(vec![
            job("Engineer", "NY", "$90k", 0.9),
            job("Nurse", "NY", "$40k", 0.4),
        ]);

        let amended = engine.amend(|j| j.title == "Nurse", |j| j.score = 0.95);
        assert!(amended);
        assert_eq!(engine.items()[1].score, 0.95);
        assert_eq!(engine.visible().items.len(), 2);

        let missing = engine.amend(|j| j.title == "Pilot", |_| {});
        assert!(!missing);
    }
}
