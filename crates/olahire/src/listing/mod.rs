//! Client-side list engine: debounced multi-predicate filtering, stable
//! sorting, and pagination over a wholesale-replaced snapshot of rows.

mod criteria;
mod debounce;
mod engine;

pub use criteria::{numeric_key, FilterCriteria};
pub use engine::{ListEngine, SortDirection, SortSpec, VisiblePage};

/// Typed access to the fields the engine filters and sorts on. Rows stay
/// opaque to the engine beyond what this trait exposes.
pub trait ListRecord {
    /// The fixed set of searchable haystacks for the free-text query.
    fn haystacks(&self) -> Vec<&str>;

    /// Exact-match field value, or `None` when the row has no such field.
    fn categorical(&self, field: &str) -> Option<&str>;

    /// Numeric filter key for a field; absent fields key as 0.
    fn numeric(&self, field: &str) -> i64;

    /// Numeric sort key for a field; absent fields key as 0.
    fn sort_key(&self, field: &str) -> f64;
}
