pub mod calendar;
pub mod catalogue;
pub mod error;
pub mod evaluator;
pub mod event;
pub mod hijri;
pub mod persistence;
pub mod report;
pub mod rule;

pub use catalogue::{Catalogue, CatalogueEntry};
pub use error::{CalendarError, CalendarResult};
pub use evaluator::{SkippedRule, YearEvaluation, YearEvaluator, evaluate};
pub use event::{Category, Event};
pub use hijri::HijriDate;
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteEventStore;
pub use persistence::{EventStore, PersistenceError, PersistenceResult};
pub use rule::HolidayRule;
