//! Predicate matching over persisted records.
//!
//! - `Criteria`: flat conjunction of per-field predicates
//! - `apply`: keep the records matching all predicates, in persisted order
//!
//! Every storage backend filters through this module, so equality and
//! inclusive-range predicates behave the same for JSON, CSV and XLSX files.

mod criteria;
mod filter;

pub use criteria::{Criteria, Predicate};
pub use filter::{apply, sort_by_salary_desc};
