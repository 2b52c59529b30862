/// Data layer: the whole refresh-cycle pipeline, UI-free and testable.
///
/// Architecture:
/// ```text
///  spreadsheet export (CSV over HTTP, or local file)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse → EmployeeDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  derive   │  per-record classifications (levels, tenure)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  sidebar predicates → filtered indices
///   └──────────┘
///        │
///        ├────────────────────┐
///        ▼                    ▼
///   ┌───────────┐        ┌──────────┐
///   │ aggregate  │        │  alerts   │  KPI/chart tables, alert browser
///   └───────────┘        └──────────┘
/// ```
///
/// The dataset is rebuilt from scratch on every refresh; nothing in this
/// layer holds state across cycles.

pub mod aggregate;
pub mod alerts;
pub mod derive;
pub mod filter;
pub mod loader;
pub mod model;
