/// Chart layer: renderer-agnostic specs and the pure builder that derives
/// them from a validated snapshot.
///
/// ```text
///   Snapshot + Theme
///        │
///        ▼
///   ┌──────────┐
///   │ builder   │  pure transform, deterministic
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ DashboardView │  ChartSpecs + summary blocks
///   └──────────────┘
///        │
///        ▼
///   rendering adapter (ui::render, or any other backend)
/// ```

pub mod builder;
pub mod spec;
