//! `carryover-recon`: period-column reconciliation.
//!
//! Pure engine crate: takes a table of text cells whose row 0 holds date
//! labels, walks the period columns left to right and returns the table with
//! gaps carried forward and changed cells marked. No IO.
//!
//! ```
//! use carryover_recon::reconcile;
//!
//! let table = vec![
//!     vec!["".to_string(), "".into(), "".into(), "2024-01".into(), "2024-02".into()],
//!     vec!["id1".to_string(), "a".into(), "b".into(), "y".into(), "z".into()],
//!     vec!["id2".to_string(), "a".into(), "b".into(), "y".into(), "".into()],
//! ];
//!
//! let out = reconcile(table).unwrap();
//! assert_eq!(out[1][4], "z|");
//! assert_eq!(out[2][4], "y");
//! ```

pub mod classify;
pub mod engine;
pub mod error;
pub mod options;

pub use classify::{classify_column, ColumnKind};
pub use engine::{reconcile, ColumnReport, ReconcileSummary, Reconciled, Reconciler, Table};
pub use error::{ReconError, Result};
pub use options::{
    Comparison, FirstPeriod, ReconcileOptions, DEFAULT_IDENTIFIER_COLUMNS, DEFAULT_SENTINEL_LABEL,
};
