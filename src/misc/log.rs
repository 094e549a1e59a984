/*!
Miscellaneous items related to [logging](log).

Calls to the log macro are made throughout the library.
These are intended to provide useful information for extending the library and/or
fixing issues.

Note, no log implementation is provided by the library.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    pub const ANALYSIS: &str = "analysis";
    pub const BACKJUMP: &str = "backjump";
    pub const BANDIT: &str = "bandit";
    pub const CLAUSE_DB: &str = "clause_db";
    pub const DECISION: &str = "decision";
    pub const EPOCH: &str = "epoch";
    pub const PROPAGATION: &str = "propagation";
    pub const QUEUE: &str = "queue";
    pub const VALUATION: &str = "valuation";
}
