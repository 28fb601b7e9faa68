//! Core domain types

use std::collections::BTreeMap;
use std::fmt;

use ob_protocol::{ConnectionTarget, ConsoleError};

/// Player name to key label
///
/// Keys are opaque labels; nothing checks that they name a real input key.
pub type BindingMap = BTreeMap<String, String>;

/// Result of pushing one command batch to one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub target: ConnectionTarget,
    pub result: Result<(), ConsoleError>,
}

impl DispatchOutcome {
    /// Outcome for a target that took the whole batch
    pub fn success(target: ConnectionTarget) -> Self {
        Self {
            target,
            result: Ok(()),
        }
    }

    /// Outcome for a target that failed
    pub fn failure(target: ConnectionTarget, error: ConsoleError) -> Self {
        Self {
            target,
            result: Err(error),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&ConsoleError> {
        self.result.as_ref().err()
    }
}

/// How a fan-out went as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    /// Every target took the batch
    AllSucceeded,
    /// Some targets failed, at least one succeeded
    PartialFailure,
    /// No target took the batch
    TotalFailure,
}

impl fmt::Display for DispatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchStatus::AllSucceeded => write!(f, "all succeeded"),
            DispatchStatus::PartialFailure => write!(f, "partial failure"),
            DispatchStatus::TotalFailure => write!(f, "total failure"),
        }
    }
}

/// Per-target outcomes of one dispatch, in target order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub outcomes: Vec<DispatchOutcome>,
}

impl DispatchReport {
    pub fn new(outcomes: Vec<DispatchOutcome>) -> Self {
        Self { outcomes }
    }

    /// Aggregate status; an empty report counts as all succeeded
    pub fn status(&self) -> DispatchStatus {
        let ok = self.succeeded_count();
        if ok == self.outcomes.len() {
            DispatchStatus::AllSucceeded
        } else if ok == 0 {
            DispatchStatus::TotalFailure
        } else {
            DispatchStatus::PartialFailure
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.status() == DispatchStatus::AllSucceeded
    }

    pub fn succeeded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }

    /// Outcomes of the targets that failed
    pub fn failed(&self) -> impl Iterator<Item = &DispatchOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refused(host: &str) -> DispatchOutcome {
        let target = ConnectionTarget::new(host, 2121);
        let address = target.address();
        DispatchOutcome::failure(target, ConsoleError::ConnectionRefused { address })
    }

    #[test]
    fn test_report_status() {
        let ok = DispatchOutcome::success(ConnectionTarget::new("a", 2121));

        let all = DispatchReport::new(vec![ok.clone(), ok.clone()]);
        assert_eq!(all.status(), DispatchStatus::AllSucceeded);

        let partial = DispatchReport::new(vec![ok.clone(), refused("b")]);
        assert_eq!(partial.status(), DispatchStatus::PartialFailure);
        let failed: Vec<_> = partial.failed().map(|o| o.target.host.as_str()).collect();
        assert_eq!(failed, vec!["b"]);

        let none = DispatchReport::new(vec![refused("b"), refused("c")]);
        assert_eq!(none.status(), DispatchStatus::TotalFailure);
        assert!(!none.all_succeeded());
    }

    #[test]
    fn test_outcome_accessors() {
        let outcome = refused("b");
        assert!(!outcome.succeeded());
        assert!(outcome.error().unwrap().is_refused());
    }
}
