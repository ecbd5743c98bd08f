//! Session state for the two workflows and the notification primitives.
//!
//! Everything here is plain Rust with no DOM access: components keep these
//! structs inside signals and call their methods from event handlers.
//!
//! - [`analysis`] - inconsistency review session
//! - [`update`] - multi-sheet update session and merge queue
//! - [`notifications`] - loader and toast stack

pub mod analysis;
pub mod notifications;
pub mod update;

pub use analysis::*;
pub use notifications::*;
pub use update::*;

/// The two workflows offered on the landing panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Workflow {
    /// Flag inconsistent rows and stage removals per sheet
    Analysis,
    /// Merge sheets of an update file into a base file
    Update,
}

impl Workflow {
    pub const ALL: [Workflow; 2] = [Workflow::Analysis, Workflow::Update];

    /// Value of the card's `data-workflow` attribute.
    pub fn identifier(&self) -> &'static str {
        match self {
            Workflow::Analysis => "analysis",
            Workflow::Update => "update",
        }
    }

    pub fn from_identifier(identifier: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|workflow| workflow.identifier() == identifier)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Workflow::Analysis => "Analyse inconsistencies",
            Workflow::Update => "Update a spreadsheet",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Workflow::Analysis => {
                "Find rows with unusual values, choose which ones to drop and export the cleaned file."
            }
            Workflow::Update => {
                "Replace rows of a base file with rows of an update file, matched on a shared key column."
            }
        }
    }
}

/// Issues tickets for requests whose responses may arrive out of order.
///
/// Only the most recently issued ticket is current; responses carrying an
/// older one are stale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_identifiers() {
        assert_eq!(Workflow::from_identifier("analysis"), Some(Workflow::Analysis));
        assert_eq!(Workflow::from_identifier("update"), Some(Workflow::Update));
        assert_eq!(Workflow::from_identifier("merge"), None);
        for workflow in Workflow::ALL {
            assert_eq!(Workflow::from_identifier(workflow.identifier()), Some(workflow));
        }
    }

    #[test]
    fn test_only_latest_ticket_is_current() {
        let mut sequence = RequestSequence::default();
        let first = sequence.issue();
        let second = sequence.issue();
        assert!(!sequence.is_current(first));
        assert!(sequence.is_current(second));
    }
}
