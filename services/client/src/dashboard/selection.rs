//! services/client/src/dashboard/selection.rs
//!
//! Tracks the tutorial currently open in the viewer.
//!
//! `Closed` → `Open` when the user picks a tutorial from the collection.
//! While open, the held object is replaced whenever a refetched collection
//! carries a different version of the same id, and immediately when a save of
//! that id is submitted. Only an explicit close or a successful delete returns
//! to `Closed`; an id missing from a refetch leaves the selection as it is.

use tutorials_core::domain::Tutorial;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    #[default]
    Closed,
    Open(Tutorial),
}

impl Selection {
    pub fn current(&self) -> Option<&Tutorial> {
        match self {
            Selection::Open(tutorial) => Some(tutorial),
            Selection::Closed => None,
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.current().map(|t| t.id.as_str())
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Selection::Open(_))
    }

    /// Opens the tutorial `id` as found in `items`. Unknown ids change nothing.
    pub fn open(&mut self, id: &str, items: &[Tutorial]) -> bool {
        match items.iter().find(|t| t.id == id) {
            Some(tutorial) => {
                *self = Selection::Open(tutorial.clone());
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        *self = Selection::Closed;
    }

    /// Closes the viewer if it shows `id`.
    pub fn close_if(&mut self, id: &str) -> bool {
        if self.selected_id() == Some(id) {
            self.close();
            return true;
        }
        false
    }

    /// Optimistic phase of a save: shows the submitted object right away.
    pub fn apply_optimistic(&mut self, submitted: &Tutorial) -> bool {
        self.replace_if_changed(submitted)
    }

    /// Authoritative phase: adopts the refetched version of the open id.
    pub fn reconcile(&mut self, items: &[Tutorial]) -> bool {
        let Some(id) = self.selected_id() else {
            return false;
        };
        match items.iter().find(|t| t.id == id) {
            Some(fresh) => self.replace_if_changed(fresh),
            None => false,
        }
    }

    fn replace_if_changed(&mut self, candidate: &Tutorial) -> bool {
        match self {
            Selection::Open(held) if held.id == candidate.id && held != candidate => {
                *held = candidate.clone();
                true
            }
            _ => false,
        }
    }
}
