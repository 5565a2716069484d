use crate::error::Result;
use crate::item::WorkItem;

/// Produces the ordered list of work items for one run.
///
/// Read once before dispatch begins. Failing to read is fatal for the run.
pub trait WorkSource {
    fn items(&self) -> Result<Vec<WorkItem>>;
}

impl WorkSource for [WorkItem] {
    fn items(&self) -> Result<Vec<WorkItem>> {
        Ok(self.to_vec())
    }
}

impl WorkSource for Vec<WorkItem> {
    fn items(&self) -> Result<Vec<WorkItem>> {
        Ok(self.clone())
    }
}
