// Input checks collaborators run before handing data to the store

use crate::models::{NewTask, TaskPatch};
use eyre::{Result, eyre};

/// Reject empty or whitespace-only titles
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(eyre!("Task title cannot be empty"));
    }
    Ok(())
}

pub fn validate_new_task(input: &NewTask) -> Result<()> {
    validate_title(&input.title)
}

/// Only a title that is present in the patch is checked
pub fn validate_patch(patch: &TaskPatch) -> Result<()> {
    match &patch.title {
        Some(title) => validate_title(title),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Write report").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   \t").is_err());

        let err = validate_title("").unwrap_err();
        assert_eq!(err.to_string(), "Task title cannot be empty");
    }

    #[test]
    fn test_validate_new_task() {
        assert!(validate_new_task(&NewTask::new("ok", TaskStatus::Pending, "")).is_ok());
        assert!(validate_new_task(&NewTask::new(" ", TaskStatus::Pending, "Dec 1, 2025")).is_err());
    }

    #[test]
    fn test_validate_patch() {
        assert!(validate_patch(&TaskPatch::new()).is_ok());
        assert!(validate_patch(&TaskPatch::new().status(TaskStatus::Completed)).is_ok());
        assert!(validate_patch(&TaskPatch::new().title("")).is_err());
    }
}
