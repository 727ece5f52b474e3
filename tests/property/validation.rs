//! Property-based form validation tests.
//!
//! Uses proptest to verify:
//! 1. Validated names are always trimmed and non-empty.
//! 2. Whitespace-only names are always rejected.
//! 3. Exactly the three wire status values are accepted.
//! 4. Valid calendar dates always parse; malformed strings never do.
//! 5. A form prefilled from a task validates back to the task's own fields.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::NaiveDate;
use proptest::prelude::*;

use tasksync::model::{Task, TaskForm, TaskId, TaskStatus, ValidationError};

// --- Strategies for form inputs ---

/// Strategy for names with no leading or trailing whitespace.
fn arb_trimmed_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 ]{0,30}[a-zA-Z0-9]|[a-zA-Z0-9]"
}

/// Strategy for generating each task status.
fn arb_status() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Pending),
        Just(TaskStatus::InProgress),
        Just(TaskStatus::Completed),
    ]
}

/// Strategy for valid calendar dates.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2000..2100i32, 1..=12u32, 1..=28u32).prop_map(|(y, m, d)| {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
    })
}

/// Strategy for status strings that are not wire values.
fn arb_unknown_status() -> impl Strategy<Value = String> {
    "[a-zA-Z-]{1,16}".prop_filter("must not be a wire value", |s| {
        !matches!(s.as_str(), "pending" | "in-progress" | "completed")
    })
}

/// Strategy for deadline strings that are not `YYYY-MM-DD` dates.
fn arb_bad_deadline() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9/.-]{1,16}".prop_filter("must not parse as a date", |s| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").is_err()
    })
}

/// Strategy for complete tasks with trim-stable fields.
fn arb_task() -> impl Strategy<Value = Task> {
    (
        arb_trimmed_name(),
        proptest::option::of(arb_trimmed_name()),
        arb_status(),
        proptest::option::of(arb_date()),
    )
        .prop_map(|(name, description, status, deadline)| Task {
            id: TaskId::new("t-1"),
            name,
            description,
            status,
            deadline,
            created_at: chrono::Utc::now(),
        })
}

// --- Property tests ---

proptest! {
    /// Whatever padding surrounds the name, the validated name is the
    /// trimmed core and never empty.
    #[test]
    fn validated_name_is_trimmed_and_non_empty(
        core in arb_trimmed_name(),
        lead in "[ \t]{0,4}",
        trail in "[ \t]{0,4}",
    ) {
        let form = TaskForm {
            name: format!("{lead}{core}{trail}"),
            ..TaskForm::default()
        };
        let payload = form.validate().expect("name has visible characters");
        prop_assert_eq!(payload.name.as_str(), core.as_str());
        prop_assert!(!payload.name.is_empty());
    }

    /// A name made only of whitespace is always rejected.
    #[test]
    fn whitespace_only_name_is_always_rejected(name in "[ \t\r\n]{0,20}") {
        let form = TaskForm {
            name,
            ..TaskForm::default()
        };
        prop_assert_eq!(form.validate().unwrap_err(), ValidationError::NameEmpty);
    }

    /// Every wire status value validates to its own status.
    #[test]
    fn wire_status_values_are_always_accepted(status in arb_status()) {
        let form = TaskForm {
            name: "Task".to_owned(),
            status: status.as_wire().to_owned(),
            ..TaskForm::default()
        };
        let payload = form.validate().expect("known status");
        prop_assert_eq!(payload.status, status);
    }

    /// Anything that is not a wire status value is rejected.
    #[test]
    fn unknown_status_strings_are_always_rejected(status in arb_unknown_status()) {
        let form = TaskForm {
            name: "Task".to_owned(),
            status,
            ..TaskForm::default()
        };
        prop_assert!(matches!(
            form.validate().unwrap_err(),
            ValidationError::UnknownStatus(_)
        ));
    }

    /// Every valid calendar date in plain form is accepted as a deadline.
    #[test]
    fn valid_dates_are_always_accepted(date in arb_date()) {
        let form = TaskForm {
            name: "Task".to_owned(),
            deadline: date.format("%Y-%m-%d").to_string(),
            ..TaskForm::default()
        };
        let payload = form.validate().expect("plain date");
        prop_assert_eq!(payload.deadline, Some(date));
    }

    /// Strings that are not dates never validate as deadlines.
    #[test]
    fn malformed_deadlines_are_always_rejected(deadline in arb_bad_deadline()) {
        let form = TaskForm {
            name: "Task".to_owned(),
            deadline,
            ..TaskForm::default()
        };
        prop_assert!(matches!(
            form.validate().unwrap_err(),
            ValidationError::InvalidDeadline(_)
        ));
    }

    /// A form prefilled from any task validates back to that task's own
    /// fields, so opening and saving an edit changes nothing.
    #[test]
    fn prefilled_form_validates_back_to_task_fields(task in arb_task()) {
        let form = TaskForm::from_task(&task);
        let payload = form.validate().expect("prefilled form is valid");
        prop_assert_eq!(payload.name, task.name);
        prop_assert_eq!(payload.description, task.description);
        prop_assert_eq!(payload.status, task.status);
        prop_assert_eq!(payload.deadline, task.deadline);
    }
}
