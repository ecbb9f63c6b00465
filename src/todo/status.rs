use chrono::NaiveDate;

use super::data::{Status, Todo};

/// Status of `todo` as seen on `today`.
///
/// Completion wins over dates. Otherwise the todo is ongoing inside its
/// inclusive `[start_date, due_date]` window, upcoming before it and
/// pending after it. Inverted ranges are tolerated rather than rejected
/// here: they read as upcoming until `start_date`, then pending. The final
/// arm returning the stored status cannot fire for ordered dates.
pub fn derive_status(todo: &Todo, today: NaiveDate) -> Status {
    if todo.completed {
        return Status::Completed;
    }

    if todo.start_date <= today && today <= todo.due_date {
        Status::Ongoing
    } else if today < todo.start_date {
        Status::Upcoming
    } else if today > todo.due_date {
        Status::Pending
    } else {
        todo.status
    }
}

/// Re-derives the stored status of every todo for `today`. Run once per
/// load, before any view is selected.
pub fn annotate(todos: &mut [Todo], today: NaiveDate) {
    for todo in todos.iter_mut() {
        todo.status = derive_status(todo, today);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::data::Category;
    use chrono::Duration;
    use proptest::prelude::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn todo(start: NaiveDate, due: NaiveDate, completed: bool) -> Todo {
        Todo {
            id: 1,
            title: "Write report".to_string(),
            category: Category::Casual,
            subtasks: vec![],
            start_date: start,
            due_date: due,
            completed,
            is_deleted: false,
            status: Status::Upcoming,
        }
    }

    #[test]
    fn january_scenario() {
        let mut item = todo(day(2024, 1, 1), day(2024, 1, 10), false);

        assert_eq!(derive_status(&item, day(2024, 1, 5)), Status::Ongoing);
        assert_eq!(derive_status(&item, day(2024, 1, 11)), Status::Pending);
        assert_eq!(derive_status(&item, day(2023, 12, 31)), Status::Upcoming);

        item.completed = true;
        assert_eq!(derive_status(&item, day(2024, 1, 5)), Status::Completed);
        assert_eq!(derive_status(&item, day(2024, 1, 11)), Status::Completed);
        assert_eq!(derive_status(&item, day(2023, 12, 31)), Status::Completed);
    }

    #[test]
    fn window_is_inclusive_on_both_ends() {
        let item = todo(day(2024, 1, 1), day(2024, 1, 10), false);

        assert_eq!(derive_status(&item, day(2024, 1, 1)), Status::Ongoing);
        assert_eq!(derive_status(&item, day(2024, 1, 10)), Status::Ongoing);
    }

    #[test]
    fn inverted_range_does_not_panic() {
        // Dates are totally ordered, so one of the date rules always fires
        // and the stored-status fallback is never reached.
        let item = todo(day(2024, 1, 10), day(2024, 1, 1), false);

        assert_eq!(derive_status(&item, day(2023, 12, 1)), Status::Upcoming);
        assert_eq!(derive_status(&item, day(2024, 1, 5)), Status::Upcoming);
        assert_eq!(derive_status(&item, day(2024, 1, 10)), Status::Upcoming);
        assert_eq!(derive_status(&item, day(2024, 2, 1)), Status::Pending);
    }

    #[test]
    fn derive_does_not_touch_the_todo() {
        let item = todo(day(2024, 1, 1), day(2024, 1, 10), false);
        let before = item.clone();

        derive_status(&item, day(2024, 1, 5));

        assert_eq!(item, before);
    }

    #[test]
    fn annotate_rewrites_every_status() {
        let mut items = vec![
            todo(day(2024, 1, 1), day(2024, 1, 10), false),
            todo(day(2024, 2, 1), day(2024, 2, 10), false),
            todo(day(2023, 1, 1), day(2023, 1, 10), false),
            todo(day(2023, 1, 1), day(2023, 1, 10), true),
        ];

        annotate(&mut items, day(2024, 1, 5));

        let statuses: Vec<Status> = items.iter().map(|item| item.status).collect();
        assert_eq!(
            statuses,
            vec![
                Status::Ongoing,
                Status::Upcoming,
                Status::Pending,
                Status::Completed
            ]
        );
    }

    fn any_day() -> impl Strategy<Value = NaiveDate> {
        (0i64..40_000).prop_map(|offset| day(1970, 1, 1) + Duration::days(offset))
    }

    proptest! {
        #[test]
        fn completed_always_wins(start in any_day(), due in any_day(), today in any_day()) {
            let item = todo(start, due, true);
            prop_assert_eq!(derive_status(&item, today), Status::Completed);
        }

        #[test]
        fn inside_window_is_ongoing(start in any_day(), span in 0i64..400, offset in 0i64..400) {
            let due = start + Duration::days(span);
            let today = start + Duration::days(offset.min(span));
            let item = todo(start, due, false);
            prop_assert_eq!(derive_status(&item, today), Status::Ongoing);
        }

        #[test]
        fn before_window_is_upcoming(start in any_day(), span in 0i64..400, lead in 1i64..400) {
            let item = todo(start, start + Duration::days(span), false);
            let today = start - Duration::days(lead);
            prop_assert_eq!(derive_status(&item, today), Status::Upcoming);
        }

        #[test]
        fn after_window_is_pending(start in any_day(), span in 0i64..400, lag in 1i64..400) {
            let due = start + Duration::days(span);
            let item = todo(start, due, false);
            prop_assert_eq!(derive_status(&item, due + Duration::days(lag)), Status::Pending);
        }

        #[test]
        fn derivation_is_repeatable(start in any_day(), due in any_day(), today in any_day(), completed in any::<bool>()) {
            let item = todo(start, due, completed);
            prop_assert_eq!(derive_status(&item, today), derive_status(&item, today));
        }
    }
}
