//! Bookable-slot computation.
//!
//! A professional's weekly template lists "HH:MM" start offsets per weekday.
//! For a concrete date, each offset becomes a half-open interval
//! `[start, start + duration)` and is offered only if it overlaps no
//! committed appointment. Pure function of its inputs; the caller re-runs it
//! whenever the date, professional, or committed set changes.

use chrono::{NaiveDate, NaiveTime};

use crate::db::availability::Availability;

/// Milliseconds in one day.
const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// A committed appointment interval, epoch milliseconds, half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct BusyInterval {
    pub start_time: i64,
    pub end_time: i64,
}

/// Half-open interval overlap: touching boundaries do not conflict.
#[inline]
pub fn overlaps(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> bool {
    a_start < b_end && a_end > b_start
}

/// Resolve a "HH:MM" slot on a date to `[start, end)` epoch millis.
///
/// Returns None for malformed slot strings; a bad row in a template must not
/// take down the whole slot list.
pub fn slot_interval(date: NaiveDate, slot: &str, duration_minutes: i32) -> Option<(i64, i64)> {
    let time = NaiveTime::parse_from_str(slot, "%H:%M").ok()?;
    let start = date.and_time(time).and_utc().timestamp_millis();
    let end = start + i64::from(duration_minutes) * 60_000;
    Some((start, end))
}

/// The `[00:00:00.000, 23:59:59.999]` window of a date, epoch millis.
pub fn day_window(date: NaiveDate) -> (i64, i64) {
    let start = date
        .and_time(NaiveTime::MIN)
        .and_utc()
        .timestamp_millis();
    (start, start + DAY_MS - 1)
}

/// Compute the bookable start times for one (professional, service, date).
///
/// - `template`: the availability row matching the date's weekday, if any.
/// - `existing`: committed intervals for that professional on that date,
///   already filtered of cancelled/rejected appointments.
///
/// No template, a day flagged unavailable, or an empty slot list all yield an
/// empty result. Output is ascending; zero-padded "HH:MM" sorts correctly as
/// a string.
pub fn compute_slots(
    template: Option<&Availability>,
    existing: &[BusyInterval],
    date: NaiveDate,
    duration_minutes: i32,
) -> Vec<String> {
    let Some(template) = template else {
        return Vec::new();
    };
    if !template.is_available || template.time_slots.is_empty() {
        return Vec::new();
    }

    let mut candidates = template.time_slots.clone();
    candidates.sort();

    candidates
        .into_iter()
        .filter(|slot| {
            let Some((start, end)) = slot_interval(date, slot, duration_minutes) else {
                return false;
            };
            !existing
                .iter()
                .any(|b| overlaps(start, end, b.start_time, b.end_time))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(slots: &[&str], is_available: bool) -> Availability {
        Availability {
            id: 1,
            professional_id: 1,
            day_of_week: 1,
            time_slots: slots.iter().map(|s| s.to_string()).collect(),
            is_available,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn busy(date: NaiveDate, from: &str, to: &str) -> BusyInterval {
        let (start, _) = slot_interval(date, from, 0).unwrap();
        let (end, _) = slot_interval(date, to, 0).unwrap();
        BusyInterval {
            start_time: start,
            end_time: end,
        }
    }

    #[test]
    fn no_template_yields_empty() {
        assert!(compute_slots(None, &[], date(), 60).is_empty());
    }

    #[test]
    fn unavailable_day_yields_empty() {
        let t = template(&["09:00", "10:00"], false);
        assert!(compute_slots(Some(&t), &[], date(), 60).is_empty());
    }

    #[test]
    fn empty_slot_list_yields_empty() {
        let t = template(&[], true);
        assert!(compute_slots(Some(&t), &[], date(), 60).is_empty());
    }

    #[test]
    fn all_slots_free() {
        let t = template(&["09:00", "10:00", "11:00"], true);
        assert_eq!(
            compute_slots(Some(&t), &[], date(), 60),
            vec!["09:00", "10:00", "11:00"]
        );
    }

    #[test]
    fn booked_slot_is_excluded() {
        let t = template(&["09:00", "10:00", "11:00"], true);
        let existing = [busy(date(), "10:00", "11:00")];
        assert_eq!(
            compute_slots(Some(&t), &existing, date(), 60),
            vec!["09:00", "11:00"]
        );
    }

    #[test]
    fn touching_boundary_is_not_a_conflict() {
        // Existing [10:00, 11:00): a 11:00 candidate starts exactly at the end.
        let t = template(&["11:00"], true);
        let existing = [busy(date(), "10:00", "11:00")];
        assert_eq!(compute_slots(Some(&t), &existing, date(), 60), vec!["11:00"]);
    }

    #[test]
    fn straddling_candidate_conflicts() {
        // Candidate [10:30, 11:30) against existing [10:00, 11:00).
        let t = template(&["10:30"], true);
        let existing = [busy(date(), "10:00", "11:00")];
        assert!(compute_slots(Some(&t), &existing, date(), 60).is_empty());
    }

    #[test]
    fn candidate_containing_existing_conflicts() {
        // A long service swallowing a short booking still collides.
        let t = template(&["10:00"], true);
        let existing = [busy(date(), "10:30", "10:45")];
        assert!(compute_slots(Some(&t), &existing, date(), 120).is_empty());
    }

    #[test]
    fn output_is_sorted_even_if_template_is_not() {
        let t = template(&["14:00", "09:00", "11:00"], true);
        assert_eq!(
            compute_slots(Some(&t), &[], date(), 30),
            vec!["09:00", "11:00", "14:00"]
        );
    }

    #[test]
    fn malformed_slot_is_skipped() {
        let t = template(&["09:00", "nonsense", "25:99"], true);
        assert_eq!(compute_slots(Some(&t), &[], date(), 60), vec!["09:00"]);
    }

    #[test]
    fn idempotent() {
        let t = template(&["09:00", "10:00"], true);
        let existing = [busy(date(), "09:00", "10:00")];
        let a = compute_slots(Some(&t), &existing, date(), 60);
        let b = compute_slots(Some(&t), &existing, date(), 60);
        assert_eq!(a, b);
    }

    #[test]
    fn overlap_rule() {
        // (StartA < EndB) and (EndA > StartB)
        assert!(overlaps(0, 10, 5, 15));
        assert!(overlaps(5, 15, 0, 10));
        assert!(overlaps(0, 10, 2, 8));
        assert!(!overlaps(0, 10, 10, 20)); // touching
        assert!(!overlaps(10, 20, 0, 10)); // touching
        assert!(!overlaps(0, 10, 20, 30));
    }

    #[test]
    fn day_window_spans_the_whole_day() {
        let (start, end) = day_window(date());
        assert_eq!(end - start, 24 * 60 * 60 * 1000 - 1);
        let (next_start, _) = day_window(date().succ_opt().unwrap());
        assert_eq!(next_start, end + 1);
    }

    #[test]
    fn slot_interval_derives_end_from_duration() {
        let (start, end) = slot_interval(date(), "09:00", 45).unwrap();
        assert_eq!(end - start, 45 * 60_000);
        assert!(slot_interval(date(), "9am", 45).is_none());
    }
}
