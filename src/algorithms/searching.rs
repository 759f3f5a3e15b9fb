//! Linear, binary and jump search over tagged arrays
//!
//! The element under comparison is tagged [`Tag::Comparing`]; a hit is tagged
//! [`Tag::Sorted`]. The last step always carries `found_index`, which is
//! `null` when the target is absent.

use super::AlgorithmError;
use crate::snapshot::array::{elements_from, Element, Tag};
use crate::trace::{Recorder, StepExtras};
use serde_json::Value;

pub const LINEAR_SEARCH: &[&str] = &[
    "for i in 0..n:",
    "    if a[i] == target:",
    "        return i",
    "return not found",
];

pub const BINARY_SEARCH: &[&str] = &[
    "left = 0; right = n - 1",
    "while left <= right:",
    "    mid = (left + right) / 2",
    "    if a[mid] == target: return mid",
    "    if a[mid] < target: left = mid + 1",
    "    else: right = mid - 1",
    "return not found",
];

pub const JUMP_SEARCH: &[&str] = &[
    "step = floor(sqrt(n)); left = 0; right = 0",
    "while right < n and a[right] < target:",
    "    left = right; right += step",
    "for i in left..=min(right, n - 1):",
    "    if a[i] == target: return i",
    "    if a[i] > target: break",
    "return not found",
];

fn ensure_sorted(values: &[i64], algorithm: &'static str) -> Result<(), AlgorithmError> {
    if values.windows(2).all(|w| w[0] <= w[1]) {
        Ok(())
    } else {
        Err(AlgorithmError::UnsortedInput(algorithm))
    }
}

fn record_found(
    a: &mut [Element],
    index: usize,
    target: i64,
    extras: StepExtras,
    rec: &mut Recorder,
) -> Result<(), AlgorithmError> {
    a[index].tag = Tag::Sorted;
    rec.record_with(
        &*a,
        format!("Found {} at index {}!", target, index),
        extras.with("found_index", index),
    )?;
    Ok(())
}

fn record_not_found(
    a: &[Element],
    target: i64,
    line: u32,
    rec: &mut Recorder,
) -> Result<(), AlgorithmError> {
    rec.record_with(
        a,
        format!("{} not found in array", target),
        StepExtras::line(line)
            .with("target", target)
            .with("found_index", Value::Null),
    )?;
    Ok(())
}

pub fn linear_search(values: &[i64], target: i64, rec: &mut Recorder) -> Result<(), AlgorithmError> {
    let mut a = elements_from(values);
    rec.record_with(
        &a,
        format!("Searching for {} in {} elements", target, a.len()),
        StepExtras::line(1).with("target", target),
    )?;

    for i in 0..a.len() {
        a[i].tag = Tag::Comparing;
        let extras = StepExtras::line(2).with("target", target).with("current", i);
        if a[i].value == target {
            let extras = StepExtras {
                source_line: Some(3),
                ..extras
            };
            return record_found(&mut a, i, target, extras, rec);
        }
        rec.record_with(
            &a,
            format!("Checking index {}: {} != {}", i, a[i].value, target),
            extras,
        )?;
        a[i].tag = Tag::Normal;
    }

    record_not_found(&a, target, 4, rec)
}

pub fn binary_search(values: &[i64], target: i64, rec: &mut Recorder) -> Result<(), AlgorithmError> {
    ensure_sorted(values, "binary search")?;
    let mut a = elements_from(values);
    let (mut left, mut right) = (0i64, a.len() as i64 - 1);
    rec.record_with(
        &a,
        format!("Searching for {} in {} sorted elements", target, a.len()),
        StepExtras::line(1)
            .with("target", target)
            .with("left", left)
            .with("right", right),
    )?;

    while left <= right {
        let mid = left + (right - left) / 2;
        let m = mid as usize;
        let guess = a[m].value;
        a[m].tag = Tag::Comparing;
        let bounds = |line| {
            StepExtras::line(line)
                .with("target", target)
                .with("left", left)
                .with("right", right)
                .with("mid", mid)
        };

        if guess == target {
            return record_found(&mut a, m, target, bounds(4), rec);
        }
        if guess < target {
            rec.record_with(
                &a,
                format!("{} < {}, searching right half", guess, target),
                bounds(5),
            )?;
            left = mid + 1;
        } else {
            rec.record_with(
                &a,
                format!("{} > {}, searching left half", guess, target),
                bounds(6),
            )?;
            right = mid - 1;
        }
        a[m].tag = Tag::Normal;
    }

    record_not_found(&a, target, 7, rec)
}

pub(super) fn floor_sqrt(n: usize) -> usize {
    let mut root = 0;
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

pub fn jump_search(values: &[i64], target: i64, rec: &mut Recorder) -> Result<(), AlgorithmError> {
    ensure_sorted(values, "jump search")?;
    let mut a = elements_from(values);
    let n = a.len();
    let jump = floor_sqrt(n).max(1);
    rec.record_with(
        &a,
        format!("Searching for {} with jump size {}", target, jump),
        StepExtras::line(1).with("target", target).with("jump", jump),
    )?;
    if n == 0 {
        return record_not_found(&a, target, 7, rec);
    }

    let (mut left, mut right) = (0, 0);
    while right < n && a[right].value < target {
        left = right;
        right += jump;
        let landing = right.min(n - 1);
        a[landing].tag = Tag::Comparing;
        rec.record_with(
            &a,
            format!(
                "Jumping by {}: checking if {} > {} at index {}",
                jump, target, a[landing].value, landing
            ),
            StepExtras::line(3)
                .with("target", target)
                .with("left", left)
                .with("right", landing)
                .with("jump", jump),
        )?;
        a[landing].tag = Tag::Normal;
    }

    // the block end itself may hold the target, so the scan is inclusive
    let hi = right.min(n - 1);
    rec.record_with(
        &a,
        format!(
            "Found potential block [{}, {}]. Starting linear search...",
            left, hi
        ),
        StepExtras::line(4)
            .with("target", target)
            .with("left", left)
            .with("right", hi),
    )?;

    for i in left..=hi {
        a[i].tag = Tag::Comparing;
        let extras = StepExtras::line(5)
            .with("target", target)
            .with("left", left)
            .with("right", hi)
            .with("current", i);
        if a[i].value == target {
            return record_found(&mut a, i, target, extras, rec);
        }
        if a[i].value > target {
            rec.record_with(
                &a,
                format!("{} > {}, element not in array", a[i].value, target),
                StepExtras::line(6).with("target", target).with("current", i),
            )?;
            a[i].tag = Tag::Normal;
            break;
        }
        rec.record_with(
            &a,
            format!(
                "Linear search: comparing {} with {} at index {}",
                target, a[i].value, i
            ),
            extras,
        )?;
        a[i].tag = Tag::Normal;
    }

    record_not_found(&a, target, 7, rec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::Trace;

    type SearchFn = fn(&[i64], i64, &mut Recorder) -> Result<(), AlgorithmError>;

    fn run(search: SearchFn, values: &[i64], target: i64) -> Trace {
        let mut rec = Recorder::new("search");
        search(values, target, &mut rec).unwrap();
        rec.finish().unwrap()
    }

    fn found_index(trace: &Trace) -> Value {
        trace.last().unwrap().meta("found_index").cloned().unwrap()
    }

    #[test]
    fn test_every_index_is_found() {
        let values = [1, 3, 5, 7, 9, 11, 13, 15, 17];
        for search in [linear_search as SearchFn, binary_search, jump_search] {
            for (i, &v) in values.iter().enumerate() {
                assert_eq!(found_index(&run(search, &values, v)), Value::from(i));
            }
            assert_eq!(found_index(&run(search, &values, 4)), Value::Null);
            assert_eq!(found_index(&run(search, &values, 99)), Value::Null);
            assert_eq!(found_index(&run(search, &[], 1)), Value::Null);
        }
    }

    #[test]
    fn test_linear_search_hit_keeps_scan_metadata() {
        let trace = run(linear_search, &[4, 8, 15], 8);
        let hit = trace.last().unwrap();
        assert_eq!(hit.source_line, Some(3));
        assert_eq!(hit.description, "Found 8 at index 1!");
        assert_eq!(hit.meta("current"), Some(&Value::from(1)));
        assert_eq!(hit.meta("target"), Some(&Value::from(8)));
    }

    #[test]
    fn test_jump_search_finds_target_at_block_end() {
        // jump size 3; the first jump lands exactly on the target
        let trace = run(jump_search, &[1, 2, 3, 4, 5, 6, 7, 8, 9], 4);
        assert_eq!(found_index(&trace), Value::from(3));
        let last = trace.last().unwrap().snapshot.as_array().unwrap();
        assert_eq!(last.positions_of(Tag::Sorted), vec![3]);
    }

    #[test]
    fn test_binary_search_rejects_unsorted_input() {
        let mut rec = Recorder::new("binary");
        assert_eq!(
            binary_search(&[3, 1, 2], 1, &mut rec),
            Err(AlgorithmError::UnsortedInput("binary search"))
        );
        assert!(rec.is_empty());
    }

    #[test]
    fn test_binary_search_narrows_bounds() {
        let trace = run(binary_search, &[1, 2, 3, 4, 5, 6, 7], 6);
        let first_step = trace.step_at(1).unwrap();
        assert_eq!(first_step.meta("mid"), Some(&Value::from(3)));
        assert_eq!(first_step.description, "4 < 6, searching right half");
    }
}
