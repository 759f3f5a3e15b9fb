//! Comparison, counting and distribution sorts over tagged arrays
//!
//! Every sort records a start step, one or more steps per comparison or
//! move, and a final step with every element tagged [`Tag::Sorted`].
//! Bucket and radix sort also carry the bucket contents as `buckets`
//! metadata while elements are distributed.

use super::searching::floor_sqrt;
use super::AlgorithmError;
use crate::snapshot::array::{elements_from, Element, Tag};
use crate::trace::{Recorder, StepExtras};
use serde_json::Value;

/// Widest `max - min + 1` counting sort accepts
pub const COUNTING_RANGE_LIMIT: u64 = 1000;

pub const BUBBLE_SORT: &[&str] = &[
    "for i in 0..n - 1:",
    "    for j in 0..n - i - 1:",
    "        if a[j] > a[j + 1]:",
    "            swap(a[j], a[j + 1])",
    "    a[n - i - 1] is in place",
    "done: array sorted",
];

pub const SELECTION_SORT: &[&str] = &[
    "for i in 0..n:",
    "    min = i",
    "    for j in i + 1..n:",
    "        if a[j] < a[min]: min = j",
    "    swap(a[i], a[min])",
    "done: array sorted",
];

pub const INSERTION_SORT: &[&str] = &[
    "for i in 1..n:",
    "    key = a[i]; j = i - 1",
    "    while j >= 0 and a[j] > key:",
    "        a[j + 1] = a[j]; j -= 1",
    "    a[j + 1] = key",
    "done: array sorted",
];

pub const MERGE_SORT: &[&str] = &[
    "merge_sort(a, l, r):",
    "    if l < r: m = (l + r) / 2",
    "        merge_sort(a, l, m)",
    "        merge_sort(a, m + 1, r)",
    "        merge(a, l, m, r)",
    "merge: move the smaller head of left/right into a[k]",
    "done: array sorted",
];

pub const QUICK_SORT: &[&str] = &[
    "quick_sort(a, low, high):",
    "    if low < high:",
    "        pivot = a[high]; i = low - 1",
    "        for j in low..high:",
    "            if a[j] < pivot: i += 1; swap(a[i], a[j])",
    "        swap(a[i + 1], a[high]); p = i + 1",
    "        quick_sort(a, low, p - 1); quick_sort(a, p + 1, high)",
    "done: array sorted",
];

pub const HEAP_SORT: &[&str] = &[
    "for i in (0..n / 2).rev(): heapify(a, n, i)",
    "heapify(a, n, i): largest = max(a[i], a[2i + 1], a[2i + 2])",
    "    if largest != i: swap(a[i], a[largest]); heapify(a, n, largest)",
    "for end in (1..n).rev():",
    "    swap(a[0], a[end]); heapify(a, end, 0)",
    "done: array sorted",
];

pub const COUNTING_SORT: &[&str] = &[
    "min, max = range of a; count = [0; max - min + 1]",
    "for x in a: count[x - min] += 1",
    "for v in 1..range: count[v] += count[v - 1]",
    "for x in a.rev(): output[count[x - min] - 1] = x; count[x - min] -= 1",
    "copy output back into a",
    "done: array sorted",
];

pub const BUCKET_SORT: &[&str] = &[
    "k = max(floor(sqrt(n)), 1); buckets = k empty lists",
    "for x in a: buckets[(x - min) * k / (max - min + 1)].push(x)",
    "for b in buckets: sort(b)",
    "a = concat(buckets)",
    "done: array sorted",
];

pub const RADIX_SORT: &[&str] = &[
    "offset = min(a); exp = 1",
    "while (max - offset) / exp > 0:",
    "    for x in a: buckets[(x - offset) / exp % 10].push(x)",
    "    a = concat(buckets); exp *= 10",
    "done: array sorted",
];

fn tag(a: &mut [Element], indices: &[usize], t: Tag) {
    for &i in indices {
        a[i].tag = t;
    }
}

fn start(a: &[Element], rec: &mut Recorder, name: &str) -> Result<(), AlgorithmError> {
    rec.record_with(
        a,
        format!("Starting {} on {} elements", name, a.len()),
        StepExtras::line(1),
    )?;
    Ok(())
}

fn finish_sorted(a: &mut [Element], rec: &mut Recorder, line: u32) -> Result<(), AlgorithmError> {
    tag(a, &(0..a.len()).collect::<Vec<_>>(), Tag::Sorted);
    rec.record_with(&*a, "Array sorted successfully!", StepExtras::line(line))?;
    Ok(())
}

pub fn bubble_sort(values: &[i64], rec: &mut Recorder) -> Result<(), AlgorithmError> {
    let mut a = elements_from(values);
    let n = a.len();
    start(&a, rec, "bubble sort")?;

    for i in 0..n.saturating_sub(1) {
        for j in 0..n - i - 1 {
            tag(&mut a, &[j, j + 1], Tag::Comparing);
            rec.record_with(
                &a,
                format!("Comparing {} and {}", a[j].value, a[j + 1].value),
                StepExtras::line(3).with("i", i).with("j", j),
            )?;

            if a[j].value > a[j + 1].value {
                a.swap(j, j + 1);
                tag(&mut a, &[j, j + 1], Tag::Swapping);
                rec.record_with(
                    &a,
                    format!("Swapping {} and {}", a[j + 1].value, a[j].value),
                    StepExtras::line(4).with("i", i).with("j", j),
                )?;
            }
            tag(&mut a, &[j, j + 1], Tag::Normal);
        }
        a[n - i - 1].tag = Tag::Sorted;
    }

    finish_sorted(&mut a, rec, 6)
}

pub fn selection_sort(values: &[i64], rec: &mut Recorder) -> Result<(), AlgorithmError> {
    let mut a = elements_from(values);
    let n = a.len();
    start(&a, rec, "selection sort")?;

    for i in 0..n {
        let mut min = i;
        a[i].tag = Tag::Min;
        rec.record_with(
            &a,
            format!("Finding minimum element starting from position {}", i + 1),
            StepExtras::line(2).with("i", i),
        )?;

        for j in i + 1..n {
            a[j].tag = Tag::Comparing;
            let description = if a[j].value < a[min].value {
                a[min].tag = Tag::Normal;
                min = j;
                a[min].tag = Tag::Min;
                format!("Found new minimum {} at position {}", a[min].value, j + 1)
            } else {
                format!(
                    "Comparing {} with current minimum {}",
                    a[j].value, a[min].value
                )
            };
            rec.record_with(
                &a,
                description,
                StepExtras::line(4).with("i", i).with("j", j).with("min", min),
            )?;
            if j != min {
                a[j].tag = Tag::Normal;
            }
        }

        let (displaced, minimum) = (a[i].value, a[min].value);
        a.swap(i, min);
        a[i].tag = Tag::Sorted;
        rec.record_with(
            &a,
            format!(
                "Swapping minimum ({}) with position {} ({})",
                minimum,
                i + 1,
                displaced
            ),
            StepExtras::line(5).with("i", i).with("min", min),
        )?;
    }

    finish_sorted(&mut a, rec, 6)
}

pub fn insertion_sort(values: &[i64], rec: &mut Recorder) -> Result<(), AlgorithmError> {
    let mut a = elements_from(values);
    let n = a.len();
    start(&a, rec, "insertion sort")?;
    if let Some(first) = a.first_mut() {
        first.tag = Tag::Sorted;
    }

    for i in 1..n {
        let key = a[i].value;
        a[i].tag = Tag::Comparing;
        rec.record_with(
            &a,
            format!("Inserting {} into sorted part", key),
            StepExtras::line(2).with("key", key),
        )?;

        // the key is held aside, so shifted values appear twice until it lands
        let mut j = i;
        while j > 0 && a[j - 1].value > key {
            a[j] = a[j - 1];
            tag(&mut a, &[j - 1, j], Tag::Swapping);
            rec.record_with(
                &a,
                format!("Shifting {} to the right", a[j].value),
                StepExtras::line(4).with("key", key),
            )?;
            tag(&mut a, &[j - 1, j], Tag::Sorted);
            j -= 1;
        }

        a[j] = Element::tagged(key, Tag::Sorted);
        rec.record_with(
            &a,
            format!("Placed {} in correct position", key),
            StepExtras::line(5).with("key", key),
        )?;
    }

    finish_sorted(&mut a, rec, 6)
}

pub fn merge_sort(values: &[i64], rec: &mut Recorder) -> Result<(), AlgorithmError> {
    let mut a = elements_from(values);
    start(&a, rec, "merge sort")?;
    if !a.is_empty() {
        let last = a.len() - 1;
        merge_sort_range(&mut a, 0, last, rec)?;
    }
    finish_sorted(&mut a, rec, 7)
}

fn merge_sort_range(
    a: &mut [Element],
    l: usize,
    r: usize,
    rec: &mut Recorder,
) -> Result<(), AlgorithmError> {
    if l >= r {
        return Ok(());
    }
    let m = l + (r - l) / 2;
    rec.record_with(
        &*a,
        format!("Dividing array from index {} to {}", l, r),
        StepExtras::line(2)
            .with("left", l)
            .with("mid", m)
            .with("right", r),
    )?;

    merge_sort_range(a, l, m, rec)?;
    merge_sort_range(a, m + 1, r, rec)?;
    merge(a, l, m, r, rec)
}

fn merge(
    a: &mut [Element],
    l: usize,
    m: usize,
    r: usize,
    rec: &mut Recorder,
) -> Result<(), AlgorithmError> {
    let left = a[l..=m].to_vec();
    let right = a[m + 1..=r].to_vec();
    let (mut i, mut j) = (0, 0);

    for k in l..=r {
        let take_left = j >= right.len() || (i < left.len() && left[i].value <= right[j].value);
        let (value, side) = if take_left {
            i += 1;
            (left[i - 1].value, "left")
        } else {
            j += 1;
            (right[j - 1].value, "right")
        };
        a[k] = Element::tagged(value, Tag::Swapping);
        rec.record_with(
            &*a,
            format!("Placing {} from {} subarray at index {}", value, side, k),
            StepExtras::line(6).with("k", k),
        )?;
    }

    tag(a, &(l..=r).collect::<Vec<_>>(), Tag::Normal);
    rec.record_with(
        &*a,
        format!(
            "Merged subarrays [{}..{}] and [{}..{}]",
            l,
            m,
            m + 1,
            r
        ),
        StepExtras::line(5),
    )?;
    Ok(())
}

pub fn quick_sort(values: &[i64], rec: &mut Recorder) -> Result<(), AlgorithmError> {
    let mut a = elements_from(values);
    start(&a, rec, "quick sort")?;
    if !a.is_empty() {
        let last = a.len() - 1;
        quick_sort_range(&mut a, 0, last, rec)?;
    }
    finish_sorted(&mut a, rec, 8)
}

fn quick_sort_range(
    a: &mut [Element],
    low: usize,
    high: usize,
    rec: &mut Recorder,
) -> Result<(), AlgorithmError> {
    if low >= high {
        return Ok(());
    }

    let pivot = a[high].value;
    a[high].tag = Tag::Pivot;
    rec.record_with(
        &*a,
        format!(
            "Selecting pivot at position {} with value {}",
            high + 1,
            pivot
        ),
        StepExtras::line(3)
            .with("pivot", pivot)
            .with("low", low)
            .with("high", high),
    )?;

    // Lomuto partition; `store` is the slot right after the "< pivot" block
    let mut store = low;
    for j in low..high {
        a[j].tag = Tag::Comparing;
        rec.record_with(
            &*a,
            format!("Comparing {} with pivot {}", a[j].value, pivot),
            StepExtras::line(4).with("pivot", pivot),
        )?;

        if a[j].value < pivot {
            a.swap(store, j);
            tag(a, &[store, j], Tag::Swapping);
            rec.record_with(
                &*a,
                format!(
                    "{} is less than pivot, swapping with position {}",
                    a[store].value,
                    store + 1
                ),
                StepExtras::line(5).with("pivot", pivot),
            )?;
            a[store].tag = Tag::Normal;
            store += 1;
        }
        a[j].tag = Tag::Normal;
    }

    a.swap(store, high);
    a[high].tag = Tag::Normal;
    a[store].tag = Tag::Sorted;
    rec.record_with(
        &*a,
        format!(
            "Placing pivot {} at its correct position {}",
            pivot,
            store + 1
        ),
        StepExtras::line(6).with("pivot", pivot),
    )?;

    if store > low {
        quick_sort_range(a, low, store - 1, rec)?;
    }
    quick_sort_range(a, store + 1, high, rec)
}

pub fn heap_sort(values: &[i64], rec: &mut Recorder) -> Result<(), AlgorithmError> {
    let mut a = elements_from(values);
    let n = a.len();
    start(&a, rec, "heap sort")?;

    for i in (0..n / 2).rev() {
        rec.record_with(
            &a,
            format!("Building max heap: heapifying at index {}", i),
            StepExtras::line(1).with("heap_size", n),
        )?;
        sift_down(&mut a, n, i, rec)?;
    }

    for end in (1..n).rev() {
        a.swap(0, end);
        tag(&mut a, &[0, end], Tag::Swapping);
        rec.record_with(
            &a,
            format!("Moving largest element {} to end", a[end].value),
            StepExtras::line(5).with("heap_size", end),
        )?;
        a[0].tag = Tag::Normal;
        a[end].tag = Tag::Sorted;
        sift_down(&mut a, end, 0, rec)?;
    }

    finish_sorted(&mut a, rec, 6)
}

fn sift_down(
    a: &mut [Element],
    heap_size: usize,
    mut i: usize,
    rec: &mut Recorder,
) -> Result<(), AlgorithmError> {
    loop {
        let (l, r) = (2 * i + 1, 2 * i + 2);
        let mut largest = i;
        if l < heap_size && a[l].value > a[largest].value {
            largest = l;
        }
        if r < heap_size && a[r].value > a[largest].value {
            largest = r;
        }
        if largest == i {
            return Ok(());
        }

        a.swap(i, largest);
        tag(a, &[i, largest], Tag::Swapping);
        rec.record_with(
            &*a,
            format!(
                "Heapifying: swapped {} and {}",
                a[i].value, a[largest].value
            ),
            StepExtras::line(3).with("heap_size", heap_size),
        )?;
        tag(a, &[i, largest], Tag::Normal);
        i = largest;
    }
}

pub fn counting_sort(values: &[i64], rec: &mut Recorder) -> Result<(), AlgorithmError> {
    let (min, max) = match (values.iter().min(), values.iter().max()) {
        (Some(&min), Some(&max)) => (min, max),
        _ => (0, -1),
    };
    let wide = (i128::from(max) - i128::from(min) + 1).max(0);
    let range = match usize::try_from(wide) {
        Ok(range) if wide <= i128::from(COUNTING_RANGE_LIMIT) => range,
        _ => {
            return Err(AlgorithmError::RangeTooLarge {
                range: wide.unsigned_abs(),
                limit: COUNTING_RANGE_LIMIT,
            })
        }
    };
    // in [0, range) for every input value once the range is accepted
    let slot_of = |v: i64| (i128::from(v) - i128::from(min)) as usize;

    let mut a = elements_from(values);
    let n = a.len();
    start(&a, rec, "counting sort")?;

    let mut count = vec![0usize; range];
    for i in 0..n {
        let v = a[i].value;
        count[slot_of(v)] += 1;
        a[i].tag = Tag::Comparing;
        rec.record_with(
            &a,
            format!("Counting occurrence of {}", v),
            StepExtras::line(2).with("count", count.clone()),
        )?;
        a[i].tag = Tag::Normal;
    }

    for slot in 1..count.len() {
        count[slot] += count[slot - 1];
        rec.record_with(
            &a,
            format!(
                "Calculating cumulative count for value {}",
                slot as i64 + min
            ),
            StepExtras::line(3).with("count", count.clone()),
        )?;
    }

    let mut output: Vec<Option<i64>> = vec![None; n];
    for i in (0..n).rev() {
        let v = a[i].value;
        let slot = slot_of(v);
        count[slot] -= 1;
        output[count[slot]] = Some(v);
        a[i].tag = Tag::Swapping;
        rec.record_with(
            &a,
            format!("Placing {} in output position {}", v, count[slot] + 1),
            StepExtras::line(4).with("output", output_json(&output)),
        )?;
        a[i].tag = Tag::Normal;
    }

    for (i, placed) in output.iter().enumerate() {
        if let Some(v) = placed {
            a[i] = Element::tagged(*v, Tag::Sorted);
        }
        rec.record_with(
            &a,
            format!(
                "Copying sorted element {} back to original array",
                a[i].value
            ),
            StepExtras::line(5),
        )?;
    }

    finish_sorted(&mut a, rec, 6)
}

pub fn bucket_sort(values: &[i64], rec: &mut Recorder) -> Result<(), AlgorithmError> {
    let mut a = elements_from(values);
    let n = a.len();
    start(&a, rec, "bucket sort")?;
    let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
        return finish_sorted(&mut a, rec, 5);
    };

    let k = floor_sqrt(n).max(1);
    let span = i128::from(max) - i128::from(min) + 1;
    let mut buckets: Vec<Vec<i64>> = vec![Vec::new(); k];
    for i in 0..n {
        let v = a[i].value;
        // (v - min) < span, so the quotient stays below k
        let b = ((i128::from(v) - i128::from(min)) * k as i128 / span) as usize;
        buckets[b].push(v);
        a[i].tag = Tag::Comparing;
        rec.record_with(
            &a,
            format!("Placing {} in bucket {}", v, b + 1),
            StepExtras::line(2).with("bucket", b).with("buckets", buckets.clone()),
        )?;
        a[i].tag = Tag::Normal;
    }

    for b in 0..k {
        buckets[b].sort_unstable();
        rec.record_with(
            &a,
            format!("Sorting bucket {}", b + 1),
            StepExtras::line(3).with("bucket", b).with("buckets", buckets.clone()),
        )?;
    }

    for (i, v) in buckets.into_iter().flatten().enumerate() {
        a[i] = Element::tagged(v, Tag::Sorted);
        rec.record_with(
            &a,
            format!("Placing {} from buckets to array", v),
            StepExtras::line(4).with("position", i),
        )?;
    }

    finish_sorted(&mut a, rec, 5)
}

pub fn radix_sort(values: &[i64], rec: &mut Recorder) -> Result<(), AlgorithmError> {
    let mut a = elements_from(values);
    let n = a.len();
    start(&a, rec, "radix sort")?;
    let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
        return finish_sorted(&mut a, rec, 5);
    };

    // keys are offset by the minimum so negatives sort by plain digits
    let key_of = |v: i64| (i128::from(v) - i128::from(min)) as u64;
    let max_key = key_of(max);
    let mut exp: u64 = 1;
    while max_key / exp > 0 {
        rec.record_with(
            &a,
            format!("Sorting by digit place {}", exp),
            StepExtras::line(2).with("exp", exp).with("offset", min),
        )?;

        let mut buckets: Vec<Vec<i64>> = vec![Vec::new(); 10];
        for i in 0..n {
            let v = a[i].value;
            let digit = (key_of(v) / exp % 10) as usize;
            buckets[digit].push(v);
            a[i].tag = Tag::Comparing;
            rec.record_with(
                &a,
                format!("Placing {} in bucket {} for digit {}", v, digit, exp),
                StepExtras::line(3)
                    .with("bucket", digit)
                    .with("buckets", buckets.clone()),
            )?;
            a[i].tag = Tag::Normal;
        }

        let mut i = 0;
        for (digit, bucket) in buckets.iter().enumerate() {
            for &v in bucket {
                a[i] = Element::tagged(v, Tag::Swapping);
                rec.record_with(
                    &a,
                    format!("Moving {} from bucket {} back to array", v, digit),
                    StepExtras::line(4)
                        .with("bucket", digit)
                        .with("buckets", buckets.clone()),
                )?;
                a[i].tag = Tag::Normal;
                i += 1;
            }
        }

        exp = match exp.checked_mul(10) {
            Some(next) => next,
            None => break,
        };
    }

    finish_sorted(&mut a, rec, 5)
}

fn output_json(output: &[Option<i64>]) -> Value {
    Value::Array(
        output
            .iter()
            .map(|slot| slot.map_or(Value::Null, Value::from))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Snapshot;
    use crate::trace::Trace;

    type SortFn = fn(&[i64], &mut Recorder) -> Result<(), AlgorithmError>;

    const ALL: &[(&str, SortFn)] = &[
        ("bubble", bubble_sort),
        ("selection", selection_sort),
        ("insertion", insertion_sort),
        ("merge", merge_sort),
        ("quick", quick_sort),
        ("heap", heap_sort),
        ("counting", counting_sort),
        ("bucket", bucket_sort),
        ("radix", radix_sort),
    ];

    fn run(sort: SortFn, values: &[i64]) -> Trace {
        let mut rec = Recorder::new("sort");
        sort(values, &mut rec).unwrap();
        rec.finish().unwrap()
    }

    fn final_values(trace: &Trace) -> Vec<i64> {
        match &trace.last().unwrap().snapshot {
            Snapshot::Array(a) => {
                assert!(a.all_tagged(Tag::Sorted));
                a.values()
            }
            other => panic!("unexpected snapshot {:?}", other),
        }
    }

    #[test]
    fn test_every_sort_sorts() {
        let input = [5, -3, 9, 0, 9, 2, 7, -3, 1];
        let mut expected = input.to_vec();
        expected.sort();
        for (name, sort) in ALL {
            let trace = run(*sort, &input);
            assert_eq!(final_values(&trace), expected, "{} sort", name);
            assert_eq!(trace.first().unwrap().source_line, Some(1), "{} sort", name);
        }
    }

    #[test]
    fn test_empty_and_single_inputs() {
        for (name, sort) in ALL {
            assert_eq!(run(*sort, &[]).len(), 2, "{} sort", name);
            assert_eq!(final_values(&run(*sort, &[4])), vec![4], "{} sort", name);
        }
    }

    #[test]
    fn test_quick_sort_marks_pivot() {
        let trace = run(quick_sort, &[3, 1, 2]);
        let pivot_step = trace.step_at(1).unwrap();
        assert_eq!(pivot_step.source_line, Some(3));
        let Snapshot::Array(a) = &pivot_step.snapshot else {
            panic!("expected array");
        };
        assert_eq!(a.positions_of(Tag::Pivot), vec![2]);
    }

    #[test]
    fn test_counting_sort_rejects_wide_range() {
        let mut rec = Recorder::new("counting");
        let err = counting_sort(&[0, 1_000_000], &mut rec).unwrap_err();
        assert!(matches!(err, AlgorithmError::RangeTooLarge { .. }));
        assert!(rec.is_empty());
    }

    #[test]
    fn test_counting_sort_rejects_full_i64_span() {
        let mut rec = Recorder::new("counting");
        let err = counting_sort(&[i64::MIN, i64::MAX], &mut rec).unwrap_err();
        assert_eq!(
            err,
            AlgorithmError::RangeTooLarge {
                range: 1u128 << 64,
                limit: COUNTING_RANGE_LIMIT
            }
        );
        assert!(rec.is_empty());
    }

    #[test]
    fn test_counting_sort_at_extreme_values() {
        let trace = run(counting_sort, &[i64::MAX, i64::MAX - 3, i64::MAX - 1]);
        assert_eq!(
            final_values(&trace),
            vec![i64::MAX - 3, i64::MAX - 1, i64::MAX]
        );
    }

    #[test]
    fn test_bucket_sort_records_buckets() {
        // four values give two buckets split at the midpoint of [1, 8]
        let trace = run(bucket_sort, &[7, 1, 8, 2]);
        let placed = trace.step_at(1).unwrap();
        assert_eq!(placed.description, "Placing 7 in bucket 2");
        assert_eq!(placed.meta("buckets"), Some(&serde_json::json!([[], [7]])));

        let sorted_second = trace
            .steps()
            .find(|s| s.description == "Sorting bucket 2")
            .unwrap();
        assert_eq!(
            sorted_second.meta("buckets"),
            Some(&serde_json::json!([[1, 2], [7, 8]]))
        );
        assert_eq!(final_values(&trace), vec![1, 2, 7, 8]);
    }

    #[test]
    fn test_radix_sort_handles_negatives_and_extremes() {
        let trace = run(radix_sort, &[-5, 12, -130, 7, 0]);
        assert_eq!(final_values(&trace), vec![-130, -5, 0, 7, 12]);
        let first_pass = trace.step_at(1).unwrap();
        assert_eq!(first_pass.meta("offset"), Some(&Value::from(-130)));

        let trace = run(radix_sort, &[i64::MAX, i64::MIN, 0, -1]);
        assert_eq!(final_values(&trace), vec![i64::MIN, -1, 0, i64::MAX]);
    }

    #[test]
    fn test_bucket_sort_full_i64_span() {
        let trace = run(bucket_sort, &[i64::MAX, 0, i64::MIN, 5]);
        assert_eq!(final_values(&trace), vec![i64::MIN, 0, 5, i64::MAX]);
    }
}
