//! Stack, queue and singly linked list operations
//!
//! Containers hold at most [`DEFAULT_CAPACITY`] elements. Overflow and
//! underflow are reported as errors before anything is recorded.

use super::AlgorithmError;
use crate::snapshot::array::{Element, Tag};
use crate::snapshot::sequence::{SequenceKind, SequenceState, DEFAULT_CAPACITY};
use crate::trace::{Recorder, StepExtras};
use serde_json::Value;

pub const STACK_PUSH: &[&str] = &[
    "if stack is full: overflow",
    "top += 1; stack[top] = value",
    "done",
];

pub const STACK_POP: &[&str] = &[
    "if stack is empty: underflow",
    "value = stack[top]; top -= 1",
    "return value",
];

pub const STACK_PEEK: &[&str] = &[
    "if stack is empty: nothing to peek",
    "return stack[top]",
];

pub const QUEUE_ENQUEUE: &[&str] = &[
    "if queue is full: overflow",
    "rear += 1; queue[rear] = value",
    "done",
];

pub const QUEUE_DEQUEUE: &[&str] = &[
    "if queue is empty: underflow",
    "value = queue[front]; front += 1",
    "return value",
];

pub const LIST_INSERT_AT: &[&str] = &[
    "if position == 0: new.next = head; head = new",
    "node = head; repeat position - 1 times: node = node.next",
    "new.next = node.next; node.next = new",
    "done",
];

pub const LIST_DELETE: &[&str] = &[
    "if list is empty: underflow",
    "node = head; walk until node.value == value",
    "unlink node: prev.next = node.next",
    "done",
];

pub const LIST_SEARCH: &[&str] = &[
    "node = head; index = 0",
    "while node: if node.value == value: return index",
    "    node = node.next; index += 1",
    "return not found",
];

pub const LIST_REVERSE: &[&str] = &[
    "prev = null; node = head",
    "while node: next = node.next; node.next = prev",
    "    prev = node; node = next",
    "head = prev",
];

fn load(kind: SequenceKind, values: &[i64]) -> Result<SequenceState, AlgorithmError> {
    if values.len() > DEFAULT_CAPACITY {
        return Err(AlgorithmError::Overflow {
            kind: kind.name(),
            capacity: DEFAULT_CAPACITY,
        });
    }
    Ok(SequenceState::new(kind, values))
}

fn load_for_insert(kind: SequenceKind, values: &[i64]) -> Result<SequenceState, AlgorithmError> {
    let seq = load(kind, values)?;
    if seq.is_full() {
        return Err(AlgorithmError::Overflow {
            kind: kind.name(),
            capacity: seq.capacity,
        });
    }
    Ok(seq)
}

fn load_for_removal(kind: SequenceKind, values: &[i64]) -> Result<SequenceState, AlgorithmError> {
    let seq = load(kind, values)?;
    if seq.is_empty() {
        return Err(AlgorithmError::Underflow(kind.name()));
    }
    Ok(seq)
}

fn completed(
    seq: &mut SequenceState,
    description: String,
    line: u32,
    rec: &mut Recorder,
) -> Result<(), AlgorithmError> {
    seq.reset_tags();
    rec.record_with(
        &*seq,
        description,
        StepExtras::line(line)
            .with("size", seq.len())
            .with("values", seq.values()),
    )?;
    Ok(())
}

pub fn stack_push(values: &[i64], value: i64, rec: &mut Recorder) -> Result<(), AlgorithmError> {
    let mut seq = load_for_insert(SequenceKind::Stack, values)?;
    rec.record_with(
        &seq,
        format!(
            "Checking if stack is full ({} of {})",
            seq.len(),
            seq.capacity
        ),
        StepExtras::line(1),
    )?;

    seq.elements.push(Element::tagged(value, Tag::Swapping));
    rec.record_with(
        &seq,
        format!("Pushed {} to stack", value),
        StepExtras::line(2).with("top", value),
    )?;

    completed(&mut seq, "Push operation completed".to_string(), 3, rec)
}

pub fn stack_pop(values: &[i64], rec: &mut Recorder) -> Result<(), AlgorithmError> {
    let mut seq = load_for_removal(SequenceKind::Stack, values)?;
    rec.record_with(&seq, "Checking if stack is empty", StepExtras::line(1))?;

    let last = seq.len() - 1;
    seq.elements[last].tag = Tag::Swapping;
    let top = seq.elements[last].value;
    rec.record_with(
        &seq,
        format!("Removing top element {}", top),
        StepExtras::line(2).with("top", top),
    )?;

    seq.elements.pop();
    completed(&mut seq, format!("Popped {} from stack", top), 3, rec)
}

pub fn stack_peek(values: &[i64], rec: &mut Recorder) -> Result<(), AlgorithmError> {
    let mut seq = load(SequenceKind::Stack, values)?;
    rec.record_with(&seq, "Checking if stack is empty", StepExtras::line(1))?;

    if seq.is_empty() {
        rec.record_with(
            &seq,
            "Stack is empty - nothing to peek",
            StepExtras::line(1).with("top", Value::Null),
        )?;
        return Ok(());
    }
    let last = seq.len() - 1;
    seq.elements[last].tag = Tag::Comparing;
    let value = seq.elements[last].value;
    rec.record_with(
        &seq,
        format!("Top element is {}", value),
        StepExtras::line(2).with("top", value),
    )?;
    Ok(())
}

pub fn queue_enqueue(values: &[i64], value: i64, rec: &mut Recorder) -> Result<(), AlgorithmError> {
    let mut seq = load_for_insert(SequenceKind::Queue, values)?;
    rec.record_with(
        &seq,
        format!(
            "Checking if queue is full ({} of {})",
            seq.len(),
            seq.capacity
        ),
        StepExtras::line(1),
    )?;

    seq.elements.push(Element::tagged(value, Tag::Swapping));
    rec.record_with(
        &seq,
        format!("Enqueued {} to queue", value),
        StepExtras::line(2).with("rear", value),
    )?;

    completed(&mut seq, "Enqueue operation completed".to_string(), 3, rec)
}

pub fn queue_dequeue(values: &[i64], rec: &mut Recorder) -> Result<(), AlgorithmError> {
    let mut seq = load_for_removal(SequenceKind::Queue, values)?;
    rec.record_with(&seq, "Checking if queue is empty", StepExtras::line(1))?;

    seq.elements[0].tag = Tag::Swapping;
    let front = seq.elements[0].value;
    rec.record_with(
        &seq,
        format!("Removing front element {}", front),
        StepExtras::line(2).with("front", front),
    )?;

    seq.elements.remove(0);
    completed(&mut seq, format!("Dequeued {} from queue", front), 3, rec)
}

pub fn list_insert_at(
    values: &[i64],
    value: i64,
    position: usize,
    rec: &mut Recorder,
) -> Result<(), AlgorithmError> {
    let mut seq = load_for_insert(SequenceKind::LinkedList, values)?;
    if position > seq.len() {
        return Err(AlgorithmError::PositionOutOfRange {
            position,
            len: seq.len(),
        });
    }
    rec.record_with(
        &seq,
        format!("Inserting {} at position {}", value, position),
        StepExtras::line(1).with("position", position),
    )?;

    for i in 0..position {
        seq.elements[i].tag = Tag::Comparing;
        rec.record_with(
            &seq,
            format!(
                "Traversing to node at index {} ({})",
                i, seq.elements[i].value
            ),
            StepExtras::line(2).with("current", i),
        )?;
        seq.elements[i].tag = Tag::Normal;
    }

    seq.elements
        .insert(position, Element::tagged(value, Tag::Swapping));
    let (description, line) = if position == 0 {
        (format!("Inserted {} as the new head", value), 1)
    } else {
        (format!("Inserted {} at position {}", value, position), 3)
    };
    rec.record_with(&seq, description, StepExtras::line(line))?;

    completed(&mut seq, "Insert operation completed".to_string(), 4, rec)
}

pub fn list_delete(values: &[i64], value: i64, rec: &mut Recorder) -> Result<(), AlgorithmError> {
    let mut seq = load_for_removal(SequenceKind::LinkedList, values)?;
    rec.record_with(
        &seq,
        format!("Deleting {} from the list", value),
        StepExtras::line(1),
    )?;

    let mut removed = None;
    for i in 0..seq.len() {
        if seq.elements[i].value == value {
            seq.elements[i].tag = Tag::Swapping;
            rec.record_with(
                &seq,
                format!("Found {} at index {}, unlinking it", value, i),
                StepExtras::line(3).with("current", i),
            )?;
            seq.elements.remove(i);
            removed = Some(i);
            break;
        }
        seq.elements[i].tag = Tag::Comparing;
        rec.record_with(
            &seq,
            format!("{} != {}, moving to next node", seq.elements[i].value, value),
            StepExtras::line(2).with("current", i),
        )?;
        seq.elements[i].tag = Tag::Normal;
    }

    let description = match removed {
        Some(_) => format!("Deleted {} from the list", value),
        None => format!("{} not found in the list", value),
    };
    completed(&mut seq, description, 4, rec)
}

pub fn list_search(values: &[i64], value: i64, rec: &mut Recorder) -> Result<(), AlgorithmError> {
    let mut seq = load(SequenceKind::LinkedList, values)?;
    rec.record_with(
        &seq,
        format!("Searching for {} starting at head", value),
        StepExtras::line(1),
    )?;

    for i in 0..seq.len() {
        if seq.elements[i].value == value {
            seq.elements[i].tag = Tag::Sorted;
            rec.record_with(
                &seq,
                format!("Found {} at index {}!", value, i),
                StepExtras::line(2).with("found_index", i),
            )?;
            return Ok(());
        }
        seq.elements[i].tag = Tag::Comparing;
        rec.record_with(
            &seq,
            format!("{} != {}, moving to next node", seq.elements[i].value, value),
            StepExtras::line(3).with("current", i),
        )?;
        seq.elements[i].tag = Tag::Normal;
    }

    rec.record_with(
        &seq,
        format!("{} not found in the list", value),
        StepExtras::line(4).with("found_index", Value::Null),
    )?;
    Ok(())
}

pub fn list_reverse(values: &[i64], rec: &mut Recorder) -> Result<(), AlgorithmError> {
    let mut seq = load(SequenceKind::LinkedList, values)?;
    let original = seq.values();
    rec.record_with(
        &seq,
        "Reversing the list: prev = null, current = head",
        StepExtras::line(1),
    )?;

    // after k iterations the first k nodes are reversed and the rest untouched
    for k in 1..=original.len() {
        let mut elements: Vec<Element> = original[..k]
            .iter()
            .rev()
            .map(|&v| Element::tagged(v, Tag::Sorted))
            .collect();
        elements.extend(original[k..].iter().map(|&v| Element::new(v)));
        elements[0].tag = Tag::Comparing;
        seq.elements = elements;

        let mut extras = StepExtras::line(2).with("prev", original[k - 1]);
        extras = match original.get(k) {
            Some(&next) => extras.with("current", next),
            None => extras.with("current", Value::Null),
        };
        rec.record_with(
            &seq,
            format!("Pointing {} back to the reversed part", original[k - 1]),
            extras,
        )?;
    }

    completed(&mut seq, "List reversed; head is now the old tail".to_string(), 4, rec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::Trace;

    fn final_values(trace: &Trace) -> Vec<i64> {
        trace.last().unwrap().snapshot.as_sequence().unwrap().values()
    }

    fn recorded(body: impl FnOnce(&mut Recorder) -> Result<(), AlgorithmError>) -> Trace {
        let mut rec = Recorder::new("sequence");
        body(&mut rec).unwrap();
        rec.finish().unwrap()
    }

    #[test]
    fn test_stack_is_lifo() {
        let trace = recorded(|rec| stack_push(&[1, 2], 3, rec));
        assert_eq!(final_values(&trace), vec![1, 2, 3]);

        let trace = recorded(|rec| stack_pop(&[1, 2, 3], rec));
        assert_eq!(final_values(&trace), vec![1, 2]);
        assert_eq!(trace.last().unwrap().description, "Popped 3 from stack");

        let trace = recorded(|rec| stack_peek(&[1, 2, 3], rec));
        assert_eq!(trace.last().unwrap().meta("top"), Some(&Value::from(3)));
        assert_eq!(final_values(&trace), vec![1, 2, 3]);
    }

    #[test]
    fn test_queue_is_fifo() {
        let trace = recorded(|rec| queue_enqueue(&[1, 2], 3, rec));
        assert_eq!(final_values(&trace), vec![1, 2, 3]);

        let trace = recorded(|rec| queue_dequeue(&[1, 2, 3], rec));
        assert_eq!(final_values(&trace), vec![2, 3]);
    }

    #[test]
    fn test_capacity_errors_record_nothing() {
        let full: Vec<i64> = (0..DEFAULT_CAPACITY as i64).collect();
        let mut rec = Recorder::new("push");
        assert_eq!(
            stack_push(&full, 1, &mut rec),
            Err(AlgorithmError::Overflow {
                kind: "stack",
                capacity: DEFAULT_CAPACITY
            })
        );
        assert_eq!(
            queue_dequeue(&[], &mut rec),
            Err(AlgorithmError::Underflow("queue"))
        );
        assert!(rec.is_empty());

        let trace = recorded(|rec| stack_peek(&[], rec));
        assert_eq!(trace.last().unwrap().meta("top"), Some(&Value::Null));
    }

    #[test]
    fn test_list_operations() {
        let trace = recorded(|rec| list_insert_at(&[1, 2, 3], 9, 2, rec));
        assert_eq!(final_values(&trace), vec![1, 2, 9, 3]);

        let trace = recorded(|rec| list_insert_at(&[1, 2, 3], 9, 0, rec));
        assert_eq!(final_values(&trace), vec![9, 1, 2, 3]);

        let mut rec = Recorder::new("insert");
        assert_eq!(
            list_insert_at(&[1], 9, 3, &mut rec),
            Err(AlgorithmError::PositionOutOfRange { position: 3, len: 1 })
        );

        let trace = recorded(|rec| list_delete(&[1, 2, 3], 2, rec));
        assert_eq!(final_values(&trace), vec![1, 3]);
        let trace = recorded(|rec| list_delete(&[1, 2, 3], 7, rec));
        assert_eq!(final_values(&trace), vec![1, 2, 3]);

        let trace = recorded(|rec| list_search(&[4, 5, 6], 6, rec));
        assert_eq!(trace.last().unwrap().meta("found_index"), Some(&Value::from(2)));

        let trace = recorded(|rec| list_reverse(&[1, 2, 3, 4], rec));
        assert_eq!(final_values(&trace), vec![4, 3, 2, 1]);
        let midway = trace.step_at(2).unwrap().snapshot.as_sequence().unwrap();
        assert_eq!(midway.values(), vec![2, 1, 3, 4]);
    }
}
