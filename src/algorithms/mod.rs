//! Instrumented algorithm library
//!
//! Each algorithm takes its input plus a [`Recorder`] and records steps as it
//! runs:
//! - [`sorting`]: bubble, selection, insertion, merge, quick, heap, counting,
//!   bucket, radix
//! - [`searching`]: linear, binary, jump
//! - [`graph`]: BFS, DFS, Dijkstra, Prim, Kruskal
//! - [`pathfinding`]: A* on a grid
//! - [`tree`]: BST insert/search/delete and four traversals
//! - [`sequence`]: stack, queue and linked list operations
//!
//! [`AlgorithmKind`] is the catalog the CLI and viewer pick from; [`run`]
//! executes one to completion and returns its [`Trace`].
//!
//! [`Recorder`]: crate::trace::Recorder

pub mod errors;
pub mod graph;
pub mod pathfinding;
pub mod searching;
pub mod sequence;
pub mod sorting;
pub mod tree;

use crate::snapshot::{GridState, NodeId};
use crate::trace::{record_trace, Trace};
use clap::ValueEnum;
use tracing::trace;

pub use errors::AlgorithmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Sorting,
    Searching,
    Graph,
    Pathfinding,
    Tree,
    Sequence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum AlgorithmKind {
    BubbleSort,
    SelectionSort,
    InsertionSort,
    MergeSort,
    QuickSort,
    HeapSort,
    CountingSort,
    BucketSort,
    RadixSort,
    LinearSearch,
    BinarySearch,
    JumpSearch,
    Bfs,
    Dfs,
    Dijkstra,
    Prim,
    Kruskal,
    AStar,
    BstInsert,
    BstSearch,
    BstDelete,
    Inorder,
    Preorder,
    Postorder,
    LevelOrder,
    StackPush,
    StackPop,
    StackPeek,
    QueueEnqueue,
    QueueDequeue,
    ListInsert,
    ListDelete,
    ListSearch,
    ListReverse,
}

impl AlgorithmKind {
    /// Human-readable name, also used as the trace's algorithm name
    pub fn name(self) -> &'static str {
        use AlgorithmKind::*;
        match self {
            BubbleSort => "Bubble Sort",
            SelectionSort => "Selection Sort",
            InsertionSort => "Insertion Sort",
            MergeSort => "Merge Sort",
            QuickSort => "Quick Sort",
            HeapSort => "Heap Sort",
            CountingSort => "Counting Sort",
            BucketSort => "Bucket Sort",
            RadixSort => "Radix Sort",
            LinearSearch => "Linear Search",
            BinarySearch => "Binary Search",
            JumpSearch => "Jump Search",
            Bfs => "Breadth-First Search",
            Dfs => "Depth-First Search",
            Dijkstra => "Dijkstra's Shortest Path",
            Prim => "Prim's MST",
            Kruskal => "Kruskal's MST",
            AStar => "A* Search",
            BstInsert => "BST Insert",
            BstSearch => "BST Search",
            BstDelete => "BST Delete",
            Inorder => "In-order Traversal",
            Preorder => "Pre-order Traversal",
            Postorder => "Post-order Traversal",
            LevelOrder => "Level-order Traversal",
            StackPush => "Stack Push",
            StackPop => "Stack Pop",
            StackPeek => "Stack Peek",
            QueueEnqueue => "Queue Enqueue",
            QueueDequeue => "Queue Dequeue",
            ListInsert => "Linked List Insert",
            ListDelete => "Linked List Delete",
            ListSearch => "Linked List Search",
            ListReverse => "Linked List Reverse",
        }
    }

    pub fn family(self) -> Family {
        use AlgorithmKind::*;
        match self {
            BubbleSort | SelectionSort | InsertionSort | MergeSort | QuickSort | HeapSort
            | CountingSort | BucketSort | RadixSort => Family::Sorting,
            LinearSearch | BinarySearch | JumpSearch => Family::Searching,
            Bfs | Dfs | Dijkstra | Prim | Kruskal => Family::Graph,
            AStar => Family::Pathfinding,
            BstInsert | BstSearch | BstDelete | Inorder | Preorder | Postorder | LevelOrder => {
                Family::Tree
            }
            StackPush | StackPop | StackPeek | QueueEnqueue | QueueDequeue | ListInsert
            | ListDelete | ListSearch | ListReverse => Family::Sequence,
        }
    }

    /// Pseudo-code shown beside the animation; step `source_line`s index it
    /// from 1
    pub fn listing(self) -> &'static [&'static str] {
        use AlgorithmKind::*;
        match self {
            BubbleSort => sorting::BUBBLE_SORT,
            SelectionSort => sorting::SELECTION_SORT,
            InsertionSort => sorting::INSERTION_SORT,
            MergeSort => sorting::MERGE_SORT,
            QuickSort => sorting::QUICK_SORT,
            HeapSort => sorting::HEAP_SORT,
            CountingSort => sorting::COUNTING_SORT,
            BucketSort => sorting::BUCKET_SORT,
            RadixSort => sorting::RADIX_SORT,
            LinearSearch => searching::LINEAR_SEARCH,
            BinarySearch => searching::BINARY_SEARCH,
            JumpSearch => searching::JUMP_SEARCH,
            Bfs => graph::BFS,
            Dfs => graph::DFS,
            Dijkstra => graph::DIJKSTRA,
            Prim => graph::PRIM,
            Kruskal => graph::KRUSKAL,
            AStar => pathfinding::ASTAR,
            BstInsert => tree::BST_INSERT,
            BstSearch => tree::BST_SEARCH,
            BstDelete => tree::BST_DELETE,
            Inorder => tree::INORDER,
            Preorder => tree::PREORDER,
            Postorder => tree::POSTORDER,
            LevelOrder => tree::LEVEL_ORDER,
            StackPush => sequence::STACK_PUSH,
            StackPop => sequence::STACK_POP,
            StackPeek => sequence::STACK_PEEK,
            QueueEnqueue => sequence::QUEUE_ENQUEUE,
            QueueDequeue => sequence::QUEUE_DEQUEUE,
            ListInsert => sequence::LIST_INSERT_AT,
            ListDelete => sequence::LIST_DELETE,
            ListSearch => sequence::LIST_SEARCH,
            ListReverse => sequence::LIST_REVERSE,
        }
    }

    /// Whether the algorithm needs [`AlgorithmInput::target`]
    pub fn needs_target(self) -> bool {
        use AlgorithmKind::*;
        matches!(
            self,
            LinearSearch
                | BinarySearch
                | JumpSearch
                | BstInsert
                | BstSearch
                | BstDelete
                | StackPush
                | QueueEnqueue
                | ListInsert
                | ListDelete
                | ListSearch
        )
    }

    /// Input used when the caller supplies no values
    pub fn sample_values(self) -> Vec<i64> {
        match self.family() {
            Family::Sorting => vec![64, 34, 25, 12, 22, 11, 90],
            Family::Searching => vec![2, 5, 8, 12, 16, 23, 38, 56, 72, 91],
            Family::Tree => vec![50, 30, 70, 20, 40, 60, 80],
            Family::Sequence => vec![10, 20, 30],
            Family::Graph | Family::Pathfinding => Vec::new(),
        }
    }
}

/// Everything any algorithm in the catalog may read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlgorithmInput {
    pub values: Vec<i64>,
    /// Value searched for, inserted, pushed or deleted
    pub target: Option<i64>,
    /// Linked list insert position; appends when absent
    pub position: Option<usize>,
    /// Adjacency matrix; [`graph::SAMPLE_GRAPH`] when absent
    pub matrix: Option<Vec<Vec<i64>>>,
    pub start: NodeId,
    pub end: Option<NodeId>,
    /// A* grid; [`pathfinding::SAMPLE_GRID`] when absent
    pub grid: Option<GridState>,
}

impl AlgorithmInput {
    pub fn with_values(values: impl Into<Vec<i64>>) -> Self {
        AlgorithmInput {
            values: values.into(),
            ..AlgorithmInput::default()
        }
    }

    fn target_for(&self, kind: AlgorithmKind) -> Result<i64, AlgorithmError> {
        self.target.ok_or(AlgorithmError::MissingTarget(kind.name()))
    }
}

/// Run `kind` over `input` to completion and return the finished trace
pub fn run(kind: AlgorithmKind, input: &AlgorithmInput) -> Result<Trace, AlgorithmError> {
    use AlgorithmKind::*;
    trace!(algorithm = kind.name(), values = input.values.len(), "recording");

    let values = input.values.as_slice();
    let matrix = match &input.matrix {
        Some(m) => m.clone(),
        None => graph::sample_graph(),
    };
    let target = || input.target_for(kind);

    record_trace(kind.name(), |rec| match kind {
        BubbleSort => sorting::bubble_sort(values, rec),
        SelectionSort => sorting::selection_sort(values, rec),
        InsertionSort => sorting::insertion_sort(values, rec),
        MergeSort => sorting::merge_sort(values, rec),
        QuickSort => sorting::quick_sort(values, rec),
        HeapSort => sorting::heap_sort(values, rec),
        CountingSort => sorting::counting_sort(values, rec),
        BucketSort => sorting::bucket_sort(values, rec),
        RadixSort => sorting::radix_sort(values, rec),
        LinearSearch => searching::linear_search(values, target()?, rec),
        BinarySearch => searching::binary_search(values, target()?, rec),
        JumpSearch => searching::jump_search(values, target()?, rec),
        Bfs => graph::bfs(&matrix, input.start, rec),
        Dfs => graph::dfs(&matrix, input.start, rec),
        Dijkstra => graph::dijkstra(&matrix, input.start, input.end, rec),
        Prim => graph::prim(&matrix, input.start, rec),
        Kruskal => graph::kruskal(&matrix, rec),
        AStar => match &input.grid {
            Some(grid) => pathfinding::astar(grid, rec),
            None => pathfinding::astar(&pathfinding::sample_grid()?, rec),
        },
        BstInsert => tree::bst_insert(values, target()?, rec),
        BstSearch => tree::bst_search(values, target()?, rec),
        BstDelete => tree::bst_delete(values, target()?, rec),
        Inorder => tree::inorder_traversal(values, rec),
        Preorder => tree::preorder_traversal(values, rec),
        Postorder => tree::postorder_traversal(values, rec),
        LevelOrder => tree::level_order_traversal(values, rec),
        StackPush => sequence::stack_push(values, target()?, rec),
        StackPop => sequence::stack_pop(values, rec),
        StackPeek => sequence::stack_peek(values, rec),
        QueueEnqueue => sequence::queue_enqueue(values, target()?, rec),
        QueueDequeue => sequence::queue_dequeue(values, rec),
        ListInsert => {
            let position = input.position.unwrap_or(values.len());
            sequence::list_insert_at(values, target()?, position, rec)
        }
        ListDelete => sequence::list_delete(values, target()?, rec),
        ListSearch => sequence::list_search(values, target()?, rec),
        ListReverse => sequence::list_reverse(values, rec),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_runs_on_sample_input() {
        for &kind in AlgorithmKind::value_variants() {
            let input = AlgorithmInput {
                values: kind.sample_values(),
                target: Some(23),
                end: Some(5),
                ..AlgorithmInput::default()
            };
            let trace = run(kind, &input).unwrap_or_else(|e| panic!("{}: {}", kind.name(), e));
            assert!(trace.len() >= 2, "{}", kind.name());
            assert_eq!(trace.algorithm_name(), kind.name());

            let listing = kind.listing();
            for step in trace.steps() {
                let line = step.source_line.unwrap() as usize;
                assert!(
                    (1..=listing.len()).contains(&line),
                    "{} line {} outside listing",
                    kind.name(),
                    line
                );
            }
        }
    }

    #[test]
    fn test_missing_target() {
        let input = AlgorithmInput::with_values([1, 2, 3]);
        assert_eq!(
            run(AlgorithmKind::BinarySearch, &input),
            Err(AlgorithmError::MissingTarget("Binary Search"))
        );
        assert!(AlgorithmKind::BinarySearch.needs_target());
        assert!(!AlgorithmKind::BubbleSort.needs_target());
    }

    #[test]
    fn test_cli_names() {
        let value = AlgorithmKind::BubbleSort.to_possible_value().unwrap();
        assert_eq!(value.get_name(), "bubble-sort");
        assert_eq!(
            AlgorithmKind::from_str("level-order", true),
            Ok(AlgorithmKind::LevelOrder)
        );
        assert_eq!(
            AlgorithmKind::from_str("a-star", true),
            Ok(AlgorithmKind::AStar)
        );
    }
}
