//! Generic depth-first topological sort with explicit cycle detection.
//!
//! Generic over the item type: callers supply a key function and a
//! dependency-key function. Tricolor marking (unvisited / in-progress /
//! done) catches back edges into the current visitation path and reports the
//! whole cycle chain instead of emitting a partial order.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Errors from [`topological_sort`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SortError<K: fmt::Debug + fmt::Display> {
    /// A dependency points back into the current visitation path.
    #[error("cycle detected: {}", .chain.iter().map(ToString::to_string).collect::<Vec<_>>().join(" -> "))]
    Cycle {
        /// The keys along the cycle; the last entry repeats the first.
        chain: Vec<K>,
    },

    /// A dependency key does not identify any input item.
    #[error("'{from}' depends on unknown item '{key}'")]
    UnknownKey {
        /// Key of the item holding the dangling dependency.
        from: K,
        /// The unknown dependency key.
        key: K,
    },
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Order `items` so that every dependency precedes its dependents.
///
/// `key_of` names an item; `dependencies_of` yields the keys it depends on.
/// Items with no ordering constraint between them keep the insertion order
/// of `items`, so the result is deterministic for a given input.
pub fn topological_sort<'a, T, K, KeyFn, DepsFn>(
    items: &'a [T],
    key_of: KeyFn,
    dependencies_of: DepsFn,
) -> Result<Vec<&'a T>, SortError<K>>
where
    K: Clone + Eq + Hash + fmt::Debug + fmt::Display,
    KeyFn: Fn(&T) -> K,
    DepsFn: Fn(&T) -> &[K],
{
    let index: HashMap<K, usize> = items
        .iter()
        .enumerate()
        .map(|(i, item)| (key_of(item), i))
        .collect();

    let mut marks = vec![Mark::Unvisited; items.len()];
    let mut order = Vec::with_capacity(items.len());
    let mut path = Vec::new();

    for i in 0..items.len() {
        if marks[i] == Mark::Unvisited {
            visit(
                i,
                items,
                &key_of,
                &dependencies_of,
                &index,
                &mut marks,
                &mut order,
                &mut path,
            )?;
        }
    }

    Ok(order)
}

#[allow(clippy::too_many_arguments)]
fn visit<'a, T, K, KeyFn, DepsFn>(
    i: usize,
    items: &'a [T],
    key_of: &KeyFn,
    dependencies_of: &DepsFn,
    index: &HashMap<K, usize>,
    marks: &mut [Mark],
    order: &mut Vec<&'a T>,
    path: &mut Vec<K>,
) -> Result<(), SortError<K>>
where
    K: Clone + Eq + Hash + fmt::Debug + fmt::Display,
    KeyFn: Fn(&T) -> K,
    DepsFn: Fn(&T) -> &[K],
{
    let key = key_of(&items[i]);
    marks[i] = Mark::InProgress;
    path.push(key.clone());

    for dep in dependencies_of(&items[i]) {
        let Some(&dep_index) = index.get(dep) else {
            return Err(SortError::UnknownKey {
                from: key,
                key: dep.clone(),
            });
        };
        match marks[dep_index] {
            Mark::Done => {}
            Mark::Unvisited => visit(
                dep_index,
                items,
                key_of,
                dependencies_of,
                index,
                marks,
                order,
                path,
            )?,
            Mark::InProgress => {
                // Back edge: the cycle runs from the first occurrence of the
                // dependency on the current path back to itself.
                let start = path.iter().position(|k| k == dep).unwrap_or(0);
                let mut chain: Vec<K> = path[start..].to_vec();
                chain.push(dep.clone());
                return Err(SortError::Cycle { chain });
            }
        }
    }

    path.pop();
    marks[i] = Mark::Done;
    order.push(&items[i]);
    Ok(())
}
