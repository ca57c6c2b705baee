//! Path completion over the command tree.

use super::{parser::parse_line, tree::CommandTree};

/// Proposes fully qualified command paths for a partially typed line.
///
/// Only the path part of the line is considered. When the whole path
/// resolves, a runnable node completes to itself and a namespace lists its
/// children. Otherwise the last typed segment is used as a case-insensitive
/// prefix over the children of the deepest node reached. Results are sorted.
pub fn complete(tree: &CommandTree, partial: &str) -> Vec<String> {
    let parsed = parse_line(partial);
    let found = tree.find_closest_match(&parsed.segments);

    let mut matches: Vec<String> = if found.exact {
        if found.node.is_runnable() {
            vec![found.node.full_path()]
        } else {
            found.node.children().map(|child| child.full_path()).collect()
        }
    } else {
        let prefix = parsed
            .segments
            .last()
            .map(|segment| segment.to_lowercase())
            .unwrap_or_default();

        found
            .node
            .children()
            .filter(|child| child.local_name().to_lowercase().starts_with(&prefix))
            .map(|child| child.full_path())
            .collect()
    };

    matches.sort();
    matches
}

/// Position at which `candidates` stop agreeing, scanning from `start`.
///
/// Counts characters, not bytes. The result never exceeds the shortest
/// candidate's length unless `start` already does, and an empty candidate
/// list yields `start` unchanged. Hosts use it to fill in the unambiguous
/// part of several completions.
pub fn first_common_prefix_length<S: AsRef<str>>(candidates: &[S], start: usize) -> usize {
    let Some((first, rest)) = candidates.split_first() else {
        return start;
    };

    let first: Vec<char> = first.as_ref().chars().collect();
    let rest: Vec<Vec<char>> = rest
        .iter()
        .map(|candidate| candidate.as_ref().chars().collect())
        .collect();

    let shortest = rest
        .iter()
        .map(Vec::len)
        .fold(first.len(), usize::min);

    (start..shortest)
        .find(|&index| rest.iter().any(|other| other[index] != first[index]))
        .unwrap_or(start.max(shortest))
}
