//! Path-compressed prefix index over a growing vocabulary.
//!
//! A word lives in a `Leaf` until another word sharing its prefix arrives;
//! the leaf is then split into a `Branch` keyed on the first byte where the
//! two words can diverge. Keys are UTF-8 bytes, so a prefix that is itself
//! valid UTF-8 selects exactly the words starting with those characters.
//!
//! A shared prefix of n bytes is a chain of n branches. Every walk over the
//! tree (insert, lookup, harvest, drop) uses a loop or an explicit stack, so
//! chain length is bounded by memory rather than by the thread's stack.


use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use tracing::{debug, debug_span, trace};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("completion {word:?} has {segments} space-delimited segments, cannot trim {segment}")]
    OutOfRange {
        word: String,
        segment: usize,
        segments: usize,
    },
}

enum Node {
    /// The only inserted word consistent with the path to this node.
    Leaf { word: String, depth: usize },
    Branch {
        children: HashMap<u8, Node>,
        depth: usize,
        /// The inserted word ending exactly at `depth`, if any.
        terminal: Option<String>,
    },
}

impl Node {
    fn leaf(word: &str, depth: usize) -> Self {
        Node::Leaf {
            word: word.to_owned(),
            depth,
        }
    }

    /// Turns the leaf holding `existing` at `depth` into a branch that
    /// keeps it either as a child or as the terminal word.
    fn split(existing: String, depth: usize) -> Self {
        let mut children = HashMap::new();
        let mut terminal = None;
        match existing.as_bytes().get(depth).copied() {
            Some(b) => {
                children.insert(
                    b,
                    Node::Leaf {
                        word: existing,
                        depth: depth + 1,
                    },
                );
            }
            None => terminal = Some(existing),
        }
        Node::Branch {
            children,
            depth,
            terminal,
        }
    }

    /// Pushes every word in this subtree.
    fn harvest(&self, out: &mut Vec<String>) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { word, .. } => out.push(word.clone()),
                Node::Branch {
                    children, terminal, ..
                } => {
                    if let Some(word) = terminal {
                        out.push(word.clone());
                    }
                    stack.extend(children.values());
                }
            }
        }
    }
}

/// Exact-prefix index used for completion.
///
/// Not synchronized: wrap in a `RwLock` (or rebuild and swap) when shared
/// between threads.
pub struct PrefixIndex {
    root: Node,
    len: usize,
}

impl Default for PrefixIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PrefixIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixIndex")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

impl Drop for PrefixIndex {
    fn drop(&mut self) {
        // Detach children before each node drops so the nested maps never
        // drop recursively.
        let mut stack: Vec<Node> = Vec::new();
        if let Node::Branch { children, .. } = &mut self.root {
            stack.extend(children.drain().map(|(_, child)| child));
        }
        while let Some(mut node) = stack.pop() {
            if let Node::Branch { children, .. } = &mut node {
                stack.extend(children.drain().map(|(_, child)| child));
            }
        }
    }
}

impl PrefixIndex {
    pub fn new() -> Self {
        Self {
            // An empty root behaves exactly like the empty initial leaf
            // after its first split.
            root: Node::Branch {
                children: HashMap::new(),
                depth: 0,
                terminal: None,
            },
            len: 0,
        }
    }

    /// Adds `word` to the index. Returns `false` if it was already present.
    pub fn insert(&mut self, word: &str) -> bool {
        let added = self.insert_word(word);
        if added {
            self.len += 1;
        }
        trace!(word, added, "insert");
        added
    }

    fn insert_word(&mut self, word: &str) -> bool {
        let bytes = word.as_bytes();
        let mut node = &mut self.root;
        loop {
            // The root is a branch, and a leaf is split before the cursor
            // moves onto it.
            let Node::Branch {
                children,
                depth,
                terminal,
            } = node
            else {
                return false;
            };
            let Some(&b) = bytes.get(*depth) else {
                // `word` ends exactly here: it is a strict prefix of the subtree.
                if terminal.is_some() {
                    return false;
                }
                *terminal = Some(word.to_owned());
                return true;
            };
            let child_depth = *depth + 1;
            let child = match children.entry(b) {
                Entry::Vacant(slot) => {
                    slot.insert(Node::leaf(word, child_depth));
                    return true;
                }
                Entry::Occupied(slot) => slot.into_mut(),
            };
            if let Node::Leaf {
                word: existing,
                depth,
            } = child
            {
                if existing.as_str() == word {
                    return false;
                }
                let depth = *depth;
                let existing = std::mem::take(existing);
                *child = Node::split(existing, depth);
            }
            node = child;
        }
    }

    /// Number of distinct words inserted.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, word: &str) -> bool {
        let bytes = word.as_bytes();
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { word: stored, .. } => return stored.as_str() == word,
                Node::Branch {
                    children,
                    depth,
                    terminal,
                } => match bytes.get(*depth) {
                    None => return terminal.as_deref() == Some(word),
                    Some(b) => match children.get(b) {
                        Some(child) => node = child,
                        None => return false,
                    },
                },
            }
        }
    }

    /// Every inserted word starting with `prefix`, in no particular order.
    /// An empty prefix returns the whole vocabulary.
    pub fn match_prefix(&self, prefix: &str) -> Vec<String> {
        let _span = debug_span!("match_prefix", prefix).entered();
        let prefix = prefix.as_bytes();
        let mut out = Vec::new();
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { word, depth } => {
                    // Bytes before `depth` were confirmed by the path; check the rest.
                    let stored = word.as_bytes().get(*depth..prefix.len());
                    if stored.is_some() && stored == prefix.get(*depth..) {
                        out.push(word.clone());
                    }
                    break;
                }
                Node::Branch {
                    children, depth, ..
                } => {
                    if prefix.len() <= *depth {
                        node.harvest(&mut out);
                        break;
                    }
                    match children.get(&prefix[*depth]) {
                        Some(child) => node = child,
                        None => break,
                    }
                }
            }
        }
        debug!(matches = out.len());
        out
    }

    /// Completes the last of `tokens`.
    ///
    /// Tokens are joined with single spaces and matched as one prefix. With
    /// more than one token, the leading `tokens.len() - 1` space-delimited
    /// segments are trimmed from each match so only the tail remains.
    pub fn complete<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<String>, IndexError> {
        let query = tokens
            .iter()
            .map(|token| token.as_ref())
            .collect::<Vec<&str>>()
            .join(" ");
        let _span = debug_span!("complete", query = query.as_str(), tokens = tokens.len()).entered();

        let matches = self.match_prefix(&query);
        if tokens.len() <= 1 {
            return Ok(matches);
        }

        let skip = tokens.len() - 1;
        let completions = matches
            .iter()
            .map(|word| trim_segments(word, skip))
            .collect::<Result<Vec<String>, IndexError>>()?;
        debug!(completions = completions.len());
        Ok(completions)
    }
}

impl<S: AsRef<str>> Extend<S> for PrefixIndex {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for word in iter {
            self.insert(word.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for PrefixIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut index = PrefixIndex::new();
        index.extend(iter);
        index
    }
}

/// Drops the first `skip` space-delimited segments of `word`.
fn trim_segments(word: &str, skip: usize) -> Result<String, IndexError> {
    let mut rest = word;
    for segment in 0..skip {
        match rest.find(' ') {
            Some(pos) => rest = &rest[pos + 1..],
            None => {
                return Err(IndexError::OutOfRange {
                    word: word.to_owned(),
                    segment,
                    segments: word.split(' ').count(),
                })
            }
        }
    }
    Ok(rest.to_owned())
}
