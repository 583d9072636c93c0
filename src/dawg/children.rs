use super::char_trait::DawgChar;
use super::node_arena::StateId;

/// The outgoing transitions of a state, kept sorted by label.
///
/// A compact representation that doesn't allocate until there are at least
/// three children.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Children<C: DawgChar> {
    /// No children.
    #[default]
    None,
    /// Exactly one child (letter, state).
    One((C, StateId)),
    /// Exactly two children (letter1, state1, letter2, state2), `letter1 < letter2`.
    Two((C, StateId, C, StateId)),
    /// Three or more children stored in a vector, sorted by letter.
    Many(Vec<(C, StateId)>),
}

impl<C: DawgChar> Children<C> {
    /// Gets the child at the specified index.
    ///
    /// Returns `None` if the index is out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<(C, StateId)> {
        match self {
            Children::None => None,
            Children::One(child) => match index {
                0 => Some(*child),
                _ => None,
            },
            Children::Two((c1, n1, c2, n2)) => match index {
                0 => Some((*c1, *n1)),
                1 => Some((*c2, *n2)),
                _ => None,
            },
            Children::Many(children) => children.get(index).copied(),
        }
    }

    /// Returns the state that letter's edge leads to, or None if no such edge exists.
    #[inline]
    pub fn find(&self, letter: C) -> Option<StateId> {
        match self {
            Children::None => None,
            Children::One((ch, node)) => (*ch == letter).then_some(*node),
            Children::Two((c1, n1, c2, n2)) => {
                if letter == *c1 {
                    Some(*n1)
                } else if letter == *c2 {
                    Some(*n2)
                } else {
                    None
                }
            }
            Children::Many(children) => {
                // Unrolling by 2 exposes load-level parallelism and beats both
                // binary search and a scalar loop on the small fan-outs typical here.
                let chunks = children.chunks_exact(2);
                let remainder = chunks.remainder();
                for chunk in chunks {
                    if chunk[0].0 == letter {
                        return Some(chunk[0].1);
                    }
                    if chunk[1].0 == letter {
                        return Some(chunk[1].1);
                    }
                }
                for &(ch, node) in remainder {
                    if ch == letter {
                        return Some(node);
                    }
                }
                None
            }
        }
    }

    /// Points the edge labeled `letter` at `target`, inserting it in sorted
    /// position if it does not exist yet.
    ///
    /// Returns the previous target of the edge, if any.
    pub fn set(&mut self, letter: C, target: StateId) -> Option<StateId> {
        match self {
            Children::None => {
                *self = Children::One((letter, target));
                None
            }
            Children::One((c1, n1)) => {
                if *c1 == letter {
                    return Some(std::mem::replace(n1, target));
                }
                *self = if letter < *c1 {
                    Children::Two((letter, target, *c1, *n1))
                } else {
                    Children::Two((*c1, *n1, letter, target))
                };
                None
            }
            Children::Two((c1, n1, c2, n2)) => {
                if *c1 == letter {
                    return Some(std::mem::replace(n1, target));
                }
                if *c2 == letter {
                    return Some(std::mem::replace(n2, target));
                }
                let mut v = vec![(*c1, *n1), (*c2, *n2), (letter, target)];
                v.sort_by_key(|&(c, _)| c);
                *self = Children::Many(v);
                None
            }
            Children::Many(children) => {
                let pos = children.partition_point(|&(c, _)| c < letter);
                if let Some((c, n)) = children.get_mut(pos) {
                    if *c == letter {
                        return Some(std::mem::replace(n, target));
                    }
                }
                children.insert(pos, (letter, target));
                None
            }
        }
    }

    /// Returns the number of children.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Children::None => 0,
            Children::One(_) => 1,
            Children::Two(_) => 2,
            Children::Many(children) => children.len(),
        }
    }

    /// True if there are no outgoing edges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Children::None)
    }

    /// Returns an iterator over the edges in increasing label order.
    #[inline]
    pub fn iter(&self) -> ChildIter<'_, C> {
        ChildIter {
            children: self,
            front: 0,
            back: self.len(),
        }
    }
}

/// An iterator over the edges of a state, in increasing label order.
#[derive(Clone)]
pub struct ChildIter<'a, C: DawgChar> {
    children: &'a Children<C>,
    front: usize,
    back: usize,
}

impl<C: DawgChar> Iterator for ChildIter<'_, C> {
    type Item = (C, StateId);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let next_child = self.children.get(self.front);
        self.front += 1;
        next_child
    }

    /// Since we know the exact size, we can do better than the default implementation.
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back.saturating_sub(self.front);
        (remaining, Some(remaining))
    }
}

impl<C: DawgChar> DoubleEndedIterator for ChildIter<'_, C> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.children.get(self.back)
    }
}

impl<C: DawgChar> ExactSizeIterator for ChildIter<'_, C> {}
