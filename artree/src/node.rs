use log::trace;

use crate::mapping::NodeMapping;
use crate::mapping::direct_mapping::DirectMapping;
use crate::mapping::indexed_mapping::IndexedMapping;
use crate::mapping::sorted_keyed_mapping::SortedKeyedMapping;
use crate::prefix::Prefix;

/// A node of the tree: the common header (compressed prefix) plus the
/// variant-specific content. Children are owned by value inside the
/// per-variant mapping, so dropping a node releases its whole subtree in
/// post-order.
pub struct Node<V> {
    pub(crate) prefix: Prefix,
    pub(crate) content: Content<V>,
}

pub(crate) enum Content<V> {
    Leaf(Leaf<V>),
    Node4(SortedKeyedMapping<Node<V>, 4>),
    Node16(SortedKeyedMapping<Node<V>, 16>),
    Node48(IndexedMapping<Node<V>, 48>),
    Node256(DirectMapping<Node<V>>),
}

/// A terminal node. The complete stored key is kept, not just the suffix
/// below the parent, so ancestors with truncated prefixes can verify their
/// tail against it and the final lookup step can compare whole keys.
pub(crate) struct Leaf<V> {
    pub(crate) key: Box<[u8]>,
    pub(crate) value: V,
}

impl<V> Node<V> {
    #[inline]
    pub(crate) fn new_leaf(key: Box<[u8]>, value: V) -> Self {
        Self {
            prefix: Prefix::empty(),
            content: Content::Leaf(Leaf { key, value }),
        }
    }

    #[inline]
    pub(crate) fn new_inner(prefix: Prefix) -> Self {
        Self {
            prefix,
            content: Content::Node4(SortedKeyedMapping::new()),
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        matches!(&self.content, Content::Leaf(_))
    }

    pub(crate) fn is_inner(&self) -> bool {
        !self.is_leaf()
    }

    pub(crate) fn leaf(&self) -> Option<&Leaf<V>> {
        let Content::Leaf(leaf) = &self.content else {
            return None;
        };
        Some(leaf)
    }

    pub(crate) fn num_children(&self) -> usize {
        match &self.content {
            Content::Node4(km) => km.num_children(),
            Content::Node16(km) => km.num_children(),
            Content::Node48(im) => im.num_children(),
            Content::Node256(dm) => dm.num_children(),
            Content::Leaf(_) => 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        match &self.content {
            Content::Node4(_) => 4,
            Content::Node16(_) => 16,
            Content::Node48(_) => 48,
            Content::Node256(_) => 256,
            Content::Leaf(_) => 0,
        }
    }

    pub(crate) fn seek_child(&self, key: u8) -> Option<&Self> {
        match &self.content {
            Content::Node4(km) => km.seek_child(key),
            Content::Node16(km) => km.seek_child(key),
            Content::Node48(im) => im.seek_child(key),
            Content::Node256(dm) => dm.seek_child(key),
            Content::Leaf(_) => None,
        }
    }

    pub(crate) fn seek_child_mut(&mut self, key: u8) -> Option<&mut Self> {
        match &mut self.content {
            Content::Node4(km) => km.seek_child_mut(key),
            Content::Node16(km) => km.seek_child_mut(key),
            Content::Node48(im) => im.seek_child_mut(key),
            Content::Node256(dm) => dm.seek_child_mut(key),
            Content::Leaf(_) => None,
        }
    }

    /// Add a child keyed by `key`, growing to the next wider variant first
    /// when full. Children move; the prefix header stays untouched.
    pub(crate) fn add_child(&mut self, key: u8, node: Self) {
        if self.is_full() {
            self.grow();
        }

        match &mut self.content {
            Content::Node4(km) => km.add_child(key, node),
            Content::Node16(km) => km.add_child(key, node),
            Content::Node48(im) => im.add_child(key, node),
            Content::Node256(dm) => dm.add_child(key, node),
            Content::Leaf(_) => unreachable!("add_child on a leaf"),
        }
    }

    /// Remove and return the child keyed by `key`, shrinking to the next
    /// smaller variant when occupancy falls to its threshold. A Node4 left
    /// with a single child collapses into that child.
    pub(crate) fn delete_child(&mut self, key: u8) -> Option<Self> {
        let deleted = match &mut self.content {
            Content::Node4(km) => km.delete_child(key),
            Content::Node16(km) => km.delete_child(key),
            Content::Node48(im) => im.delete_child(key),
            Content::Node256(dm) => dm.delete_child(key),
            Content::Leaf(_) => None,
        }?;

        match self.num_children() {
            1 if matches!(&self.content, Content::Node4(_)) => self.collapse_into_only_child(),
            3 if matches!(&self.content, Content::Node16(_)) => self.shrink(),
            12 if matches!(&self.content, Content::Node48(_)) => self.shrink(),
            37 if matches!(&self.content, Content::Node256(_)) => self.shrink(),
            _ => {}
        }

        Some(deleted)
    }

    fn is_full(&self) -> bool {
        match &self.content {
            Content::Node4(km) => km.num_children() >= km.width(),
            Content::Node16(km) => km.num_children() >= km.width(),
            Content::Node48(im) => im.num_children() >= im.width(),
            // A direct mapping has a slot for every possible edge byte.
            Content::Node256(_) => false,
            Content::Leaf(_) => unreachable!("is_full on a leaf"),
        }
    }

    fn grow(&mut self) {
        let grown = match &mut self.content {
            Content::Node4(km) => {
                trace!("growing node4 to node16");
                Content::Node16(SortedKeyedMapping::from_resized(km))
            }
            Content::Node16(km) => {
                trace!("growing node16 to node48");
                Content::Node48(IndexedMapping::from_sorted_keyed(km))
            }
            Content::Node48(im) => {
                trace!("growing node48 to node256");
                Content::Node256(DirectMapping::from_indexed(im))
            }
            Content::Node256(_) => unreachable!("a node256 never grows"),
            Content::Leaf(_) => unreachable!("grow on a leaf"),
        };
        self.content = grown;
    }

    fn shrink(&mut self) {
        let shrunk = match &mut self.content {
            Content::Node16(km) => {
                trace!("shrinking node16 to node4");
                Content::Node4(SortedKeyedMapping::from_resized(km))
            }
            Content::Node48(im) => {
                trace!("shrinking node48 to node16");
                Content::Node16(SortedKeyedMapping::from_indexed(im))
            }
            Content::Node256(dm) => {
                trace!("shrinking node256 to node48");
                Content::Node48(IndexedMapping::from_direct(dm))
            }
            Content::Node4(_) => unreachable!("a node4 collapses instead of shrinking"),
            Content::Leaf(_) => unreachable!("shrink on a leaf"),
        };
        self.content = shrunk;
    }

    /// Replace this single-child Node4 with its child. An inner child keeps
    /// path compression intact by merging the two prefixes through the edge
    /// byte; a leaf child already owns its complete key and just takes the
    /// node's place.
    fn collapse_into_only_child(&mut self) {
        trace!("collapsing single-child node4");
        let Content::Node4(km) = &mut self.content else {
            unreachable!("collapse on a non-node4");
        };
        let (edge, child) = km.take_only_child();
        if child.is_leaf() {
            self.prefix = Prefix::empty();
        } else {
            self.prefix = self.prefix.extended_with(edge, &child.prefix);
        }
        self.content = child.content;
    }

    /// The leftmost leaf reachable through this node; used to confirm the
    /// unmaterialized tail of a truncated prefix.
    pub(crate) fn minimum_leaf(&self) -> &Leaf<V> {
        let mut node = self;
        loop {
            let first = match &node.content {
                Content::Leaf(leaf) => return leaf,
                Content::Node4(km) => km.first_child(),
                Content::Node16(km) => km.first_child(),
                Content::Node48(im) => im.first_child(),
                Content::Node256(dm) => dm.first_child(),
            };
            node = first.expect("inner node with no children");
        }
    }

    pub(crate) fn iter(&self) -> Box<dyn Iterator<Item = (u8, &Self)> + '_> {
        match &self.content {
            Content::Node4(km) => Box::new(km.iter()),
            Content::Node16(km) => Box::new(km.iter()),
            Content::Node48(im) => Box::new(im.iter()),
            Content::Node256(dm) => Box::new(dm.iter()),
            Content::Leaf(_) => Box::new(std::iter::empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::node::Node;
    use crate::prefix::Prefix;

    fn leaf(byte: u8, value: i32) -> Node<i32> {
        Node::new_leaf(Box::from([byte, 0]), value)
    }

    fn value_of(node: &Node<i32>) -> i32 {
        node.leaf().unwrap().value
    }

    #[test]
    fn test_add_seek_within_node4() {
        let mut n = Node::new_inner(Prefix::empty());
        n.add_child(5, leaf(5, 1));
        n.add_child(4, leaf(4, 2));
        n.add_child(3, leaf(3, 3));
        n.add_child(2, leaf(2, 4));

        assert_eq!(n.capacity(), 4);
        assert_eq!(value_of(n.seek_child(5).unwrap()), 1);
        assert_eq!(value_of(n.seek_child(4).unwrap()), 2);
        assert_eq!(value_of(n.seek_child(3).unwrap()), 3);
        assert_eq!(value_of(n.seek_child(2).unwrap()), 4);
        assert!(n.seek_child(6).is_none());
    }

    #[test]
    fn test_growth_chain_to_node256() {
        let mut n = Node::new_inner(Prefix::empty());
        for i in 0..4 {
            n.add_child(i, leaf(i, i as i32));
        }
        assert_eq!(n.capacity(), 4);
        n.add_child(4, leaf(4, 4));
        assert_eq!(n.capacity(), 16);
        for i in 5..16 {
            n.add_child(i, leaf(i, i as i32));
        }
        assert_eq!(n.capacity(), 16);
        n.add_child(16, leaf(16, 16));
        assert_eq!(n.capacity(), 48);
        for i in 17..48 {
            n.add_child(i, leaf(i, i as i32));
        }
        assert_eq!(n.capacity(), 48);
        n.add_child(48, leaf(48, 48));
        assert_eq!(n.capacity(), 256);
        for i in 49..=255 {
            n.add_child(i, leaf(i, i as i32));
        }

        // Every child survived every promotion.
        assert_eq!(n.num_children(), 256);
        for i in 0..=255u8 {
            assert_eq!(value_of(n.seek_child(i).unwrap()), i as i32);
        }
    }

    #[test]
    fn test_shrink_chain_back_to_node4() {
        let mut n = Node::new_inner(Prefix::empty());
        for i in 0..=255u8 {
            n.add_child(i, leaf(i, i as i32));
        }
        assert_eq!(n.capacity(), 256);

        // Occupancy 37 drops the node back to a 48-wide variant.
        for i in 37..=255u8 {
            assert!(n.delete_child(i).is_some());
        }
        assert_eq!(n.capacity(), 48);
        for i in 12..37u8 {
            assert!(n.delete_child(i).is_some());
        }
        assert_eq!(n.capacity(), 16);
        for i in 3..12u8 {
            assert!(n.delete_child(i).is_some());
        }
        assert_eq!(n.capacity(), 4);
        for i in 0..3u8 {
            assert_eq!(value_of(n.seek_child(i).unwrap()), i as i32);
        }
    }

    #[test]
    fn test_single_child_node4_collapses_into_leaf() {
        let mut n = Node::new_inner(Prefix::from_key_range(b"ke", 0, 2));
        n.add_child(b'a', leaf(b'a', 10));
        n.add_child(b'b', leaf(b'b', 20));
        assert!(n.delete_child(b'a').is_some());
        assert!(n.is_leaf());
        assert_eq!(n.leaf().unwrap().value, 20);
    }

    #[test]
    fn test_single_child_node4_merges_inner_prefixes() {
        let mut inner_child = Node::new_inner(Prefix::from_key_range(b"xy", 0, 2));
        inner_child.add_child(b'1', leaf(b'1', 1));
        inner_child.add_child(b'2', leaf(b'2', 2));

        let mut n = Node::new_inner(Prefix::from_key_range(b"ab", 0, 2));
        n.add_child(b'c', inner_child);
        n.add_child(b'd', leaf(b'd', 3));

        assert!(n.delete_child(b'd').is_some());
        assert!(n.is_inner());
        assert_eq!(n.prefix.stored(), b"abcxy");
        assert_eq!(n.prefix.len(), 5);
        assert_eq!(value_of(n.seek_child(b'1').unwrap()), 1);
    }

    #[test]
    fn test_minimum_leaf_descends_smallest_edges() {
        let mut sub = Node::new_inner(Prefix::empty());
        sub.add_child(9, leaf(9, 90));
        sub.add_child(1, leaf(1, 10));

        let mut n = Node::new_inner(Prefix::empty());
        n.add_child(7, leaf(7, 70));
        n.add_child(3, sub);
        assert_eq!(n.minimum_leaf().value, 10);
    }
}
