pub(crate) mod direct_mapping;
pub(crate) mod indexed_mapping;
pub(crate) mod sorted_keyed_mapping;

/// The logical contract every node variant's child container satisfies:
/// map an edge byte to a child, with variant-specific storage and search.
pub(crate) trait NodeMapping<N, const NUM_CHILDREN: usize> {
    const NUM_CHILDREN: usize = NUM_CHILDREN;

    fn add_child(&mut self, key: u8, node: N);
    fn seek_child(&self, key: u8) -> Option<&N>;
    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N>;
    fn delete_child(&mut self, key: u8) -> Option<N>;
    fn num_children(&self) -> usize;
    fn width(&self) -> usize {
        Self::NUM_CHILDREN
    }
}
