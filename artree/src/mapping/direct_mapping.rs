use crate::mapping::NodeMapping;
use crate::mapping::indexed_mapping::IndexedMapping;
use crate::utils::bitarray::BitArray;

/// The widest mapping: the edge byte indexes the child array directly, so
/// lookup is a single fetch and no growth is ever needed.
pub struct DirectMapping<N> {
    pub(crate) children: BitArray<N, 256, 4>,
    num_children: usize,
}

impl<N> Default for DirectMapping<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> DirectMapping<N> {
    pub fn new() -> Self {
        Self {
            children: BitArray::new(),
            num_children: 0,
        }
    }

    /// Promote an indexed (48-wide) mapping.
    pub(crate) fn from_indexed<const WIDTH: usize>(im: &mut IndexedMapping<N, WIDTH>) -> Self {
        let mut new_mapping = DirectMapping::<N>::new();
        im.move_into(&mut new_mapping);
        new_mapping
    }

    /// Drain every child into another mapping, in ascending edge byte
    /// order.
    pub(crate) fn move_into<const NEW_WIDTH: usize, NM: NodeMapping<N, NEW_WIDTH>>(
        &mut self,
        nm: &mut NM,
    ) {
        for byte in 0..=255u8 {
            if let Some(node) = self.children.erase(byte as usize) {
                nm.add_child(byte, node);
            }
        }
        self.num_children = 0;
    }

    /// The child with the smallest edge byte.
    pub fn first_child(&self) -> Option<&N> {
        let pos = self.children.first_used_pos()?;
        self.children.get(pos)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (u8, &N)> {
        self.children.iter().map(|(pos, n)| (pos as u8, n))
    }
}

impl<N> NodeMapping<N, 256> for DirectMapping<N> {
    #[inline]
    fn add_child(&mut self, key: u8, node: N) {
        debug_assert!(!self.children.check(key as usize));
        self.children.set(key as usize, node);
        self.num_children += 1;
    }

    #[inline]
    fn seek_child(&self, key: u8) -> Option<&N> {
        self.children.get(key as usize)
    }

    #[inline]
    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        self.children.get_mut(key as usize)
    }

    #[inline]
    fn delete_child(&mut self, key: u8) -> Option<N> {
        let n = self.children.erase(key as usize);
        if n.is_some() {
            self.num_children -= 1;
        }
        n
    }

    #[inline]
    fn num_children(&self) -> usize {
        self.num_children
    }
}
