use std::mem::MaybeUninit;

use crate::mapping::NodeMapping;
use crate::mapping::indexed_mapping::IndexedMapping;
use crate::utils::u8_keys::{
    u8_keys_find_insert_position_sorted, u8_keys_find_key_position_sorted,
};

/// Maps a key byte to a node through a sorted array of keys and a
/// corresponding array of children. The populated prefix of `keys` is kept
/// strictly ascending and compact, so `num_children` alone describes
/// occupancy. Inserting or deleting shifts the entries to the right of the
/// position to keep the order. Search is linear at width 4 and a SIMD
/// equality scan (binary search without one) at width 16.
pub struct SortedKeyedMapping<N, const WIDTH: usize> {
    pub(crate) keys: [u8; WIDTH],
    pub(crate) children: Box<[MaybeUninit<N>; WIDTH]>,
    pub(crate) num_children: u8,
}

impl<N, const WIDTH: usize> Default for SortedKeyedMapping<N, WIDTH> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, const WIDTH: usize> SortedKeyedMapping<N, WIDTH> {
    #[inline]
    pub fn new() -> Self {
        Self {
            keys: [0; WIDTH],
            children: Box::new([const { MaybeUninit::uninit() }; WIDTH]),
            num_children: 0,
        }
    }

    /// Move the children of a differently sized sorted mapping into a fresh
    /// one. Both directions work: the source drains in ascending key order,
    /// and shrinkage just requires enough room.
    pub fn from_resized<const OLD_WIDTH: usize>(km: &mut SortedKeyedMapping<N, OLD_WIDTH>) -> Self {
        let mut new = SortedKeyedMapping::new();
        km.move_into(&mut new);
        new
    }

    /// Demote an indexed (48-wide) mapping. Iteration is in ascending edge
    /// byte order, so appending preserves the sort invariant.
    pub(crate) fn from_indexed<const IDX_WIDTH: usize>(
        im: &mut IndexedMapping<N, IDX_WIDTH>,
    ) -> Self {
        let mut new_mapping = SortedKeyedMapping::new();
        im.move_into(&mut new_mapping);
        new_mapping
    }

    /// Drain every child into another mapping, in ascending key order.
    pub(crate) fn move_into<const NEW_WIDTH: usize, NM: NodeMapping<N, NEW_WIDTH>>(
        &mut self,
        nm: &mut NM,
    ) {
        for i in 0..self.num_children as usize {
            let child = std::mem::replace(&mut self.children[i], MaybeUninit::uninit());
            nm.add_child(self.keys[i], unsafe { child.assume_init() });
        }
        self.num_children = 0;
    }

    /// Return the key and child of the only remaining entry, emptying the
    /// mapping. Used when a node collapses into its last child.
    pub fn take_only_child(&mut self) -> (u8, N) {
        debug_assert!(self.num_children == 1);
        let key = self.keys[0];
        let child = std::mem::replace(&mut self.children[0], MaybeUninit::uninit());
        self.num_children = 0;
        (key, unsafe { child.assume_init() })
    }

    /// The child with the smallest key byte.
    pub fn first_child(&self) -> Option<&N> {
        if self.num_children == 0 {
            return None;
        }
        Some(unsafe { self.children[0].assume_init_ref() })
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (u8, &N)> {
        (0..self.num_children as usize)
            .map(|i| (self.keys[i], unsafe { self.children[i].assume_init_ref() }))
    }
}

impl<N, const WIDTH: usize> NodeMapping<N, WIDTH> for SortedKeyedMapping<N, WIDTH> {
    fn add_child(&mut self, key: u8, node: N) {
        debug_assert!((self.num_children as usize) < WIDTH);
        let idx =
            u8_keys_find_insert_position_sorted::<WIDTH>(key, &self.keys, self.num_children as usize);

        // Shift everything from the insert position rightwards.
        for i in (idx..self.num_children as usize).rev() {
            self.keys[i + 1] = self.keys[i];
            self.children[i + 1] = std::mem::replace(&mut self.children[i], MaybeUninit::uninit());
        }
        self.keys[idx] = key;
        self.children[idx].write(node);
        self.num_children += 1;
    }

    fn seek_child(&self, key: u8) -> Option<&N> {
        let idx =
            u8_keys_find_key_position_sorted::<WIDTH>(key, &self.keys, self.num_children as usize)?;
        Some(unsafe { self.children[idx].assume_init_ref() })
    }

    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        let idx =
            u8_keys_find_key_position_sorted::<WIDTH>(key, &self.keys, self.num_children as usize)?;
        Some(unsafe { self.children[idx].assume_init_mut() })
    }

    fn delete_child(&mut self, key: u8) -> Option<N> {
        let idx =
            u8_keys_find_key_position_sorted::<WIDTH>(key, &self.keys, self.num_children as usize)?;

        let node = std::mem::replace(&mut self.children[idx], MaybeUninit::uninit());

        // Close the gap, keeping the populated prefix compact and sorted.
        for i in idx..self.num_children as usize - 1 {
            self.keys[i] = self.keys[i + 1];
            self.children[i] = std::mem::replace(&mut self.children[i + 1], MaybeUninit::uninit());
        }
        self.num_children -= 1;
        self.keys[self.num_children as usize] = 0;

        Some(unsafe { node.assume_init() })
    }

    #[inline(always)]
    fn num_children(&self) -> usize {
        self.num_children as usize
    }
}

impl<N, const WIDTH: usize> Drop for SortedKeyedMapping<N, WIDTH> {
    fn drop(&mut self) {
        for child in &mut self.children[..self.num_children as usize] {
            unsafe { child.assume_init_drop() }
        }
        self.num_children = 0;
    }
}
