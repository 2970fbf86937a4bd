//! Child-search routines over the sorted key arrays of the narrow node
//! variants. Width 4 stays linear; width 16 uses a 128-bit SIMD equality
//! scan where the target has one, with binary search as the portable
//! fallback.

#[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
#[inline]
fn x86_64_sse_find_key_16_up_to(key: u8, keys: &[u8], num_children: usize) -> Option<usize> {
    use std::arch::x86_64::{
        __m128i, _mm_cmpeq_epi8, _mm_loadu_si128, _mm_movemask_epi8, _mm_set1_epi8,
    };

    let bitfield = unsafe {
        let key_vec = _mm_set1_epi8(key as i8);
        let results = _mm_cmpeq_epi8(key_vec, _mm_loadu_si128(keys.as_ptr() as *const __m128i));
        // Mask out the lanes past the populated count; their key bytes are
        // stale.
        let mask = (1i32 << num_children) - 1;
        _mm_movemask_epi8(results) & mask
    };
    if bitfield != 0 {
        return Some(bitfield.trailing_zeros() as usize);
    }
    None
}

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
#[inline]
fn aarch64_neon_find_key_16_up_to(key: u8, keys: &[u8], num_children: usize) -> Option<usize> {
    use std::arch::aarch64::*;
    unsafe {
        // Broadcast the key and compare against all sixteen key bytes at
        // once. Equal lanes come back as 0xFF.
        let key_vec = vdupq_n_u8(key);
        let node_keys_vec = vld1q_u8(keys.as_ptr());
        let cmp_vec = vceqq_u8(key_vec, node_keys_vec);

        // NEON has no movemask; narrow the 8-bit lanes down to 4 bits each
        // and read the result out of a single 64-bit lane.
        let eq_mask = vreinterpretq_u16_u8(cmp_vec);
        let res = vshrn_n_u16::<4>(eq_mask);
        let matches = vget_lane_u64::<0>(vreinterpret_u64_u8(res));

        if matches != 0 {
            // Each lane is 4 bits wide, so the lane index is tlz / 4.
            let idx = (matches.trailing_zeros() >> 2) as usize;
            if idx < num_children {
                return Some(idx);
            }
        }
        None
    }
}

fn binary_find_key(key: u8, keys: &[u8], num_children: usize) -> Option<usize> {
    let mut left = 0;
    let mut right = num_children;
    while left < right {
        let mid = (left + right) / 2;
        match keys[mid].cmp(&key) {
            std::cmp::Ordering::Less => left = mid + 1,
            std::cmp::Ordering::Equal => return Some(mid),
            std::cmp::Ordering::Greater => right = mid,
        }
    }
    None
}

/// Position of `key` within the populated, ascending prefix of `keys`.
#[allow(unreachable_code)]
pub fn u8_keys_find_key_position_sorted<const WIDTH: usize>(
    key: u8,
    keys: &[u8],
    num_children: usize,
) -> Option<usize> {
    // Width 4 and under, just use linear search.
    if WIDTH <= 4 {
        return (0..num_children).find(|&i| keys[i] == key);
    }

    // SIMD optimized forms of 16
    if WIDTH == 16 {
        #[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
        {
            return x86_64_sse_find_key_16_up_to(key, keys, num_children);
        }

        #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
        {
            return aarch64_neon_find_key_16_up_to(key, keys, num_children);
        }
    }

    // Fallback to binary search.
    binary_find_key(key, keys, num_children)
}

/// Position at which `key` keeps the populated prefix of `keys` strictly
/// ascending. The caller guarantees `key` is not already present.
pub fn u8_keys_find_insert_position_sorted<const WIDTH: usize>(
    key: u8,
    keys: &[u8],
    num_children: usize,
) -> usize {
    keys[..num_children].partition_point(|&k| k < key)
}
