/// Maps a possibly out-of-range index onto `[0, len)` by clamping to the
/// nearest edge. Returns `None` only for an empty axis.
#[inline]
pub fn clamp_index(i: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if i < 0 {
        Some(0)
    } else {
        Some((i as usize).min(len - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::clamp_index;

    #[test]
    fn clamp_mapping_handles_negative_and_overflow() {
        assert_eq!(clamp_index(-3, 5), Some(0));
        assert_eq!(clamp_index(-1, 5), Some(0));
        assert_eq!(clamp_index(0, 5), Some(0));
        assert_eq!(clamp_index(4, 5), Some(4));
        assert_eq!(clamp_index(5, 5), Some(4));
        assert_eq!(clamp_index(99, 5), Some(4));
        assert_eq!(clamp_index(isize::MIN, 5), Some(0));
        assert_eq!(clamp_index(isize::MAX, 5), Some(4));
    }

    #[test]
    fn single_and_empty_axis() {
        for i in -8..=8 {
            assert_eq!(clamp_index(i, 1), Some(0));
        }
        assert_eq!(clamp_index(0, 0), None);
    }
}
