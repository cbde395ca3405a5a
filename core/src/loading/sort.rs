use crate::types::CtSlice;

/// Anatomical sort key for one slice
///
/// Total function over the slice's optional attributes, with a 3-tier
/// fallback:
/// 1. ImagePositionPatient Z component, the anatomically correct key
///    (handles gaps and non-monotonic instance numbering);
/// 2. InstanceNumber, a reasonable acquisition-order proxy when geometry
///    is absent;
/// 3. `0.0`, which carries no meaning and only keeps the sort total so
///    that keyless slices retain their enumeration order.
///
/// Unparseable attributes were already folded into `None` at parse time,
/// so no conversion can fail here.
pub fn sort_key(slice: &CtSlice) -> f64 {
    match (slice.position, slice.instance_number) {
        (Some(pos), _) => pos[2],
        (None, Some(n)) => n as f64,
        (None, None) => 0.0,
    }
}

/// Orders slices anatomically, ascending by [`sort_key`]
///
/// The sort is stable: slices with equal keys keep their enumeration
/// order, which the loader makes deterministic by sorting candidate paths
/// first. Tie order is not anatomically meaningful.
pub fn sort_slices(slices: &mut [CtSlice]) {
    slices.sort_by(|a, b| sort_key(a).total_cmp(&sort_key(b)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::SliceFixture;
    use crate::types::CtSlice;

    fn positioned(z: f64) -> CtSlice {
        SliceFixture::new(2, 2).position([0.0, 0.0, z]).build_slice()
    }

    fn numbered(n: i64) -> CtSlice {
        SliceFixture::new(2, 2).instance_number(n).build_slice()
    }

    fn keyless(marker: i64) -> CtSlice {
        // Column count doubles as an identity marker for stability checks
        SliceFixture::new(2, 2 + marker as u16).build_slice()
    }

    #[test]
    fn test_key_prefers_z_position() {
        let slice = SliceFixture::new(2, 2)
            .position([1.0, 2.0, -301.5])
            .instance_number(7)
            .build_slice();

        assert_eq!(sort_key(&slice), -301.5);
    }

    #[test]
    fn test_key_falls_back_to_instance_number() {
        assert_eq!(sort_key(&numbered(12)), 12.0);
    }

    #[test]
    fn test_key_falls_back_to_zero() {
        assert_eq!(sort_key(&keyless(0)), 0.0);
    }

    #[test]
    fn test_short_position_falls_through_to_instance_number() {
        let slice = SliceFixture::new(2, 2)
            .raw_position("1.0\\2.0")
            .instance_number(9)
            .build_slice();

        assert_eq!(sort_key(&slice), 9.0);
    }

    #[test]
    fn test_sort_ascending_z_independent_of_input_order() {
        let mut slices = vec![positioned(10.0), positioned(-35.5), positioned(2.25)];
        sort_slices(&mut slices);

        let keys: Vec<f64> = slices.iter().map(sort_key).collect();
        assert_eq!(keys, vec![-35.5, 2.25, 10.0]);
    }

    #[test]
    fn test_sort_is_stable_for_keyless_slices() {
        let mut slices = vec![keyless(1), keyless(2), keyless(3)];
        sort_slices(&mut slices);

        let markers: Vec<usize> = slices.iter().map(|s| s.stored_pixels().unwrap().dim().1).collect();
        assert_eq!(markers, vec![3, 4, 5]);
    }

    #[test]
    fn test_mixed_tiers_sort_together() {
        // A numbered slice competes with positioned slices on the same axis
        let mut slices = vec![positioned(50.0), numbered(-3), positioned(-100.0)];
        sort_slices(&mut slices);

        let keys: Vec<f64> = slices.iter().map(sort_key).collect();
        assert_eq!(keys, vec![-100.0, -3.0, 50.0]);
    }
}
