use pencilbox_camtools::{JointProfile, SegmentKind};
use pencilbox_settings::JointSettings;
use proptest::prelude::*;

proptest! {
    #[test]
    fn segments_cover_the_edge(
        edge_length in 30.0f64..600.0,
        thickness in 2.0f64..7.0,
        starts_with_tab in any::<bool>(),
    ) {
        let settings = JointSettings::default();
        if let Ok(profile) = JointProfile::for_edge(edge_length, thickness, starts_with_tab, &settings) {
            let total: f64 = profile.segments().iter().map(|s| s.length).sum();
            prop_assert!((total - edge_length).abs() < 1e-9);
            prop_assert_eq!(profile.tab_count() % 4, 3);
            prop_assert!(profile.segments().iter().all(|s| s.length > 0.0));
        }
    }

    #[test]
    fn segments_alternate_from_parity(
        edge_length in 30.0f64..600.0,
        thickness in 2.0f64..7.0,
        starts_with_tab in any::<bool>(),
    ) {
        let settings = JointSettings::default();
        if let Ok(profile) = JointProfile::for_edge(edge_length, thickness, starts_with_tab, &settings) {
            let expected_first = if starts_with_tab { SegmentKind::Tab } else { SegmentKind::Slot };
            prop_assert_eq!(profile.first_kind(), expected_first);
            prop_assert_eq!(profile.last_kind(), expected_first);
            for pair in profile.segments().windows(2) {
                prop_assert_eq!(pair[1].kind, pair[0].kind.opposite());
            }
        }
    }

    #[test]
    fn mating_edges_share_boundaries(
        edge_length in 30.0f64..600.0,
        thickness in 2.0f64..7.0,
    ) {
        let settings = JointSettings::default();
        let tab_first = JointProfile::for_edge(edge_length, thickness, true, &settings);
        let slot_first = JointProfile::for_edge(edge_length, thickness, false, &settings);
        if let (Ok(a), Ok(b)) = (tab_first, slot_first) {
            prop_assert!(a.mates_with(&b));
            prop_assert_eq!(a.boundaries(), b.boundaries());
            for ((ka, _, _), (kb, _, _)) in a.spans().zip(b.spans()) {
                prop_assert_ne!(ka, kb);
            }
        }
    }
}

#[test]
fn test_same_parity_does_not_mate() {
    let settings = JointSettings::default();
    let a = JointProfile::for_edge(127.0, 3.0, true, &settings).unwrap();
    let b = JointProfile::for_edge(127.0, 3.0, true, &settings).unwrap();
    assert!(!a.mates_with(&b));
    assert!(a.mates_with(&a.complement()));
}

#[test]
fn test_middle_segment_is_slot_on_tab_first_edge() {
    let settings = JointSettings::default();
    for length in [50.0, 101.6, 127.0, 152.4, 400.0] {
        let profile = JointProfile::for_edge(length, 3.0, true, &settings).unwrap();
        assert_eq!(profile.kind_at(length / 2.0), SegmentKind::Slot, "length {}", length);
    }
}
