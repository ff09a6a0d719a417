//! Property tests for tile-space rectangle predicates.

use proptest::prelude::*;
use shoots_core::geometry::Rect;

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (0u16..40, 0u16..40, 1u16..12, 1u16..12).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn overlap_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn overlap_iff_some_tile_shared(a in rect_strategy(), b in rect_strategy()) {
        let shared = (a.x..a.right())
            .any(|x| (a.y..a.bottom()).any(|y| b.contains(x, y)));
        prop_assert_eq!(a.overlaps(&b), shared);
    }

    #[test]
    fn with_origin_keeps_size(r in rect_strategy(), x in 0u16..40, y in 0u16..40) {
        let moved = r.with_origin(x, y);
        prop_assert_eq!(moved.width, r.width);
        prop_assert_eq!(moved.height, r.height);
        prop_assert_eq!((moved.x, moved.y), (x, y));
    }
}
