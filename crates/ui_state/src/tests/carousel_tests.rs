use super::*;
use proptest::prelude::*;

#[test]
fn advance_and_retreat_wrap_around() {
    let mut state = CarouselState::new(3);
    state.retreat();
    assert_eq!(state.current_index(), 2);
    assert_eq!(state.direction(), Direction::Backward);

    state.advance();
    assert_eq!(state.current_index(), 0);
    assert_eq!(state.direction(), Direction::Forward);

    state.advance();
    state.advance();
    state.advance();
    assert_eq!(state.current_index(), 0);
}

#[test]
fn empty_carousel_ignores_navigation() {
    let mut state = CarouselState::new(0);
    state.advance();
    state.retreat();
    assert!(!state.tick());
    assert_eq!(state.current(), None);
    assert_eq!(state.current_index(), 0);
    assert_eq!(state.position_of(0), None);
}

#[test]
fn paused_carousel_skips_ticks_but_allows_manual_steps() {
    let mut state = CarouselState::new(4);
    state.pause();
    assert!(!state.tick());
    assert_eq!(state.current_index(), 0);

    state.advance();
    assert_eq!(state.current_index(), 1);

    state.resume();
    assert!(state.tick());
    assert_eq!(state.current_index(), 2);
}

#[test]
fn jump_to_accepts_in_range_and_rejects_out_of_range() {
    let mut state = CarouselState::new(5);
    state.jump_to(4).expect("last index");
    assert_eq!(state.current_index(), 4);
    assert_eq!(state.direction(), Direction::Forward);

    state.jump_to(1).expect("lower index");
    assert_eq!(state.direction(), Direction::Backward);

    let err = state.jump_to(5).expect_err("one past the end");
    assert_eq!(err, CarouselError::OutOfRange { index: 5, len: 5 });
    assert_eq!(state.current_index(), 1);

    assert!(state.jump_to(usize::MAX).is_err());
    assert_eq!(state.current_index(), 1);

    assert!(CarouselState::new(0).jump_to(0).is_err());
}

#[test]
fn positions_follow_shortest_circular_distance() {
    let mut state = CarouselState::new(9);
    assert_eq!(state.position_of(0), Some(SlotPosition::Center));
    assert_eq!(state.position_of(1), Some(SlotPosition::Right));
    assert_eq!(state.position_of(8), Some(SlotPosition::Left));
    assert_eq!(state.position_of(4), Some(SlotPosition::Hidden(4)));
    assert_eq!(state.position_of(5), Some(SlotPosition::Hidden(-4)));

    state.jump_to(8).expect("jump");
    assert_eq!(state.position_of(0), Some(SlotPosition::Right));
    assert_eq!(state.position_of(7), Some(SlotPosition::Left));
    assert_eq!(SlotPosition::Hidden(-3).css_class(), "is-hidden-left");
}

#[test]
fn pagination_walks_pages_and_wraps() {
    let mut pages = Pagination::new(7, 3);
    assert_eq!(pages.page_count(), 3);
    assert_eq!(pages.visible_range(), 0..3);

    pages.next();
    pages.next();
    assert_eq!(pages.visible_range(), 6..7);

    pages.next();
    assert_eq!(pages.page(), 0);

    pages.prev();
    assert_eq!(pages.page(), 2);

    assert!(pages.go_to(3).is_err());
    assert_eq!(Pagination::new(0, 4).visible_range(), 0..0);
}

proptest! {
    #[test]
    fn index_stays_in_bounds(len in 1usize..50, steps in proptest::collection::vec(any::<bool>(), 0..200)) {
        let mut state = CarouselState::new(len);
        for forward in steps {
            if forward {
                state.advance();
            } else {
                state.retreat();
            }
            prop_assert!(state.current_index() < len);
        }
    }

    #[test]
    fn advancing_len_times_returns_to_start(len in 1usize..50, start in 0usize..50) {
        let start = start % len;
        let mut state = CarouselState::starting_at(len, start).expect("start");
        for _ in 0..len {
            state.advance();
        }
        prop_assert_eq!(state.current_index(), start);
    }

    #[test]
    fn retreat_undoes_advance(len in 1usize..50, start in 0usize..50) {
        let start = start % len;
        let mut state = CarouselState::starting_at(len, start).expect("start");
        state.advance();
        state.retreat();
        prop_assert_eq!(state.current_index(), start);
    }
}
