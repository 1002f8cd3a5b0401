//! Property-based tests for the playback controller
//!
//! Uses proptest to drive random interleavings of user intents and
//! primitive notifications, and checks the controller's invariants after
//! every step.

mod common;

use cadence_playback::{
    ControllerConfig, PlaybackController, Playlist, PrimitiveEvent, SelectionOrigin, Track,
};
use common::{create_test_track, MockPrimitive};
use proptest::prelude::*;

// ===== Helpers =====

#[derive(Debug, Clone)]
enum Step {
    Play,
    Pause,
    Toggle,
    Next,
    Previous,
    Select(usize),
    SeekFraction(f64),
    SeekTo(f64),
    SetVolume(f64),
    ToggleMute,
    ToggleShuffle,
    ToggleRepeat,
    TogglePanel,
    /// Deliver the oldest queued primitive notification
    DeliverOne,
    /// Report a position for the current selection
    TimeUpdate(f64),
    /// Report a position for an older selection
    StaleTimeUpdate(f64),
    /// Report the end of the current selection
    Ended,
    /// Make subsequent play requests fail or succeed
    SetRejecting(bool),
}

fn arbitrary_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Play),
        Just(Step::Pause),
        Just(Step::Toggle),
        Just(Step::Next),
        Just(Step::Previous),
        (0usize..12).prop_map(Step::Select),
        (-1.0f64..2.0).prop_map(Step::SeekFraction),
        (-50.0f64..700.0).prop_map(Step::SeekTo),
        (-0.5f64..1.5).prop_map(Step::SetVolume),
        Just(Step::ToggleMute),
        Just(Step::ToggleShuffle),
        Just(Step::ToggleRepeat),
        Just(Step::TogglePanel),
        Just(Step::DeliverOne),
        Just(Step::DeliverOne),
        Just(Step::DeliverOne),
        (-10.0f64..700.0).prop_map(Step::TimeUpdate),
        (0.0f64..700.0).prop_map(Step::StaleTimeUpdate),
        Just(Step::Ended),
        any::<bool>().prop_map(Step::SetRejecting),
    ]
}

fn arbitrary_playlist() -> impl Strategy<Value = Playlist> {
    prop::collection::vec(1u32..600, 1..8).prop_map(|durations| {
        let tracks: Vec<Track> = durations
            .into_iter()
            .enumerate()
            .map(|(i, d)| create_test_track(&format!("t{}", i), f64::from(d)))
            .collect();
        Playlist::new(tracks).unwrap()
    })
}

fn apply(controller: &mut PlaybackController<MockPrimitive>, step: &Step) {
    match step {
        Step::Play => controller.play(),
        Step::Pause => controller.pause(),
        Step::Toggle => controller.toggle(),
        Step::Next => controller.next(),
        Step::Previous => controller.previous(),
        Step::Select(index) => {
            let _ = controller.select_track(*index, SelectionOrigin::PlaylistPanel);
        }
        Step::SeekFraction(f) => {
            let _ = controller.seek_to_fraction(*f);
        }
        Step::SeekTo(s) => {
            let _ = controller.seek_to(*s);
        }
        Step::SetVolume(v) => {
            let _ = controller.set_volume(*v);
        }
        Step::ToggleMute => controller.toggle_mute(),
        Step::ToggleShuffle => controller.toggle_shuffle(),
        Step::ToggleRepeat => controller.toggle_repeat(),
        Step::TogglePanel => controller.toggle_playlist_panel(),
        Step::DeliverOne => {
            if let Some(event) = controller.primitive_mut().outbox.pop_front() {
                let _ = controller.handle_event(event);
            }
        }
        Step::TimeUpdate(seconds) => {
            let selection = controller.selection();
            let _ = controller.handle_event(PrimitiveEvent::TimeUpdate {
                selection,
                seconds: *seconds,
            });
        }
        Step::StaleTimeUpdate(seconds) => {
            let current = controller.selection();
            if current.0 > 1 {
                let _ = controller.handle_event(PrimitiveEvent::TimeUpdate {
                    selection: cadence_playback::SelectionToken(current.0 - 1),
                    seconds: *seconds,
                });
            }
        }
        Step::Ended => {
            let selection = controller.selection();
            let _ = controller.handle_event(PrimitiveEvent::Ended { selection });
        }
        Step::SetRejecting(reject) => {
            controller.primitive_mut().reject_with = reject.then(|| "unavailable".to_string());
        }
    }
}

// ===== Property Tests =====

proptest! {
    /// Property: index and position always stay within bounds
    #[test]
    fn index_and_position_stay_in_bounds(
        playlist in arbitrary_playlist(),
        steps in prop::collection::vec(arbitrary_step(), 1..80)
    ) {
        let len = playlist.len();
        let mut controller = PlaybackController::new(
            playlist,
            MockPrimitive::default(),
            ControllerConfig { shuffle_seed: Some(3), ..Default::default() },
        ).unwrap();

        for step in &steps {
            apply(&mut controller, step);

            prop_assert!(controller.current_index() < len);
            let duration = controller.current_track().duration_secs;
            let position = controller.position_secs();
            prop_assert!(
                (0.0..=duration).contains(&position),
                "position {} outside [0, {}] after {:?}", position, duration, step
            );
        }
    }

    /// Property: `is_playing` implies the last play request was acknowledged
    /// for the current selection
    #[test]
    fn playing_only_after_ack_for_current_selection(
        playlist in arbitrary_playlist(),
        steps in prop::collection::vec(arbitrary_step(), 1..80)
    ) {
        let mut controller = PlaybackController::new(
            playlist,
            MockPrimitive::default(),
            ControllerConfig { shuffle_seed: Some(5), ..Default::default() },
        ).unwrap();

        for step in &steps {
            apply(&mut controller, step);

            if controller.is_playing() {
                let last = controller.primitive().play_requests.last().copied();
                prop_assert!(last.is_some(), "playing without any play request");
                prop_assert_eq!(last.unwrap().selection, controller.selection());
                prop_assert!(!controller.is_loading());
                prop_assert!(controller.notice().is_none());
            }
        }
    }

    /// Property: a rejection always leaves the controller stopped
    #[test]
    fn rejection_always_restores_stopped(
        steps in prop::collection::vec(arbitrary_step(), 1..40)
    ) {
        let mut controller = common::create_controller();
        controller.primitive_mut().reject_with = Some("unavailable".to_string());

        for step in steps.iter().filter(|s| !matches!(s, Step::SetRejecting(_))) {
            apply(&mut controller, step);
            prop_assert!(!controller.is_playing());
        }
    }

    /// Property: volume stays in [0, 1] and effective volume honors mute
    #[test]
    fn volume_invariants(
        steps in prop::collection::vec(arbitrary_step(), 1..60)
    ) {
        let mut controller = common::create_controller();

        for step in &steps {
            apply(&mut controller, step);

            let volume = controller.volume();
            prop_assert!((0.0..=1.0).contains(&volume));
            let expected = if controller.is_muted() { 0.0 } else { volume };
            prop_assert_eq!(controller.effective_volume(), expected);
            prop_assert_eq!(controller.primitive().volume, expected);
        }
    }

    /// Property: with shuffle off, N calls to next() return to the start
    #[test]
    fn next_is_cyclic(
        playlist in arbitrary_playlist(),
        start in 0usize..8
    ) {
        let len = playlist.len();
        let start = start % len;
        let mut controller =
            PlaybackController::new(playlist, MockPrimitive::default(), ControllerConfig::default())
                .unwrap();
        controller.select_track(start, SelectionOrigin::Controls).unwrap();

        for _ in 0..len {
            controller.next();
        }
        prop_assert_eq!(controller.current_index(), start);
    }

    /// Property: stale notifications never change observable state
    #[test]
    fn stale_notifications_are_inert(
        seconds in 0.0f64..600.0,
        hops in 1usize..5
    ) {
        let mut controller = common::create_controller();
        common::pump(&mut controller);
        let first = controller.selection();

        for _ in 0..hops {
            controller.next();
        }
        common::pump(&mut controller);
        let before = controller.snapshot();

        controller.handle_event(PrimitiveEvent::TimeUpdate { selection: first, seconds }).unwrap();
        controller.handle_event(PrimitiveEvent::Ended { selection: first }).unwrap();
        controller.handle_event(PrimitiveEvent::LoadCompleted { selection: first }).unwrap();

        prop_assert_eq!(controller.snapshot(), before);
    }
}
