//! Property-based tests for the playback engine
//!
//! Uses proptest to verify invariants across many random inputs and
//! random command sequences.

use cadence_playback::{PlaybackCommand, PlaybackEngine, RepeatMode, Track, Volume};
use proptest::prelude::*;

// ===== Helpers =====

fn arbitrary_track() -> impl Strategy<Value = Track> {
    (
        "[a-z0-9]{1,10}",  // id
        "[A-Za-z ]{1,30}", // title
        0.0f64..900.0,     // duration (seconds)
    )
        .prop_map(|(id, title, duration)| Track::new(id, title, duration))
}

fn arbitrary_tracks() -> impl Strategy<Value = Vec<Track>> {
    prop::collection::vec(arbitrary_track(), 0..20)
}

fn arbitrary_time() -> impl Strategy<Value = f64> {
    prop_oneof![
        -100.0f64..1000.0,
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
    ]
}

fn arbitrary_command() -> impl Strategy<Value = PlaybackCommand> {
    prop_oneof![
        arbitrary_track().prop_map(|track| PlaybackCommand::Load { track }),
        Just(PlaybackCommand::Pause),
        Just(PlaybackCommand::Resume),
        Just(PlaybackCommand::TogglePlayback),
        Just(PlaybackCommand::Stop),
        arbitrary_time().prop_map(|time| PlaybackCommand::Seek { time }),
        arbitrary_time().prop_map(|delta| PlaybackCommand::SeekBy { delta }),
        arbitrary_time().prop_map(|percent| PlaybackCommand::SeekPercent { percent }),
        (-2.0f64..3.0).prop_map(|volume| PlaybackCommand::SetVolume { volume }),
        Just(PlaybackCommand::ToggleMute),
        (arbitrary_tracks(), 0usize..30).prop_map(|(tracks, start_index)| {
            PlaybackCommand::SetQueue {
                tracks,
                start_index,
            }
        }),
        Just(PlaybackCommand::ClearQueue),
        Just(PlaybackCommand::Next),
        Just(PlaybackCommand::Previous),
        Just(PlaybackCommand::ToggleRepeat),
        Just(PlaybackCommand::ToggleShuffle),
        arbitrary_time().prop_map(|time| PlaybackCommand::TimeUpdate { time }),
        Just(PlaybackCommand::TrackEnded),
    ]
}

// ===== Property Tests =====

proptest! {
    /// Property: volume is always the input clamped to [0, 1]
    #[test]
    fn set_volume_clamps(
        v in prop_oneof![-1.0e6f64..1.0e6, Just(f64::INFINITY), Just(f64::NEG_INFINITY)]
    ) {
        let mut engine: PlaybackEngine = PlaybackEngine::default();
        engine.set_volume(v);

        prop_assert_eq!(engine.get_volume(), v.clamp(0.0, 1.0));
    }

    /// Property: gain is monotonic in volume and bounded by unity
    #[test]
    fn effective_gain_is_monotonic(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let gain_low = Volume::gain_for_level(low);
        let gain_high = Volume::gain_for_level(high);

        prop_assert!(gain_low <= gain_high);
        prop_assert!((0.0..=1.0).contains(&gain_high));
    }

    /// Property: seeking always lands inside [0, duration]
    #[test]
    fn seek_stays_within_track(track in arbitrary_track(), time in arbitrary_time()) {
        let mut engine: PlaybackEngine = PlaybackEngine::default();
        engine.load(track);
        engine.seek(time);

        prop_assert!(engine.current_time() >= 0.0);
        prop_assert!(engine.current_time() <= engine.duration());
    }

    /// Property: a non-empty queue always selects the clamped start index
    #[test]
    fn set_queue_selects_clamped_index(tracks in arbitrary_tracks(), start in 0usize..50) {
        let mut engine: PlaybackEngine = PlaybackEngine::default();
        engine.set_queue(tracks.clone(), start);

        if tracks.is_empty() {
            prop_assert_eq!(engine.current_index(), None);
        } else {
            let expected = start.min(tracks.len() - 1);
            prop_assert_eq!(engine.current_index(), Some(expected));
            prop_assert_eq!(engine.get_current_track(), Some(&tracks[expected]));
        }
    }

    /// Property: repeat-one track end never moves the queue
    #[test]
    fn repeat_one_never_moves(tracks in arbitrary_tracks(), start in 0usize..20, playing: bool) {
        let mut engine: PlaybackEngine = PlaybackEngine::default();
        engine.set_queue(tracks, start);
        engine.set_repeat(RepeatMode::One);
        if playing {
            engine.resume();
        }
        let index = engine.current_index();
        let was_playing = engine.is_playing();

        engine.update_time(12.0);
        engine.handle_track_end();

        prop_assert_eq!(engine.current_index(), index);
        prop_assert_eq!(engine.current_time(), 0.0);
        prop_assert_eq!(engine.is_playing(), was_playing);
    }

    /// Property: queue and transport invariants hold after any command sequence
    #[test]
    fn invariants_hold_under_random_commands(
        commands in prop::collection::vec(arbitrary_command(), 1..60)
    ) {
        let mut engine: PlaybackEngine = PlaybackEngine::default();

        for command in commands {
            engine.execute(command);

            // Position is None iff the queue is empty, otherwise in bounds
            match engine.current_index() {
                None => prop_assert_eq!(engine.queue_len(), 0),
                Some(i) => prop_assert!(i < engine.queue_len()),
            }

            // Navigation flags agree with the position
            let len = engine.queue_len();
            let expected_next = engine.current_index().is_some_and(|i| i + 1 < len);
            let expected_previous = engine.current_index().is_some_and(|i| i > 0);
            prop_assert_eq!(engine.can_go_next(), expected_next);
            prop_assert_eq!(engine.can_go_previous(), expected_previous);

            // Time and volume stay in range
            prop_assert!(engine.current_time().is_finite());
            prop_assert!(engine.current_time() >= 0.0);
            prop_assert!((0.0..=1.0).contains(&engine.get_volume()));
            prop_assert!(engine.progress_percent().is_finite());

            // Playing implies something is loaded
            if engine.is_playing() {
                prop_assert!(engine.get_current_track().is_some());
            }
        }
    }
}
