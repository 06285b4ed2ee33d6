use std::time::Duration;

use super::player::AudioPlayer;
use super::queue::{auto_advance_pos, build_order, clamp_seek, next_pos, offset_position, remap_pos};

#[test]
fn startup_fails_before_the_ui_when_no_output_device() {
    let result = AudioPlayer::with_output(Vec::new(), || Err(rodio::StreamError::NoDevice));
    let err = result.err().expect("missing output device must fail startup");
    assert!(err.to_string().contains("audio output device"), "{err}");
}

#[test]
fn build_order_without_shuffle_is_identity() {
    assert_eq!(build_order(4, false, &mut rand::rng()), vec![0, 1, 2, 3]);
    assert!(build_order(0, false, &mut rand::rng()).is_empty());
}

#[test]
fn build_order_with_shuffle_is_a_permutation() {
    let order = build_order(32, true, &mut rand::rng());
    let mut sorted = order.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..32).collect::<Vec<usize>>());
}

#[test]
fn remap_pos_follows_the_playing_track_across_a_reshuffle() {
    let order = vec![3, 1, 0, 2];
    assert_eq!(remap_pos(&order, Some(0)), Some(2));
    assert_eq!(remap_pos(&order, Some(3)), Some(0));
    assert_eq!(remap_pos(&order, Some(9)), None);
    assert_eq!(remap_pos(&order, None), None);
}

#[test]
fn next_pos_wraps_around() {
    assert_eq!(next_pos(3, 0), Some(1));
    assert_eq!(next_pos(3, 2), Some(0));
    assert_eq!(next_pos(1, 0), Some(0));
    assert_eq!(next_pos(0, 0), None);
}

#[test]
fn auto_advance_wraps_only_multi_track_playlists() {
    assert_eq!(auto_advance_pos(3, 2), Some(0));
    assert_eq!(auto_advance_pos(3, 0), Some(1));
    // A single loaded file ends playback instead of looping.
    assert_eq!(auto_advance_pos(1, 0), None);
    assert_eq!(auto_advance_pos(0, 0), None);
}

#[test]
fn clamp_seek_clamps_to_just_before_the_end() {
    let total = Some(Duration::from_secs(100));
    assert_eq!(
        clamp_seek(Duration::from_secs(50), total),
        Duration::from_secs(50)
    );
    assert_eq!(
        clamp_seek(Duration::from_secs(100), total),
        Duration::from_secs(99)
    );
    assert_eq!(
        clamp_seek(Duration::from_secs(500), total),
        Duration::from_secs(99)
    );
}

#[test]
fn clamp_seek_without_known_duration_passes_through() {
    assert_eq!(
        clamp_seek(Duration::from_secs(500), None),
        Duration::from_secs(500)
    );
}

#[test]
fn offset_position_saturates_at_zero() {
    assert_eq!(
        offset_position(Duration::from_secs(3), -5),
        Duration::ZERO
    );
    assert_eq!(
        offset_position(Duration::from_secs(10), -5),
        Duration::from_secs(5)
    );
    assert_eq!(
        offset_position(Duration::from_secs(10), 5),
        Duration::from_secs(15)
    );
}

#[test]
fn seek_forward_then_clamp_stays_in_bounds() {
    // Seeking forward near the end clamps rather than overflowing.
    let total = Some(Duration::from_secs(30));
    let target = offset_position(Duration::from_secs(28), 5);
    assert_eq!(clamp_seek(target, total), Duration::from_secs(29));
}
