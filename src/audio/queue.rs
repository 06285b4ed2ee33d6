//! Helpers for the playback order and position arithmetic.
//!
//! The audio thread keeps an `order` of track indices (identity or shuffled)
//! and a position within it. These helpers keep the wrap/stop decisions and
//! the seek clamping testable outside the thread.

use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;

/// Build the playback order for `len` tracks: the identity order, or a
/// shuffled permutation of it.
pub(crate) fn build_order<R: Rng + ?Sized>(len: usize, shuffle: bool, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    if shuffle {
        order.shuffle(rng);
    }
    order
}

/// The playing track's position inside a (re)built order, so reshuffling
/// keeps `order_pos` pointing at what is actually playing.
pub(crate) fn remap_pos(order: &[usize], index: Option<usize>) -> Option<usize> {
    index.and_then(|i| order.iter().position(|&x| x == i))
}

/// Position in the order after a manual "next": wraps around, matching the
/// original player's behavior. Returns `None` for an empty order.
pub(crate) fn next_pos(order_len: usize, pos: usize) -> Option<usize> {
    if order_len == 0 {
        return None;
    }
    Some((pos + 1) % order_len)
}

/// Position after a track drains on its own. A multi-track playlist wraps;
/// a single loaded file ends playback instead of looping forever.
pub(crate) fn auto_advance_pos(order_len: usize, pos: usize) -> Option<usize> {
    if order_len <= 1 {
        return None;
    }
    Some((pos + 1) % order_len)
}

/// Clamp a seek target to `[0, duration]`.
///
/// The upper bound backs off one second from the end when the duration is
/// known, so the rebuilt decoder still has samples to produce (seeking to the
/// exact end would drain the sink immediately and trigger auto-advance).
pub(crate) fn clamp_seek(target: Duration, total: Option<Duration>) -> Duration {
    match total {
        Some(total) => target.min(total.saturating_sub(Duration::from_secs(1))),
        None => target,
    }
}

/// Apply a signed second offset to an elapsed position, saturating at zero.
pub(crate) fn offset_position(elapsed: Duration, secs: i64) -> Duration {
    if secs >= 0 {
        elapsed.saturating_add(Duration::from_secs(secs as u64))
    } else {
        elapsed.saturating_sub(Duration::from_secs(secs.unsigned_abs()))
    }
}
