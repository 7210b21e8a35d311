// State behind the proposal card: the runaway "No" button and the accept sequence.

use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

/// After this many declines the button is gone for good.
pub const MAX_DECLINES: u32 = 5;
/// How far outside the card the button may land.
pub const ANCHOR_PADDING: f32 = 100.0;
/// Footprint reserved for the button when picking a spot.
pub const DECLINE_BUTTON_SIZE: Vec2 = Vec2::new(150.0, 60.0);

pub const CELEBRATION: Duration = Duration::from_millis(2000);
pub const PHOTO_EXIT: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclineButton {
    pub click_count: u32,
    /// Top-left corner in logical window pixels. Only used once clicked.
    pub position: Vec2,
}

impl DeclineButton {
    pub fn exhausted(&self) -> bool {
        self.click_count >= MAX_DECLINES
    }

    /// Count a decline and jump somewhere near `anchor`. Without an anchor
    /// nothing changes, not even the count.
    pub fn register(&mut self, anchor: Option<Rect>, viewport: Vec2, rng: &mut impl Rng) -> bool {
        if self.exhausted() {
            return false;
        }
        let Some(anchor) = anchor else {
            debug!("proposal card not laid out yet, ignoring decline");
            return false;
        };

        let (min, max) = repulsion_bounds(anchor, viewport);
        self.position = Vec2::new(
            min.x + rng.random::<f32>() * (max.x - min.x),
            min.y + rng.random::<f32>() * (max.y - min.y),
        );
        self.click_count += 1;
        true
    }

    pub fn accept_scale(&self) -> f32 {
        1.0 + self.click_count as f32 * 0.15
    }

    pub fn decline_scale(&self) -> f32 {
        (1.0 - self.click_count as f32 * 0.12).max(0.5)
    }

    pub fn decline_alpha(&self) -> f32 {
        if self.click_count == MAX_DECLINES - 1 {
            0.4
        } else {
            1.0
        }
    }
}

/// Corners of the region the button may be placed in. On a window too small
/// for the padded card `max` can end up below `min`; sampling between them
/// still lands in between.
pub fn repulsion_bounds(anchor: Rect, viewport: Vec2) -> (Vec2, Vec2) {
    let min = (anchor.min - ANCHOR_PADDING).max(Vec2::ZERO);
    let max = (viewport - DECLINE_BUTTON_SIZE)
        .min(anchor.max + ANCHOR_PADDING - DECLINE_BUTTON_SIZE);
    (min, max)
}

/// Progress of the "Yes" sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AcceptPhase {
    #[default]
    Idle,
    /// Confetti is falling.
    Celebrating,
    /// Photos fade out before the game starts.
    PhotosExiting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    fn card() -> Rect {
        Rect::new(340.0, 160.0, 940.0, 560.0)
    }

    #[test]
    fn bounds_pad_the_card_and_stay_on_screen() {
        let (min, max) = repulsion_bounds(card(), VIEWPORT);
        assert_eq!(min, Vec2::new(240.0, 60.0));
        assert_eq!(max, Vec2::new(890.0, 600.0));

        let corner = Rect::new(0.0, 0.0, 1280.0, 720.0);
        let (min, max) = repulsion_bounds(corner, VIEWPORT);
        assert_eq!(min, Vec2::ZERO);
        assert_eq!(max, VIEWPORT - DECLINE_BUTTON_SIZE);
    }

    #[test]
    fn decline_moves_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut button = DeclineButton::default();
        let (min, max) = repulsion_bounds(card(), VIEWPORT);

        for expected in 1..=MAX_DECLINES {
            assert!(button.register(Some(card()), VIEWPORT, &mut rng));
            assert_eq!(button.click_count, expected);
            assert!(button.position.cmpge(min).all(), "{:?}", button.position);
            assert!(button.position.cmple(max).all(), "{:?}", button.position);
        }
    }

    #[test]
    fn sixth_decline_is_ignored() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut button = DeclineButton::default();
        for _ in 0..MAX_DECLINES {
            button.register(Some(card()), VIEWPORT, &mut rng);
        }
        let settled = button.clone();

        assert!(!button.register(Some(card()), VIEWPORT, &mut rng));
        assert_eq!(button, settled);
        assert!(button.exhausted());
    }

    #[test]
    fn missing_anchor_changes_nothing() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut button = DeclineButton::default();
        assert!(!button.register(None, VIEWPORT, &mut rng));
        assert_eq!(button, DeclineButton::default());
    }

    #[test]
    fn buttons_rescale_with_declines() {
        let mut button = DeclineButton::default();
        assert_eq!(button.accept_scale(), 1.0);
        assert_eq!(button.decline_scale(), 1.0);

        button.click_count = 4;
        assert!((button.accept_scale() - 1.6).abs() < 1e-6);
        assert!((button.decline_scale() - 0.52).abs() < 1e-6);
        assert_eq!(button.decline_alpha(), 0.4);

        button.click_count = 5;
        assert_eq!(button.decline_scale(), 0.5);
        assert_eq!(button.decline_alpha(), 1.0);
    }
}
