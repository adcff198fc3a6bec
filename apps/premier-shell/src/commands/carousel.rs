//! # Testimonial Slider Commands
//!
//! Arrows, dot navigation, autoplay and the voice clip button. Any manual
//! move restarts the autoplay countdown from zero.

use premier_core::page::TestimonialsView;
use tracing::debug;

use crate::state::PageState;

fn testimonials_view(state: &PageState) -> TestimonialsView {
    state.with_page(|p| p.view().testimonials)
}

pub fn next_testimonial(state: &PageState) -> TestimonialsView {
    debug!("next_testimonial command");
    state.with_page_mut(|p| p.testimonials_mut().next());
    testimonials_view(state)
}

pub fn prev_testimonial(state: &PageState) -> TestimonialsView {
    debug!("prev_testimonial command");
    state.with_page_mut(|p| p.testimonials_mut().prev());
    testimonials_view(state)
}

/// Dot navigation. An out-of-range index leaves the slider where it is.
pub fn go_to_testimonial(state: &PageState, index: usize) -> TestimonialsView {
    debug!(index, "go_to_testimonial command");
    state.with_page_mut(|p| p.testimonials_mut().go_to(index));
    testimonials_view(state)
}

pub fn set_testimonial_autoplay(state: &PageState, enabled: bool) -> TestimonialsView {
    debug!(enabled, "set_testimonial_autoplay command");
    state.with_page_mut(|p| p.testimonials_mut().set_autoplay(enabled));
    testimonials_view(state)
}

/// Play/pause of the current card's voice clip. Leaves autoplay alone.
pub fn toggle_testimonial_audio(state: &PageState) -> TestimonialsView {
    debug!("toggle_testimonial_audio command");
    state.with_page_mut(|p| p.toggle_testimonial_audio());
    testimonials_view(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_state;

    #[test]
    fn test_arrows_wrap() {
        let state = test_state();
        let count = testimonials_view(&state).count;

        let view = prev_testimonial(&state);
        assert_eq!(view.index, count - 1);
        let view = next_testimonial(&state);
        assert_eq!(view.index, 0);
    }

    #[test]
    fn test_dot_navigation_ignores_out_of_range() {
        let state = test_state();
        assert_eq!(go_to_testimonial(&state, 2).index, 2);
        assert_eq!(go_to_testimonial(&state, 99).index, 2);
    }

    #[test]
    fn test_pause_and_resume() {
        let state = test_state();
        assert!(testimonials_view(&state).autoplay);
        assert!(!set_testimonial_autoplay(&state, false).autoplay);
        assert!(set_testimonial_autoplay(&state, true).autoplay);
    }

    #[test]
    fn test_audio_toggle_leaves_autoplay_running() {
        let state = test_state();
        let view = toggle_testimonial_audio(&state);
        assert!(view.playing);
        assert!(view.autoplay);
        assert!(view.current.audio_url.ends_with(".mp3"));

        let view = toggle_testimonial_audio(&state);
        assert!(!view.playing);
        assert!(view.autoplay);
    }
}
