use crate::index::OvershootPolicy;

///
/// Names and values the slideshow uses to find and mutate its elements.
///
/// The defaults match the classic markup:
///
/// ```html
/// <div class="mySlides">...</div>
/// <a class="prev" onclick="plusSlides(-1)">&#10094;</a>
/// <a class="next" onclick="plusSlides(1)">&#10095;</a>
/// <span class="dot" onclick="currentSlide(1)"></span>
/// ```
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideshowConfig {
    pub slide_class: String,
    pub indicator_class: String,
    pub active_class: String,
    pub prev_class: String,
    pub next_class: String,

    /// `display` value of the visible slide.
    pub shown_display: String,
    /// `display` value of every other slide.
    pub hidden_display: String,

    pub overshoot: OvershootPolicy,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            slide_class: "mySlides".to_string(),
            indicator_class: "dot".to_string(),
            active_class: "active".to_string(),
            prev_class: "prev".to_string(),
            next_class: "next".to_string(),
            shown_display: "block".to_string(),
            hidden_display: "none".to_string(),
            overshoot: OvershootPolicy::Reset,
        }
    }
}

impl SlideshowConfig {
    pub fn with_classes(slide_class: &str, indicator_class: &str) -> Self {
        Self {
            slide_class: slide_class.to_string(),
            indicator_class: indicator_class.to_string(),
            ..Self::default()
        }
    }

    pub fn with_overshoot(mut self, overshoot: OvershootPolicy) -> Self {
        self.overshoot = overshoot;
        self
    }

    pub fn display_value(&self, shown: bool) -> &str {
        if shown {
            &self.shown_display
        } else {
            &self.hidden_display
        }
    }
}
