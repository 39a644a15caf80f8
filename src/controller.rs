use crate::config::SlideshowConfig;
use crate::error::Error;
use crate::index::RenderPlan;
use crate::Dom;

///
/// A slideshow instance: owns its slide index and the DOM it renders into.
///
/// Several instances can share one page as long as their configs
/// select different elements.
///
pub struct Slideshow<D: Dom> {
    dom: D,
    config: SlideshowConfig,

    /// 1-based, normalized as of the last successful render.
    index: usize,
}

impl<D: Dom> Slideshow<D> {
    /// Create a slideshow without rendering anything yet.
    pub fn new(dom: D, config: SlideshowConfig) -> Self {
        Self {
            dom,
            config,
            index: 1,
        }
    }

    /// Create a slideshow and show its first slide.
    pub fn mount(dom: D, config: SlideshowConfig) -> Result<Self, Error> {
        let mut slideshow = Self::new(dom, config);
        slideshow.initialize()?;
        Ok(slideshow)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn config(&self) -> &SlideshowConfig {
        &self.config
    }

    pub fn initialize(&mut self) -> Result<RenderPlan, Error> {
        self.index = 1;
        self.render_raw(1)
    }

    /// Move `delta` slides forward (or backward when negative).
    pub fn advance(&mut self, delta: i64) -> Result<RenderPlan, Error> {
        self.render_raw((self.index as i64).saturating_add(delta))
    }

    pub fn next(&mut self) -> Result<RenderPlan, Error> {
        self.advance(1)
    }

    pub fn previous(&mut self) -> Result<RenderPlan, Error> {
        self.advance(-1)
    }

    /// Show the slide at the 1-based `index`.
    pub fn jump_to(&mut self, index: i64) -> Result<RenderPlan, Error> {
        self.render_raw(index)
    }

    /// Re-apply the current index to the DOM.
    pub fn render(&mut self) -> Result<RenderPlan, Error> {
        self.render_raw(self.index as i64)
    }

    fn render_raw(&mut self, raw: i64) -> Result<RenderPlan, Error> {
        let slides = self.dom.slides(&self.config)?;
        let indicators = self.dom.indicators(&self.config)?;

        let plan = RenderPlan::compute(raw, slides.len(), indicators.len(), self.config.overshoot)?;

        if slides.len() != indicators.len() {
            tracing::warn!(
                slides = slides.len(),
                indicators = indicators.len(),
                "slide and indicator counts differ"
            );
        }

        self.apply(&plan, &slides, &indicators)?;
        self.index = plan.index;

        tracing::debug!(raw, index = plan.index, "rendered slide");

        Ok(plan)
    }

    fn apply(
        &self,
        plan: &RenderPlan,
        slides: &[D::Element],
        indicators: &[D::Element],
    ) -> Result<(), Error> {
        for slide in slides {
            self.dom.set_shown(slide, false, &self.config)?;
        }
        for indicator in indicators {
            self.dom.set_active(indicator, false, &self.config)?;
        }

        self.dom.set_shown(&slides[plan.visible], true, &self.config)?;

        if let Some(active) = plan.active {
            self.dom.set_active(&indicators[active], true, &self.config)?;
        } else {
            tracing::warn!(index = plan.index, "no indicator for slide");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::OvershootPolicy;

    use std::cell::RefCell;

    /// In-memory collections: `true` means shown / active.
    struct FakeDom {
        slides: RefCell<Vec<bool>>,
        indicators: RefCell<Vec<bool>>,
    }

    impl FakeDom {
        fn new(n_slides: usize, n_indicators: usize) -> Self {
            Self {
                slides: RefCell::new(vec![true; n_slides]),
                indicators: RefCell::new(vec![true; n_indicators]),
            }
        }

        fn shown(&self) -> Vec<usize> {
            positions(&self.slides.borrow())
        }

        fn active(&self) -> Vec<usize> {
            positions(&self.indicators.borrow())
        }
    }

    fn positions(flags: &[bool]) -> Vec<usize> {
        flags
            .iter()
            .enumerate()
            .filter(|(_, flag)| **flag)
            .map(|(i, _)| i)
            .collect()
    }

    impl Dom for FakeDom {
        type Element = usize;

        fn slides(&self, _: &SlideshowConfig) -> Result<Vec<usize>, Error> {
            Ok((0..self.slides.borrow().len()).collect())
        }

        fn indicators(&self, _: &SlideshowConfig) -> Result<Vec<usize>, Error> {
            Ok((0..self.indicators.borrow().len()).collect())
        }

        fn set_shown(&self, element: &usize, shown: bool, _: &SlideshowConfig) -> Result<(), Error> {
            self.slides.borrow_mut()[*element] = shown;
            Ok(())
        }

        fn set_active(&self, element: &usize, active: bool, _: &SlideshowConfig) -> Result<(), Error> {
            self.indicators.borrow_mut()[*element] = active;
            Ok(())
        }
    }

    fn mounted(n: usize) -> Slideshow<FakeDom> {
        Slideshow::mount(FakeDom::new(n, n), SlideshowConfig::default()).unwrap()
    }

    fn assert_at(slideshow: &Slideshow<FakeDom>, index: usize) {
        assert_eq!(slideshow.index(), index);
        assert_eq!(slideshow.dom().shown(), vec![index - 1]);
        assert_eq!(slideshow.dom().active(), vec![index - 1]);
    }

    #[test]
    fn three_slide_walkthrough() {
        let mut slideshow = mounted(3);
        assert_at(&slideshow, 1);

        slideshow.advance(1).unwrap();
        assert_at(&slideshow, 2);

        slideshow.advance(1).unwrap();
        assert_at(&slideshow, 3);

        slideshow.advance(1).unwrap();
        assert_at(&slideshow, 1);

        slideshow.jump_to(2).unwrap();
        assert_at(&slideshow, 2);

        slideshow.jump_to(10).unwrap();
        assert_at(&slideshow, 1);
    }

    #[test]
    fn previous_from_first_goes_to_last() {
        let mut slideshow = mounted(4);

        slideshow.previous().unwrap();
        assert_at(&slideshow, 4);

        slideshow.next().unwrap();
        assert_at(&slideshow, 1);
    }

    #[test]
    fn jump_clamps_to_boundaries() {
        let mut slideshow = mounted(5);

        for k in 1..=5 {
            slideshow.jump_to(k).unwrap();
            assert_at(&slideshow, k as usize);
        }

        slideshow.jump_to(5 + 5).unwrap();
        assert_at(&slideshow, 1);

        slideshow.jump_to(-3).unwrap();
        assert_at(&slideshow, 5);
    }

    #[test]
    fn large_advance_resets_instead_of_cycling() {
        let mut slideshow = mounted(3);
        slideshow.jump_to(2).unwrap();

        slideshow.advance(3 + 2).unwrap();
        assert_at(&slideshow, 1);

        slideshow.jump_to(2).unwrap();
        slideshow.advance(-7).unwrap();
        assert_at(&slideshow, 3);

        slideshow.advance(i64::MAX).unwrap();
        assert_at(&slideshow, 1);
    }

    #[test]
    fn wrap_policy_cycles() {
        let config = SlideshowConfig::default().with_overshoot(OvershootPolicy::Wrap);
        let mut slideshow = Slideshow::mount(FakeDom::new(3, 3), config).unwrap();
        slideshow.jump_to(2).unwrap();

        slideshow.advance(3 + 2).unwrap();
        assert_at(&slideshow, 1);

        slideshow.advance(-4).unwrap();
        assert_at(&slideshow, 3);
    }

    #[test]
    fn render_is_idempotent() {
        let mut slideshow = mounted(3);
        slideshow.jump_to(3).unwrap();

        let first = slideshow.render().unwrap();
        let second = slideshow.render().unwrap();

        assert_eq!(first, second);
        assert_at(&slideshow, 3);
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod properties {
        use super::*;

        use proptest::prelude::*;

        fn move_strategy() -> impl Strategy<Value = (bool, i64)> {
            (any::<bool>(), prop_oneof![4 => -25i64..25, 1 => any::<i64>()])
        }

        proptest! {
            #[test]
            fn exactly_one_shown_after_any_sequence(
                n in 1usize..=10,
                moves in proptest::collection::vec(move_strategy(), 0..40),
            ) {
                let mut slideshow = mounted(n);

                for (is_advance, value) in moves {
                    let raw = if is_advance {
                        (slideshow.index() as i64).saturating_add(value)
                    } else {
                        value
                    };
                    let expected = if raw > n as i64 {
                        1
                    } else if raw < 1 {
                        n
                    } else {
                        raw as usize
                    };

                    if is_advance {
                        slideshow.advance(value).unwrap();
                    } else {
                        slideshow.jump_to(value).unwrap();
                    }

                    let index = slideshow.index();
                    prop_assert_eq!(index, expected);
                    prop_assert_eq!(slideshow.dom().shown(), vec![index - 1]);
                    prop_assert_eq!(slideshow.dom().active(), vec![index - 1]);
                }
            }

            #[test]
            fn wrap_policy_stays_in_range(
                n in 1usize..=10,
                moves in proptest::collection::vec(move_strategy(), 0..40),
            ) {
                let config = SlideshowConfig::default().with_overshoot(OvershootPolicy::Wrap);
                let mut slideshow = Slideshow::mount(FakeDom::new(n, n), config).unwrap();

                for (is_advance, value) in moves {
                    if is_advance {
                        slideshow.advance(value).unwrap();
                    } else {
                        slideshow.jump_to(value).unwrap();
                    }

                    let index = slideshow.index();
                    prop_assert!((1..=n).contains(&index));
                    prop_assert_eq!(slideshow.dom().shown(), vec![index - 1]);
                    prop_assert_eq!(slideshow.dom().active(), vec![index - 1]);
                }
            }
        }
    }

    #[test]
    fn empty_slides_is_an_error() {
        let result = Slideshow::mount(FakeDom::new(0, 0), SlideshowConfig::default());
        assert_eq!(result.err(), Some(Error::NoSlides));
    }

    #[test]
    fn failed_render_keeps_index() {
        let mut slideshow = mounted(3);
        slideshow.jump_to(2).unwrap();

        slideshow.dom.slides.borrow_mut().clear();
        assert_eq!(slideshow.next(), Err(Error::NoSlides));
        assert_eq!(slideshow.index(), 2);
    }

    #[test]
    fn collections_are_read_fresh() {
        let mut slideshow = mounted(3);
        slideshow.jump_to(3).unwrap();

        slideshow.dom.slides.borrow_mut().truncate(2);
        slideshow.dom.indicators.borrow_mut().truncate(2);

        slideshow.render().unwrap();
        assert_at(&slideshow, 1);
    }

    #[test]
    fn missing_indicator_still_shows_slide() {
        let mut slideshow = Slideshow::mount(FakeDom::new(3, 2), SlideshowConfig::default()).unwrap();

        slideshow.jump_to(3).unwrap();

        assert_eq!(slideshow.dom().shown(), vec![2]);
        assert!(slideshow.dom().active().is_empty());
    }
}
