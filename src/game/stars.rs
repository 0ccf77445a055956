const MIN_STARS: usize = 30;
const STAR_SPREAD: f64 = 70.0;

/// One twinkling star of the page backdrop, positioned in percent of the viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
	pub top: f64,
	pub left: f64,
	pub duration_s: f64,
}

impl Star {
	/// Scatter 30..=99 stars using `rand`, which must yield values in `[0, 1)`.
	pub fn scatter(mut rand: impl FnMut() -> f64) -> Vec<Star> {
		let count = MIN_STARS + (rand() * STAR_SPREAD).floor() as usize;
		(0..count)
			.map(|_| Star {
				top: rand() * 97.0 + 2.0,
				left: rand() * 97.0 + 2.0,
				duration_s: 1.5 + rand() * 2.0,
			})
			.collect()
	}

	pub fn style(&self) -> String {
		format!(
			"top: {:.2}%; left: {:.2}%; animation-duration: {:.2}s;",
			self.top, self.left, self.duration_s
		)
	}
}
