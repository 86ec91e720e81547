//! Linear year -> pixel mapping shared by the graph and timeline canvases.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YearScale {
	min_year: i32,
	max_year: i32,
	start: f64,
	end: f64,
}

impl YearScale {
	/// Maps `[min_year, max_year]` onto `[start, end]`. A single-year domain
	/// is widened by one year on each side.
	pub fn new((min_year, max_year): (i32, i32), (start, end): (f64, f64)) -> Self {
		let (min_year, max_year) = if min_year < max_year {
			(min_year, max_year)
		} else {
			(
				min_year.min(max_year).saturating_sub(1),
				min_year.max(max_year).saturating_add(1),
			)
		};
		Self {
			min_year,
			max_year,
			start,
			end,
		}
	}

	/// Scale spanning `width` with `margin` pixels kept clear at both ends.
	pub fn with_margin(years: (i32, i32), width: f64, margin: f64) -> Self {
		let margin = margin.min(width / 2.0);
		Self::new(years, (margin, width - margin))
	}

	pub fn x(&self, year: f64) -> f64 {
		let t = (year - self.min_year as f64) / (self.max_year as f64 - self.min_year as f64);
		self.start + t * (self.end - self.start)
	}

	/// Multiples of `step` inside the domain.
	pub fn ticks(&self, step: i32) -> Vec<i32> {
		let step = i64::from(step.max(1));
		let (min, max) = (i64::from(self.min_year), i64::from(self.max_year));
		let first = min + (step - min.rem_euclid(step)) % step;
		(first..=max).step_by(step as usize).map(|y| y as i32).collect()
	}

	pub fn domain(&self) -> (i32, i32) {
		(self.min_year, self.max_year)
	}
}
