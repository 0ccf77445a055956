pub const CORRECT_POINTS: u32 = 100;
pub const CONSOLATION_POINTS: u32 = 10;
pub const FUEL_CAPACITY: u32 = 100;
pub const FUEL_PER_MISS: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShipState {
	pub score: u32,
	pub fuel: u32,
	pub answered: u32,
	pub correct: u32,
}

impl Default for ShipState {
	fn default() -> Self {
		Self {
			score: 0,
			fuel: FUEL_CAPACITY,
			answered: 0,
			correct: 0,
		}
	}
}

impl ShipState {
	/// Record an answer and return the points it earned.
	pub fn apply_answer(&mut self, correct: bool) -> u32 {
		self.answered += 1;
		let points = if correct {
			self.correct += 1;
			CORRECT_POINTS
		} else {
			self.fuel = self.fuel.saturating_sub(FUEL_PER_MISS);
			CONSOLATION_POINTS
		};
		self.score += points;
		points
	}

	pub fn out_of_fuel(&self) -> bool {
		self.fuel == 0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn correct_answer_scores_full_points() {
		let mut ship = ShipState::default();
		assert_eq!(ship.apply_answer(true), 100);
		assert_eq!(ship.score, 100);
		assert_eq!(ship.fuel, 100);
		assert_eq!((ship.answered, ship.correct), (1, 1));
	}

	#[test]
	fn miss_costs_fuel_and_scores_consolation() {
		let mut ship = ShipState::default();
		ship.apply_answer(true);
		assert_eq!(ship.apply_answer(false), 10);
		assert_eq!(ship.score, 110);
		assert_eq!(ship.fuel, 90);
		assert_eq!((ship.answered, ship.correct), (2, 1));
	}

	#[test]
	fn fuel_never_underflows() {
		let mut ship = ShipState::default();
		for _ in 0..12 {
			ship.apply_answer(false);
		}
		assert_eq!(ship.fuel, 0);
		assert!(ship.out_of_fuel());
		assert_eq!(ship.score, 120);
	}
}
