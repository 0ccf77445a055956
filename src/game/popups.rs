/// A "+N" label floating over the graph where an answer was clicked.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatingScore {
	pub id: u64,
	pub value: u32,
	/// Misses get the consolation tint.
	pub correct: bool,
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FloatingScores {
	next_id: u64,
	items: Vec<FloatingScore>,
}

impl FloatingScores {
	pub fn push(&mut self, value: u32, correct: bool, x: f64, y: f64) -> u64 {
		let id = self.next_id;
		self.next_id += 1;
		self.items.push(FloatingScore {
			id,
			value,
			correct,
			x,
			y,
		});
		id
	}

	pub fn remove(&mut self, id: u64) {
		self.items.retain(|s| s.id != id);
	}

	pub fn items(&self) -> &[FloatingScore] {
		&self.items
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ids_stay_unique_after_removal() {
		let mut scores = FloatingScores::default();
		let a = scores.push(100, true, 10.0, 20.0);
		let b = scores.push(10, false, 30.0, 40.0);
		scores.remove(a);
		let c = scores.push(100, true, 0.0, 0.0);

		assert_ne!(a, c);
		assert_ne!(b, c);
		let ids: Vec<_> = scores.items().iter().map(|s| s.id).collect();
		assert_eq!(ids, [b, c]);
	}

	#[test]
	fn keeps_outcome_for_tinting() {
		let mut scores = FloatingScores::default();
		scores.push(100, true, 0.0, 0.0);
		scores.push(10, false, 0.0, 0.0);
		let outcomes: Vec<_> = scores.items().iter().map(|s| (s.value, s.correct)).collect();
		assert_eq!(outcomes, [(100, true), (10, false)]);
	}

	#[test]
	fn removing_unknown_id_is_a_no_op() {
		let mut scores = FloatingScores::default();
		scores.push(100, true, 1.0, 2.0);
		scores.remove(42);
		assert_eq!(scores.items().len(), 1);
		assert_eq!(scores.items()[0].value, 100);
	}
}
