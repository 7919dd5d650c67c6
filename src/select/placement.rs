/// Side of the control the dropdown opens on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Placement {
	#[default]
	Below,
	Above,
}

impl Placement {
	/// Open downward unless there is too little room below and enough above.
	#[must_use]
	pub fn choose(space_above: u16, space_below: u16, min_space: u16) -> Self {
		if space_below < min_space && space_above > min_space {
			Self::Above
		} else {
			Self::Below
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn prefers_below() {
		assert_eq!(Placement::choose(30, 30, 8), Placement::Below);
		assert_eq!(Placement::choose(2, 3, 8), Placement::Below);
	}

	#[test]
	fn flips_above_only_when_above_has_room() {
		assert_eq!(Placement::choose(20, 4, 8), Placement::Above);
		assert_eq!(Placement::choose(8, 4, 8), Placement::Below);
	}
}
