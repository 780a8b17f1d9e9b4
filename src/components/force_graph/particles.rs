//! Directional particles that travel along highlighted links.
//!
//! Particles are not simulated; their position is a pure function of the
//! link geometry and the animation clock, so nothing needs resetting when
//! the highlight changes.

use super::theme::ParticleStyle;

/// Positions of the particles on the segment `(x1, y1) -> (x2, y2)` at time
/// `time` (seconds). Particles are evenly spaced and move from source to
/// target, wrapping at the end.
pub fn particle_positions(
	style: &ParticleStyle,
	(x1, y1): (f64, f64),
	(x2, y2): (f64, f64),
	time: f64,
) -> impl Iterator<Item = (f64, f64)> {
	let count = style.count.max(1);
	let phase = (time * style.speed).rem_euclid(1.0);
	(0..style.count).map(move |i| {
		let t = (phase + i as f64 / count as f64).rem_euclid(1.0);
		(x1 + (x2 - x1) * t, y1 + (y2 - y1) * t)
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn style(count: usize) -> ParticleStyle {
		ParticleStyle {
			count,
			speed: 0.5,
			radius: 2.0,
		}
	}

	#[test]
	fn evenly_spaced_at_time_zero() {
		let points: Vec<_> = particle_positions(&style(4), (0.0, 0.0), (8.0, 0.0), 0.0).collect();
		assert_eq!(points, vec![(0.0, 0.0), (2.0, 0.0), (4.0, 0.0), (6.0, 0.0)]);
	}

	#[test]
	fn particles_advance_towards_target_and_wrap() {
		// speed 0.5 -> a quarter of the link after half a second
		let points: Vec<_> = particle_positions(&style(2), (0.0, 0.0), (0.0, 8.0), 0.5).collect();
		assert_eq!(points, vec![(0.0, 2.0), (0.0, 6.0)]);

		let wrapped: Vec<_> = particle_positions(&style(1), (0.0, 0.0), (8.0, 0.0), 2.5).collect();
		assert_eq!(wrapped, vec![(2.0, 0.0)]);
	}

	#[test]
	fn zero_count_yields_nothing() {
		assert_eq!(particle_positions(&style(0), (0.0, 0.0), (1.0, 1.0), 1.0).count(), 0);
	}
}
