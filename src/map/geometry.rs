use geo::Coord;

/// Sample count for transmission arcs; dates are interpolated over the
/// same count, so the two stay index-aligned.
pub(crate) const BEZIER_SAMPLES: usize = 15;

/// Quadratic Bezier polyline between two layer points, bowed perpendicular
/// to the chord. `extend` is the fan-out rank of repeated arcs between the
/// same location pair; higher ranks bow further so overlapping arcs stay
/// distinguishable.
pub fn bezier(origin: Coord<f64>, destination: Coord<f64>, extend: u32) -> Vec<Coord<f64>> {
    let dx = destination.x - origin.x;
    let dy = destination.y - origin.y;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist == 0.0 {
        return vec![origin; BEZIER_SAMPLES];
    }

    let mid = Coord { x: (origin.x + destination.x) / 2.0, y: (origin.y + destination.y) / 2.0 };
    let lift = dist * 0.15 * (1.0 + 0.4 * extend.saturating_sub(1) as f64);
    let control = Coord { x: mid.x - dy / dist * lift, y: mid.y + dx / dist * lift };

    (0..BEZIER_SAMPLES)
        .map(|i| {
            let t = i as f64 / (BEZIER_SAMPLES - 1) as f64;
            let mt = 1.0 - t;
            Coord {
                x: mt * mt * origin.x + 2.0 * mt * t * control.x + t * t * destination.x,
                y: mt * mt * origin.y + 2.0 * mt * t * control.y + t * t * destination.y,
            }
        })
        .collect()
}

/// One wedge of a pie layout, angles in radians from twelve o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSector {
    pub start_angle: f64,
    pub end_angle: f64,
}

/// Pie layout over category counts in the order given; no sorting, so the
/// caller's insertion order is the drawing order.
pub fn pie_layout(counts: &[usize]) -> Vec<PieSector> {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return counts.iter().map(|_| PieSector { start_angle: 0.0, end_angle: 0.0 }).collect();
    }
    let full = std::f64::consts::TAU;
    let mut angle = 0.0;
    counts
        .iter()
        .map(|&count| {
            let span = full * count as f64 / total as f64;
            let sector = PieSector { start_angle: angle, end_angle: angle + span };
            angle += span;
            sector
        })
        .collect()
}

/// Linear interpolator between two values, matching the numeric
/// interpolation the renderer uses for dates along an arc.
pub fn interpolate(a: f64, b: f64) -> impl Fn(f64) -> f64 {
    move |t| a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bezier_hits_both_endpoints() {
        let origin = Coord { x: 0.0, y: 0.0 };
        let destination = Coord { x: 100.0, y: 50.0 };
        let curve = bezier(origin, destination, 1);
        assert_eq!(curve.len(), BEZIER_SAMPLES);
        assert_eq!(curve[0], origin);
        assert_eq!(curve[BEZIER_SAMPLES - 1], destination);
    }

    #[test]
    fn higher_extend_bows_further() {
        let origin = Coord { x: 0.0, y: 0.0 };
        let destination = Coord { x: 100.0, y: 0.0 };
        let first = bezier(origin, destination, 1);
        let third = bezier(origin, destination, 3);
        let mid = BEZIER_SAMPLES / 2;
        assert!(third[mid].y.abs() > first[mid].y.abs());
    }

    #[test]
    fn pie_sectors_cover_the_full_circle() {
        let sectors = pie_layout(&[3, 1]);
        assert_eq!(sectors.len(), 2);
        assert_eq!(sectors[0].start_angle, 0.0);
        assert!((sectors[0].end_angle - std::f64::consts::TAU * 0.75).abs() < 1e-12);
        assert_eq!(sectors[0].end_angle, sectors[1].start_angle);
        assert!((sectors[1].end_angle - std::f64::consts::TAU).abs() < 1e-12);
    }

    #[test]
    fn empty_counts_yield_zero_width_sectors() {
        let sectors = pie_layout(&[0, 0]);
        assert!(sectors.iter().all(|s| s.start_angle == s.end_angle));
    }

    #[test]
    fn interpolate_is_linear() {
        let lerp = interpolate(2010.0, 2020.0);
        assert_eq!(lerp(0.0), 2010.0);
        assert_eq!(lerp(0.5), 2015.0);
        assert_eq!(lerp(1.0), 2020.0);
    }
}
