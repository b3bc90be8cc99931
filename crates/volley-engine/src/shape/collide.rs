use crate::coords::{Rect, Vec2};

use super::Shape;

/// Returns whether two shapes overlap. Symmetric in its arguments.
///
/// Edge policy per variant pair:
/// - circle/circle: strict, `|r1 - r2| < d < r1 + r2`. Tangent circles and
///   circles nested inside one another (including concentric ones) do not
///   collide.
/// - rect/rect: inclusive, rectangles sharing an edge collide.
/// - rect/circle: inclusive, a circle touching the rectangle collides.
pub fn collide(a: &Shape, b: &Shape) -> bool {
    match (a, b) {
        (
            Shape::Circle { center: c1, radius: r1 },
            Shape::Circle { center: c2, radius: r2 },
        ) => circles(*c1, *r1, *c2, *r2),
        (Shape::Rect(r1), Shape::Rect(r2)) => rects(*r1, *r2),
        (Shape::Rect(rect), Shape::Circle { center, radius })
        | (Shape::Circle { center, radius }, Shape::Rect(rect)) => {
            rect_circle(*rect, *center, *radius)
        }
    }
}

fn circles(c1: Vec2, r1: f32, c2: Vec2, r2: f32) -> bool {
    let d = c1.distance(c2);
    (r1 - r2).abs() < d && d < r1 + r2
}

fn rects(a: Rect, b: Rect) -> bool {
    a.right() >= b.x && a.x <= b.right() && a.bottom() >= b.y && a.y <= b.bottom()
}

fn rect_circle(rect: Rect, center: Vec2, radius: f32) -> bool {
    rect.clamp_point(center).distance(center) <= radius
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn circle(x: f32, y: f32, r: f32) -> Shape {
        Shape::circle(Vec2::new(x, y), r)
    }

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Shape {
        Shape::rect(Rect::new(x, y, w, h))
    }

    // ── circle / circle ───────────────────────────────────────────────────

    #[test]
    fn tangent_circles_do_not_collide() {
        assert!(!collide(&circle(0.0, 0.0, 5.0), &circle(10.0, 0.0, 5.0)));
    }

    #[test]
    fn circles_just_inside_tangent_collide() {
        assert!(collide(&circle(0.0, 0.0, 5.0), &circle(10.0 - 1e-3, 0.0, 5.0)));
    }

    #[test]
    fn concentric_equal_circles_do_not_collide() {
        assert!(!collide(&circle(3.0, 3.0, 4.0), &circle(3.0, 3.0, 4.0)));
    }

    #[test]
    fn nested_circle_does_not_collide() {
        // Small circle entirely inside the big one, boundaries never cross.
        assert!(!collide(&circle(0.0, 0.0, 10.0), &circle(1.0, 0.0, 2.0)));
        assert!(!collide(&circle(1.0, 0.0, 2.0), &circle(0.0, 0.0, 10.0)));
    }

    #[test]
    fn crossing_circles_collide() {
        assert!(collide(&circle(0.0, 0.0, 5.0), &circle(6.0, 0.0, 3.0)));
    }

    // ── rect / rect ───────────────────────────────────────────────────────

    #[test]
    fn rects_sharing_an_edge_collide() {
        assert!(collide(&rect(0.0, 0.0, 1.0, 1.0), &rect(1.0, 0.0, 1.0, 1.0)));
        assert!(collide(&rect(0.0, 0.0, 1.0, 1.0), &rect(0.0, 1.0, 1.0, 1.0)));
    }

    #[test]
    fn separated_rects_do_not_collide() {
        assert!(!collide(&rect(0.0, 0.0, 1.0, 1.0), &rect(1.5, 0.0, 1.0, 1.0)));
        assert!(!collide(&rect(0.0, 0.0, 1.0, 1.0), &rect(0.0, -2.0, 1.0, 1.0)));
    }

    // ── rect / circle ─────────────────────────────────────────────────────

    #[test]
    fn circle_touching_rect_edge_collides() {
        let r = rect(0.0, 0.0, 10.0, 10.0);
        assert!(collide(&r, &circle(13.0, 5.0, 3.0)));
        assert!(collide(&circle(5.0, -3.0, 3.0), &r));
    }

    #[test]
    fn circle_near_rect_corner_uses_euclidean_distance() {
        let r = rect(0.0, 0.0, 10.0, 10.0);
        // Corner (10, 10); center (13, 14) is 5 away.
        assert!(!collide(&r, &circle(13.0, 14.0, 4.9)));
        assert!(collide(&r, &circle(13.0, 14.0, 5.0)));
    }

    #[test]
    fn circle_inside_rect_collides() {
        assert!(collide(&rect(0.0, 0.0, 100.0, 100.0), &circle(50.0, 50.0, 1.0)));
    }

    #[test]
    fn inverted_rect_is_normalized_before_testing() {
        let inverted = rect(10.0, 0.0, -5.0, 5.0);
        assert_eq!(inverted, rect(5.0, 0.0, 5.0, 5.0));
        assert!(!collide(&inverted, &circle(0.0, 0.0, 1.0)));
        assert!(collide(&circle(4.5, 2.0, 1.0), &inverted));
    }

    #[test]
    fn nan_rect_does_not_panic() {
        let broken = Shape::Rect(Rect::new(f32::NAN, 0.0, 4.0, 4.0));
        let _ = collide(&broken, &circle(0.0, 0.0, 1.0));
    }

    // ── symmetry ──────────────────────────────────────────────────────────

    fn random_shape(rng: &mut StdRng) -> Shape {
        if rng.gen_bool(0.5) {
            circle(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0), rng.gen_range(0.0..30.0))
        } else {
            rect(
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
                rng.gen_range(0.0..40.0),
                rng.gen_range(0.0..40.0),
            )
        }
    }

    #[test]
    fn collide_is_symmetric_for_random_pairs() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..1000 {
            let a = random_shape(&mut rng);
            let b = random_shape(&mut rng);
            assert_eq!(collide(&a, &b), collide(&b, &a), "asymmetric for {a:?} / {b:?}");
        }
    }
}
