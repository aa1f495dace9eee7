//! Line-list geometry for snapshot entities
//!
//! Every function returns vertex pairs (one pair per segment) in world
//! coordinates, suitable for a line-list primitive.

use glam::{Mat2, Vec2};
use std::f32::consts::TAU;

use super::vertex::{Vertex, colors};
use crate::sim::{CraftView, EntityView, ObstacleView, ProjectileView, Snapshot};

/// Craft hull in local space, nose along +x
const CRAFT_HULL: [Vec2; 5] = [
    Vec2::new(14.0, 0.0),
    Vec2::new(-12.0, -10.0),
    Vec2::new(-6.0, -6.0),
    Vec2::new(-6.0, 6.0),
    Vec2::new(-12.0, 10.0),
];

/// Exhaust flame in local space, drawn behind the hull while thrusting
const EXHAUST_FLAME: [Vec2; 3] = [
    Vec2::new(-12.0, -6.0),
    Vec2::new(-20.0, 0.0),
    Vec2::new(-12.0, 6.0),
];

/// Append a closed polygon as line segments
fn closed_loop(points: &[Vec2], color: [f32; 4], out: &mut Vec<Vertex>) {
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        out.push(Vertex::new(a.x, a.y, color));
        out.push(Vertex::new(b.x, b.y, color));
    }
}

/// Append an open polyline as line segments
fn polyline(points: &[Vec2], color: [f32; 4], out: &mut Vec<Vertex>) {
    for pair in points.windows(2) {
        out.push(Vertex::new(pair[0].x, pair[0].y, color));
        out.push(Vertex::new(pair[1].x, pair[1].y, color));
    }
}

fn to_world(local: &[Vec2], origin: Vec2, angle: f32) -> Vec<Vec2> {
    let rot = Mat2::from_angle(angle);
    local.iter().map(|p| origin + rot * *p).collect()
}

/// Craft outline, dimmed during the off half of the blink, plus flame
pub fn craft(view: &CraftView) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(16);
    let color = if view.visible { colors::CRAFT } else { colors::CRAFT_DIM };
    closed_loop(&to_world(&CRAFT_HULL, view.pos, view.heading), color, &mut vertices);

    if view.thrusting {
        polyline(
            &to_world(&EXHAUST_FLAME, view.pos, view.heading),
            colors::EXHAUST,
            &mut vertices,
        );
    }
    vertices
}

/// Small diamond marking a projectile
pub fn projectile(view: &ProjectileView) -> Vec<Vertex> {
    let r = view.radius;
    let points = [
        view.pos + Vec2::new(r, 0.0),
        view.pos + Vec2::new(0.0, r),
        view.pos + Vec2::new(-r, 0.0),
        view.pos + Vec2::new(0.0, -r),
    ];
    let mut vertices = Vec::with_capacity(8);
    closed_loop(&points, colors::PROJECTILE, &mut vertices);
    vertices
}

/// Jagged obstacle outline: vertex radii sampled evenly around the circle
pub fn obstacle_outline(view: &ObstacleView) -> Vec<Vec2> {
    let n = view.vertex_radii.len();
    view.vertex_radii
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let theta = view.rotation + (i as f32 / n as f32) * TAU;
            view.pos + Vec2::new(theta.cos(), theta.sin()) * *r
        })
        .collect()
}

pub fn obstacle(view: &ObstacleView) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(view.vertex_radii.len() * 2);
    closed_loop(&obstacle_outline(view), colors::OBSTACLE, &mut vertices);
    vertices
}

/// Geometry for a single tagged entity
pub fn entity(view: EntityView<'_>) -> Vec<Vertex> {
    match view {
        EntityView::Craft(c) => craft(c),
        EntityView::Projectile(p) => projectile(p),
        EntityView::Obstacle(o) => obstacle(o),
    }
}

/// Whole frame as one line list
pub fn scene(snapshot: &Snapshot) -> Vec<Vertex> {
    snapshot.entities().flat_map(entity).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;

    fn craft_view() -> CraftView {
        CraftView {
            pos: Vec2::new(100.0, 100.0),
            heading: 0.0,
            radius: 12.0,
            visible: true,
            invulnerable: false,
            thrusting: false,
        }
    }

    #[test]
    fn test_craft_nose_points_along_heading() {
        let mut view = craft_view();
        view.heading = std::f32::consts::FRAC_PI_2;
        let verts = craft(&view);
        assert_eq!(verts.len(), 10);
        let nose = verts[0].position;
        assert!((nose[0] - 100.0).abs() < 1e-4);
        assert!((nose[1] - 114.0).abs() < 1e-4);
    }

    #[test]
    fn test_thrust_adds_flame() {
        let mut view = craft_view();
        view.thrusting = true;
        let verts = craft(&view);
        assert_eq!(verts.len(), 14);
        assert_eq!(verts[10].color, colors::EXHAUST);
    }

    #[test]
    fn test_blink_dims_craft() {
        let mut view = craft_view();
        view.visible = false;
        assert!(craft(&view).iter().all(|v| v.color == colors::CRAFT_DIM));
    }

    #[test]
    fn test_obstacle_outline_follows_radii() {
        let view = ObstacleView {
            pos: Vec2::new(50.0, 50.0),
            rotation: 0.0,
            radius: 10.0,
            vertex_radii: vec![10.0, 12.0, 8.0, 11.0],
        };
        let outline = obstacle_outline(&view);
        assert_eq!(outline.len(), 4);
        assert!((outline[0] - Vec2::new(60.0, 50.0)).length() < 1e-4);
        assert!((outline[1] - Vec2::new(50.0, 62.0)).length() < 1e-4);
        assert_eq!(obstacle(&view).len(), 8);
    }

    #[test]
    fn test_scene_covers_all_entities() {
        let snap = GameState::new(3).snapshot();
        let expected: usize = snap.obstacles.iter().map(|o| o.vertex_radii.len() * 2).sum::<usize>() + 10;
        assert_eq!(scene(&snap).len(), expected);
    }
}
