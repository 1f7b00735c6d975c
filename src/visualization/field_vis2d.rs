use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;

use crate::field::scenario::Scenario;
use crate::field::states::FieldMaps;

/// The maps are static, so they are evaluated once up front and stashed as a
/// resource instead of being recomputed per frame
#[derive(Resource)]
struct ComputedMaps(FieldMaps);

/// Target on-screen span of the longer grid axis, in pixels
const VIEW_SPAN: f32 = 700.0;

/// Charge marker radius in world units (scaled to screen)
const CHARGE_RADIUS: f32 = 0.05;

pub fn run_interactive(scenario: Scenario) {
    println!(
        "run_interactive: starting Bevy viewer with {} charges",
        scenario.system.charges.len()
    );

    let maps = scenario.evaluate();

    App::new()
        .insert_resource(scenario)
        .insert_resource(ComputedMaps(maps))
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_charges_system)
        .add_systems(Update, draw_field_system)
        .run();
}

/// Pixels per world unit for the current grid bounds
fn view_scale(scenario: &Scenario) -> f32 {
    let span = scenario.grid.width().max(scenario.grid.height()) as f32;
    VIEW_SPAN / span
}

fn setup_charges_system(mut commands: Commands, scenario: Res<Scenario>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    // 2D camera
    commands.spawn(Camera2dBundle::default());

    let scale = view_scale(&scenario);

    for charge in scenario.system.charges.iter() {
        let radius_screen = (CHARGE_RADIUS * scale).max(5.0);
        let x = charge.x.x as f32 * scale;
        let y = charge.x.y as f32 * scale;

        // Warm marker for positive charges, cool for negative
        let color = if charge.q >= 0.0 {
            Color::srgb(0.85, 0.2, 0.2)
        } else {
            Color::srgb(0.2, 0.35, 0.85)
        };

        commands.spawn(MaterialMesh2dBundle {
            mesh: Mesh2dHandle(meshes.add(Circle::new(radius_screen))),
            material: materials.add(ColorMaterial::from(color)),
            transform: Transform::from_xyz(x, y, 1.0),
            ..Default::default()
        });
    }
}

/// Gizmo pass: one direction arrow per strided grid point, colored by
/// normalized log field strength. Non-finite samples are skipped
fn draw_field_system(scenario: Res<Scenario>, maps: Res<ComputedMaps>, mut gizmos: Gizmos) {
    let maps = &maps.0;
    let scale = view_scale(&scenario);
    let (ny, nx) = scenario.grid.shape();
    let stride = scenario.engine.arrow_stride.max(1);

    // Color normalization bounds over the finite magnitudes
    let mag = maps.magnitude();
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &m in mag.iter() {
        if m.is_finite() && m > 0.0 {
            let l = 2.0 * m.ln();
            lo = lo.min(l);
            hi = hi.max(l);
        }
    }

    // Arrow half-length: a bit under the strided cell size on screen
    let spacing = (scenario.grid.width() / (nx.max(2) - 1) as f64) as f32;
    let half_len = 0.42 * stride as f32 * spacing * scale;

    for j in (0..ny).step_by(stride) {
        for i in (0..nx).step_by(stride) {
            let ex = maps.ex[[j, i]];
            let ey = maps.ey[[j, i]];
            if !ex.is_finite() || !ey.is_finite() {
                continue;
            }
            let m = ex.hypot(ey);
            if m == 0.0 {
                continue;
            }

            let dir = Vec2::new((ex / m) as f32, (ey / m) as f32);
            let center = Vec2::new(
                scenario.grid.x[i] as f32 * scale,
                scenario.grid.y[j] as f32 * scale,
            );

            gizmos.arrow_2d(
                center - dir * half_len,
                center + dir * half_len,
                strength_to_color(m, lo, hi),
            );
        }
    }
}

/// Blue -> red gradient over normalized 2·ln|E|
fn strength_to_color(mag: f64, lo: f64, hi: f64) -> Color {
    if !(lo.is_finite() && hi.is_finite()) || hi <= lo {
        return Color::srgb(0.3, 0.3, 0.9);
    }

    let t = (((2.0 * mag.ln()) - lo) / (hi - lo)).clamp(0.0, 1.0) as f32;

    // Simple blue -> red gradient
    let r = t;
    let g = 0.0;
    let b = 1.0 - t;

    Color::srgb(r, g, b)
}
