use platnav_core::{Aabb, FlightConfig, Occupancy, Vec2};

/// Node positions for flying agents over `bounds`.
///
/// Bounds are grown by `bounds_padding`. Columns run across the bounds every `node_spacing`;
/// in each column the ground height comes from a ray cast down from the top of the bounds
/// (the bottom of the bounds when nothing is hit), and `vertical_layers` nodes are stacked
/// from `min_height_above_ground` above it every `vertical_spacing`. Nodes above the top of
/// the bounds or within `obstacle_check_radius` of geometry are skipped.
pub fn flight_layout(oracle: &dyn Occupancy, bounds: Aabb, config: &FlightConfig) -> Vec<Vec2> {
    assert!(config.node_spacing > 0.0, "node_spacing must be > 0");

    let bounds = bounds.expanded(config.bounds_padding);
    let half = config.node_spacing * 0.5;
    let min_x = bounds.min.x + half;
    let max_x = bounds.max.x - half;
    if max_x < min_x {
        return Vec::new();
    }

    let columns = ((max_x - min_x) / config.node_spacing).floor() as usize + 1;
    let drop = bounds.max.y - bounds.min.y;
    let mut positions = Vec::new();

    for column in 0..columns {
        let x = min_x + column as f32 * config.node_spacing;
        let ground = oracle
            .ground_height(Vec2::new(x, bounds.max.y), drop)
            .unwrap_or(bounds.min.y);

        for layer in 0..config.vertical_layers {
            let y = ground + config.min_height_above_ground + layer as f32 * config.vertical_spacing;
            if y > bounds.max.y {
                continue;
            }
            let p = Vec2::new(x, y);
            if !oracle.is_clear(p, config.obstacle_check_radius) {
                continue;
            }
            positions.push(p);
        }
    }

    tracing::debug!(columns, nodes = positions.len(), "Laid out flight nodes");
    positions
}
