//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use calolite::*;

/// A geometry with two cells in every configured channel.
pub fn geometry(config: &DetectorConfig) -> CellGeometry {
    let mut geometry = CellGeometry::new();
    for (i, name) in config.channel_names().enumerate() {
        let r = 1.5 + i as f32 * 0.1;
        geometry.insert(name, vec![Vec3::new(r, 0.0, 0.0), Vec3::new(0.0, r, 1.0)]);
    }
    geometry
}

/// Events 3, 7 and 12. Event 7 has a particle with a non-finite endpoint.
pub fn events() -> EventCatalog {
    let mut events = EventCatalog::new();
    events.insert(
        12,
        EventRecord::from_truth(
            vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 2.0)],
            vec![vec![Vec3::new(1.8, 0.0, 0.0)], vec![Vec3::new(0.0, 1.8, 0.5)]],
        ),
    );
    events.insert(3, EventRecord::from_truth(vec![Vec2::new(-0.5, 1.0)], Vec::new()));

    let mut broken = EventRecord::from_truth(
        vec![Vec2::new(0.2, 0.1), Vec2::new(0.4, 0.2), Vec2::new(0.6, 0.3)],
        vec![vec![Vec3::ONE; 4]],
    );
    broken.trajectories[1] = Vec3::new(f32::NAN, 0.0, 0.0);
    events.insert(7, broken);
    events
}

/// A stage over the default ATLAS configuration.
pub fn stage() -> Stage {
    let config = Arc::new(DetectorConfig::default());
    let geometry = geometry(&config);
    Stage::new(config, &geometry, Box::new(events())).expect("stage construction failed")
}
