//! Per-event overlay: truth trajectories and reconstructed clusters.
//!
//! The overlay caches the geometry of the selected event. It pulls from the
//! [`EventSource`] only when the selection changes, and draws nothing while no
//! event is selected.

use std::any::Any;

use calolite_core::{CaloError, Drawable, EventId, EventSource, Result, Surface};
use glam::{Vec2, Vec3};

/// One truth particle's straight-line trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trajectory {
    /// Where the trajectory ends, in meters.
    pub endpoint: Vec3,
    /// Pseudorapidity.
    pub eta: f32,
    /// Azimuth in radians.
    pub phi: f32,
}

impl Trajectory {
    /// Returns true if every endpoint coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.endpoint.is_finite()
    }
}

/// Cached geometry of the selected event.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedEvent {
    /// The event number.
    pub id: EventId,
    /// Truth trajectories.
    pub trajectories: Vec<Trajectory>,
    /// Cell positions of each cluster.
    pub clusters: Vec<Vec<Vec3>>,
}

impl SelectedEvent {
    /// Fetches an event from the source.
    ///
    /// Fails if the source fails or if the trajectory lists are not aligned.
    pub fn fetch(source: &dyn EventSource, id: EventId) -> Result<Self> {
        let xyz = source.trajectory_xyz(id)?;
        let eta_phi = source.trajectory_eta_phi(id)?;
        if xyz.len() != eta_phi.len() {
            return Err(CaloError::SizeMismatch {
                expected: xyz.len(),
                actual: eta_phi.len(),
            });
        }
        let clusters = source.cluster_cells(id)?;

        let trajectories = xyz
            .into_iter()
            .zip(eta_phi)
            .map(|(endpoint, Vec2 { x: eta, y: phi })| Trajectory { endpoint, eta, phi })
            .collect();

        Ok(Self {
            id,
            trajectories,
            clusters,
        })
    }
}

/// Drawable overlay for the selected event.
#[derive(Debug, Clone)]
pub struct EventOverlay {
    name: String,
    palette: Vec<Vec3>,
    cell_size: f32,
    trajectory_color: Vec3,
    selected: Option<SelectedEvent>,
}

impl EventOverlay {
    /// Creates an overlay with no event selected.
    ///
    /// `palette` must not be empty; clusters cycle through it.
    pub fn new(name: impl Into<String>, palette: Vec<Vec3>) -> Result<Self> {
        if palette.is_empty() {
            return Err(CaloError::InvalidConfig(
                "cluster palette is empty".to_string(),
            ));
        }
        Ok(Self {
            name: name.into(),
            palette,
            cell_size: 8.0,
            trajectory_color: Vec3::ZERO,
            selected: None,
        })
    }

    /// Selects an event, replacing anything cached before.
    ///
    /// On error the previous selection is kept unchanged.
    pub fn select(&mut self, source: &dyn EventSource, id: EventId) -> Result<()> {
        let event = SelectedEvent::fetch(source, id)?;
        log_selection(&event);
        self.selected = Some(event);
        Ok(())
    }

    /// Drops the selection and all cached geometry.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Returns the selected event number.
    pub fn selected_id(&self) -> Option<EventId> {
        self.selected.as_ref().map(|e| e.id)
    }

    /// Returns the cached event, if any.
    pub fn selected(&self) -> Option<&SelectedEvent> {
        self.selected.as_ref()
    }

    /// Returns the cached trajectories (empty when nothing is selected).
    pub fn trajectories(&self) -> &[Trajectory] {
        match &self.selected {
            Some(event) => &event.trajectories,
            None => &[],
        }
    }

    /// Returns the cached clusters (empty when nothing is selected).
    pub fn clusters(&self) -> &[Vec<Vec3>] {
        match &self.selected {
            Some(event) => &event.clusters,
            None => &[],
        }
    }

    /// Returns the color of a cluster by index; the palette wraps around.
    pub fn cluster_color(&self, index: usize) -> Vec3 {
        self.palette[index % self.palette.len()]
    }

    /// Returns the point size used for cluster cells.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    fn render_trajectories(&self, surface: &mut dyn Surface, event: &SelectedEvent) {
        for (index, trajectory) in event.trajectories.iter().enumerate() {
            if !trajectory.is_finite() {
                log::warn!(
                    "event {}: skipping particle {index} with non-finite endpoint {:?}",
                    event.id,
                    trajectory.endpoint
                );
                continue;
            }
            surface.draw_line(Vec3::ZERO, trajectory.endpoint, self.trajectory_color);
        }
    }

    fn render_clusters(&self, surface: &mut dyn Surface, event: &SelectedEvent) {
        for (index, cells) in event.clusters.iter().enumerate() {
            surface.draw_points(cells, self.cluster_color(index), self.cell_size);
        }
    }
}

fn log_selection(event: &SelectedEvent) {
    log::info!(
        "selected event {}: {} particle(s), {} cluster(s)",
        event.id,
        event.trajectories.len(),
        event.clusters.len()
    );
    for (index, t) in event.trajectories.iter().enumerate() {
        log::debug!(
            "    particle {index}: (eta, phi) = ({:.3}, {:.3}); (x, y, z) = ({:.3}, {:.3}, {:.3})",
            t.eta,
            t.phi,
            t.endpoint.x,
            t.endpoint.y,
            t.endpoint.z
        );
    }
    for (index, cells) in event.clusters.iter().enumerate() {
        log::debug!("    cluster {index}: {} cell(s)", cells.len());
    }
}

impl Drawable for EventOverlay {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "EventOverlay"
    }

    fn render(&self, surface: &mut dyn Surface) -> Result<()> {
        let Some(event) = &self.selected else {
            return Ok(());
        };
        self.render_trajectories(surface, event);
        self.render_clusters(surface, event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calolite_render::DrawList;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct FakeEvents {
        events: BTreeMap<EventId, (Vec<Vec3>, Vec<Vec2>, Vec<Vec<Vec3>>)>,
    }

    impl FakeEvents {
        fn with(mut self, id: EventId, xyz: Vec<Vec3>, clusters: Vec<Vec<Vec3>>) -> Self {
            let eta_phi = vec![Vec2::new(0.5, 1.0); xyz.len()];
            self.events.insert(id, (xyz, eta_phi, clusters));
            self
        }

        fn get(&self, id: EventId) -> Result<&(Vec<Vec3>, Vec<Vec2>, Vec<Vec<Vec3>>)> {
            self.events.get(&id).ok_or(CaloError::UnknownEvent(id))
        }
    }

    impl EventSource for FakeEvents {
        fn event_ids(&self) -> Vec<EventId> {
            self.events.keys().copied().collect()
        }
        fn trajectory_xyz(&self, id: EventId) -> Result<Vec<Vec3>> {
            Ok(self.get(id)?.0.clone())
        }
        fn trajectory_eta_phi(&self, id: EventId) -> Result<Vec<Vec2>> {
            Ok(self.get(id)?.1.clone())
        }
        fn cluster_cells(&self, id: EventId) -> Result<Vec<Vec<Vec3>>> {
            Ok(self.get(id)?.2.clone())
        }
    }

    fn overlay() -> EventOverlay {
        EventOverlay::new(
            "event",
            vec![Vec3::X, Vec3::Y, Vec3::Z],
        )
        .unwrap()
    }

    #[test]
    fn test_nothing_selected_renders_nothing() {
        let overlay = overlay();
        let mut list = DrawList::new();
        overlay.render(&mut list).unwrap();
        assert!(list.is_empty());
        assert!(overlay.selected_id().is_none());
    }

    #[test]
    fn test_select_replaces_previous_event() {
        let source = FakeEvents::default()
            .with(1, vec![Vec3::X, Vec3::Y], vec![vec![Vec3::ONE]])
            .with(2, vec![Vec3::Z], vec![vec![Vec3::ZERO], vec![Vec3::NEG_X]]);
        let mut overlay = overlay();

        overlay.select(&source, 1).unwrap();
        overlay.select(&source, 2).unwrap();
        assert_eq!(overlay.selected_id(), Some(2));
        assert_eq!(overlay.trajectories().len(), 1);
        assert_eq!(overlay.trajectories()[0].endpoint, Vec3::Z);
        assert_eq!(overlay.clusters().len(), 2);
    }

    #[test]
    fn test_clear_empties_caches() {
        let source = FakeEvents::default().with(7, vec![Vec3::X], vec![vec![Vec3::ONE]]);
        let mut overlay = overlay();
        overlay.select(&source, 7).unwrap();
        overlay.clear();

        assert!(overlay.selected_id().is_none());
        assert!(overlay.trajectories().is_empty());
        assert!(overlay.clusters().is_empty());
        let mut list = DrawList::new();
        overlay.render(&mut list).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_non_finite_endpoint_skipped() {
        let xyz = vec![
            Vec3::X,
            Vec3::new(f32::NAN, 0.0, 1.0),
            Vec3::Y,
            Vec3::Z,
        ];
        let source = FakeEvents::default().with(3, xyz, Vec::new());
        let mut overlay = overlay();
        overlay.select(&source, 3).unwrap();

        let mut list = DrawList::new();
        overlay.render(&mut list).unwrap();
        assert_eq!(list.line_count(), 3);
        assert!(list.lines().all(|(from, to, _)| from == Vec3::ZERO && to.is_finite()));
    }

    #[test]
    fn test_infinite_endpoint_skipped() {
        let xyz = vec![Vec3::new(0.0, f32::INFINITY, 0.0), Vec3::X];
        let source = FakeEvents::default().with(4, xyz, Vec::new());
        let mut overlay = overlay();
        overlay.select(&source, 4).unwrap();
        let mut list = DrawList::new();
        overlay.render(&mut list).unwrap();
        assert_eq!(list.line_count(), 1);
    }

    #[test]
    fn test_unknown_event_keeps_previous_selection() {
        let source = FakeEvents::default().with(1, vec![Vec3::X], Vec::new());
        let mut overlay = overlay();
        overlay.select(&source, 1).unwrap();
        let err = overlay.select(&source, 99).unwrap_err();
        assert!(matches!(err, CaloError::UnknownEvent(99)));
        assert_eq!(overlay.selected_id(), Some(1));
    }

    #[test]
    fn test_misaligned_trajectories_rejected() {
        let mut source = FakeEvents::default().with(5, vec![Vec3::X, Vec3::Y], Vec::new());
        source.events.get_mut(&5).unwrap().1.pop();
        let mut overlay = overlay();
        let err = overlay.select(&source, 5).unwrap_err();
        assert!(matches!(err, CaloError::SizeMismatch { expected: 2, actual: 1 }));
        assert!(overlay.selected_id().is_none());
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert!(EventOverlay::new("event", Vec::new()).is_err());
    }

    proptest! {
        #[test]
        fn cluster_colors_wrap_around_palette(count in 0usize..20) {
            let clusters: Vec<Vec<Vec3>> = (0..count).map(|i| vec![Vec3::splat(i as f32)]).collect();
            let source = FakeEvents::default().with(1, Vec::new(), clusters);
            let mut overlay = overlay();
            overlay.select(&source, 1).unwrap();

            let mut list = DrawList::new();
            overlay.render(&mut list).unwrap();
            let colors: Vec<Vec3> = list.point_batches().map(|(_, color, _)| color).collect();
            prop_assert_eq!(colors.len(), count);
            let palette = [Vec3::X, Vec3::Y, Vec3::Z];
            for (i, color) in colors.iter().enumerate() {
                prop_assert_eq!(*color, palette[i % 3]);
            }
        }
    }
}
