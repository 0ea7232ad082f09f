//! Stage construction, event relay, camera input and redraw requests.

mod common;

use calolite::*;

#[test]
fn test_initial_scene_order() {
    let stage = common::stage();
    let config = stage.config();
    let members = stage.scene().members();

    assert_eq!(members.len(), 1 + config.channels.len() + 1);
    assert_eq!(members[0], stage.axis_handle());
    for (i, name) in config.channel_names().enumerate() {
        assert_eq!(Some(members[i + 1]), stage.channel_handle(name));
    }
    assert_eq!(*members.last().unwrap(), stage.overlay_handle());
}

#[test]
fn test_initial_state_all_visible() {
    let stage = common::stage();
    assert!(stage.is_axis_visible());
    assert!(stage
        .config()
        .channel_names()
        .all(|name| stage.is_channel_visible(name) == Some(true)));
    assert!(stage
        .group_states()
        .iter()
        .all(|(_, state)| *state == TriState::Checked));
    assert_eq!(stage.selected_event(), None);
}

#[test]
fn test_group_states_in_config_order() {
    let stage = common::stage();
    let names: Vec<String> = stage.group_states().into_iter().map(|(n, _)| n).collect();
    let expected: Vec<String> = stage
        .config()
        .groups
        .iter()
        .map(|g| g.name().to_string())
        .collect();
    assert_eq!(names, expected);
}

#[test]
fn test_event_ids_sorted() {
    let stage = common::stage();
    assert_eq!(stage.event_ids(), &[3, 7, 12]);
}

#[test]
fn test_select_replace_and_clear() {
    let mut stage = common::stage();

    stage.on_event_selected(EventSelection::Event(12)).unwrap();
    assert_eq!(stage.selected_event(), Some(12));
    assert_eq!(stage.overlay().unwrap().trajectories().len(), 2);

    stage.on_event_selected(EventSelection::Event(3)).unwrap();
    let overlay = stage.overlay().unwrap();
    assert_eq!(overlay.selected_id(), Some(3));
    assert_eq!(overlay.trajectories().len(), 1);
    assert!(overlay.clusters().is_empty());

    stage.on_event_selected(EventSelection::None).unwrap();
    let overlay = stage.overlay().unwrap();
    assert_eq!(overlay.selected_id(), None);
    assert!(overlay.trajectories().is_empty());
}

#[test]
fn test_unknown_event_rejected() {
    let mut stage = common::stage();
    stage.on_event_selected(EventSelection::Event(12)).unwrap();
    let err = stage.on_event_selected(EventSelection::Event(99)).unwrap_err();
    assert!(matches!(err, CaloError::UnknownEvent(99)));
    assert_eq!(stage.selected_event(), Some(12));
}

#[test]
fn test_non_finite_trajectory_skipped_in_frame() {
    let mut stage = common::stage();
    stage.on_axis_toggle(false);
    for (group, _) in stage.group_states() {
        stage.on_group_toggle(&group, false).unwrap();
    }
    stage.on_event_selected(EventSelection::Event(7)).unwrap();

    let mut list = DrawList::new();
    let stats = stage.render(&mut list);
    assert_eq!(stats.failed, 0);
    assert_eq!(stats.rendered, 1);
    assert_eq!(list.line_count(), 2);
    assert_eq!(list.point_batches().count(), 1);
}

#[test]
fn test_frame_draws_in_scene_order() {
    let mut stage = common::stage();
    stage.on_event_selected(EventSelection::Event(12)).unwrap();

    let mut list = DrawList::new();
    let stats = stage.render(&mut list);
    assert_eq!(stats.rendered, stage.scene().len());

    // View first, then the axis, then channel batches, then the overlay.
    assert!(matches!(list.commands()[0], DrawCommand::SetView(_)));
    assert!(matches!(list.commands()[1], DrawCommand::Cylinder { .. }));
    assert!(matches!(
        list.commands().last(),
        Some(DrawCommand::Points { size, .. }) if *size == 8.0
    ));
}

#[test]
fn test_hidden_axis_not_drawn() {
    let mut stage = common::stage();
    stage.on_axis_toggle(false);
    assert!(!stage.scene().contains(stage.axis_handle()));

    let mut list = DrawList::new();
    stage.render(&mut list);
    assert_eq!(list.labels().count(), 0);

    stage.on_axis_toggle(true);
    assert_eq!(stage.scene().members()[stage.scene().len() - 1], stage.axis_handle());
}

#[test]
fn test_camera_input_and_reset() {
    let mut stage = common::stage();
    let initial = *stage.camera().state();

    // Moves before a press only record the anchor.
    assert!(!stage.on_pointer_move(Vec2::new(5.0, 5.0), Some(PointerButton::Left)));

    stage.on_pointer_down(Vec2::new(10.0, 10.0));
    assert!(stage.on_pointer_move(Vec2::new(40.0, 20.0), Some(PointerButton::Left)));
    assert_eq!(stage.camera().state().rotation_y, initial.rotation_y + 30.0);
    assert_eq!(stage.camera().state().rotation_x, initial.rotation_x + 10.0);

    assert!(stage.on_pointer_move(Vec2::new(50.0, 20.0), Some(PointerButton::Middle)));
    assert!(stage.camera().state().pan_x > 0.0);

    stage.on_wheel(1200.0);
    assert!(stage.camera().state().zoom > initial.zoom);

    stage.reset_camera();
    assert_eq!(*stage.camera().state(), initial);
    assert_eq!(stage.camera().view_matrix(), initial.view_matrix());
}

#[test]
fn test_redraw_requests() {
    let mut stage = common::stage();
    assert!(stage.take_redraw_request());
    assert!(!stage.take_redraw_request());

    stage.on_channel_toggle("EMB1", false).unwrap();
    assert!(stage.take_redraw_request());

    stage.on_pointer_down(Vec2::ZERO);
    assert!(!stage.take_redraw_request());
    stage.on_pointer_move(Vec2::ONE, None);
    assert!(!stage.take_redraw_request());

    stage.on_wheel(120.0);
    assert!(stage.take_redraw_request());

    stage.on_event_selected(EventSelection::Event(3)).unwrap();
    assert!(stage.take_redraw_request());

    assert!(stage.on_event_selected(EventSelection::Event(4)).is_err());
    assert!(!stage.take_redraw_request());
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = DetectorConfig::default();
    config.cluster_palette.clear();
    let geometry = common::geometry(&config);
    let result = Stage::new(
        std::sync::Arc::new(config),
        &geometry,
        Box::new(common::events()),
    );
    assert!(matches!(result, Err(CaloError::InvalidConfig(_))));
}

#[test]
fn test_non_finite_cells_dropped() {
    let config = std::sync::Arc::new(DetectorConfig::default());
    let mut geometry = common::geometry(&config);
    geometry.insert("EMB2", vec![Vec3::ONE, Vec3::new(0.0, f32::INFINITY, 0.0)]);
    let stage = Stage::new(config, &geometry, Box::new(EventCatalog::new())).unwrap();

    let id = stage.channel_handle("EMB2").unwrap();
    let cloud = stage.registry().get_as::<ChannelCloud>(id).unwrap();
    assert_eq!(cloud.cells(), &[Vec3::ONE]);
}

#[test]
fn test_non_finite_wheel_keeps_zoom() {
    let mut stage = common::stage();
    stage.on_wheel(360.0);
    let zoom = stage.camera().state().zoom;
    assert!(stage.take_redraw_request());

    stage.on_wheel(f32::NAN);
    stage.on_wheel(f32::INFINITY);
    assert_eq!(stage.camera().state().zoom, zoom);
    assert!(!stage.take_redraw_request());

    let mut list = DrawList::new();
    stage.render(&mut list);
    assert!(list.last_view().unwrap().is_finite());
}

#[test]
fn test_invalid_camera_settings_rejected() {
    let config = std::sync::Arc::new(DetectorConfig::default());
    let geometry = common::geometry(&config);
    let settings = CameraSettings {
        min_zoom: 2.0,
        max_zoom: 0.5,
        ..CameraSettings::default()
    };
    let result = Stage::with_camera_settings(
        config,
        &geometry,
        Box::new(common::events()),
        settings,
    );
    assert!(matches!(result, Err(CaloError::InvalidConfig(_))));
}
