use digital_museum::{
    KeyCode,
    math::{multiply, rotation_y},
    render::ClearColour,
    scene::{InputEvent, Scene, SceneState},
};

use crate::common::test_utils::{Call, RecordingBackend, config, cube};

mod common;

#[test]
fn setup_writes_light_and_camera_uniforms() {
    let mut gpu = RecordingBackend::new();
    let scene = Scene::new(&config(), &mut gpu);

    assert_eq!(scene.state(), SceneState::Running);
    assert_eq!(
        gpu.calls,
        vec![
            Call::WriteLightPosition([0.0, 5.0, 0.0]),
            Call::WriteProjection(scene.camera().view_projection()),
        ]
    );
}

#[test]
fn empty_scene_clears_and_presents() {
    let mut gpu = RecordingBackend::new();
    let mut scene = Scene::new(&config(), &mut gpu);
    gpu.reset();

    let state = scene.frame(std::iter::empty(), &mut gpu).unwrap();

    assert_eq!(state, SceneState::Running);
    assert_eq!(
        gpu.calls,
        vec![
            Call::Clear(ClearColour::BLACK),
            Call::WriteProjection(scene.camera().view_projection()),
            Call::Present,
        ]
    );
}

#[test]
fn objects_render_in_insertion_order_each_rebinding_unit_zero() {
    let mut gpu = RecordingBackend::new();
    let mut scene = Scene::new(&config(), &mut gpu);
    for _ in 0..3 {
        let object = cube(&mut gpu, [0.0; 3]);
        scene.add_object(object);
    }
    gpu.reset();

    scene.display(&mut gpu);

    let order: Vec<_> = gpu
        .calls
        .iter()
        .filter_map(|call| match call {
            Call::BindTexture { unit, texture } => Some((*unit, *texture)),
            Call::Draw { geometry, .. } => Some((99, *geometry)),
            _ => None,
        })
        .collect();
    assert_eq!(order, vec![(0, 0), (99, 0), (0, 1), (99, 1), (0, 2), (99, 2)]);
    assert_eq!(gpu.calls.first(), Some(&Call::Clear(ClearColour::BLACK)));
    assert!(matches!(gpu.calls.last(), Some(Call::WriteProjection(_))));
}

#[test]
fn display_advances_every_object_once() {
    let mut gpu = RecordingBackend::new();
    let mut scene = Scene::new(&config(), &mut gpu);
    scene.add_object(cube(&mut gpu, [1.0, 0.0, 0.0]));
    scene.add_object(cube(&mut gpu, [0.0; 3]));

    for _ in 0..10 {
        scene.frame(std::iter::empty(), &mut gpu).unwrap();
    }
    assert_eq!(scene.objects()[0].angles().x, 20.0);
    assert_eq!(scene.objects()[1].angles().x, 10.0);
    assert_eq!(gpu.count(|call| *call == Call::Present), 10);
}

#[test]
fn bound_keys_turn_the_camera() {
    let mut gpu = RecordingBackend::new();
    let mut scene = Scene::new(&config(), &mut gpu);

    scene
        .frame(
            [
                InputEvent::KeyDown(KeyCode::KeyD),
                InputEvent::KeyDown(KeyCode::KeyD),
                InputEvent::KeyDown(KeyCode::KeyA),
            ],
            &mut gpu,
        )
        .unwrap();
    assert_eq!(scene.camera().angle(), -5.0);

    let expected = multiply(&rotation_y(-5.0), scene.camera().projection());
    assert_eq!(gpu.last_projection(), Some(expected));
}

#[test]
fn unbound_keys_and_other_events_are_ignored() {
    let mut gpu = RecordingBackend::new();
    let mut scene = Scene::new(&config(), &mut gpu);
    gpu.reset();

    for event in [
        InputEvent::KeyDown(KeyCode::KeyW),
        InputEvent::KeyDown(KeyCode::Escape),
        InputEvent::Other,
    ] {
        scene.handle_event(event, &mut gpu);
    }
    assert_eq!(scene.camera().angle(), 0.0);
    assert_eq!(scene.state(), SceneState::Running);
    assert!(gpu.calls.is_empty());
}

#[test]
fn key_bindings_come_from_the_config() {
    let mut gpu = RecordingBackend::new();
    let mut settings = config();
    settings.rotate_left = KeyCode::ArrowLeft;
    settings.rotate_right = KeyCode::ArrowRight;
    let mut scene = Scene::new(&settings, &mut gpu);

    scene.handle_event(InputEvent::KeyDown(KeyCode::KeyA), &mut gpu);
    assert_eq!(scene.camera().angle(), 0.0);
    scene.handle_event(InputEvent::KeyDown(KeyCode::ArrowLeft), &mut gpu);
    assert_eq!(scene.camera().angle(), 5.0);
}

#[test]
fn quit_stops_the_scene_for_good() {
    let mut gpu = RecordingBackend::new();
    let mut scene = Scene::new(&config(), &mut gpu);
    scene.add_object(cube(&mut gpu, [1.0, 0.0, 0.0]));
    gpu.reset();

    let state = scene
        .frame([InputEvent::KeyDown(KeyCode::KeyA), InputEvent::Quit], &mut gpu)
        .unwrap();
    assert_eq!(state, SceneState::Stopped);
    assert!(!scene.is_running());
    // the key before the quit was still applied, but no frame was drawn
    assert_eq!(scene.camera().angle(), 5.0);
    assert_eq!(gpu.count(|call| *call == Call::Present), 0);
    assert_eq!(scene.objects()[0].angles().x, 10.0);

    let state = scene.frame([InputEvent::KeyDown(KeyCode::KeyA)], &mut gpu).unwrap();
    assert_eq!(state, SceneState::Stopped);
    assert_eq!(scene.camera().angle(), 5.0);
}

#[test]
fn clear_colour_comes_from_the_config() {
    let mut gpu = RecordingBackend::new();
    let mut settings = config();
    settings.clear_colour = ClearColour {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    let mut scene = Scene::new(&settings, &mut gpu);
    gpu.reset();

    scene.display(&mut gpu);
    assert_eq!(gpu.calls.first(), Some(&Call::Clear(settings.clear_colour)));
}
