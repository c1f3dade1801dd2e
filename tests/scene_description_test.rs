use digital_museum::{config::SceneDescription, resources::texture::decode_rgba};

const MUSEUM: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/scenes/museum.ron");

#[test]
fn museum_scene_parses() {
    let museum = SceneDescription::from_file(MUSEUM).expect("museum scene should parse");

    assert_eq!(museum.objects.len(), 11);
    let room = &museum.objects[0];
    assert_eq!(room.position, [0.0, 0.0, 0.0]);
    assert_eq!(room.scale, [10.0, 10.0, 10.0]);
    assert_eq!(room.texture, "textures/walls/white.png");
    assert!(museum.objects.iter().all(|o| o.angular_velocity == [0.0; 3]));
}

#[test]
fn every_museum_texture_decodes() {
    let museum = SceneDescription::from_file(MUSEUM).unwrap();
    for object in &museum.objects {
        let path = format!("{}/assets/{}", env!("CARGO_MANIFEST_DIR"), object.texture);
        let bytes = std::fs::read(&path).unwrap_or_else(|e| panic!("{path}: {e}"));
        let image = decode_rgba(&bytes, Some("png")).unwrap();
        assert!(image.width() > 0 && image.height() > 0);
    }
}

#[test]
fn angular_velocity_defaults_to_zero() {
    let scene = SceneDescription::from_ron_str(
        r#"(objects: [(position: (0.0, 1.0, 0.0), angles: (0.0, 0.0, 0.0), scale: (1.0, 1.0, 1.0), texture: "a.png")])"#,
    )
    .unwrap();
    assert_eq!(scene.objects[0].angular_velocity, [0.0; 3]);
    assert_eq!(scene.objects[0].position, [0.0, 1.0, 0.0]);
}

#[test]
fn missing_fields_are_rejected() {
    let result = SceneDescription::from_ron_str(r#"(objects: [(position: (0.0, 0.0, 0.0))])"#);
    assert!(result.is_err());
}

#[test]
fn missing_scene_file_names_the_path() {
    let err = SceneDescription::from_file("does/not/exist.ron").unwrap_err();
    assert!(format!("{err:#}").contains("does/not/exist.ron"));
}

#[test]
fn undecodable_texture_is_an_error() {
    assert!(decode_rgba(b"definitely not an image", None).is_err());
}
