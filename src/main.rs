use digital_museum::{
    config::{EngineConfig, SceneDescription},
    flow,
    resources::asset_path,
};

fn main() -> anyhow::Result<()> {
    let description = SceneDescription::from_file(asset_path("scenes/museum.ron"))?;
    flow::run(EngineConfig::default(), description)
}
