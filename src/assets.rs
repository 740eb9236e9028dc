//! Asset loading
//!
//! Every texture is loaded and fully decoded before the session is
//! constructed, so the simulation can trust the sizes it was built from.
//! Any failure aborts startup with the offending path; no partial asset
//! set ever reaches the game.

use macroquad::logging::info;
use macroquad::texture::{load_texture, FilterMode, Texture2D};
use thiserror::Error;

use crate::config::AssetPaths;

#[derive(Debug, Error)]
#[error("failed to load {path}: {reason}")]
pub struct AssetError {
    pub path: String,
    pub reason: String,
}

/// All decoded images, grouped per role. Indices line up with the
/// simulation's `image_index` fields: `backgrounds[i]` is layer `i`,
/// `obstacles[i]` is obstacle pool entry `i`.
pub struct Assets {
    pub backgrounds: Vec<Texture2D>,
    pub stand: Vec<Texture2D>,
    pub run: Vec<Texture2D>,
    pub jump: Vec<Texture2D>,
    pub obstacles: Vec<Texture2D>,
    pub life_icon: Texture2D,
}

impl Assets {
    pub async fn load(paths: &AssetPaths) -> Result<Self, AssetError> {
        let assets = Self {
            backgrounds: load_set(&paths.backgrounds).await?,
            stand: load_set(&paths.stand).await?,
            run: load_set(&paths.run).await?,
            jump: load_set(&paths.jump).await?,
            obstacles: load_set(&paths.obstacles).await?,
            life_icon: load_one(&paths.life_icon).await?,
        };
        info!(
            "assets loaded: {} layers, {}+{}+{} player frames, {} obstacles",
            assets.backgrounds.len(),
            assets.stand.len(),
            assets.run.len(),
            assets.jump.len(),
            assets.obstacles.len()
        );
        Ok(assets)
    }
}

/// Size of the first frame in a set; zero for an empty set (which config
/// validation rejects before this is ever used).
pub fn frame_dims(set: &[Texture2D]) -> (f32, f32) {
    set.first().map(|t| (t.width(), t.height())).unwrap_or((0.0, 0.0))
}

async fn load_one(path: &str) -> Result<Texture2D, AssetError> {
    let texture = load_texture(path).await.map_err(|e| AssetError {
        path: path.to_string(),
        reason: format!("{e:?}"),
    })?;
    // Pixel art: no bilinear smearing
    texture.set_filter(FilterMode::Nearest);
    Ok(texture)
}

async fn load_set(paths: &[String]) -> Result<Vec<Texture2D>, AssetError> {
    let mut textures = Vec::with_capacity(paths.len());
    for path in paths {
        textures.push(load_one(path).await?);
    }
    Ok(textures)
}
