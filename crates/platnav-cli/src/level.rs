use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use platnav::core::{Aabb, SolidBoxes, Vec2};

#[derive(Debug, Deserialize)]
struct BoxSpec {
    min: [f32; 2],
    max: [f32; 2],
}

impl From<BoxSpec> for Aabb {
    fn from(spec: BoxSpec) -> Self {
        Aabb::new(spec.min.into(), spec.max.into())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LevelFile {
    solids: Vec<BoxSpec>,
    /// Navigable region; defaults to the union of the solids.
    #[serde(default)]
    bounds: Option<BoxSpec>,
}

/// Solid geometry plus the region graphs are built over.
#[derive(Debug, Clone)]
pub struct Level {
    pub world: SolidBoxes,
    pub bounds: Aabb,
}

impl Level {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read level from {}", path.display()))?;
        let level = Self::parse(&content)
            .with_context(|| format!("Failed to load level from {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            solids = level.world.solids.len(),
            "Loaded level"
        );
        Ok(level)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let file: LevelFile = serde_yaml::from_str(content).context("Invalid level YAML")?;
        let world = SolidBoxes::new(file.solids.into_iter().map(Aabb::from).collect());

        let bounds = match file.bounds {
            Some(spec) => Aabb::from(spec),
            None => match world.bounds() {
                Some(bounds) => bounds,
                None => bail!("Level has no solids and no bounds"),
            },
        };
        Ok(Self { world, bounds })
    }
}

/// Parse `"x,y"` into a point.
pub fn parse_point(s: &str) -> std::result::Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x in `{s}`: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y in `{s}`: {e}"))?;
    let p = Vec2::new(x, y);
    if !p.is_finite() {
        return Err(format!("point `{s}` is not finite"));
    }
    Ok(p)
}
