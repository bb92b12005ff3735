//! Campaign: the ordered list of levels a run goes through
//!
//! Ships with built-in levels; a directory of `.ron` / brotli level files
//! can replace them. A campaign always holds at least one level.

use std::path::Path;
use super::level::{Axis, HostileDef, HostileKind, LevelDef, LevelError, TileRect, load_level, validate_level};

#[derive(Debug, Clone)]
pub struct Campaign {
    levels: Vec<LevelDef>,
}

impl Campaign {
    pub fn new(levels: Vec<LevelDef>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::Validation("campaign has no levels".to_string()));
        }
        for level in &levels {
            validate_level(level)?;
        }
        Ok(Self { levels })
    }

    /// The shipped levels
    pub fn builtin() -> Self {
        Self { levels: vec![foothills(), ravine(), summit()] }
    }

    /// Load every level file in `dir`, ordered by level id
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self, LevelError> {
        let mut levels = Vec::new();
        for entry in std::fs::read_dir(dir.as_ref())? {
            let path = entry?.path();
            if path.is_file() && path.extension().map(|e| e == "ron").unwrap_or(false) {
                levels.push(load_level(&path)?);
            }
        }
        levels.sort_by_key(|l| l.id);
        Self::new(levels)
    }

    /// Levels from `dir` if it loads cleanly, otherwise the built-in set
    pub fn discover<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Self::builtin();
        }
        match Self::load_dir(dir) {
            Ok(campaign) => {
                log::info!("Loaded {} levels from {}", campaign.len(), dir.display());
                campaign
            }
            Err(e) => {
                log::warn!("Using built-in levels, {} failed: {}", dir.display(), e);
                Self::builtin()
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<&LevelDef> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Opening level. Every constructor rejects or never builds an empty list.
    pub fn first(&self) -> &LevelDef {
        &self.levels[0]
    }
}

fn rect(x: f32, y: f32, w: f32, h: f32) -> TileRect {
    TileRect::new(x, y, w, h)
}

/// Thin one-way-looking ledge (still fully solid)
fn ledge(x: f32, y: f32, w: f32) -> TileRect {
    TileRect::new(x, y, w, 0.5)
}

/// Half-tile spike strip resting on top of `floor_y`
fn spikes(x: f32, floor_y: f32, w: f32) -> TileRect {
    TileRect::new(x, floor_y - 0.5, w, 0.5)
}

fn patrol(x: f32, y: f32, axis: Axis, min: f32, max: f32) -> HostileDef {
    HostileDef { x, y, kind: HostileKind::Patrol { axis, min, max } }
}

fn pursuer(x: f32, y: f32) -> HostileDef {
    HostileDef { x, y, kind: HostileKind::Pursuer }
}

fn foothills() -> LevelDef {
    LevelDef {
        id: 1,
        name: "Foothills".to_string(),
        width: 56.0,
        height: 20.0,
        quota: 3,
        time_budget: Some(120.0),
        spawn: (2.0, 16.0),
        portal: None,
        obstacles: vec![
            rect(0.0, 18.0, 20.0, 2.0),
            rect(23.0, 18.0, 33.0, 2.0),
            ledge(6.0, 15.0, 5.0),
            ledge(12.0, 12.0, 5.0),
            ledge(19.0, 9.0, 5.0),
            ledge(26.0, 7.0, 6.0),
            ledge(34.0, 9.0, 5.0),
            ledge(40.0, 6.5, 4.0),
            ledge(44.0, 4.0, 8.0),
            ledge(46.0, 14.0, 6.0),
        ],
        hazards: vec![spikes(28.0, 18.0, 3.0), spikes(37.0, 18.0, 2.0)],
        hostiles: vec![patrol(40.0, 17.25, Axis::Horizontal, 40.0, 52.0)],
        dialogue: vec![
            "The old portal sleeps at the top of the hills.".to_string(),
            "Gather three sparks to wake it. Mind the spikes.".to_string(),
        ],
    }
}

fn ravine() -> LevelDef {
    LevelDef {
        id: 2,
        name: "Ravine".to_string(),
        width: 64.0,
        height: 22.0,
        quota: 4,
        time_budget: Some(100.0),
        spawn: (2.0, 18.0),
        portal: None,
        obstacles: vec![
            rect(0.0, 20.0, 14.0, 2.0),
            rect(17.0, 20.0, 12.0, 2.0),
            rect(32.0, 20.0, 32.0, 2.0),
            ledge(5.0, 17.0, 4.0),
            ledge(10.0, 14.0, 5.0),
            ledge(17.0, 11.0, 5.0),
            ledge(24.0, 14.0, 4.0),
            ledge(30.0, 11.0, 5.0),
            ledge(37.0, 8.0, 5.0),
            ledge(44.0, 11.0, 5.0),
            ledge(51.0, 8.0, 5.0),
            ledge(57.0, 5.0, 6.0),
        ],
        hazards: vec![
            spikes(20.0, 20.0, 3.0),
            spikes(36.0, 20.0, 4.0),
            spikes(46.0, 20.0, 2.0),
            spikes(31.0, 11.0, 1.0),
        ],
        hostiles: vec![
            patrol(27.0, 10.0, Axis::Vertical, 8.0, 16.0),
            patrol(40.0, 19.25, Axis::Horizontal, 40.0, 60.0),
            pursuer(60.0, 2.0),
        ],
        dialogue: vec![
            "Something stirs in the ravine. It has seen you.".to_string(),
            "Four sparks this time. Keep moving.".to_string(),
        ],
    }
}

fn summit() -> LevelDef {
    LevelDef {
        id: 3,
        name: "Summit".to_string(),
        width: 72.0,
        height: 24.0,
        quota: 5,
        time_budget: Some(110.0),
        spawn: (2.0, 20.0),
        portal: None,
        obstacles: vec![
            rect(0.0, 22.0, 10.0, 2.0),
            rect(13.0, 22.0, 8.0, 2.0),
            rect(24.0, 22.0, 10.0, 2.0),
            rect(38.0, 22.0, 34.0, 2.0),
            ledge(4.0, 19.0, 4.0),
            ledge(9.0, 16.0, 4.0),
            ledge(15.0, 13.0, 4.0),
            ledge(21.0, 16.0, 4.0),
            ledge(27.0, 13.0, 4.0),
            ledge(33.0, 10.0, 4.0),
            ledge(39.0, 13.0, 5.0),
            ledge(46.0, 10.0, 4.0),
            ledge(52.0, 7.0, 4.0),
            ledge(58.0, 10.0, 5.0),
            ledge(64.0, 6.0, 7.0),
            rect(66.0, 2.0, 2.0, 1.0),
        ],
        hazards: vec![
            spikes(26.0, 22.0, 6.0),
            spikes(42.0, 22.0, 3.0),
            spikes(50.0, 22.0, 6.0),
            spikes(29.0, 13.0, 1.0),
            spikes(48.0, 10.0, 1.0),
        ],
        hostiles: vec![
            patrol(15.0, 21.25, Axis::Horizontal, 13.0, 20.0),
            patrol(36.0, 9.0, Axis::Vertical, 6.0, 14.0),
            pursuer(68.0, 3.0),
            pursuer(40.0, 2.0),
        ],
        dialogue: vec![
            "The summit. The last portal waits above the clouds.".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_levels_validate() {
        let campaign = Campaign::builtin();
        assert_eq!(campaign.len(), 3);
        for i in 0..campaign.len() {
            validate_level(campaign.get(i).unwrap()).unwrap();
        }
        let ids: Vec<u32> = (0..campaign.len()).map(|i| campaign.get(i).unwrap().id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(campaign.first().id, 1);
    }

    #[test]
    fn test_empty_campaign_rejected() {
        assert!(Campaign::new(vec![]).is_err());
    }

    #[test]
    fn test_load_dir_orders_by_id() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut a = foothills();
        a.id = 9;
        let b = ravine();
        for (name, level) in [("a.ron", &a), ("b.ron", &b)] {
            let text = ron::ser::to_string(level).unwrap();
            std::fs::write(dir.path().join(name), text).unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let campaign = Campaign::load_dir(dir.path()).unwrap();
        assert_eq!(campaign.len(), 2);
        assert_eq!(campaign.get(0).unwrap().id, 2);
        assert_eq!(campaign.get(1).unwrap().id, 9);
    }

    #[test]
    fn test_discover_missing_dir_uses_builtin() {
        let campaign = Campaign::discover("/definitely/not/a/level/dir");
        assert_eq!(campaign.len(), 3);
    }
}
