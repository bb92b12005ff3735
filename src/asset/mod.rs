//! Sprite assets
//!
//! Every drawable in the game is referenced by a `SpriteId`. Images are
//! loaded once at startup from `assets/sprites/<name>.png`; anything missing
//! or undecodable is replaced by a solid placeholder so the game always has
//! something to draw.
//!
//! ```text
//! assets/
//! └── sprites/
//!     ├── player.png
//!     ├── patroller.png
//!     └── ...
//! ```

mod library;

pub use library::{SpriteLibrary, SPRITES_DIR};

use thiserror::Error;
use crate::rasterizer::Color;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("empty image")]
    Empty,
}

/// Handle for each drawable kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Player,
    Patroller,
    Pursuer,
    Collectible,
    PortalClosed,
    PortalOpen,
    Obstacle,
    Hazard,
}

impl SpriteId {
    pub const ALL: [SpriteId; 8] = [
        SpriteId::Player,
        SpriteId::Patroller,
        SpriteId::Pursuer,
        SpriteId::Collectible,
        SpriteId::PortalClosed,
        SpriteId::PortalOpen,
        SpriteId::Obstacle,
        SpriteId::Hazard,
    ];

    /// File stem under the sprites directory
    pub fn file_stem(self) -> &'static str {
        match self {
            SpriteId::Player => "player",
            SpriteId::Patroller => "patroller",
            SpriteId::Pursuer => "pursuer",
            SpriteId::Collectible => "collectible",
            SpriteId::PortalClosed => "portal_closed",
            SpriteId::PortalOpen => "portal_open",
            SpriteId::Obstacle => "obstacle",
            SpriteId::Hazard => "hazard",
        }
    }

    /// Placeholder fill when no image is available
    pub fn placeholder_color(self) -> Color {
        match self {
            SpriteId::Player => Color::new(80, 200, 255),
            SpriteId::Patroller => Color::new(230, 120, 40),
            SpriteId::Pursuer => Color::new(200, 40, 90),
            SpriteId::Collectible => Color::new(255, 220, 60),
            SpriteId::PortalClosed => Color::new(90, 80, 120),
            SpriteId::PortalOpen => Color::new(170, 110, 255),
            SpriteId::Obstacle => Color::new(70, 90, 70),
            SpriteId::Hazard => Color::new(220, 60, 60),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}
