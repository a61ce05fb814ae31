use glam::Vec3;
use walkaround_common::{RoomConfig, Rgba, Transform};

/// Which of the four walls a box is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallSide {
    /// At -Z.
    Back,
    /// At +Z.
    Front,
    /// At -X.
    Left,
    /// At +X.
    Right,
}

impl WallSide {
    pub const ALL: [WallSide; 4] = [Self::Back, Self::Front, Self::Left, Self::Right];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Back => "back",
            Self::Front => "front",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// A solid axis-aligned box: a unit cube scaled and placed by `transform`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBox {
    pub side: WallSide,
    pub transform: Transform,
    pub color: Rgba,
}

/// Horizontal floor plane at y = 0 with a checker pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Floor {
    pub size: f32,
    /// Checker tiles per edge.
    pub repeat: u32,
}

/// Everything drawn in the demo.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomScene {
    pub floor: Floor,
    pub walls: Vec<SceneBox>,
    pub background: Rgba,
}

impl RoomScene {
    /// Floor plus four walls, each centred half a wall-height up.
    pub fn build(config: &RoomConfig) -> Self {
        let half = config.size / 2.0;
        let y = config.wall_height / 2.0;
        let color = Rgba::from_hex(config.wall_color);

        let walls = WallSide::ALL
            .iter()
            .map(|&side| {
                let (center, size) = match side {
                    WallSide::Back => (
                        Vec3::new(0.0, y, -half),
                        Vec3::new(config.size, config.wall_height, config.wall_thickness),
                    ),
                    WallSide::Front => (
                        Vec3::new(0.0, y, half),
                        Vec3::new(config.size, config.wall_height, config.wall_thickness),
                    ),
                    WallSide::Left => (
                        Vec3::new(-half, y, 0.0),
                        Vec3::new(config.wall_thickness, config.wall_height, config.size),
                    ),
                    WallSide::Right => (
                        Vec3::new(half, y, 0.0),
                        Vec3::new(config.wall_thickness, config.wall_height, config.size),
                    ),
                };
                SceneBox {
                    side,
                    transform: Transform::boxed(center, size),
                    color,
                }
            })
            .collect();

        tracing::debug!(size = config.size, "room scene built");

        Self {
            floor: Floor {
                size: config.floor_size,
                repeat: config.floor_repeat,
            },
            walls,
            background: Rgba::from_hex(config.background_color),
        }
    }

    pub fn wall(&self, side: WallSide) -> Option<&SceneBox> {
        self.walls.iter().find(|w| w.side == side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_four_walls() {
        let scene = RoomScene::build(&RoomConfig::default());
        assert_eq!(scene.walls.len(), 4);
        for side in WallSide::ALL {
            assert!(scene.wall(side).is_some(), "missing {} wall", side.name());
        }
    }

    #[test]
    fn walls_sit_on_room_edges() {
        let scene = RoomScene::build(&RoomConfig::default());
        let back = scene.wall(WallSide::Back).unwrap().transform;
        assert_eq!(back.position, Vec3::new(0.0, 5.0, -25.0));
        assert_eq!(back.scale, Vec3::new(50.0, 10.0, 1.0));

        let right = scene.wall(WallSide::Right).unwrap().transform;
        assert_eq!(right.position, Vec3::new(25.0, 5.0, 0.0));
        assert_eq!(right.scale, Vec3::new(1.0, 10.0, 50.0));
    }

    #[test]
    fn walls_stand_on_the_floor() {
        let scene = RoomScene::build(&RoomConfig::default());
        for wall in &scene.walls {
            let bottom = wall.transform.position.y - wall.transform.scale.y / 2.0;
            assert_eq!(bottom, 0.0);
        }
    }

    #[test]
    fn floor_and_colours_follow_config() {
        let scene = RoomScene::build(&RoomConfig::default());
        assert_eq!(scene.floor.size, 100.0);
        assert_eq!(scene.floor.repeat, 20);
        assert_eq!(scene.background, Rgba::from_hex(0xaaaaaa));
        assert_eq!(scene.walls[0].color, Rgba::from_hex(0x999999));
    }
}
