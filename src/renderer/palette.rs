//! Colours

use crate::sim::{Background, Emotion, ObstacleKind};

/// Backdrop for each theme
pub fn background(theme: Background) -> &'static str {
    match theme {
        Background::Daytime => "#81BFDA",   // Sky blue
        Background::Nighttime => "#074799", // Dark blue
        Background::Garden => "#D6CFB4",
        Background::Snow => "#E5D9F2",
    }
}

/// Ball body colour by mood
pub fn ball(emotion: Emotion) -> &'static str {
    match emotion {
        Emotion::Happy => "yellow",
        Emotion::Sad => "blue",
        Emotion::Neutral => "orange",
    }
}

pub fn obstacle(kind: ObstacleKind) -> &'static str {
    match kind {
        ObstacleKind::Hole => "white",
        ObstacleKind::Spike => "black",
        ObstacleKind::Monster => "green",
        ObstacleKind::Block => "gray",
    }
}

pub const EYE_WHITE: &str = "white";
pub const PUPIL: &str = "black";
pub const MONSTER_MOUTH: &str = "red";
pub const HUD_TEXT: &str = "black";
pub const HUD_FONT: &str = "20px Arial";
