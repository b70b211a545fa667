use crate::config::EmotionThresholds;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Named facial-action scores from the face-landmark collaborator, each
/// in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlendShapes {
    pub brow_inner_up: f32,
    pub mouth_smile: f32,
    pub eye_squint: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum EmotionLabel {
    Nervous,
    Happy,
    Focused,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmotionSample {
    pub label: EmotionLabel,
    pub score: f32,
}

/// Map blend-shape scores to an emotion label.
///
/// Thresholds are checked in priority order: a raised brow wins over a smile,
/// a smile over squinted eyes. Anything below every threshold is `Neutral`
/// with the maximum observed score as confidence.
pub fn classify(shapes: &BlendShapes, thresholds: &EmotionThresholds) -> EmotionSample {
    if shapes.brow_inner_up > thresholds.brow_raise {
        EmotionSample {
            label: EmotionLabel::Nervous,
            score: shapes.brow_inner_up,
        }
    } else if shapes.mouth_smile > thresholds.smile {
        EmotionSample {
            label: EmotionLabel::Happy,
            score: shapes.mouth_smile,
        }
    } else if shapes.eye_squint > thresholds.eye_squint {
        EmotionSample {
            label: EmotionLabel::Focused,
            score: shapes.eye_squint,
        }
    } else {
        EmotionSample {
            label: EmotionLabel::Neutral,
            score: shapes
                .brow_inner_up
                .max(shapes.mouth_smile)
                .max(shapes.eye_squint),
        }
    }
}
