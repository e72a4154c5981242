use crate::config::game::GameConfig;

/// Points after a decision. Never drops below zero.
pub fn score_after(score: u32, correct: bool, config: &GameConfig) -> u32 {
    if correct {
        score.saturating_add(config.correct_points)
    } else {
        score.saturating_sub(config.wrong_points)
    }
}

/// Clock after a decision, clamped to `[0, initial_time]`.
pub fn time_after(time_left: u32, correct: bool, config: &GameConfig) -> u32 {
    let delta = if correct {
        i64::from(config.correct_bonus)
    } else {
        -i64::from(config.wrong_penalty)
    };
    let next = (i64::from(time_left) + delta).clamp(0, i64::from(config.initial_time));
    // Clamped into u32 range above.
    u32::try_from(next).unwrap_or(0)
}
