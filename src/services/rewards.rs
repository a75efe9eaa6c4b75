use serde::Serialize;

use crate::models::Difficulty;

/// What completing a task pays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reward {
    pub xp: i64,
    pub coins: i64,
}

pub fn reward_for(difficulty: Difficulty) -> Reward {
    match difficulty {
        Difficulty::Easy => Reward { xp: 5, coins: 5 },
        Difficulty::Medium => Reward { xp: 10, coins: 10 },
        Difficulty::Hard => Reward { xp: 20, coins: 20 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harder_tasks_pay_more() {
        let easy = reward_for(Difficulty::Easy);
        let medium = reward_for(Difficulty::Medium);
        let hard = reward_for(Difficulty::Hard);
        assert!(easy.xp < medium.xp && medium.xp < hard.xp);
        assert!(easy.coins < medium.coins && medium.coins < hard.coins);
        assert_eq!(hard, Reward { xp: 20, coins: 20 });
    }
}
