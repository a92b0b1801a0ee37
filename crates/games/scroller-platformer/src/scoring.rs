/// Points for defeating one alien.
pub fn alien_points(double_score: bool) -> u32 {
    if double_score { 2 } else { 1 }
}

/// True once `score` reaches the winning threshold.
pub fn is_winner(score: u32, winner_points: u32) -> bool {
    score >= winner_points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_score_doubles_alien_points() {
        assert_eq!(alien_points(false), 1);
        assert_eq!(alien_points(true), 2);
    }

    #[test]
    fn winner_at_threshold() {
        assert!(!is_winner(24, 25));
        assert!(is_winner(25, 25));
        assert!(is_winner(26, 25));
    }
}
