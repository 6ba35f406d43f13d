use mnk_core::Mark;

/// Playout results through one position, counted for the root player.
///
/// Invariant: `wins + losses <= visits`; the remainder are draws.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub wins: u32,
    pub losses: u32,
    pub visits: u32,
}

impl Stats {
    /// Count one finished playout.
    pub fn record(&mut self, winner: Option<Mark>, root_player: Mark) {
        self.visits += 1;
        match winner {
            Some(mark) if mark == root_player => self.wins += 1,
            Some(_) => self.losses += 1,
            None => {}
        }
    }

    pub fn draws(&self) -> u32 {
        self.visits - self.wins - self.losses
    }

    /// `(wins - losses) / visits`, in `[-1, 1]`. Zero when unvisited.
    pub fn mean_score(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            (self.wins as f64 - self.losses as f64) / self.visits as f64
        }
    }

    /// UCB1 value of this child.
    ///
    /// `perspective` is `1.0` when the player choosing shares the root
    /// player's interests and `-1.0` otherwise. Unvisited children score
    /// `+inf`.
    pub fn ucb1(&self, parent_visits: u32, exploration: f64, perspective: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let visits = self.visits as f64;
        let parent = parent_visits.max(1) as f64;
        perspective * self.mean_score() + exploration * (parent.ln() / visits).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record() {
        let mut stats = Stats::default();
        stats.record(Some(Mark::X), Mark::X);
        stats.record(Some(Mark::O), Mark::X);
        stats.record(None, Mark::X);
        stats.record(Some(Mark::X), Mark::X);
        assert_eq!(
            stats,
            Stats {
                wins: 2,
                losses: 1,
                visits: 4
            }
        );
        assert_eq!(stats.draws(), 1);
        assert!((stats.mean_score() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_ucb1() {
        let stats = Stats {
            wins: 3,
            losses: 1,
            visits: 4,
        };
        let c = 2f64.sqrt();
        let expected = 0.5 + c * ((10f64).ln() / 4.0).sqrt();
        assert!((stats.ucb1(10, c, 1.0) - expected).abs() < 1e-12);

        let flipped = -0.5 + c * ((10f64).ln() / 4.0).sqrt();
        assert!((stats.ucb1(10, c, -1.0) - flipped).abs() < 1e-12);
    }

    #[test]
    fn test_unvisited_is_infinite() {
        assert_eq!(Stats::default().ucb1(5, 1.0, 1.0), f64::INFINITY);
    }

    #[test]
    fn test_zero_exploration_is_pure_exploitation() {
        let stats = Stats {
            wins: 1,
            losses: 3,
            visits: 4,
        };
        assert!((stats.ucb1(100, 0.0, 1.0) + 0.5).abs() < 1e-12);
    }
}
