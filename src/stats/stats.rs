pub struct SessionStats {
    mutations: usize,
    lookups: usize,
    snapshots: usize,
}

impl SessionStats {
    pub fn new() -> Self {
        SessionStats {
            mutations: 0,
            lookups: 0,
            snapshots: 0,
        }
    }

    /// Record into the statistics object that a structure was mutated
    /// (insert, remove, enqueue and friends)
    pub fn bump_mutations(&mut self) {
        self.mutations += 1
    }

    /// Record into the statistics object that a lookup was answered
    /// (search, find, path query)
    pub fn bump_lookups(&mut self) {
        self.lookups += 1
    }

    /// Record into the statistics object that `amount` snapshot rows were
    /// materialized for display
    pub fn bump_snapshots(&mut self, amount: usize) {
        self.snapshots += amount
    }

    pub fn get_mutations(&self) -> usize {
        self.mutations
    }

    pub fn get_lookups(&self) -> usize {
        self.lookups
    }

    pub fn get_snapshots(&self) -> usize {
        self.snapshots
    }

    /// Write all contents of the stats object to stdout
    pub fn report(&self) {
        println!(
            "mutations : {}, lookups : {}, snapshot rows : {}",
            self.mutations, self.lookups, self.snapshots
        );
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        SessionStats::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_initialized_to_zero() {
        let stats = SessionStats::new();
        assert_eq!(stats.get_mutations(), 0);
        assert_eq!(stats.get_lookups(), 0);
        assert_eq!(stats.get_snapshots(), 0);
    }

    #[test]
    fn test_default_stats_initialized_to_zero() {
        let stats = SessionStats::default();
        assert_eq!(stats.get_mutations(), 0);
        assert_eq!(stats.get_lookups(), 0);
    }

    #[test]
    fn test_bump_mutations_increments_by_one() {
        let mut stats = SessionStats::new();
        stats.bump_mutations();
        assert_eq!(stats.get_mutations(), 1);
        assert_eq!(stats.get_lookups(), 0);
    }

    #[test]
    fn test_bump_snapshots_adds_amount() {
        let mut stats = SessionStats::new();
        stats.bump_snapshots(8);
        stats.bump_snapshots(3);
        assert_eq!(stats.get_snapshots(), 11);
    }

    #[test]
    fn test_combined_operations() {
        let mut stats = SessionStats::new();
        stats.bump_mutations();
        stats.bump_lookups();
        stats.bump_mutations();
        stats.bump_snapshots(4);

        assert_eq!(stats.get_mutations(), 2);
        assert_eq!(stats.get_lookups(), 1);
        assert_eq!(stats.get_snapshots(), 4);
    }

    #[test]
    fn test_report_does_not_panic() {
        let mut stats = SessionStats::new();
        stats.bump_mutations();
        stats.bump_snapshots(42);
        // Just verify report doesn't panic
        stats.report();
    }
}
