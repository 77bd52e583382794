//! Turn counter with an explicit, ordered listener list.

use scavenger_core::EnemyId;

/// Something that acts once per turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Listener {
    /// The session's own food upkeep.
    FoodDecay,
    /// An enemy on the current board.
    Enemy(EnemyId),
}

/// Listeners to dispatch for one turn, in registration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tick {
    /// Turn count after the increment.
    pub turn: u64,
    /// Subscribers at the moment the turn started.
    pub listeners: Vec<Listener>,
}

/// Monotonic turn counter that does not own its listeners' state.
#[derive(Clone, Debug)]
pub struct TurnBroadcaster {
    turn: u64,
    listeners: Vec<Listener>,
}

impl Default for TurnBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnBroadcaster {
    /// Creates a broadcaster on turn 1 with nobody listening.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            turn: 1,
            listeners: Vec::new(),
        }
    }

    /// Current turn count; 1 before any tick.
    #[must_use]
    pub const fn turn(&self) -> u64 {
        self.turn
    }

    /// Current subscribers in registration order.
    #[must_use]
    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    /// Appends `listener`; returns `false` when it was already subscribed.
    pub fn subscribe(&mut self, listener: Listener) -> bool {
        if self.listeners.contains(&listener) {
            return false;
        }
        self.listeners.push(listener);
        true
    }

    /// Removes `listener`; returns `false` when it was not subscribed.
    pub fn unsubscribe(&mut self, listener: Listener) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|existing| *existing != listener);
        self.listeners.len() != before
    }

    /// Drops every enemy subscription, keeping the session's own listeners.
    pub fn unsubscribe_enemies(&mut self) {
        self.listeners
            .retain(|listener| !matches!(listener, Listener::Enemy(_)));
    }

    /// Advances the counter, then hands out the listeners for the new turn.
    pub fn tick(&mut self) -> Tick {
        self.turn = self.turn.saturating_add(1);
        Tick {
            turn: self.turn,
            listeners: self.listeners.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_increments_before_dispatch() {
        let mut turns = TurnBroadcaster::new();
        assert_eq!(turns.turn(), 1);
        assert_eq!(turns.tick().turn, 2);
        assert_eq!(turns.turn(), 2);
        assert_eq!(turns.tick().turn, 3);
    }

    #[test]
    fn listeners_fire_in_registration_order() {
        let mut turns = TurnBroadcaster::new();
        assert!(turns.subscribe(Listener::FoodDecay));
        assert!(turns.subscribe(Listener::Enemy(EnemyId::new(4))));
        assert!(turns.subscribe(Listener::Enemy(EnemyId::new(2))));

        assert_eq!(
            turns.tick().listeners,
            vec![
                Listener::FoodDecay,
                Listener::Enemy(EnemyId::new(4)),
                Listener::Enemy(EnemyId::new(2)),
            ]
        );
    }

    #[test]
    fn duplicate_subscriptions_are_ignored() {
        let mut turns = TurnBroadcaster::new();
        assert!(turns.subscribe(Listener::FoodDecay));
        assert!(!turns.subscribe(Listener::FoodDecay));
        assert_eq!(turns.listeners().len(), 1);
    }

    #[test]
    fn unsubscribing_enemies_keeps_food_decay() {
        let mut turns = TurnBroadcaster::new();
        let _ = turns.subscribe(Listener::FoodDecay);
        let _ = turns.subscribe(Listener::Enemy(EnemyId::new(0)));
        let _ = turns.subscribe(Listener::Enemy(EnemyId::new(1)));

        assert!(turns.unsubscribe(Listener::Enemy(EnemyId::new(0))));
        assert!(!turns.unsubscribe(Listener::Enemy(EnemyId::new(0))));
        turns.unsubscribe_enemies();

        assert_eq!(turns.listeners(), &[Listener::FoodDecay]);
    }
}
