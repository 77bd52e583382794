use scavenger_core::STARTING_FOOD;
use scavenger_world::WorldConfig;

/// Tunables for a play session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Configuration handed to the world.
    pub world: WorldConfig,
    /// Food every new game starts with.
    pub starting_food: i32,
    /// Settle enemy steps immediately instead of waiting for the presenter to
    /// call [`crate::Session::motion_finished`].
    pub instant_motion: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            starting_food: STARTING_FOOD,
            instant_motion: true,
        }
    }
}
