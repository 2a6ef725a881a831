//! Simulation decorator that reports every action to an observer.

use crate::simulation::AntSimulation;
use ant_ir::AntActions;
use std::fmt;

/// An action the ant has just taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move,
    TurnLeft,
    TurnRight,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Move => "move",
            Action::TurnLeft => "left",
            Action::TurnRight => "right",
        };
        f.write_str(name)
    }
}

/// Wraps an [`AntSimulation`] and calls `observer` after each action with the
/// action and the resulting state. Sensing food is not an action.
pub struct ObservedSimulation<F>
where
    F: FnMut(Action, &AntSimulation),
{
    sim: AntSimulation,
    observer: F,
}

impl<F> ObservedSimulation<F>
where
    F: FnMut(Action, &AntSimulation),
{
    pub fn new(sim: AntSimulation, observer: F) -> Self {
        Self { sim, observer }
    }

    pub fn simulation(&self) -> &AntSimulation {
        &self.sim
    }

    pub fn into_inner(self) -> AntSimulation {
        self.sim
    }

    fn notify(&mut self, action: Action) {
        (self.observer)(action, &self.sim);
    }
}

impl<F> AntActions for ObservedSimulation<F>
where
    F: FnMut(Action, &AntSimulation),
{
    fn move_forward(&mut self) {
        self.sim.move_forward();
        self.notify(Action::Move);
    }

    fn turn_left(&mut self) {
        self.sim.turn_left();
        self.notify(Action::TurnLeft);
    }

    fn turn_right(&mut self) {
        self.sim.turn_right();
        self.notify(Action::TurnRight);
    }

    fn is_food_ahead(&self) -> bool {
        self.sim.is_food_ahead()
    }
}
