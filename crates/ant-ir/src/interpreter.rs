//! Tree-walking interpreter for ant programs.

use crate::node::Node;

/// What a program can ask of the ant it controls
pub trait AntActions {
    fn move_forward(&mut self);
    fn turn_left(&mut self);
    fn turn_right(&mut self);
    fn is_food_ahead(&self) -> bool;
}

/// Run `node` once against `ant`.
///
/// `IfFoodAhead` evaluates exactly one of its branches. Sequences run every
/// child in order, even when the ant has no steps left; callers check for
/// termination between passes.
pub fn execute<A: AntActions + ?Sized>(node: &Node, ant: &mut A) {
    match node {
        Node::Move => ant.move_forward(),
        Node::Left => ant.turn_left(),
        Node::Right => ant.turn_right(),
        Node::IfFoodAhead(branches) => {
            let [then, otherwise] = &**branches;
            if ant.is_food_ahead() {
                execute(then, ant);
            } else {
                execute(otherwise, ant);
            }
        }
        Node::Seq2(children) => children.iter().for_each(|child| execute(child, ant)),
        Node::Seq3(children) => children.iter().for_each(|child| execute(child, ant)),
    }
}
