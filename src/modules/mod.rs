pub mod gate;
pub mod perception;
pub mod brain;
