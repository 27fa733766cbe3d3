mod choice;
mod go_no_go;
mod n_back;
mod simple;
mod stroop;

pub use choice::ChoiceReaction;
pub use go_no_go::GoNoGo;
pub use n_back::NBack;
pub use simple::SimpleReaction;
pub use stroop::{KeyMapError, Stroop, StroopKeyMap};
