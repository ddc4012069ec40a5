pub mod maker;

pub use maker::PasetoMaker;
pub use maker::KEY_SIZE;
