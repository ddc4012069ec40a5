pub mod maker;

pub use maker::JwtMaker;
pub use maker::MIN_SECRET_KEY_SIZE;
